//! Named entities that can be owned by a location, a player, or the storeroom.
//!
//! Every artefact, piece of furniture, and character is the same [`Entity`]
//! record; which set it currently sits in is what gives it its
//! [`EntityKind`]. The kind never changes once the world is built.

use serde::{Deserialize, Serialize};

/// Anything with a display name and a description.
///
/// Implemented by entities, players, and locations so that listings such as
/// `look` can be rendered uniformly.
pub trait Described {
    /// The identity name.
    fn name(&self) -> &str;

    /// Free-text description shown to players.
    fn description(&self) -> &str;
}

/// A named, described thing placed somewhere in the world.
///
/// `name` is the identity key: two entities with the same name are the
/// same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identity name (lower-case in practice).
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl Entity {
    /// Create a new entity.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Described for Entity {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Which of a location's ownership sets an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Portable item; the only kind a player can carry.
    Artefact,
    /// Immovable, location-scoped fixture.
    Furniture,
    /// Non-player actor.
    Character,
}

impl EntityKind {
    /// All kinds, in the order location listings present them.
    pub const ALL: [Self; 3] = [Self::Artefact, Self::Furniture, Self::Character];
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Artefact => write!(f, "artefact"),
            Self::Furniture => write!(f, "furniture"),
            Self::Character => write!(f, "character"),
        }
    }
}
