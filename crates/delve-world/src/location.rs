//! Location node with entity ownership sets and outgoing paths.
//!
//! A [`LocationState`] owns three disjoint entity sets (artefacts,
//! furniture, characters), the names of the players standing in it, and the
//! names of the locations reachable from it. Paths are one-way; a reverse
//! path exists only if it was declared separately or produced later.

use std::collections::{BTreeMap, BTreeSet};

use delve_types::{Described, Entity, EntityKind};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Mutable runtime state for a location in the world graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationState {
    /// Unique location name.
    pub name: String,
    /// Narrative description shown by `look`.
    pub description: String,
    /// Portable items lying here, keyed by name.
    pub artefacts: BTreeMap<String, Entity>,
    /// Fixtures here, keyed by name.
    pub furniture: BTreeMap<String, Entity>,
    /// Non-player characters here, keyed by name.
    pub characters: BTreeMap<String, Entity>,
    /// Names of players standing here.
    pub players: BTreeSet<String>,
    /// Names of locations reachable in one step.
    pub adjacent: BTreeSet<String>,
}

impl LocationState {
    /// Create an empty location.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper to place an entity of the given kind.
    #[must_use]
    pub fn with(mut self, kind: EntityKind, entity: Entity) -> Self {
        self.place(kind, entity);
        self
    }

    /// The ownership set for a kind.
    pub const fn entities(&self, kind: EntityKind) -> &BTreeMap<String, Entity> {
        match kind {
            EntityKind::Artefact => &self.artefacts,
            EntityKind::Furniture => &self.furniture,
            EntityKind::Character => &self.characters,
        }
    }

    /// The ownership set for a kind, mutably.
    pub const fn entities_mut(&mut self, kind: EntityKind) -> &mut BTreeMap<String, Entity> {
        match kind {
            EntityKind::Artefact => &mut self.artefacts,
            EntityKind::Furniture => &mut self.furniture,
            EntityKind::Character => &mut self.characters,
        }
    }

    /// Place an entity in the set for its kind.
    pub fn place(&mut self, kind: EntityKind, entity: Entity) {
        self.entities_mut(kind).insert(entity.name.clone(), entity);
    }

    /// Remove an entity from the set for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotAtLocation`] if no such entity is here.
    pub fn take(&mut self, kind: EntityKind, name: &str) -> Result<Entity, WorldError> {
        self.entities_mut(kind)
            .remove(name)
            .ok_or_else(|| WorldError::EntityNotAtLocation {
                kind,
                name: name.to_owned(),
                location: self.name.clone(),
            })
    }

    /// Which set, if any, holds an entity with this name.
    pub fn kind_of(&self, name: &str) -> Option<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| self.entities(*kind).contains_key(name))
    }

    /// Whether any of the three entity sets holds this name.
    pub fn contains_entity(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    /// Iterate over every entity placed here with its kind.
    pub fn all_entities(&self) -> impl Iterator<Item = (EntityKind, &Entity)> {
        EntityKind::ALL
            .into_iter()
            .flat_map(move |kind| self.entities(kind).values().map(move |e| (kind, e)))
    }

    /// Register a player as standing here.
    pub fn add_player(&mut self, player: &str) {
        self.players.insert(player.to_owned());
    }

    /// Remove a player from this location's player set.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotAtLocation`] if the player is not here.
    pub fn remove_player(&mut self, player: &str) -> Result<(), WorldError> {
        if !self.players.remove(player) {
            return Err(WorldError::PlayerNotAtLocation {
                player: player.to_owned(),
                location: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Check whether a specific player is here.
    pub fn contains_player(&self, player: &str) -> bool {
        self.players.contains(player)
    }

    /// Open a one-way path to another location.
    pub fn add_adjacent(&mut self, location: &str) -> bool {
        self.adjacent.insert(location.to_owned())
    }

    /// Close the path to another location, if one exists.
    pub fn remove_adjacent(&mut self, location: &str) -> bool {
        self.adjacent.remove(location)
    }

    /// Whether a path leads from here to `location`.
    pub fn is_adjacent(&self, location: &str) -> bool {
        self.adjacent.contains(location)
    }
}

impl Described for LocationState {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
