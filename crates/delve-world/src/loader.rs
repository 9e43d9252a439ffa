//! World-graph reader: turns a YAML world definition into a [`WorldMap`].
//!
//! The document shape is:
//!
//! ```yaml
//! starting_location: cabin        # optional, defaults to the first location
//! locations:
//!   - name: cabin
//!     description: A log cabin in the woods
//!     artefacts:
//!       - { name: axe, description: A razor sharp axe }
//!     furniture: []
//!     characters: []
//! paths:
//!   - { from: cabin, to: forest }
//! ```
//!
//! Unknown keys (for example a misspelt entity section) are rejected, so a
//! malformed file fails at startup rather than silently dropping entities.

use std::path::Path;

use delve_types::{Entity, EntityKind};
use serde::Deserialize;
use tracing::info;

use crate::error::WorldError;
use crate::location::LocationState;
use crate::world_map::WorldMap;

/// Errors that can occur when reading a world definition.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read the world file from disk.
    #[error("failed to read world file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse world YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The definition parsed but describes an invalid world.
    #[error("invalid world definition: {source}")]
    World {
        /// The underlying structural error.
        #[from]
        source: WorldError,
    },
}

impl From<serde_yml::Error> for LoadError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level world document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldFile {
    /// Name of the starting location.
    #[serde(default)]
    pub starting_location: Option<String>,

    /// Declared locations in file order.
    pub locations: Vec<LocationDef>,

    /// One-way paths between declared locations.
    #[serde(default)]
    pub paths: Vec<PathDef>,
}

/// One declared location and its initial contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationDef {
    /// Unique location name.
    pub name: String,

    /// Narrative description.
    #[serde(default)]
    pub description: String,

    /// Portable items initially here.
    #[serde(default)]
    pub artefacts: Vec<Entity>,

    /// Fixtures initially here.
    #[serde(default)]
    pub furniture: Vec<Entity>,

    /// Characters initially here.
    #[serde(default)]
    pub characters: Vec<Entity>,
}

/// A directed path between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathDef {
    /// Source location name.
    pub from: String,
    /// Target location name.
    pub to: String,
}

impl LocationDef {
    fn into_state(self) -> LocationState {
        let mut state = LocationState::new(self.name, self.description);
        let sections = [
            (EntityKind::Artefact, self.artefacts),
            (EntityKind::Furniture, self.furniture),
            (EntityKind::Character, self.characters),
        ];
        for (kind, entities) in sections {
            for entity in entities {
                state.place(kind, entity);
            }
        }
        state
    }
}

impl WorldFile {
    /// Validate the definition and build the world graph.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] for any structural problem, see
    /// [`WorldMap::build`]. An entity listed twice in the same section is
    /// also reported as [`WorldError::DuplicateEntity`].
    pub fn into_world_map(self) -> Result<WorldMap, WorldError> {
        for def in &self.locations {
            let mut seen = std::collections::BTreeSet::new();
            let all = def.artefacts.iter().chain(&def.furniture).chain(&def.characters);
            for entity in all {
                if !seen.insert(entity.name.as_str()) {
                    return Err(WorldError::DuplicateEntity {
                        name: entity.name.clone(),
                        first: def.name.clone(),
                        second: def.name.clone(),
                    });
                }
            }
        }

        let paths: Vec<(String, String)> = self.paths.into_iter().map(|p| (p.from, p.to)).collect();
        let locations = self.locations.into_iter().map(LocationDef::into_state).collect();
        WorldMap::build(locations, &paths, self.starting_location.as_deref())
    }
}

/// Parse a world definition from a YAML string.
///
/// # Errors
///
/// Returns [`LoadError::Yaml`] for malformed YAML or [`LoadError::World`]
/// for a structurally invalid world.
pub fn parse_world(yaml: &str) -> Result<WorldMap, LoadError> {
    let file: WorldFile = serde_yml::from_str(yaml)?;
    Ok(file.into_world_map()?)
}

/// Read and parse a world definition from disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise as
/// [`parse_world`].
pub fn load_world(path: &Path) -> Result<WorldMap, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    let map = parse_world(&contents)?;
    info!(
        path = %path.display(),
        location_count = map.location_count(),
        starting_location = map.starting_location(),
        "World file loaded"
    );
    Ok(map)
}
