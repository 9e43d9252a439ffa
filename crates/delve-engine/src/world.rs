//! The complete mutable game state passed through every command.

use std::collections::BTreeMap;

use delve_types::Player;
use delve_world::{WorldError, WorldMap, create_starting_world};

use crate::catalog::{ActionCatalog, create_starting_actions};
use crate::players::PlayerRegistry;

/// Location graph, declared actions, and known players.
///
/// Fields are public so a command can borrow the catalog, one player, and
/// the map at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    /// Locations, entities, and paths.
    pub map: WorldMap,
    /// Declared actions indexed by trigger.
    pub catalog: ActionCatalog,
    /// Every player seen so far.
    pub players: PlayerRegistry,
}

impl World {
    /// Assemble a world with no players yet.
    pub fn new(map: WorldMap, catalog: ActionCatalog) -> Self {
        Self {
            map,
            catalog,
            players: PlayerRegistry::new(),
        }
    }

    /// The built-in starting world with its action set.
    pub fn starting() -> Result<Self, WorldError> {
        Ok(Self::new(create_starting_world()?, create_starting_actions()))
    }

    /// Look up a player by name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    /// Ownership counts across all locations and all player inventories.
    ///
    /// Every value is 1 in a consistent world.
    pub fn ownership_census(&self) -> BTreeMap<String, usize> {
        self.map.ownership_census(self.players.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_world_has_actions_and_no_players() {
        let world = World::starting().ok();
        assert_eq!(world.as_ref().map(|w| w.players.is_empty()), Some(true));
        assert_eq!(world.as_ref().map(|w| w.catalog.is_empty()), Some(false));
        assert!(world.is_some_and(|w| w.ownership_census().values().all(|n| *n == 1)));
    }
}
