//! Built-in starting world for the Delve adventure engine.
//!
//! Five playable locations (cabin, forest, cellar, riverbank, clearing) plus
//! the storeroom, which holds everything actions can bring into play. The
//! same world ships as `config/world.yaml`; this copy is used when no world
//! file is configured and by tests.

use delve_types::{Entity, EntityKind, STOREROOM};

use crate::error::WorldError;
use crate::location::LocationState;
use crate::world_map::WorldMap;

/// Helper to build a [`LocationState`] from per-kind `(name, description)` lists.
fn loc(
    name: &str,
    desc: &str,
    artefacts: &[(&str, &str)],
    furniture: &[(&str, &str)],
    characters: &[(&str, &str)],
) -> LocationState {
    let mut state = LocationState::new(name, desc);
    let sections = [
        (EntityKind::Artefact, artefacts),
        (EntityKind::Furniture, furniture),
        (EntityKind::Character, characters),
    ];
    for (kind, entries) in sections {
        for (entity_name, entity_desc) in entries {
            state.place(kind, Entity::new(*entity_name, *entity_desc));
        }
    }
    state
}

/// Helper to build a one-way path.
fn path(from: &str, to: &str) -> (String, String) {
    (from.to_owned(), to.to_owned())
}

/// Create the default starting world.
///
/// # Errors
///
/// Returns [`WorldError`] if the map construction fails (should not happen
/// with valid hard-coded data).
pub fn create_starting_world() -> Result<WorldMap, WorldError> {
    let locations = vec![
        loc(
            "cabin",
            "A log cabin in the woods",
            &[
                ("potion", "A bottle of magic potion"),
                ("axe", "A razor sharp axe"),
                ("coin", "A silver coin"),
            ],
            &[("trapdoor", "A locked wooden trapdoor in the floor")],
            &[],
        ),
        loc(
            "forest",
            "A deep dark forest",
            &[("key", "A rusty old key")],
            &[("tree", "A tall pine tree")],
            &[],
        ),
        loc(
            "cellar",
            "A dusty cellar",
            &[],
            &[],
            &[("elf", "An angry looking elf")],
        ),
        loc(
            "riverbank",
            "A grassy riverbank",
            &[("horn", "An old brass horn")],
            &[("river", "A fast flowing river")],
            &[],
        ),
        loc(
            "clearing",
            "A clearing in the woods",
            &[],
            &[("ground", "It looks like the soil has been recently disturbed")],
            &[],
        ),
        loc(
            STOREROOM,
            "Storage for any entities not placed in the game",
            &[
                ("log", "A heavy wooden log"),
                ("shovel", "A sturdy shovel"),
                ("gold", "A big pot of gold"),
            ],
            &[("hole", "A deep hole in the ground")],
            &[("lumberjack", "A burly wood cutter")],
        ),
    ];

    let paths = [
        path("cabin", "forest"),
        path("forest", "cabin"),
        path("cellar", "cabin"),
        path("forest", "riverbank"),
        path("riverbank", "forest"),
        path("clearing", "riverbank"),
    ];

    WorldMap::build(locations, &paths, Some("cabin"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_world_builds() {
        let map = create_starting_world();
        assert!(map.is_ok());
        let map = map.ok();
        assert_eq!(map.as_ref().map(WorldMap::location_count), Some(6));
        assert_eq!(map.as_ref().map(WorldMap::starting_location), Some("cabin"));
    }

    #[test]
    fn cellar_is_not_reachable_until_opened() {
        let map = create_starting_world().ok();
        let reachable = map
            .as_ref()
            .and_then(|m| m.location("cabin"))
            .map(|cabin| cabin.is_adjacent("cellar"));
        assert_eq!(reachable, Some(false));
    }

    #[test]
    fn every_entity_placed_exactly_once() {
        let map = create_starting_world().ok();
        let census = map.map(|m| m.ownership_census(std::iter::empty()));
        assert!(census.is_some_and(|c| !c.is_empty() && c.values().all(|n| *n == 1)));
    }
}
