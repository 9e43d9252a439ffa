//! World graph: locations as nodes, one-way paths as edges.
//!
//! The [`WorldMap`] owns every [`LocationState`], including the hidden
//! storeroom, and remembers which location new players start in. Paths are
//! stored on their source location (see [`LocationState::adjacent`]).
//!
//! Construction validates the definition once; afterwards entities are only
//! ever relocated between sets, never created or destroyed.

use std::collections::BTreeMap;

use delve_types::{EntityKind, Player, STOREROOM};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WorldError;
use crate::location::LocationState;

/// The world graph holding all locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMap {
    /// All locations indexed by name.
    locations: BTreeMap<String, LocationState>,
    /// Where new and respawning players appear.
    starting_location: String,
}

impl WorldMap {
    /// Build a validated world map.
    ///
    /// `starting` names the starting location; when `None`, the first
    /// declared location other than the storeroom is used. A `storeroom`
    /// location is created if none was declared.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateLocation`] or
    /// [`WorldError::DuplicateEntity`] for repeated names,
    /// [`WorldError::UnknownPathEndpoint`] for a path to or from an
    /// undeclared location, [`WorldError::PathToStoreroom`] for a path
    /// leading into the storeroom, [`WorldError::LocationNotFound`] for an unknown
    /// starting location, and [`WorldError::NoStartingLocation`] /
    /// [`WorldError::StoreroomAsStart`] when no valid start exists.
    pub fn build(
        declared: Vec<LocationState>,
        paths: &[(String, String)],
        starting: Option<&str>,
    ) -> Result<Self, WorldError> {
        let default_start = declared
            .iter()
            .map(|loc| loc.name.as_str())
            .find(|name| *name != STOREROOM)
            .map(str::to_owned);

        let mut locations: BTreeMap<String, LocationState> = BTreeMap::new();
        // entity name -> location it was first seen in
        let mut placements: BTreeMap<String, String> = BTreeMap::new();

        for location in declared {
            if locations.contains_key(&location.name) {
                return Err(WorldError::DuplicateLocation(location.name));
            }
            for (_, entity) in location.all_entities() {
                if let Some(first) = placements.get(&entity.name) {
                    return Err(WorldError::DuplicateEntity {
                        name: entity.name.clone(),
                        first: first.clone(),
                        second: location.name.clone(),
                    });
                }
                placements.insert(entity.name.clone(), location.name.clone());
            }
            locations.insert(location.name.clone(), location);
        }

        locations
            .entry(STOREROOM.to_owned())
            .or_insert_with(|| LocationState::new(STOREROOM, "Storage for any entities not placed in the game"));

        for (from, to) in paths {
            if to == STOREROOM {
                return Err(WorldError::PathToStoreroom { from: from.clone() });
            }
            if !locations.contains_key(to) {
                return Err(WorldError::UnknownPathEndpoint {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            let source = locations.get_mut(from).ok_or_else(|| WorldError::UnknownPathEndpoint {
                from: from.clone(),
                to: to.clone(),
            })?;
            source.add_adjacent(to);
        }

        let starting_location = match starting {
            Some(name) => name.to_owned(),
            None => default_start.ok_or(WorldError::NoStartingLocation)?,
        };
        if starting_location == STOREROOM {
            return Err(WorldError::StoreroomAsStart);
        }
        if !locations.contains_key(&starting_location) {
            return Err(WorldError::LocationNotFound(starting_location));
        }

        debug!(
            location_count = locations.len(),
            entity_count = placements.len(),
            starting_location = %starting_location,
            "World map built"
        );

        Ok(Self {
            locations,
            starting_location,
        })
    }

    // -------------------------------------------------------------------
    // Location queries
    // -------------------------------------------------------------------

    /// Get an immutable reference to a location's state.
    pub fn location(&self, name: &str) -> Option<&LocationState> {
        self.locations.get(name)
    }

    /// Get a mutable reference to a location's state.
    pub fn location_mut(&mut self, name: &str) -> Option<&mut LocationState> {
        self.locations.get_mut(name)
    }

    /// Get a location or fail with [`WorldError::LocationNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`] if no such location exists.
    pub fn require(&self, name: &str) -> Result<&LocationState, WorldError> {
        self.locations
            .get(name)
            .ok_or_else(|| WorldError::LocationNotFound(name.to_owned()))
    }

    /// Mutable variant of [`WorldMap::require`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`] if no such location exists.
    pub fn require_mut(&mut self, name: &str) -> Result<&mut LocationState, WorldError> {
        self.locations
            .get_mut(name)
            .ok_or_else(|| WorldError::LocationNotFound(name.to_owned()))
    }

    /// Whether a location with this name exists.
    pub fn contains_location(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    /// Name of the starting location.
    pub fn starting_location(&self) -> &str {
        &self.starting_location
    }

    /// The hidden holding area.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`] if the storeroom is missing,
    /// which only happens if the map was mutated outside [`WorldMap::build`].
    pub fn storeroom(&self) -> Result<&LocationState, WorldError> {
        self.require(STOREROOM)
    }

    /// Return the number of locations, storeroom included.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Move an entity between two locations' sets of the same kind.
    ///
    /// Both endpoints are checked before anything is removed, so a failure
    /// leaves the map untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`] for an unknown endpoint or
    /// [`WorldError::EntityNotAtLocation`] if the entity is not in `from`.
    pub fn relocate(
        &mut self,
        kind: EntityKind,
        name: &str,
        from: &str,
        to: &str,
    ) -> Result<(), WorldError> {
        self.require(to)?;
        let entity = self.require_mut(from)?.take(kind, name)?;
        self.require_mut(to)?.place(kind, entity);
        Ok(())
    }

    /// Move a player's presence from one location to another.
    ///
    /// Only the two locations' player sets change; the caller updates the
    /// player's own location pointer.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`] for an unknown endpoint or
    /// [`WorldError::PlayerNotAtLocation`] if the player is not in `from`.
    pub fn move_player(&mut self, player: &str, from: &str, to: &str) -> Result<(), WorldError> {
        self.require(to)?;
        self.require_mut(from)?.remove_player(player)?;
        self.require_mut(to)?.add_player(player);
        Ok(())
    }

    /// Register a new player at the starting location and return its name.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`] if the starting location has
    /// been removed from the map.
    pub fn admit_player(&mut self, player: &str) -> Result<String, WorldError> {
        let start = self.starting_location.clone();
        self.require_mut(&start)?.add_player(player);
        Ok(start)
    }

    // -------------------------------------------------------------------
    // Invariant checks
    // -------------------------------------------------------------------

    /// Count how many ownership sets hold each entity name.
    ///
    /// Every location's artefact, furniture, and character sets (storeroom
    /// included) and every given player's inventory are counted. In a
    /// consistent world every value is exactly 1.
    pub fn ownership_census<'a>(
        &self,
        players: impl IntoIterator<Item = &'a Player>,
    ) -> BTreeMap<String, usize> {
        let mut census: BTreeMap<String, usize> = BTreeMap::new();
        let located = self.locations.values().flat_map(LocationState::all_entities).map(|(_, e)| e);
        let carried = players.into_iter().flat_map(|p| p.inventory.values());
        for entity in located.chain(carried) {
            let count = census.entry(entity.name.clone()).or_insert(0);
            *count = count.saturating_add(1);
        }
        census
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use delve_types::Entity;

    use super::*;

    fn loc(name: &str) -> LocationState {
        LocationState::new(name, format!("Test location: {name}"))
    }

    fn path(from: &str, to: &str) -> (String, String) {
        (from.to_owned(), to.to_owned())
    }

    fn make_pair_world() -> WorldMap {
        let cabin = loc("cabin").with(EntityKind::Artefact, Entity::new("axe", "Sharp"));
        let forest = loc("forest").with(EntityKind::Furniture, Entity::new("tree", "Big"));
        WorldMap::build(
            vec![cabin, forest],
            &[path("cabin", "forest"), path("forest", "cabin")],
            None,
        )
        .unwrap()
    }

    #[test]
    fn first_declared_location_is_start() {
        let map = make_pair_world();
        assert_eq!(map.starting_location(), "cabin");
    }

    #[test]
    fn storeroom_always_present() {
        let map = make_pair_world();
        assert!(map.storeroom().is_ok());
        assert_eq!(map.location_count(), 3);
    }

    #[test]
    fn paths_are_one_way() {
        let map = WorldMap::build(vec![loc("a"), loc("b")], &[path("a", "b")], None).unwrap();
        assert!(map.location("a").unwrap().is_adjacent("b"));
        assert!(!map.location("b").unwrap().is_adjacent("a"));
    }

    #[test]
    fn duplicate_location_rejected() {
        let result = WorldMap::build(vec![loc("a"), loc("a")], &[], None);
        assert!(matches!(result, Err(WorldError::DuplicateLocation(name)) if name == "a"));
    }

    #[test]
    fn duplicate_entity_rejected() {
        let a = loc("a").with(EntityKind::Artefact, Entity::new("coin", ""));
        let b = loc("b").with(EntityKind::Character, Entity::new("coin", ""));
        let result = WorldMap::build(vec![a, b], &[], None);
        assert!(matches!(result, Err(WorldError::DuplicateEntity { .. })));
    }

    #[test]
    fn path_requires_declared_endpoints() {
        let result = WorldMap::build(vec![loc("a")], &[path("a", "nowhere")], None);
        assert!(matches!(result, Err(WorldError::UnknownPathEndpoint { .. })));
        let result = WorldMap::build(vec![loc("a")], &[path("nowhere", "a")], None);
        assert!(matches!(result, Err(WorldError::UnknownPathEndpoint { .. })));
    }

    #[test]
    fn explicit_start_must_exist() {
        let result = WorldMap::build(vec![loc("a")], &[], Some("b"));
        assert!(matches!(result, Err(WorldError::LocationNotFound(_))));
        let result = WorldMap::build(vec![loc("a")], &[], Some(STOREROOM));
        assert!(matches!(result, Err(WorldError::StoreroomAsStart)));
    }

    #[test]
    fn path_into_storeroom_rejected() {
        let result = WorldMap::build(vec![loc("cabin"), loc(STOREROOM)], &[path("cabin", STOREROOM)], None);
        assert!(matches!(result, Err(WorldError::PathToStoreroom { from }) if from == "cabin"));
        let result = WorldMap::build(vec![loc("cabin")], &[path("cabin", STOREROOM)], None);
        assert!(matches!(result, Err(WorldError::PathToStoreroom { .. })));
    }

    #[test]
    fn storeroom_only_world_has_no_start() {
        let result = WorldMap::build(vec![loc(STOREROOM)], &[], None);
        assert!(matches!(result, Err(WorldError::NoStartingLocation)));
    }

    #[test]
    fn relocate_moves_between_sets() {
        let mut map = make_pair_world();
        assert!(map.relocate(EntityKind::Artefact, "axe", "cabin", STOREROOM).is_ok());
        assert_eq!(map.location("cabin").map(|l| l.contains_entity("axe")), Some(false));
        assert_eq!(map.storeroom().map(|l| l.contains_entity("axe")).ok(), Some(true));
    }

    #[test]
    fn relocate_to_unknown_location_leaves_map_untouched() {
        let mut map = make_pair_world();
        let before = map.clone();
        assert!(map.relocate(EntityKind::Artefact, "axe", "cabin", "moon").is_err());
        assert_eq!(map, before);
    }

    #[test]
    fn move_player_updates_both_sets() {
        let mut map = make_pair_world();
        assert!(map.admit_player("wizard").is_ok());
        assert!(map.move_player("wizard", "cabin", "forest").is_ok());
        assert_eq!(map.location("cabin").map(|l| l.contains_player("wizard")), Some(false));
        assert_eq!(map.location("forest").map(|l| l.contains_player("wizard")), Some(true));
    }

    #[test]
    fn census_counts_each_entity_once() {
        let map = make_pair_world();
        let mut player = Player::new("wizard", "Player #1", "cabin");
        player.hold(Entity::new("potion", ""));
        let census = map.ownership_census([&player]);
        assert_eq!(census.len(), 3);
        assert!(census.values().all(|count| *count == 1));
    }
}
