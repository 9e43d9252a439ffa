//! Entity ownership engine: precondition check plus consume/produce transfers.
//!
//! Every entity lives in exactly one ownership set: a location's artefact,
//! furniture, or character set (the storeroom included) or a player's
//! inventory. Executing an action only ever moves entities between those
//! sets and toggles adjacency edges, so the uniqueness invariant holds
//! before and after every call.
//!
//! Four ownership domains take part:
//! - the acting player's inventory,
//! - the player's current location,
//! - the adjacency edges leaving that location,
//! - the storeroom, where consumed entities go and produced ones come from.

use delve_types::{Action, EntityKind, HEALTH_SENTINEL, Player, STOREROOM};
use delve_world::{WorldError, WorldMap};
use tracing::{debug, warn};

/// Text returned when the action's subjects are not all at hand.
pub const MISSING_REQUIREMENTS: &str =
    "You cannot perform this action as you do not have everything that you need available to you at this time.";

/// What happened when an action was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Effects applied; carries the action's narration.
    Performed {
        /// Narration to show the player.
        narration: String,
    },
    /// At least one subject was missing; nothing changed.
    PreconditionUnmet,
}

impl ExecutionOutcome {
    /// The text shown to the player for this outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Performed { narration } => narration,
            Self::PreconditionUnmet => MISSING_REQUIREMENTS,
        }
    }
}

/// Count how many of the action's subjects are within the player's reach.
///
/// A subject counts once for each of the player's inventory and the current
/// location's three entity sets that holds it.
pub fn subjects_present(map: &WorldMap, player: &Player, action: &Action) -> Result<usize, WorldError> {
    let here = map.require(&player.location)?;
    let count = action
        .subjects
        .iter()
        .map(|subject| {
            let carried = usize::from(player.holds(subject));
            let placed = EntityKind::ALL
                .into_iter()
                .filter(|kind| here.entities(*kind).contains_key(subject))
                .count();
            carried.saturating_add(placed)
        })
        .fold(0_usize, usize::saturating_add);
    Ok(count)
}

/// Whether every subject of the action is within the player's reach.
pub fn preconditions_met(map: &WorldMap, player: &Player, action: &Action) -> Result<bool, WorldError> {
    Ok(subjects_present(map, player, action)? == action.subjects.len())
}

/// Attempt to execute a resolved action for a player.
///
/// The precondition is checked before anything is touched, so
/// [`ExecutionOutcome::PreconditionUnmet`] leaves the world and the player
/// exactly as they were. On success all consumed names are handled before
/// any produced name.
///
/// # Errors
///
/// Returns [`WorldError`] only if the player's location or the storeroom
/// is missing from the map.
pub fn execute(map: &mut WorldMap, player: &mut Player, action: &Action) -> Result<ExecutionOutcome, WorldError> {
    map.storeroom()?;
    if !preconditions_met(map, player, action)? {
        debug!(
            player = %player.name,
            location = %player.location,
            subjects = ?action.subjects,
            "Action precondition unmet"
        );
        return Ok(ExecutionOutcome::PreconditionUnmet);
    }

    for name in &action.consumed {
        consume(map, player, name)?;
    }
    for name in &action.produced {
        produce(map, player, name)?;
    }

    debug!(
        player = %player.name,
        location = %player.location,
        consumed = ?action.consumed,
        produced = ?action.produced,
        health = player.health,
        "Action executed"
    );
    Ok(ExecutionOutcome::Performed {
        narration: action.narration.clone(),
    })
}

/// Move one consumed name out of play.
///
/// Looks in the inventory, then the location's characters, then its
/// furniture; the first holder gives the entity up to the storeroom. An
/// adjacency edge to a location of that name is removed as well. Health
/// drops by one for the sentinel.
pub fn consume(map: &mut WorldMap, player: &mut Player, name: &str) -> Result<(), WorldError> {
    if name == HEALTH_SENTINEL {
        player.lose_health();
        return Ok(());
    }

    map.storeroom()?;
    let here = player.location.clone();
    if let Some(artefact) = player.release(name) {
        map.require_mut(STOREROOM)?.place(EntityKind::Artefact, artefact);
    } else {
        let location = map.require(&here)?;
        let kind = [EntityKind::Character, EntityKind::Furniture]
            .into_iter()
            .find(|kind| location.entities(*kind).contains_key(name));
        if let Some(kind) = kind {
            map.relocate(kind, name, &here, STOREROOM)?;
        }
    }

    map.require_mut(&here)?.remove_adjacent(name);
    Ok(())
}

/// Bring one produced name into play at the player's location.
///
/// An entity waiting in the storeroom moves to the current location, and a
/// location of that name becomes reachable from here. Health rises by one
/// for the sentinel, never above the cap.
pub fn produce(map: &mut WorldMap, player: &mut Player, name: &str) -> Result<(), WorldError> {
    if name == HEALTH_SENTINEL {
        player.gain_health();
        return Ok(());
    }

    let here = player.location.clone();
    let stored = [EntityKind::Artefact, EntityKind::Character, EntityKind::Furniture]
        .into_iter()
        .find(|kind| map.storeroom().is_ok_and(|s| s.entities(*kind).contains_key(name)));
    if let Some(kind) = stored {
        map.relocate(kind, name, STOREROOM, &here)?;
    }

    if name == STOREROOM {
        warn!(location = %here, "Refusing to open a path to the storeroom");
    } else if map.contains_location(name) {
        map.require_mut(&here)?.add_adjacent(name);
    } else if stored.is_none() {
        debug!(name, "Produced name is neither stored nor a location");
    }
    Ok(())
}
