//! Death transition for players whose health reaches zero.
//!
//! A player dies when an action leaves their health at 0. On death the
//! inventory drops where they fell, health is restored to the maximum, and
//! the player reappears at the starting location. Nothing is destroyed:
//! dropped artefacts simply move into the death location's artefact set.

use delve_types::{EntityKind, Player};
use delve_world::{WorldError, WorldMap};

/// Line appended to the narration of the action that killed the player.
pub const DEATH_NOTICE: &str =
    "You died and lost all of your items, you have been returned to the start of the game.";

/// Record of a processed death.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathConsequences {
    /// The player who died.
    pub player: String,

    /// Where the player died (inventory drops here).
    pub death_location: String,

    /// Where the player was sent back to.
    pub respawn_location: String,

    /// Names of the artefacts left at the death location, in name order.
    pub dropped_inventory: Vec<String>,
}

/// Whether the player meets the death condition.
///
/// Only inspects state; see [`process_death`] for the transition.
pub const fn check_death(player: &Player) -> bool {
    player.is_dead()
}

/// Apply the death transition to a dead player.
///
/// 1. Every carried artefact moves to the current location.
/// 2. Health resets to the maximum.
/// 3. The player moves to the starting location; both locations' player
///    sets and the player's own location pointer are updated.
///
/// # Errors
///
/// Returns [`WorldError`] if the death location or starting location is
/// missing, or the player is not registered where their pointer says.
pub fn process_death(map: &mut WorldMap, player: &mut Player) -> Result<DeathConsequences, WorldError> {
    let death_location = player.location.clone();
    let respawn_location = map.starting_location().to_owned();
    map.require(&respawn_location)?;
    if !map.require(&death_location)?.contains_player(&player.name) {
        return Err(WorldError::PlayerNotAtLocation {
            player: player.name.clone(),
            location: death_location,
        });
    }

    let dropped = player.drain_inventory();
    let dropped_inventory: Vec<String> = dropped.keys().cloned().collect();
    let here = map.require_mut(&death_location)?;
    for artefact in dropped.into_values() {
        here.place(EntityKind::Artefact, artefact);
    }

    player.restore_health();
    map.move_player(&player.name, &death_location, &respawn_location)?;
    player.location.clone_from(&respawn_location);

    Ok(DeathConsequences {
        player: player.name.clone(),
        death_location,
        respawn_location,
        dropped_inventory,
    })
}
