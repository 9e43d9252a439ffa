//! Per-command orchestration.
//!
//! A command line has the shape `<player name>:<command body>`. The
//! dispatcher identifies (or creates) the player, gives the built-in verbs
//! first refusal, then resolves and executes a declared action and applies
//! the death transition if the action left the player at zero health.
//! Every outcome, including every error, becomes a reply string.

use tracing::{debug, error, info};

use crate::builtins::BuiltinCommand;
use crate::death::{DEATH_NOTICE, check_death, process_death};
use crate::error::CommandError;
use crate::ownership::{self, ExecutionOutcome};
use crate::resolver::resolve;
use crate::world::World;

/// Split a command line into the player name and the lower-cased body.
///
/// The name is everything before the first colon, trimmed; it keeps its
/// case. The body is everything after that colon.
///
/// # Errors
///
/// Returns [`CommandError::PlayerNameMissing`] if there is no colon or the
/// name is blank.
pub fn parse_command_line(line: &str) -> Result<(&str, String), CommandError> {
    let (name, body) = line.split_once(':').ok_or(CommandError::PlayerNameMissing)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::PlayerNameMissing);
    }
    Ok((name, body.to_lowercase()))
}

/// Run one command line against the world and return the reply.
///
/// # Errors
///
/// Returns [`CommandError`] for a missing player name, an unresolvable
/// action, or broken engine state.
pub fn execute_command(world: &mut World, line: &str) -> Result<String, CommandError> {
    let (name, body) = parse_command_line(line)?;
    world.players.join(name, &mut world.map)?;

    if let Some(builtin) = BuiltinCommand::detect(&body) {
        debug!(player = name, command = ?builtin, "Built-in command");
        return Ok(builtin.run(&body, world, name)?);
    }

    let resolution = resolve(&body, &world.catalog)?;
    let player = world.players.require_mut(name)?;
    let outcome = ownership::execute(&mut world.map, player, resolution.action)?;
    let narration = match outcome {
        ExecutionOutcome::Performed { narration } => narration,
        ExecutionOutcome::PreconditionUnmet => return Ok(ownership::MISSING_REQUIREMENTS.to_owned()),
    };

    if resolution.action.consumes_health() && check_death(player) {
        let death = process_death(&mut world.map, player)?;
        info!(
            player = %death.player,
            trigger = resolution.trigger,
            death_location = %death.death_location,
            respawn_location = %death.respawn_location,
            dropped = ?death.dropped_inventory,
            "Player died and respawned"
        );
        return Ok(format!("{narration}\n{DEATH_NOTICE}"));
    }
    Ok(narration)
}

/// Run one command line and render any failure as its player-facing text.
///
/// Internal failures are logged with full detail; the player only sees a
/// generic apology.
pub fn handle_command(world: &mut World, line: &str) -> String {
    match execute_command(world, line) {
        Ok(reply) => reply,
        Err(CommandError::Internal(source)) => {
            error!(error = %source, command = line, "Command hit inconsistent engine state");
            CommandError::Internal(source).to_string()
        }
        Err(rejected) => {
            debug!(command = line, reason = %rejected, "Command rejected");
            rejected.to_string()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn player_name_is_required() {
        assert!(matches!(parse_command_line("look"), Err(CommandError::PlayerNameMissing)));
        assert!(matches!(parse_command_line("   : look"), Err(CommandError::PlayerNameMissing)));
    }

    #[test]
    fn body_is_lowercased_and_name_kept() {
        let parsed = parse_command_line(" Wizard : LOOK Around").ok();
        assert_eq!(parsed, Some(("Wizard", String::from(" look around"))));
    }

    #[test]
    fn only_first_colon_splits() {
        let parsed = parse_command_line("wizard: say: hello").ok();
        assert_eq!(parsed, Some(("wizard", String::from(" say: hello"))));
    }

    #[test]
    fn errors_become_messages() {
        let mut world = World::starting().unwrap();
        assert_eq!(
            handle_command(&mut world, "look"),
            "Couldn't locate a player name in your command, please try again."
        );
        assert_eq!(
            handle_command(&mut world, "wizard: dance"),
            "Couldn't find any action words in your command, please try again."
        );
    }

    #[test]
    fn unmet_precondition_reply() {
        let mut world = World::starting().unwrap();
        assert_eq!(
            handle_command(&mut world, "wizard: open trapdoor"),
            ownership::MISSING_REQUIREMENTS
        );
    }

    #[test]
    fn failed_command_still_registers_player() {
        let mut world = World::starting().unwrap();
        let _ = handle_command(&mut world, "wizard: dance");
        assert!(world.player("wizard").is_some());
    }
}
