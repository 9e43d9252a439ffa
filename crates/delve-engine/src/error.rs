//! Error types for the delve-engine crate.
//!
//! Two layers: [`EngineError`] for broken invariants (a location or player
//! that should exist but does not), and [`CommandError`], the user-facing
//! outcome of a single command. Every [`CommandError`] renders as the exact
//! message shown to the player.

use delve_world::WorldError;

use crate::resolver::ResolveError;

/// Errors that indicate the engine state is inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A world-graph primitive failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A player the dispatcher just admitted could not be found.
    #[error("player not found: {0}")]
    PlayerNotFound(String),
}

/// User-facing failure of a single command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// No valid player name before a colon.
    #[error("Couldn't locate a player name in your command, please try again.")]
    PlayerNameMissing,

    /// The action resolver rejected the command text.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An engine invariant broke; details are logged, not shown.
    #[error("Something went wrong while carrying out your command, please try again.")]
    Internal(#[from] EngineError),
}

impl From<WorldError> for CommandError {
    fn from(source: WorldError) -> Self {
        Self::Internal(EngineError::World { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_details() {
        let err = CommandError::from(WorldError::LocationNotFound(String::from("cabin")));
        let message = err.to_string();
        assert!(message.starts_with("Something went wrong"));
        assert!(!message.contains("cabin"));
    }

    #[test]
    fn resolve_errors_render_transparently() {
        let err = CommandError::from(ResolveError::TriggerNotFound);
        assert_eq!(err.to_string(), ResolveError::TriggerNotFound.to_string());
    }
}
