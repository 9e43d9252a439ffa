//! Command resolution and entity ownership for the Delve adventure engine.
//!
//! Turns one line of player input into a reply, mutating the shared
//! [`World`] along the way. The engine is synchronous and single-threaded;
//! callers serialize commands.
//!
//! # Modules
//!
//! - [`catalog`] -- [`ActionCatalog`]: actions indexed by trigger phrase,
//!   plus the YAML action-definition reader.
//! - [`resolver`] -- Trigger identification and subject disambiguation.
//! - [`ownership`] -- Precondition check and consume/produce transfers.
//! - [`builtins`] -- `inventory`, `get`, `drop`, `goto`, `look`, `health`.
//! - [`players`] -- [`PlayerRegistry`]: lazy player creation.
//! - [`death`] -- Death transition at zero health.
//! - [`world`] -- [`World`]: map, catalog, and players together.
//! - [`dispatch`] -- Per-command orchestration.
//! - [`error`] -- Error types for the engine.

pub mod builtins;
pub mod catalog;
pub mod death;
pub mod dispatch;
pub mod error;
pub mod ownership;
pub mod players;
pub mod resolver;
pub mod world;

// Re-export primary types at crate root.
pub use builtins::BuiltinCommand;
pub use catalog::{ActionCatalog, CatalogError, create_starting_actions, load_actions, parse_actions};
pub use death::DEATH_NOTICE;
pub use dispatch::{execute_command, handle_command, parse_command_line};
pub use error::{CommandError, EngineError};
pub use ownership::{ExecutionOutcome, MISSING_REQUIREMENTS};
pub use players::PlayerRegistry;
pub use resolver::{ResolveError, Resolution, resolve};
pub use world::World;
