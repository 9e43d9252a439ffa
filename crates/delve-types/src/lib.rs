//! Shared type definitions for the Delve adventure engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the world graph, the engine, and the front end. It carries no behavior
//! beyond small accessors.
//!
//! # Modules
//!
//! - [`entity`] -- Named entities and the kind discriminator
//!   (artefact, furniture, character) plus the [`Described`] capability.
//! - [`action`] -- Immutable action definitions (subjects, consumed,
//!   produced, narration).
//! - [`player`] -- Per-player state: location, inventory, health.

pub mod action;
pub mod entity;
pub mod player;

// Re-export all public types at crate root for convenience.
pub use action::Action;
pub use entity::{Described, Entity, EntityKind};
pub use player::Player;

/// Name of the hidden holding area for entities not placed in visible play.
pub const STOREROOM: &str = "storeroom";

/// Consumed/produced name that refers to player health rather than an entity.
pub const HEALTH_SENTINEL: &str = "health";

/// Health every player starts with and is restored to on respawn.
pub const MAX_HEALTH: u8 = 3;
