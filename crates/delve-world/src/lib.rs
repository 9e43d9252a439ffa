//! Locations, paths, and entity placement for the Delve adventure engine.
//!
//! This crate models the physical world: locations as a directed graph,
//! the entities placed in each location, the hidden storeroom, and the
//! starting location for new players.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world-graph operations.
//! - [`location`] -- [`LocationState`]: per-location entity sets, players,
//!   and outgoing paths.
//! - [`world_map`] -- [`WorldMap`]: the validated graph with relocation
//!   primitives and the ownership census.
//! - [`loader`] -- YAML world-graph reader.
//! - [`starting_world`] -- Built-in default world.

pub mod error;
pub mod loader;
pub mod location;
pub mod starting_world;
pub mod world_map;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use loader::{LoadError, WorldFile, load_world, parse_world};
pub use location::LocationState;
pub use starting_world::create_starting_world;
pub use world_map::WorldMap;
