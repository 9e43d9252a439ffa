//! Error types for the `delve-world` crate.
//!
//! All fallible graph operations return [`WorldError`]. Construction-time
//! variants describe malformed world definitions; the remaining variants
//! signal a broken runtime invariant and should never surface in play.

use delve_types::EntityKind;

/// Errors that can occur during world-graph operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A location was not found in the world graph.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// Two locations were declared with the same name.
    #[error("duplicate location name: {0}")]
    DuplicateLocation(String),

    /// The same entity name was placed in more than one ownership set.
    #[error("entity {name} is placed in both {first} and {second}")]
    DuplicateEntity {
        /// The entity name.
        name: String,
        /// Location of the first placement.
        first: String,
        /// Location of the conflicting placement.
        second: String,
    },

    /// A path references a location that was never declared.
    #[error("path {from} -> {to} references an undeclared location")]
    UnknownPathEndpoint {
        /// Source of the path.
        from: String,
        /// Target of the path.
        to: String,
    },

    /// A path was declared into the hidden holding area.
    #[error("path from {from} leads into the storeroom")]
    PathToStoreroom {
        /// Source of the path.
        from: String,
    },

    /// The world has no locations (other than the storeroom) to start in.
    #[error("world declares no starting location")]
    NoStartingLocation,

    /// The hidden holding area was chosen as the starting location.
    #[error("the storeroom cannot be the starting location")]
    StoreroomAsStart,

    /// An entity was expected in a location set but is not there.
    #[error("{kind} {name} is not at location {location}")]
    EntityNotAtLocation {
        /// The entity kind searched.
        kind: EntityKind,
        /// The entity name.
        name: String,
        /// The location searched.
        location: String,
    },

    /// A player is not present at the specified location.
    #[error("player {player} is not at location {location}")]
    PlayerNotAtLocation {
        /// The player name.
        player: String,
        /// The location.
        location: String,
    },
}
