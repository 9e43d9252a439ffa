//! Error types for the Delve server binary.
//!
//! [`ServerError`] wraps every startup failure so `main` can propagate
//! with `?`. Once the front end is running, per-connection failures are
//! logged and never bring the server down.

use delve_engine::CatalogError;
use delve_world::{LoadError, WorldError};

use crate::config::ConfigError;

/// Top-level error for the server binary.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The configured world file could not be loaded.
    #[error("world file error: {source}")]
    WorldFile {
        /// The underlying loader error.
        #[from]
        source: LoadError,
    },

    /// The built-in world failed to build.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The configured actions file could not be loaded.
    #[error("actions file error: {source}")]
    Actions {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },

    /// Binding the TCP listener failed.
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        /// The configured listen address.
        addr: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Console or socket I/O failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The world task stopped before answering.
    #[error("world task is no longer running")]
    WorldTaskClosed,
}
