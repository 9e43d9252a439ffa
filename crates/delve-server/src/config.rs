//! Server configuration loaded from `delve-config.yaml`.
//!
//! Every section and field has a default, so an empty or missing file
//! yields a console server playing the built-in world. A handful of
//! environment variables override the file:
//!
//! - `DELVE_MODE` overrides `frontend.mode` (`stdin` or `tcp`)
//! - `DELVE_LISTEN_ADDR` overrides `frontend.listen_addr`
//! - `DELVE_ENTITIES_FILE` overrides `world.entities_file`
//! - `DELVE_ACTIONS_FILE` overrides `world.actions_file`

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "delve-config.yaml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "DELVE_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override named an unknown front-end mode.
    #[error("unknown front-end mode '{0}', expected 'stdin' or 'tcp'")]
    InvalidMode(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Where the world and actions come from.
    #[serde(default)]
    pub world: WorldSourceConfig,

    /// How players connect.
    #[serde(default)]
    pub frontend: FrontendConfig,

    /// Log filtering.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override fields with `DELVE_*` environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] if `DELVE_MODE` is not a known
    /// mode.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override fields from any key lookup, environment or otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] if the mode override is not a
    /// known mode.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = lookup("DELVE_MODE") {
            self.frontend.mode = val.parse()?;
        }
        if let Some(val) = lookup("DELVE_LISTEN_ADDR") {
            self.frontend.listen_addr = val;
        }
        if let Some(val) = lookup("DELVE_ENTITIES_FILE") {
            self.world.entities_file = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("DELVE_ACTIONS_FILE") {
            self.world.actions_file = Some(PathBuf::from(val));
        }
        Ok(())
    }
}

/// Paths to the world and action definitions.
///
/// Either may be left unset, in which case the built-in classic world or
/// its action set is used for that half.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorldSourceConfig {
    /// YAML world graph.
    #[serde(default)]
    pub entities_file: Option<PathBuf>,

    /// YAML action definitions.
    #[serde(default)]
    pub actions_file: Option<PathBuf>,
}

/// Which line-oriented front end to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontendMode {
    /// Read commands from standard input, reply on standard output.
    #[default]
    Stdin,
    /// Accept TCP connections, one command per line.
    Tcp,
}

impl FromStr for FrontendMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdin" => Ok(Self::Stdin),
            "tcp" => Ok(Self::Tcp),
            other => Err(ConfigError::InvalidMode(other.to_owned())),
        }
    }
}

impl core::fmt::Display for FrontendMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Stdin => write!(f, "stdin"),
            Self::Tcp => write!(f, "tcp"),
        }
    }
}

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FrontendConfig {
    /// Console or network.
    #[serde(default)]
    pub mode: FrontendMode,

    /// Socket address for TCP mode.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Commands that may wait for the world task before senders block.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            mode: FrontendMode::default(),
            listen_addr: default_listen_addr(),
            queue_depth: default_queue_depth(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8888".to_owned()
}

const fn default_queue_depth() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// Load configuration from `DELVE_CONFIG` or `delve-config.yaml`.
///
/// A missing file yields defaults with environment overrides applied.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed,
/// or an override is invalid.
pub fn load_config() -> Result<(ServerConfig, Option<PathBuf>), ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV).map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = ServerConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = ServerConfig::default();
        config.apply_env_overrides()?;
        Ok((config, None))
    }
}
