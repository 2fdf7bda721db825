//! Runtime configuration, read from `~/.enola/core.toml`.
//!
//! ```toml
//! [aspects]
//! links = true
//! timestamp = true
//! validation = true
//!
//! [model]
//! expose = false
//!
//! [list]
//! workers = 1
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration of the resolution service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub aspects: AspectsConfig,
    pub model: ModelConfig,
    pub list: ListConfig,
}

/// Built-in aspects appended after each kind's own connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectsConfig {
    /// Expand the kind's link templates.
    pub links: bool,
    /// Stamp the resolution time.
    pub timestamp: bool,
    /// Reject links, data and related entries the kind does not declare.
    pub validation: bool,
}

impl Default for AspectsConfig {
    fn default() -> Self {
        Self {
            links: true,
            timestamp: true,
            validation: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Serve the model itself under `enola.entity_kind/{name}`.
    pub expose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Threads used for per-entity augmentation while listing; 1 is sequential.
    pub workers: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl ListConfig {
    /// Effective worker count, never below one.
    pub fn workers(&self) -> usize {
        self.workers.max(1)
    }
}

impl CoreConfig {
    /// Loads `~/.enola/core.toml` if it exists.
    pub fn load() -> Self {
        Self::load_from(config_dir().join("core.toml"))
    }

    /// Loads configuration from an explicit path.
    /// Falls back to defaults with a warning when the file cannot be used.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded core config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parses TOML text; missing sections and keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Resolve the Enola config directory.
fn config_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        Path::new(&home).join(".enola")
    } else if let Ok(home) = std::env::var("USERPROFILE") {
        Path::new(&home).join(".enola")
    } else {
        PathBuf::from(".enola")
    }
}
