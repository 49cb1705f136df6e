//! Configuration for the taskline client.
//!
//! Lives at `.taskline/config.json`. A missing file yields the defaults; the
//! `/api/run` path itself is fixed and only the endpoint base URL varies.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Directory holding client configuration, relative to the working directory.
pub const TASKLINE_DIR: &str = ".taskline";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the orchestration backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default number of sessions fetched by the listing commands.
    #[serde(default = "default_session_limit")]
    pub session_limit: usize,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_session_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_limit: default_session_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default config");
                Self::default()
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
