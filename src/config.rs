//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/moves/config.json`.
//! Each concern lives in its own top-level section so the file can grow
//! without breaking existing configs.
//!
//! # Example
//!
//! ```json
//! {
//!   "drag": { "min_width": 120.0, "min_height": 80.0 },
//!   "listener": { "socket_path": "/run/user/1000/moves.sock" }
//! }
//! ```

use crate::drag::DragConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Live move/resize settings.
    #[serde(default)]
    pub drag: DragConfig,

    /// Command socket settings.
    #[serde(default)]
    pub listener: ListenerConfig,
}

/// Command socket settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Where to bind the command socket.  Defaults to
    /// `$XDG_RUNTIME_DIR/moves.sock`.
    pub socket_path: Option<PathBuf>,
}

impl ListenerConfig {
    /// The configured socket path, or the default one.
    pub fn socket_path(&self) -> PathBuf {
        self.socket_path.clone().unwrap_or_else(default_socket_path)
    }
}

/// Default socket path for the command listener.
pub fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("moves.sock")
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/moves`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("moves")
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
