//! Terminal configuration loaded from TOML.
//!
//! ```toml
//! namespace = "terminalD"
//! guest_user = "guest"
//! backend_url = "https://api.example.com/"
//! command_timeout_secs = 30
//! history_limit = 100
//! storage_path = "/tmp/terminal-d.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, TermError};

/// File name of the persisted storage inside the data directory.
const STORAGE_FILE: &str = "storage.json";

/// Runtime configuration for the terminal engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Host part of the prompt prefix (`user@namespace:cwd$`).
    pub namespace: String,
    /// Username shown while no session is active.
    pub guest_user: String,
    /// Base URL of the auth backend, with trailing slash.
    pub backend_url: String,
    /// Upper bound on how long an asynchronous command may run.
    pub command_timeout_secs: u64,
    /// Maximum number of command history entries.
    pub history_limit: usize,
    /// Where the bearer token is persisted. `None` uses the platform data dir.
    pub storage_path: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            namespace: "terminalD".to_string(),
            guest_user: "guest".to_string(),
            backend_url: "http://localhost:3000/api/".to_string(),
            command_timeout_secs: 30,
            history_limit: 100,
            storage_path: None,
        }
    }
}

impl TerminalConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        if !config.backend_url.is_empty() && !config.backend_url.ends_with('/') {
            config.backend_url.push('/');
        }
        if config.history_limit == 0 {
            return Err(TermError::Config(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if config.command_timeout_secs == 0 {
            return Err(TermError::Config(
                "command_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Command timeout as a `Duration`.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Resolved storage file path.
    pub fn storage_path(&self) -> PathBuf {
        match &self.storage_path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("terminal-d")
                .join(STORAGE_FILE),
        }
    }
}
