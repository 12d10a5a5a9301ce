//! Error types for Terminal-D.

use std::io;

/// Errors produced by the Terminal-D engine.
///
/// Command-facing variants display their message verbatim because the
/// dispatcher renders them straight into the scrollback.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("{0}")]
    Command(String),

    #[error("{0}")]
    Vfs(String),

    #[error("Error: {0}")]
    Auth(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermError>;
