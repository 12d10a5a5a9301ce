//! Foundation types for Terminal-D.
//!
//! Shared by every Terminal-D crate: the error type, the terminal
//! configuration, and the key events the input controller consumes.

pub mod config;
pub mod error;
pub mod input;

pub use config::TerminalConfig;
pub use error::{Result, TermError};
pub use input::Key;
