//! Command-line interaction engine for Terminal-D.
//!
//! Key events go to the input controller; submitted lines are dispatched
//! through the command registry, which consults the prompt state machine
//! before tokenizing. Results land in the line history that a renderer reads.

mod auth_commands;
mod commands;
mod file_commands;
mod input;
mod interpreter;
mod lines;
mod parser;
mod prompt;
mod state;
mod terminal;
mod theme;
mod theme_commands;

#[cfg(test)]
pub(crate) mod test_utils;

/// Prompt step identifiers used by `login` and `register`.
pub use auth_commands::{LOGIN_PASS, REGISTER_PASS_1, REGISTER_PASS_2};
/// Register all built-in commands into a registry.
pub use commands::{format_date, parse_date_string, register_builtins};
/// Input line and caret handling.
pub use input::{InputAction, InputController};
/// Command trait, registry, dispatch context and results.
pub use interpreter::{
    Command, CommandRegistry, Completion, Environment, Execution, Output, PendingFuture, completion,
};
/// Scrollback model.
pub use lines::{HEADER, LineHeader, LineHistory, LineRecord};
/// Tokenizer and parser.
pub use parser::{OptionValue, Options, ParsedCommand, parse, tokenize};
/// Multi-turn prompt state machine.
pub use prompt::{PromptState, Prompter, StepId};
/// Application state lent to commands.
pub use state::AppState;
/// Top-level controller.
pub use terminal::Terminal;
/// Color themes.
pub use theme::{Activation, DEFAULT_THEME, Theme, ThemeTable};
