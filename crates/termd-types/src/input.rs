//! Platform-agnostic key events.
//!
//! Front-ends map their native keyboard input to these variants. The engine
//! never sees raw platform input.

/// A key event delivered to the input controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Printable character typed.
    Char(char),
    /// Text pasted in one go.
    Paste(String),
    /// Delete the character left of the caret.
    Backspace,
    /// Delete the character under the caret.
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Recall an older history entry.
    Up,
    /// Recall a newer history entry.
    Down,
    /// Submit the current line.
    Enter,
    /// Ctrl+C: abandon the current line or prompt.
    Interrupt,
}
