//! Input line, caret and command-history recall.

use std::collections::VecDeque;

use termd_types::Key;

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Only the input line or caret changed.
    None,
    /// Enter was pressed; carries the raw line. Input and caret are reset.
    Submit(String),
    /// Ctrl+C was pressed; carries the abandoned line.
    Interrupt(String),
}

/// Editable input line with a caret counted in characters.
#[derive(Debug, Clone)]
pub struct InputController {
    input: String,
    caret: usize,
    /// Most recent first.
    history: VecDeque<String>,
    cursor: Option<usize>,
    limit: usize,
}

impl InputController {
    pub fn new(limit: usize) -> Self {
        Self {
            input: String::new(),
            caret: 0,
            history: VecDeque::new(),
            cursor: None,
            limit: limit.max(1),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Index of the recalled entry, `None` when not recalling.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_at(&self, caret: usize) -> usize {
        self.input
            .char_indices()
            .nth(caret)
            .map_or(self.input.len(), |(i, _)| i)
    }

    fn insert(&mut self, text: &str) {
        let at = self.byte_at(self.caret);
        self.input.insert_str(at, text);
        self.caret += text.chars().count();
    }

    fn show(&mut self, line: String) {
        self.input = line;
        self.caret = self.char_len();
    }

    fn reset(&mut self) -> String {
        self.caret = 0;
        self.cursor = None;
        std::mem::take(&mut self.input)
    }

    /// Add a submitted line to the front of the history. Blank lines are
    /// ignored and an existing entry moves to the front.
    pub fn remember(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.history.retain(|h| h != line);
        self.history.push_front(line.to_string());
        self.history.truncate(self.limit);
    }

    pub fn handle_key(&mut self, key: Key) -> InputAction {
        match key {
            Key::Char(ch) => {
                if !ch.is_control() {
                    self.insert(ch.encode_utf8(&mut [0; 4]));
                }
            },
            Key::Paste(text) => {
                let text: String = text.chars().filter(|c| !c.is_control()).collect();
                self.insert(&text);
            },
            Key::Backspace => {
                if self.caret > 0 {
                    self.caret -= 1;
                    let at = self.byte_at(self.caret);
                    self.input.remove(at);
                }
            },
            Key::Delete => {
                if self.caret < self.char_len() {
                    let at = self.byte_at(self.caret);
                    self.input.remove(at);
                }
            },
            Key::Left => self.caret = self.caret.saturating_sub(1),
            Key::Right => self.caret = (self.caret + 1).min(self.char_len()),
            Key::Home => self.caret = 0,
            Key::End => self.caret = self.char_len(),
            Key::Up => {
                let next = self.cursor.map_or(0, |c| c + 1);
                if let Some(line) = self.history.get(next).cloned() {
                    self.cursor = Some(next);
                    self.show(line);
                }
            },
            Key::Down => match self.cursor {
                Some(c) if c > 0 => {
                    if let Some(line) = self.history.get(c - 1).cloned() {
                        self.cursor = Some(c - 1);
                        self.show(line);
                    }
                },
                _ => {
                    if !self.history.is_empty() {
                        self.reset();
                    }
                },
            },
            Key::Enter => return InputAction::Submit(self.reset()),
            Key::Interrupt => return InputAction::Interrupt(self.reset()),
        }
        InputAction::None
    }
}
