//! Scrollback model consumed by the renderer.
//!
//! Records are appended and never edited; `clear` swaps the whole sequence
//! for the banner. Content is preformatted markup and is passed through as is.

/// ASCII banner shown on boot and after `clear`.
pub const HEADER: &str = r"
████████ ███████ ██████  ███    ███ ██ ███    ██  █████  ██           ██████
   ██    ██      ██   ██ ████  ████ ██ ████   ██ ██   ██ ██           ██   ██
   ██    █████   ██████  ██ ████ ██ ██ ██ ██  ██ ███████ ██    █████  ██   ██
   ██    ██      ██   ██ ██  ██  ██ ██ ██  ██ ██ ██   ██ ██           ██   ██
   ██    ███████ ██   ██ ██      ██ ██ ██   ████ ██   ██ ███████      ██████
                                                   A Terminal Themed Portfolio
";

const WELCOME: &str = "Welcome to Terminal-D!<br>Type `help` to get started or `about` to learn more about Terminal-D.<br><br>";

const WELCOME_BACK: &str = "Welcome back to Terminal-D!<br>Type `help` to get started or `about` to learn more about Terminal-D.<br><br>";

const BOOT_LOG: [&str; 4] = [
    "[INFO] Initializing Terminal-D...",
    "[INFO] Loading environment variables...",
    "[INFO] Setting up system paths...",
    "[INFO] Terminal-D initialized successfully.",
];

/// Prompt header of an echoed command: `username@namespace:cwd$`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHeader {
    pub username: String,
    pub namespace: String,
    pub cwd: String,
}

impl LineHeader {
    /// The rendered prompt prefix.
    pub fn prefix(&self) -> String {
        format!("{}@{}:{}$", self.username, self.namespace, self.cwd)
    }
}

/// One scrollback entry. `header` is set for command echoes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub header: Option<LineHeader>,
    pub content: String,
}

impl LineRecord {
    pub fn echo(header: LineHeader, content: impl Into<String>) -> Self {
        Self {
            header: Some(header),
            content: content.into(),
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            header: None,
            content: content.into(),
        }
    }

    pub fn is_echo(&self) -> bool {
        self.header.is_some()
    }
}

/// Append-only list of line records.
#[derive(Debug, Clone, Default)]
pub struct LineHistory {
    records: Vec<LineRecord>,
}

impl LineHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&LineRecord> {
        self.records.last()
    }

    pub fn push_echo(&mut self, header: LineHeader, content: impl Into<String>) {
        self.records.push(LineRecord::echo(header, content));
    }

    pub fn push_plain(&mut self, content: impl Into<String>) {
        self.records.push(LineRecord::plain(content));
    }

    /// Append one plain record per line.
    pub fn extend_plain<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records
            .extend(lines.into_iter().map(LineRecord::plain));
    }

    /// Replace everything with the banner.
    pub fn clear(&mut self) {
        self.records = vec![LineRecord::plain(HEADER), LineRecord::plain(WELCOME)];
    }

    /// Append the start-up log followed by the banner. `returning` picks the
    /// greeting for a restored session.
    pub fn boot(&mut self, header: LineHeader, returning: bool) {
        self.push_echo(header, "./initTerminalD.sh");
        self.extend_plain(BOOT_LOG);
        self.push_plain(HEADER);
        self.push_plain(if returning { WELCOME_BACK } else { WELCOME });
    }
}
