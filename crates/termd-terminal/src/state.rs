//! Application state shared by all command handlers.

use termd_auth::User;
use termd_types::TerminalConfig;
use termd_vfs::VfsPath;

use crate::lines::{LineHeader, LineHistory};
use crate::prompt::Prompter;
use crate::theme::ThemeTable;

/// Everything a command may read or change. Owned by the `Terminal` and lent
/// to handlers through an `Environment`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub themes: ThemeTable,
    /// Signed-in user, `None` for the guest.
    pub session: Option<User>,
    pub cwd: VfsPath,
    pub lines: LineHistory,
    pub prompt: Prompter,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name shown in the prompt prefix.
    pub fn username<'a>(&'a self, config: &'a TerminalConfig) -> &'a str {
        self.session
            .as_ref()
            .map_or(config.guest_user.as_str(), |u| u.username.as_str())
    }

    /// Header for the next echoed command.
    pub fn header(&self, config: &TerminalConfig) -> LineHeader {
        LineHeader {
            username: self.username(config).to_string(),
            namespace: config.namespace.clone(),
            cwd: self.cwd.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_header() {
        let state = AppState::new();
        let header = state.header(&TerminalConfig::default());
        assert_eq!(header.prefix(), "guest@terminalD:~$");
    }

    #[test]
    fn session_header_uses_username_and_cwd() {
        let mut state = AppState::new();
        state.session = Some(User::new("1", "ada@example.com"));
        state.cwd = state.cwd.resolve("projects");
        let header = state.header(&TerminalConfig::default());
        assert_eq!(header.prefix(), "ada@terminalD:~/projects$");
    }
}
