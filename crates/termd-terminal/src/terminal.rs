//! Top-level terminal controller.
//!
//! Owns the application state, the input line and the command registry, and
//! exposes what a renderer needs: line records, prompt prefix, input, caret,
//! loading flag and theme. Asynchronous commands are parked by [`Terminal::submit`]
//! and driven to completion by [`Terminal::settle`]; input is ignored meanwhile.

use std::sync::Arc;

use termd_auth::{AuthError, AuthService, TokenStore};
use termd_types::{Key, TerminalConfig};
use termd_vfs::VirtualFs;

use crate::commands::register_builtins;
use crate::input::{InputAction, InputController};
use crate::interpreter::{CommandRegistry, Environment, Execution, PendingFuture};
use crate::lines::LineRecord;
use crate::state::AppState;
use crate::theme::Theme;

pub struct Terminal {
    config: TerminalConfig,
    vfs: VirtualFs,
    auth: Arc<dyn AuthService>,
    tokens: Box<dyn TokenStore>,
    registry: CommandRegistry,
    state: AppState,
    input: InputController,
    pending: Option<PendingFuture>,
}

impl Terminal {
    /// Create a terminal with every built-in command registered.
    pub fn new(
        config: TerminalConfig,
        vfs: VirtualFs,
        auth: Arc<dyn AuthService>,
        tokens: Box<dyn TokenStore>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        let input = InputController::new(config.history_limit);
        Self {
            config,
            vfs,
            auth,
            tokens,
            registry,
            state: AppState::new(),
            input,
            pending: None,
        }
    }

    /// Split borrows so the registry can run against the environment.
    fn parts(&mut self) -> (&CommandRegistry, Environment<'_>) {
        let env = Environment {
            state: &mut self.state,
            vfs: &self.vfs,
            auth: &self.auth,
            tokens: self.tokens.as_mut(),
            config: &self.config,
        };
        (&self.registry, env)
    }

    /// Restore a stored session, then print the start-up log and banner.
    pub async fn start(&mut self) {
        let returning = self.restore_session().await;
        let header = self.state.header(&self.config);
        self.state.lines.boot(header, returning);
    }

    /// Re-establish the session from a stored token. Returns whether a user
    /// is now signed in. A token the backend rejects is forgotten.
    pub async fn restore_session(&mut self) -> bool {
        let Some(token) = self.tokens.load() else {
            return false;
        };
        let lookup = self.auth.fetch_user(&token);
        match tokio::time::timeout(self.config.command_timeout(), lookup).await {
            Ok(Ok(user)) => {
                log::info!("restored session for {}", user.username);
                self.state.session = Some(user);
                true
            },
            Ok(Err(AuthError::Rejected(msg))) => {
                log::warn!("stored token rejected: {msg}");
                if let Err(e) = self.tokens.clear() {
                    log::warn!("could not clear stored token: {e}");
                }
                false
            },
            Ok(Err(e)) => {
                log::warn!("could not restore session: {e}");
                false
            },
            Err(_) => {
                log::warn!("session restore timed out");
                false
            },
        }
    }

    /// Feed one key event. Ignored while a command is loading.
    pub fn handle_key(&mut self, key: Key) {
        if self.is_loading() {
            log::debug!("input ignored while loading");
            return;
        }
        match self.input.handle_key(key) {
            InputAction::None => {},
            InputAction::Submit(line) => self.submit(&line),
            InputAction::Interrupt(line) => self.interrupt(&line),
        }
    }

    /// Echo `line`, then run it. Asynchronous work is parked until
    /// [`Terminal::settle`].
    pub fn submit(&mut self, line: &str) {
        if self.is_loading() {
            return;
        }
        match self.state.prompt.current() {
            Some(prompt) => {
                let echo = format!("{} {}", prompt.content, mask(line));
                self.state.lines.push_plain(echo);
            },
            None => {
                let header = self.state.header(&self.config);
                self.state.lines.push_echo(header, line);
                self.input.remember(line);
            },
        }

        let (registry, mut env) = self.parts();
        match registry.dispatch(line, &mut env) {
            Execution::Ready(out) => out.append_to(&mut self.state.lines),
            Execution::Pending(future) => self.pending = Some(future),
        }
    }

    fn interrupt(&mut self, line: &str) {
        match self.state.prompt.current() {
            Some(prompt) => {
                let echo = format!("{} {}^C", prompt.content, mask(line));
                self.state.lines.push_plain(echo);
                self.state.prompt.finish();
            },
            None => {
                let header = self.state.header(&self.config);
                self.state.lines.push_echo(header, format!("{line}^C"));
            },
        }
    }

    /// Drive the pending command, if any, and append its output. A command
    /// that outlives the configured timeout is dropped with an error line.
    pub async fn settle(&mut self) {
        let Some(future) = self.pending.take() else {
            return;
        };
        match tokio::time::timeout(self.config.command_timeout(), future).await {
            Ok(done) => {
                let (_, mut env) = self.parts();
                let out = done(&mut env);
                out.append_to(&mut self.state.lines);
            },
            Err(_) => {
                let secs = self.config.command_timeout_secs;
                log::warn!("command timed out after {secs}s");
                self.state.prompt.finish();
                self.state
                    .lines
                    .push_plain(format!("Error: request timed out after {secs}s"));
            },
        }
    }

    /// Submit a whole line and wait for it to finish.
    pub async fn run_line(&mut self, line: &str) {
        self.submit(line);
        self.settle().await;
    }

    /// Whether an asynchronous command is still running.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Text rendered before the input: the prompt question while prompting,
    /// otherwise `user@namespace:cwd$`.
    pub fn prompt_prefix(&self) -> String {
        match self.state.prompt.current() {
            Some(prompt) => prompt.content.clone(),
            None => self.state.header(&self.config).prefix(),
        }
    }

    /// Caret column in the rendered line: prefix, one space, then the caret
    /// offset into the input.
    pub fn display_caret(&self) -> usize {
        self.prompt_prefix().chars().count() + 1 + self.input.caret()
    }

    /// Input as it should be drawn. Answers to prompts are masked.
    pub fn rendered_input(&self) -> String {
        if self.state.prompt.is_prompting() {
            mask(self.input.input())
        } else {
            self.input.input().to_string()
        }
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn lines(&self) -> &[LineRecord] {
        self.state.lines.records()
    }

    pub fn theme(&self) -> &Theme {
        self.state.themes.active()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }
}

fn mask(text: &str) -> String {
    "*".repeat(text.chars().count())
}
