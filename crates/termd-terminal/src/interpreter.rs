//! Command trait, registry and dispatch.
//!
//! The dispatcher checks the prompt state first: while a prompt is active the
//! raw line is handed, untokenized, to the command that opened it. Otherwise
//! the line is parsed and looked up by name, case-insensitively.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use termd_auth::{AuthService, TokenStore};
use termd_types::{Result, TerminalConfig};
use termd_vfs::VirtualFs;

use crate::lines::LineHistory;
use crate::parser::{Options, parse};
use crate::state::AppState;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing to show.
    Silent,
    /// One record. An empty string is treated like `Silent`.
    Line(String),
    /// One record per element.
    Lines(Vec<String>),
}

impl Output {
    /// Append this output to the scrollback.
    pub fn append_to(self, lines: &mut LineHistory) {
        match self {
            Output::Silent => {},
            Output::Line(line) if line.is_empty() => {},
            Output::Line(line) => lines.push_plain(line),
            Output::Lines(all) => lines.extend_plain(all),
        }
    }
}

impl From<String> for Output {
    fn from(line: String) -> Self {
        Output::Line(line)
    }
}

impl From<&str> for Output {
    fn from(line: &str) -> Self {
        Output::Line(line.to_string())
    }
}

/// Applied to the application state once an asynchronous command finishes.
pub type Completion = Box<dyn FnOnce(&mut Environment<'_>) -> Output + Send>;

/// Box a closure as a [`Completion`].
pub fn completion<F>(f: F) -> Completion
where
    F: FnOnce(&mut Environment<'_>) -> Output + Send + 'static,
{
    Box::new(f)
}

/// Work an asynchronous command still has to do.
pub type PendingFuture = Pin<Box<dyn Future<Output = Completion> + Send>>;

/// Result of running a command: either finished or still waiting on I/O.
pub enum Execution {
    Ready(Output),
    Pending(PendingFuture),
}

impl Execution {
    pub fn ready(output: impl Into<Output>) -> Self {
        Execution::Ready(output.into())
    }

    pub fn silent() -> Self {
        Execution::Ready(Output::Silent)
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        Execution::Pending(Box::pin(future))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Execution::Pending(_))
    }
}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Ready(out) => f.debug_tuple("Ready").field(out).finish(),
            Execution::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Shared environment lent to every command.
pub struct Environment<'a> {
    pub state: &'a mut AppState,
    /// The virtual file system.
    pub vfs: &'a VirtualFs,
    /// Auth backend. Cloned into futures that outlive the call.
    pub auth: &'a Arc<dyn AuthService>,
    /// Persisted bearer token.
    pub tokens: &'a mut dyn TokenStore,
    pub config: &'a TerminalConfig,
}

/// A single executable command.
pub trait Command: Send + Sync {
    /// The command name (what the user types), lower-case.
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "cd \[path\]").
    fn usage(&self) -> &str;

    /// Whether positional arguments are accepted.
    fn args_allowed(&self) -> bool {
        true
    }

    /// Whether `help` lists the command.
    fn is_listed(&self) -> bool {
        true
    }

    /// Execute the command with the given arguments, options and environment.
    fn execute(
        &self,
        args: &[&str],
        options: &Options,
        env: &mut Environment<'_>,
    ) -> Result<Execution>;
}

/// Registry of available commands with dispatch.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_lowercase(), cmd);
    }

    /// Look up a command by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(&name.to_lowercase()).map(|c| c.as_ref())
    }

    /// Listed commands in name order.
    pub fn list_commands(&self) -> Vec<&dyn Command> {
        let mut cmds: Vec<&dyn Command> = self
            .commands
            .values()
            .map(|c| c.as_ref())
            .filter(|c| c.is_listed())
            .collect();
        cmds.sort_by(|a, b| a.name().cmp(b.name()));
        cmds
    }

    fn help(&self) -> Output {
        let mut lines = Vec::new();
        for cmd in self.list_commands() {
            lines.push(cmd.name().to_uppercase());
            lines.push(cmd.description().to_string());
            lines.push(format!("Usage: {}", cmd.usage()));
            lines.push(String::new());
        }
        Output::Lines(lines)
    }

    /// Run one submitted line. Never fails: handler errors become output.
    pub fn dispatch(&self, line: &str, env: &mut Environment<'_>) -> Execution {
        if let Some(owner) = env.state.prompt.current().map(|p| p.owner.clone()) {
            let Some(cmd) = self.get(&owner) else {
                log::warn!("prompt owner {owner} is not registered");
                env.state.prompt.finish();
                return Execution::silent();
            };
            log::debug!("routing prompt answer to {owner}");
            return run(cmd, &[line], &Options::default(), env);
        }

        let parsed = parse(line);
        let Some(name) = parsed.command else {
            return Execution::silent();
        };
        if name.eq_ignore_ascii_case("help") {
            return Execution::Ready(self.help());
        }
        let Some(cmd) = self.get(&name) else {
            return Execution::ready(format!("Unsupported Command: {line}"));
        };
        if !cmd.args_allowed() && !parsed.args.is_empty() {
            return Execution::ready(format!(
                "{} takes no arguments. Usage: {}",
                cmd.name(),
                cmd.usage()
            ));
        }

        log::debug!("dispatch {} ({} args)", cmd.name(), parsed.args.len());
        let args: Vec<&str> = parsed.args.iter().map(String::as_str).collect();
        run(cmd, &args, &parsed.options, env)
    }
}

fn run(cmd: &dyn Command, args: &[&str], options: &Options, env: &mut Environment<'_>) -> Execution {
    cmd.execute(args, options, env).unwrap_or_else(|e| {
        log::debug!("{} failed: {e}", cmd.name());
        Execution::ready(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Fixture;
    use termd_types::TermError;

    struct Echo;
    impl Command for Echo {
        fn name(&self) -> &str {
            "Echo"
        }
        fn description(&self) -> &str {
            "Print arguments"
        }
        fn usage(&self) -> &str {
            "echo [text...]"
        }
        fn execute(&self, args: &[&str], _: &Options, _: &mut Environment<'_>) -> Result<Execution> {
            Ok(Execution::ready(args.join(" ")))
        }
    }

    struct Quiet;
    impl Command for Quiet {
        fn name(&self) -> &str {
            "quiet"
        }
        fn description(&self) -> &str {
            "Hidden"
        }
        fn usage(&self) -> &str {
            "quiet"
        }
        fn args_allowed(&self) -> bool {
            false
        }
        fn is_listed(&self) -> bool {
            false
        }
        fn execute(&self, _: &[&str], _: &Options, _: &mut Environment<'_>) -> Result<Execution> {
            Err(TermError::Command("went wrong".into()))
        }
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Echo));
        reg.register(Box::new(Quiet));
        reg
    }

    fn ready(exec: Execution) -> Output {
        match exec {
            Execution::Ready(out) => out,
            Execution::Pending(_) => panic!("expected ready output"),
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let reg = registry();
        assert!(reg.get("ECHO").is_some());
        assert!(reg.get("echo").is_some());
        let mut fx = Fixture::new();
        let out = ready(reg.dispatch("eChO hi there", &mut fx.env()));
        assert_eq!(out, Output::Line("hi there".into()));
    }

    #[test]
    fn blank_input_is_silent() {
        let reg = registry();
        let mut fx = Fixture::new();
        assert_eq!(ready(reg.dispatch("   ", &mut fx.env())), Output::Silent);
    }

    #[test]
    fn unknown_command() {
        let reg = registry();
        let mut fx = Fixture::new();
        let out = ready(reg.dispatch("foo bar", &mut fx.env()));
        assert_eq!(out, Output::Line("Unsupported Command: foo bar".into()));
    }

    #[test]
    fn unknown_command_echoes_raw_input() {
        let reg = registry();
        let mut fx = Fixture::new();
        let out = ready(reg.dispatch("  Foo  \"a b\" ", &mut fx.env()));
        assert_eq!(
            out,
            Output::Line("Unsupported Command:   Foo  \"a b\" ".into())
        );
    }

    #[test]
    fn errors_become_output() {
        let reg = registry();
        let mut fx = Fixture::new();
        let out = ready(reg.dispatch("quiet", &mut fx.env()));
        assert_eq!(out, Output::Line("went wrong".into()));
    }

    #[test]
    fn args_rejected_when_not_allowed() {
        let reg = registry();
        let mut fx = Fixture::new();
        let Output::Line(msg) = ready(reg.dispatch("quiet now", &mut fx.env())) else {
            panic!("expected a line");
        };
        assert!(msg.contains("takes no arguments"));
    }

    #[test]
    fn help_lists_only_listed_commands() {
        let reg = registry();
        let mut fx = Fixture::new();
        let Output::Lines(lines) = ready(reg.dispatch("help", &mut fx.env())) else {
            panic!("expected lines");
        };
        assert_eq!(lines, vec!["ECHO", "Print arguments", "Usage: echo [text...]", ""]);
    }

    #[test]
    fn prompt_routes_raw_line_to_owner() {
        let reg = registry();
        let mut fx = Fixture::new();
        fx.state.prompt.begin("echo", "step", "Say:", vec![]);
        let out = ready(reg.dispatch(r#"help "me" -x"#, &mut fx.env()));
        assert_eq!(out, Output::Line(r#"help "me" -x"#.into()));
    }

    #[test]
    fn orphan_prompt_is_cleared() {
        let reg = registry();
        let mut fx = Fixture::new();
        fx.state.prompt.begin("gone", "step", "?", vec![]);
        assert_eq!(ready(reg.dispatch("x", &mut fx.env())), Output::Silent);
        assert!(!fx.state.prompt.is_prompting());
    }

    #[test]
    fn output_append_rules() {
        let mut lines = LineHistory::new();
        Output::Silent.append_to(&mut lines);
        Output::Line(String::new()).append_to(&mut lines);
        assert!(lines.is_empty());
        Output::Line("a".into()).append_to(&mut lines);
        Output::Lines(vec!["b".into(), "c".into()]).append_to(&mut lines);
        assert_eq!(lines.len(), 3);
    }
}
