//! General commands (about, clear, date, whoami) and builtin registration.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use termd_types::Result;

use crate::interpreter::{Command, CommandRegistry, Environment, Execution};
use crate::parser::Options;

/// Register every built-in command into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(AboutCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(WhoamiCmd));
    crate::file_commands::register_file_commands(reg);
    crate::theme_commands::register_theme_commands(reg);
    crate::auth_commands::register_auth_commands(reg);
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

const ABOUT: &str = "Terminal-D is a portfolio that you explore from a command line.<br>\
    Every project becomes a command, so visitors can poke around instead of skimming a list of links.<br>\
    It doubles as a sandbox for trying out new ideas and technologies.";

struct AboutCmd;
impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn description(&self) -> &str {
        "What Terminal-D is"
    }
    fn usage(&self) -> &str {
        "about"
    }
    fn args_allowed(&self) -> bool {
        false
    }
    fn is_listed(&self) -> bool {
        false
    }
    fn execute(&self, _args: &[&str], _: &Options, _env: &mut Environment<'_>) -> Result<Execution> {
        Ok(Execution::ready(ABOUT))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal screen, removing all previous commands and output displayed."
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn args_allowed(&self) -> bool {
        false
    }
    fn execute(&self, _args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        env.state.lines.clear();
        Ok(Execution::silent())
    }
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

/// Format like `Sat Oct 18 2026 03:04:05 PM`.
pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format("%a %b %-d %Y %I:%M:%S %p").to_string()
}

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%B %d %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Parse a user supplied date into local wall-clock time.
pub fn parse_date_string(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(input, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(input, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Returns the current date/time. Pass a quoted date string to format that date instead."
    }
    fn usage(&self) -> &str {
        "date [\"dateString\"]"
    }
    fn execute(&self, args: &[&str], _: &Options, _env: &mut Environment<'_>) -> Result<Execution> {
        let Some(input) = args.first() else {
            let now = Local::now().naive_local();
            return Ok(Execution::ready(format_date(&now)));
        };
        let out = match parse_date_string(input) {
            // Reject wall times that do not exist locally.
            Some(dt) if Local.from_local_datetime(&dt).earliest().is_some() => format_date(&dt),
            _ => "Invalid date string.".to_string(),
        };
        Ok(Execution::ready(out))
    }
}

// ---------------------------------------------------------------------------
// whoami
// ---------------------------------------------------------------------------

struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Print the current user name"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn args_allowed(&self) -> bool {
        false
    }
    fn execute(&self, _args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        Ok(Execution::ready(env.state.username(env.config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Output;
    use crate::test_utils::Fixture;
    use termd_auth::User;

    fn run(fx: &mut Fixture, line: &str) -> Output {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg);
        match reg.dispatch(line, &mut fx.env()) {
            Execution::Ready(out) => out,
            Execution::Pending(_) => panic!("expected ready output"),
        }
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn format_matches_locale_style() {
        assert_eq!(format_date(&ymd_hms(2026, 10, 18, 15, 4, 5)), "Sun Oct 18 2026 03:04:05 PM");
        assert_eq!(format_date(&ymd_hms(2024, 1, 5, 0, 0, 0)), "Fri Jan 5 2024 12:00:00 AM");
    }

    #[test]
    fn parses_common_formats() {
        let jan5 = ymd_hms(2024, 1, 5, 0, 0, 0);
        assert_eq!(parse_date_string("2024-01-05"), Some(jan5));
        assert_eq!(parse_date_string("01/05/2024"), Some(jan5));
        assert_eq!(parse_date_string("January 5 2024"), Some(jan5));
        assert_eq!(parse_date_string("Jan 5 2024"), Some(jan5));
        assert_eq!(parse_date_string("Jan 5, 2024"), Some(jan5));
        assert_eq!(
            parse_date_string("2024-01-05 13:30"),
            Some(ymd_hms(2024, 1, 5, 13, 30, 0))
        );
        assert!(parse_date_string("2024-01-05T10:00:00Z").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date_string("tomorrow-ish"), None);
        assert_eq!(parse_date_string("2024-13-40"), None);
    }

    #[test]
    fn date_command_output() {
        let mut fx = Fixture::new();
        assert_eq!(
            run(&mut fx, r#"date "Jan 5 2024""#),
            Output::Line("Fri Jan 5 2024 12:00:00 AM".into())
        );
        assert_eq!(run(&mut fx, "date nope"), Output::Line("Invalid date string.".into()));
        let Output::Line(now) = run(&mut fx, "date") else {
            panic!("expected a line");
        };
        assert!(now.ends_with("AM") || now.ends_with("PM"));
    }

    #[test]
    fn about_is_unlisted_but_runs() {
        let mut fx = Fixture::new();
        let Output::Line(text) = run(&mut fx, "about") else {
            panic!("expected a line");
        };
        assert!(text.starts_with("Terminal-D"));
        let Output::Lines(help) = run(&mut fx, "help") else {
            panic!("expected lines");
        };
        assert!(!help.iter().any(|l| l == "ABOUT"));
        assert!(help.iter().any(|l| l == "CLEAR"));
    }

    #[test]
    fn clear_resets_lines() {
        let mut fx = Fixture::new();
        fx.state.lines.push_plain("old");
        assert_eq!(run(&mut fx, "clear"), Output::Silent);
        assert_eq!(fx.state.lines.len(), 2);
        assert_ne!(fx.state.lines.records()[1].content, "old");
    }

    #[test]
    fn whoami_reports_session_or_guest() {
        let mut fx = Fixture::new();
        assert_eq!(run(&mut fx, "whoami"), Output::Line("guest".into()));
        fx.state.session = Some(User::new("1", "ada@example.com"));
        assert_eq!(run(&mut fx, "WHOAMI"), Output::Line("ada".into()));
    }
}
