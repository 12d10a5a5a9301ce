//! The `theme` command: list, switch and create color themes.

use termd_types::Result;

use crate::interpreter::{Command, CommandRegistry, Environment, Execution, Output};
use crate::parser::Options;
use crate::theme::{Activation, Theme};

/// Register theme management commands into a registry.
pub fn register_theme_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(ThemeCmd));
}

fn hint(lines: [&str; 2]) -> Execution {
    Execution::Ready(Output::Lines(lines.iter().map(|l| l.to_string()).collect()))
}

fn non_empty<'a>(options: &'a Options, name: &str) -> Option<&'a str> {
    options.value(name).filter(|v| !v.is_empty())
}

struct ThemeCmd;

impl ThemeCmd {
    fn create(&self, name: Option<&str>, options: &Options, env: &mut Environment<'_>) -> Execution {
        let name = name.map(str::to_lowercase).filter(|n| !n.is_empty());
        let (Some(name), Some(bg), Some(text)) =
            (name, non_empty(options, "bg"), non_empty(options, "text"))
        else {
            return hint([
                "Please provide a theme name and valid color strings (i.e. blue, black, #1e1e1e etc.).",
                "Example: theme new \"themeName\" -bg=\"backgroundColor\" -text=\"textColor\"",
            ]);
        };
        let primary = non_empty(options, "primary").unwrap_or(text);
        let secondary = non_empty(options, "secondary").unwrap_or(primary);
        env.state
            .themes
            .insert(name.as_str(), Theme::new(bg, bg, primary, secondary, text));
        log::info!("created theme {name}");
        Execution::ready(format!("New theme \"{name}\" has been successfully created."))
    }
}

impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "Change the theme to a preset scheme, or create your own. Use -l to list themes."
    }
    fn usage(&self) -> &str {
        "theme <name> | theme -l | theme new \"name\" -bg=<color> -text=<color> [-primary=<color>] [-secondary=<color>]"
    }
    fn execute(&self, args: &[&str], options: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        let first = args.first().map(|a| a.to_lowercase());
        if first.as_deref() == Some("new") {
            return Ok(self.create(args.get(1).copied(), options, env));
        }
        if options.is_set("l") {
            let names = env.state.themes.names().map(str::to_string).collect();
            return Ok(Execution::Ready(Output::Lines(names)));
        }

        let Some(name) = first.filter(|n| !n.trim().is_empty()) else {
            return Ok(hint([
                "Please provide a valid theme name, or use the \"new\" keyword to create a new theme.",
                "Example: theme new \"themeName\" -bg=\"backgroundColor\" -text=\"textColor\"",
            ]));
        };
        let message = match env.state.themes.activate(&name) {
            Activation::Activated => {
                log::info!("theme set to {name}");
                format!("Theme set to {name}.")
            },
            Activation::AlreadyActive => format!("Theme is already set to {name}."),
            Activation::Missing => format!("Theme {name} does not exist."),
        };
        Ok(Execution::ready(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Fixture;

    fn run(fx: &mut Fixture, line: &str) -> Output {
        let mut reg = CommandRegistry::new();
        register_theme_commands(&mut reg);
        match reg.dispatch(line, &mut fx.env()) {
            Execution::Ready(out) => out,
            Execution::Pending(_) => panic!("expected ready output"),
        }
    }

    fn line(s: &str) -> Output {
        Output::Line(s.to_string())
    }

    #[test]
    fn switch_presets() {
        let mut fx = Fixture::new();
        assert_eq!(run(&mut fx, "theme retro"), line("Theme set to retro."));
        assert_eq!(run(&mut fx, "theme RETRO"), line("Theme is already set to retro."));
        assert_eq!(run(&mut fx, "theme neon"), line("Theme neon does not exist."));
        assert_eq!(fx.state.themes.active_name(), "retro");
    }

    #[test]
    fn list_themes() {
        let mut fx = Fixture::new();
        assert_eq!(
            run(&mut fx, "theme -l"),
            Output::Lines(vec!["dark".into(), "retro".into()])
        );
    }

    #[test]
    fn create_then_activate() {
        let mut fx = Fixture::new();
        assert_eq!(
            run(&mut fx, r#"theme new "foo" -bg=black -text=white"#),
            line("New theme \"foo\" has been successfully created.")
        );
        assert_eq!(fx.state.themes.active_name(), "dark");
        assert_eq!(run(&mut fx, "theme foo"), line("Theme set to foo."));
        let active = fx.state.themes.active();
        assert_eq!(active.bg, "black");
        assert_eq!(active.bg_light, "black");
        assert_eq!(active.font, "white");
        assert_eq!(active.primary, "white");
        assert_eq!(active.secondary, "white");
    }

    #[test]
    fn create_with_accent_colors() {
        let mut fx = Fixture::new();
        run(&mut fx, "theme new Sea -bg=navy -text=white -primary=aqua");
        let sea = fx.state.themes.get("sea").unwrap();
        assert_eq!(sea.primary, "aqua");
        assert_eq!(sea.secondary, "aqua");
        run(&mut fx, "theme new sky -bg=blue -text=white -primary=aqua -secondary=teal");
        assert_eq!(fx.state.themes.get("sky").unwrap().secondary, "teal");
    }

    #[test]
    fn create_missing_colors_is_hint() {
        let mut fx = Fixture::new();
        let Output::Lines(lines) = run(&mut fx, "theme new foo -bg=black") else {
            panic!("expected lines");
        };
        assert_eq!(lines.len(), 2);
        assert!(fx.state.themes.get("foo").is_none());
        assert!(matches!(run(&mut fx, "theme new -bg=a -text=b"), Output::Lines(_)));
    }

    #[test]
    fn no_argument_is_hint() {
        let mut fx = Fixture::new();
        assert!(matches!(run(&mut fx, "theme"), Output::Lines(_)));
    }
}
