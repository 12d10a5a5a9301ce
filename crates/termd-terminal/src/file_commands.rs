//! Virtual file system commands: ls, cd, cat, pwd.

use termd_types::{Result, TermError};
use termd_vfs::ROOT;

use crate::interpreter::{Command, CommandRegistry, Environment, Execution};
use crate::parser::Options;

/// Register the file system commands into a registry.
pub fn register_file_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(PwdCmd));
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List the contents of the current directory, or of the given one."
    }
    fn usage(&self) -> &str {
        "ls [path]"
    }
    fn execute(&self, args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        let shown = args.first().copied().unwrap_or(".");
        let path = env.state.cwd.resolve(shown);
        let names = env
            .vfs
            .list(&path, shown)
            .map_err(|e| TermError::Command(format!("ls: {e}")))?;
        Ok(Execution::ready(names.join(" ")))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change the working directory. Without a path, return to ~."
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn execute(&self, args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        let target = args.first().copied().unwrap_or(ROOT);
        let path = env.state.cwd.resolve(target);
        env.vfs
            .ensure_dir(&path, target)
            .map_err(|e| TermError::Command(format!("cd: {e}")))?;
        log::debug!("cwd {} -> {path}", env.state.cwd);
        env.state.cwd = path;
        Ok(Execution::silent())
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Print the contents of a file."
    }
    fn usage(&self) -> &str {
        "cat <path>"
    }
    fn execute(&self, args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        let Some(&shown) = args.first() else {
            return Err(TermError::Command("Usage: cat <path>".to_string()));
        };
        let path = env.state.cwd.resolve(shown);
        let content = env.vfs.read(&path, shown)?;
        Ok(Execution::ready(content))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print the working directory."
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn args_allowed(&self) -> bool {
        false
    }
    fn execute(&self, _args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        Ok(Execution::ready(env.state.cwd.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Output;
    use crate::test_utils::Fixture;

    fn run(fx: &mut Fixture, line: &str) -> Output {
        let mut reg = CommandRegistry::new();
        register_file_commands(&mut reg);
        match reg.dispatch(line, &mut fx.env()) {
            Execution::Ready(out) => out,
            Execution::Pending(_) => panic!("expected ready output"),
        }
    }

    fn line(s: &str) -> Output {
        Output::Line(s.to_string())
    }

    #[test]
    fn ls_root_and_subdir() {
        let mut fx = Fixture::new();
        assert_eq!(run(&mut fx, "ls"), line("contact.txt projects readme.txt skills"));
        assert_eq!(run(&mut fx, "ls projects"), line("archive terminal-d.md weather.md"));
    }

    #[test]
    fn ls_errors() {
        let mut fx = Fixture::new();
        assert_eq!(run(&mut fx, "ls nope"), line("ls: nope: No such file or directory"));
        assert_eq!(run(&mut fx, "ls readme.txt"), line("ls: readme.txt: Not a directory"));
    }

    #[test]
    fn cd_and_pwd() {
        let mut fx = Fixture::new();
        assert_eq!(run(&mut fx, "cd projects/archive"), Output::Silent);
        assert_eq!(run(&mut fx, "pwd"), line("~/projects/archive"));
        run(&mut fx, "cd ..");
        assert_eq!(fx.state.cwd.to_string(), "~/projects");
        run(&mut fx, "cd ..");
        assert_eq!(fx.state.cwd.to_string(), "~");
    }

    #[test]
    fn cd_never_climbs_above_root() {
        let mut fx = Fixture::new();
        run(&mut fx, "cd ../../..");
        assert!(fx.state.cwd.is_root());
    }

    #[test]
    fn cd_without_argument_goes_home() {
        let mut fx = Fixture::new();
        run(&mut fx, "cd skills");
        run(&mut fx, "cd");
        assert!(fx.state.cwd.is_root());
        run(&mut fx, "cd skills");
        run(&mut fx, "cd ~");
        assert!(fx.state.cwd.is_root());
    }

    #[test]
    fn cd_errors_keep_cwd() {
        let mut fx = Fixture::new();
        run(&mut fx, "cd projects");
        assert_eq!(run(&mut fx, "cd nowhere"), line("cd: nowhere: No such file or directory"));
        assert_eq!(run(&mut fx, "cd weather.md"), line("cd: weather.md: Not a directory"));
        assert_eq!(fx.state.cwd.to_string(), "~/projects");
    }

    #[test]
    fn cat_file_and_directory() {
        let mut fx = Fixture::new();
        assert_eq!(
            run(&mut fx, "cat skills/backend.txt"),
            line("Node.js, Express, PostgreSQL")
        );
        assert_eq!(run(&mut fx, "cat projects"), line("projects: Is a directory"));
        assert_eq!(run(&mut fx, "cat ghost.txt"), line("ghost.txt: No such file or directory"));
        assert_eq!(run(&mut fx, "cat"), line("Usage: cat <path>"));
    }

    #[test]
    fn cat_relative_to_cwd() {
        let mut fx = Fixture::new();
        run(&mut fx, "cd projects/archive");
        assert_eq!(
            run(&mut fx, "cat ~/skills/frontend.txt"),
            line("TypeScript, React, styled-components")
        );
        assert_eq!(
            run(&mut fx, "cat first-site.txt"),
            line("My very first website. Tables everywhere.")
        );
    }
}
