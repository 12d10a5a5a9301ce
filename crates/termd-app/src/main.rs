//! Terminal-D line-mode entry point.
//!
//! Reads lines from stdin, feeds them to the engine as key events and prints
//! new scrollback records. The config file path comes from the first
//! argument or `TERMD_CONFIG`; defaults are used when neither is set.

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use termd_auth::{FileTokenStore, HttpAuthClient};
use termd_terminal::Terminal;
use termd_types::{Key, TerminalConfig};
use termd_vfs::demo_tree;

fn load_config() -> Result<TerminalConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TERMD_CONFIG").ok())
        .map(PathBuf::from);
    match path {
        Some(path) => TerminalConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(TerminalConfig::default()),
    }
}

/// Print records added since `shown`. A shrunk history means `clear` ran.
fn flush_lines(term: &Terminal, shown: &mut usize, out: &mut impl Write) -> io::Result<()> {
    let lines = term.lines();
    if lines.len() < *shown {
        *shown = 0;
    }
    for line in &lines[*shown..] {
        writeln!(out, "{}", render::record(line))?;
    }
    *shown = lines.len();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Starting Terminal-D against {}", config.backend_url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;

    let auth = HttpAuthClient::new(config.backend_url.clone(), config.command_timeout());
    let tokens = FileTokenStore::new(config.storage_path());
    log::debug!("token storage at {}", tokens.path().display());
    let mut term = Terminal::new(config, demo_tree(), Arc::new(auth), Box::new(tokens));

    runtime.block_on(term.start());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut shown = 0;
    flush_lines(&term, &mut shown, &mut stdout)?;

    loop {
        write!(stdout, "{} ", term.prompt_prefix())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        term.handle_key(Key::Paste(line.to_string()));
        term.handle_key(Key::Enter);
        runtime.block_on(term.settle());
        flush_lines(&term, &mut shown, &mut stdout)?;
    }

    log::info!("Terminal-D shut down");
    Ok(())
}
