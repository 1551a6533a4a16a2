// src/cli.rs
use anyhow::{Context as _, Result};
use clap::Parser;
use std::env;
use std::io::{self, BufRead as _, IsTerminal as _, Write as _};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::config::{Config, load_config};
use crate::core::count;
use crate::core::scanner::{Filters, parse_csv};
use crate::core::source::parse_source;
use crate::github::GitHubClient;
use crate::report::Report;

const PROMPT: &str = "Paste GitHub URL or local path (Enter = current folder): ";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Local directory or GitHub URL (https://github.com/<owner>/<repo>[/tree/<branch>/<path>]).
    /// Prompts when omitted on a terminal, otherwise counts the current directory.
    pub source: Option<String>,

    /// Number of files to show [default: 10, or `top` from the config file]
    #[arg(short = 't', long)]
    pub top: Option<NonZeroUsize>,

    /// Extensions to count, comma-separated (e.g. "py,js,ts"; "source" for common
    /// source-code extensions); all files when omitted
    #[arg(short = 'e', long)]
    pub ext: Option<String>,

    /// Extra directory names to ignore, comma-separated (added to .git, node_modules, venv, ...)
    #[arg(short = 'i', long)]
    pub ignore_dirs: Option<String>,

    /// Configuration file [default: nearest .loccount.toml]
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Filters from the config file with command-line values applied on top.
    /// `--ext` replaces the configured extension list; `--ignore-dirs` extends
    /// the ignore set.
    #[must_use]
    pub fn filters(&self, config: &Config) -> Filters {
        let extensions = self
            .ext
            .as_deref()
            .map_or_else(|| config.extensions.clone(), parse_csv);
        let extra_dirs = self.ignore_dirs.as_deref().map(parse_csv).unwrap_or_default();

        Filters::new()
            .with_extensions(extensions)
            .with_ignored_dirs(&config.ignore_dirs)
            .with_ignored_dirs(extra_dirs)
    }
}

/// Counts the requested source and returns the report.
///
/// # Errors
///
/// Fails on invalid sources, unreadable files, remote fetch failures and bad
/// configuration files.
pub fn execute(args: &Args) -> Result<Report> {
    let cwd = env::current_dir().context("Failed to read the current directory")?;
    let config = load_config(args.config.as_deref(), &cwd)?;

    let raw = match &args.source {
        Some(source) => source.clone(),
        None => prompt_for_source().context("Failed to read the source from stdin")?,
    };
    let spec = parse_source(&raw)?;
    let filters = args.filters(&config);
    let top = args.top.unwrap_or(config.top);
    tracing::debug!(source = %spec, top = top.get(), "counting");

    let client = GitHubClient::from_env(&config.github)?;
    let report = count(&spec, &client, &filters, top)
        .with_context(|| format!("Failed to count lines in {raw}"))?;
    Ok(report)
}

/// Runs the CLI: counts and prints the text report to stdout.
///
/// # Errors
///
/// See [`execute`].
pub fn run(args: &Args) -> Result<()> {
    let report = execute(args)?;
    println!("{}", report.render_text());
    Ok(())
}

fn prompt_for_source() -> io::Result<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(String::from("."));
    }

    print!("{PROMPT}");
    io::stdout().flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    let line = line.trim();
    Ok(if line.is_empty() { String::from(".") } else { line.to_owned() })
}
