//! apexlint CLI binary.
//!
//! Usage:
//! ```bash
//! apexlint [OPTIONS] [FILE]...
//! cat Foo.cls | apexlint -
//! ```

use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use apexlint_core::TermStyle;

mod config;
mod driver;
mod paths;

use config::ColorWhen;

/// Validate Salesforce Apex code for common errors
#[derive(Parser)]
#[command(name = "apexlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to validate; `-` reads standard input. Directories are
    /// walked recursively.
    #[arg(value_name = "FILE", default_value = "-")]
    files: Vec<String>,

    /// Colorize the output
    #[arg(long, value_enum, value_name = "WHEN")]
    color: Option<ColorWhen>,

    /// Path to configuration file (default: ./apexlint.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print total number of errors to standard error
    #[arg(long)]
    count: bool,

    /// Debug output
    #[arg(long, action = ArgAction::Count)]
    debug: u8,

    /// Errors to ignore (default: none)
    #[arg(long, value_name = "VALIDATOR")]
    ignore: Vec<String>,

    /// Number of parallel checks (default: number of CPUs)
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,

    /// Disable the effect of inline "noqa" comments and per-rule
    /// suppression markers
    #[arg(long)]
    no_suppress: bool,

    /// Less verbose messages; see --verbose
    #[arg(short, long, action = ArgAction::Count)]
    quiet: u8,

    /// Errors to enable (default: all)
    #[arg(long, value_name = "VALIDATOR")]
    select: Vec<String>,

    /// More verbose messages
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug > 0 {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("apexlint: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let registry = apexlint_rules::registry().context("failed to build rule registry")?;
    let config = config::resolve(cli.config.as_deref())?;

    // Command-line selections replace config-file selections entirely.
    let select = if cli.select.is_empty() {
        config.select.clone()
    } else {
        cli.select.clone()
    };
    let ignore = if cli.ignore.is_empty() {
        config.ignore.clone()
    } else {
        cli.ignore.clone()
    };

    let known = registry.names();
    for name in select.iter().chain(ignore.iter()) {
        if !known.contains(&name.as_str()) {
            eprintln!(
                "apexlint: unknown validator `{name}` (choose from: {})",
                known.join(", ")
            );
            return Ok(ExitCode::from(2));
        }
    }

    let select: HashSet<String> = select.into_iter().collect();
    let ignore: HashSet<String> = ignore.into_iter().collect();
    let rules = registry.library(&select, &ignore);

    let color = cli
        .color
        .or(config.color)
        .unwrap_or_default();
    let color = match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => std::io::stdout().is_terminal(),
    };

    let options = driver::Options {
        suppress: !cli.no_suppress && config.suppress.unwrap_or(true),
        verbose: i32::from(cli.verbose) - i32::from(cli.quiet),
        style: TermStyle::get(color),
        jobs: cli.jobs.or(config.jobs),
        count: cli.count,
    };

    let files = paths::unique(paths::walk(paths::from_args(&cli.files)));
    let outcome = driver::lint(&files, rules, &options)?;

    Ok(if outcome.findings > 0 {
        ExitCode::from(1)
    } else if outcome.failures > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
