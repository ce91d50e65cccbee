//! Lint orchestration: per-file fan-out, streamed printing, counting.

use std::sync::mpsc;

use anyhow::Result;
use apexlint_core::{Rule, ScanError, Scanner, SourcePath, TermStyle};
use rayon::prelude::*;

/// Per-run settings the command line resolved.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Honor inline suppression comments.
    pub suppress: bool,
    /// Verbosity: negative for summary-only, positive for descriptions.
    pub verbose: i32,
    /// Terminal style selected once per run.
    pub style: TermStyle,
    /// Worker count; `Some(1)` scans sequentially, `None` uses one worker
    /// per CPU.
    pub jobs: Option<usize>,
    /// Print the total number of findings to standard error.
    pub count: bool,
}

/// What a run produced: findings drive exit code 1, failures exit code 2.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Number of lint findings printed.
    pub findings: usize,
    /// Number of files that could not be read.
    pub failures: usize,
}

/// Scans every path with the rule set, printing rendered findings to
/// stdout as they are produced.
///
/// Files are independent: an unreadable file is logged and counted without
/// aborting the rest of the run. With more than one worker, files are
/// scanned concurrently and stream out in completion order; within one
/// file, ordering is always line, rule, then match order.
///
/// # Errors
///
/// Returns an error if the built-in suppression marker fails to compile or
/// the worker pool cannot be built.
pub fn lint(paths: &[SourcePath], rules: Vec<&Rule>, options: &Options) -> Result<Outcome> {
    let scanner = Scanner::new(rules, options.suppress)?;

    let outcome = if options.jobs == Some(1) {
        lint_serial(paths, &scanner, options)
    } else {
        lint_parallel(paths, &scanner, options)?
    };

    if options.count {
        eprintln!("{}", outcome.findings);
    }
    Ok(outcome)
}

/// Renders every finding in one file.
fn check_file(
    scanner: &Scanner<'_>,
    path: &SourcePath,
    options: &Options,
) -> Result<Vec<String>, ScanError> {
    let diagnostics = scanner.scan_file(path)?;
    Ok(diagnostics
        .iter()
        .map(|d| d.render(options.verbose, options.style))
        .collect())
}

fn lint_serial(paths: &[SourcePath], scanner: &Scanner<'_>, options: &Options) -> Outcome {
    let mut outcome = Outcome::default();
    for path in paths {
        collect(&mut outcome, check_file(scanner, path, options));
    }
    outcome
}

fn lint_parallel(
    paths: &[SourcePath],
    scanner: &Scanner<'_>,
    options: &Options,
) -> Result<Outcome> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.unwrap_or(0))
        .build()?;

    let mut outcome = Outcome::default();
    let (tx, rx) = mpsc::channel();
    pool.in_place_scope(|scope| {
        scope.spawn(move |_| {
            paths.par_iter().for_each_with(tx, |tx, path| {
                let _ = tx.send(check_file(scanner, path, options));
            });
        });
        // Findings stream out as workers finish files; the sender side
        // hangs up once every file is done.
        for result in rx {
            collect(&mut outcome, result);
        }
    });
    Ok(outcome)
}

fn collect(outcome: &mut Outcome, result: Result<Vec<String>, ScanError>) {
    match result {
        Ok(messages) => {
            for message in &messages {
                println!("{message}");
            }
            outcome.findings += messages.len();
        }
        Err(e) => {
            tracing::error!("apexlint: {e}");
            outcome.failures += 1;
        }
    }
}
