//! Line-by-line application of a rule set.

use std::fs;
use std::io;

use crate::pattern::{comment, Flags, Pattern, PatternError};
use crate::rule::Rule;
use crate::source::SourcePath;
use crate::types::{Diagnostic, SourceSpan};

/// A per-file failure, isolated from the rest of the run.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A source could not be opened or read. Reported separately from
    /// lint findings and mapped to a distinct exit code by the driver.
    #[error("{path}: {source}")]
    Unreadable {
        /// The path that failed.
        path: SourcePath,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Applies a filtered rule set to source lines, honoring inline
/// suppression comments.
///
/// The scanner holds no per-file state; one instance serves any number of
/// files, concurrently if desired.
#[derive(Debug)]
pub struct Scanner<'r> {
    rules: Vec<&'r Rule>,
    suppress: bool,
    noqa: Pattern,
}

impl<'r> Scanner<'r> {
    /// Creates a scanner over the given rule set.
    ///
    /// `suppress` enables both the global `noqa` marker and per-rule
    /// suppression patterns.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the built-in `noqa` marker fails to
    /// compile.
    pub fn new(rules: Vec<&'r Rule>, suppress: bool) -> Result<Self, PatternError> {
        let noqa = comment(Pattern::new("noqa", Flags::IGNORE_CASE)?)?;
        Ok(Self {
            rules,
            suppress,
            noqa,
        })
    }

    /// Yields diagnostics for `lines`, lazily.
    ///
    /// Rules are first filtered down to the ones applicable to `path`; if
    /// none apply the iterator is empty without a single line being
    /// consumed. Diagnostics come out in line order, then rule order, then
    /// left-to-right match order.
    pub fn scan_lines<'s, I, S>(
        &'s self,
        lines: I,
        path: &SourcePath,
    ) -> Box<dyn Iterator<Item = Diagnostic> + 's>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 's,
        S: AsRef<str> + 's,
    {
        let enabled: Vec<&Rule> = self
            .rules
            .iter()
            .copied()
            .filter(|rule| rule.applicable(path))
            .collect();
        if enabled.is_empty() {
            return Box::new(std::iter::empty());
        }

        let path = path.clone();
        let suppress = self.suppress;
        let noqa = &self.noqa;
        Box::new(
            lines
                .into_iter()
                .enumerate()
                .flat_map(move |(index, raw)| {
                    let line = strip_newline(raw.as_ref());
                    let mut found = Vec::new();
                    if !(suppress && noqa.is_match(line)) {
                        for rule in &enabled {
                            for finding in rule.errors(line, suppress) {
                                found.push(Diagnostic {
                                    span: SourceSpan {
                                        path: path.clone(),
                                        line: index + 1,
                                        start: finding.start,
                                        end: finding.end,
                                    },
                                    summary: finding.summary,
                                    description: finding.description,
                                    source: line.to_owned(),
                                });
                            }
                        }
                    }
                    found.into_iter()
                }),
        )
    }

    /// Reads `path` and scans its lines.
    ///
    /// When no rule applies to `path` the source is not even opened.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Unreadable`] if the source cannot be read;
    /// other files in the same run are unaffected.
    pub fn scan_file(&self, path: &SourcePath) -> Result<Vec<Diagnostic>, ScanError> {
        tracing::debug!("Validating: {path}");

        if !self.rules.iter().any(|rule| rule.applicable(path)) {
            return Ok(Vec::new());
        }

        let contents = read_source(path).map_err(|source| ScanError::Unreadable {
            path: path.clone(),
            source,
        })?;
        Ok(self.scan_lines(contents.lines(), path).collect())
    }
}

fn read_source(path: &SourcePath) -> io::Result<String> {
    match path {
        SourcePath::Stdin => io::read_to_string(io::stdin()),
        SourcePath::File(file) => fs::read_to_string(file),
    }
}

fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
