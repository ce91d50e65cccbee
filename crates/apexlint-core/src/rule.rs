//! Declarative detection rules.

use std::iter;

use crate::pattern::Pattern;
use crate::source::SourcePath;

/// File name globs a rule applies to when none are declared explicitly.
pub const DEFAULT_FILENAMES: [&str; 2] = ["*.cls", "*.trigger"];

/// Name of the capture group a rule's `invalid` pattern may declare to
/// narrow the reported span to the offending text.
const CURSOR_GROUP: &str = "cursor";

/// A named detection rule: a compiled `invalid` pattern, an optional
/// `suppress` pattern and a file-name applicability filter.
///
/// Rules are built once at process start via [`Rule::builder`] and never
/// mutated. Both patterns are evaluated against the same newline-stripped
/// line text; a suppression only silences this rule.
#[derive(Debug)]
pub struct Rule {
    name: String,
    summary: String,
    description: Option<String>,
    invalid: Pattern,
    suppress: Option<Pattern>,
    filenames: Vec<String>,
}

impl Rule {
    /// Starts building a rule around its `invalid` pattern.
    pub fn builder(name: impl Into<String>, invalid: Pattern) -> RuleBuilder {
        RuleBuilder {
            name: name.into(),
            summary: String::new(),
            description: None,
            invalid,
            suppress: None,
            filenames: None,
        }
    }

    /// The unique rule name, e.g. `NoFutureInTest`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line summary shown with every finding.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Optional long-form explanation shown in verbose mode.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The declared file name globs.
    #[must_use]
    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Whether this rule runs against `path`.
    ///
    /// Standard input is always applicable. For ordinary files the file
    /// name must match one of the declared globs; a rule that declared an
    /// empty glob list matches no ordinary file at all.
    #[must_use]
    pub fn applicable(&self, path: &SourcePath) -> bool {
        if path.is_stdin() {
            return true;
        }
        let Some(file_name) = path.file_name() else {
            return false;
        };
        self.filenames.iter().any(|filename| {
            glob::Pattern::new(filename).is_ok_and(|pattern| pattern.matches(file_name))
        })
    }

    /// Yields one [`Finding`] per non-overlapping `invalid` match in
    /// `line`, leftmost first.
    ///
    /// With `suppress` enabled and a declared suppression pattern matching
    /// the line, the rule yields nothing at all for this line. The span of
    /// each finding is the extent of the `cursor` capture group when it
    /// participated in the match, else zero-length at the match start.
    pub fn errors<'a>(
        &'a self,
        line: &'a str,
        suppress: bool,
    ) -> Box<dyn Iterator<Item = Finding> + 'a> {
        if suppress {
            if let Some(pattern) = &self.suppress {
                if pattern.is_match(line) {
                    return Box::new(iter::empty());
                }
            }
        }

        Box::new(self.invalid.matches(line).map(move |m| {
            let (start, end) = match m.group(CURSOR_GROUP) {
                Some(range) => (range.start, range.end),
                None => {
                    let start = m.range().start;
                    (start, start)
                }
            };
            Finding {
                start,
                end,
                summary: self.summary.clone(),
                description: self.description.clone(),
            }
        }))
    }
}

/// One rule violation within a line, before file and line attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Byte offset where the reported span starts.
    pub start: usize,
    /// Byte offset one past the end of the reported span.
    pub end: usize,
    /// The rule's summary.
    pub summary: String,
    /// The rule's long-form description, if any.
    pub description: Option<String>,
}

/// Builder for [`Rule`] values.
///
/// `summary` defaults to empty (a rule without documentation is allowed),
/// `filenames` to [`DEFAULT_FILENAMES`].
#[derive(Debug)]
pub struct RuleBuilder {
    name: String,
    summary: String,
    description: Option<String>,
    invalid: Pattern,
    suppress: Option<Pattern>,
    filenames: Option<Vec<String>>,
}

impl RuleBuilder {
    /// Sets the one-line summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into().trim().to_owned();
        self
    }

    /// Sets the long-form description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into().trim().to_owned());
        self
    }

    /// Sets the suppression pattern silencing this rule on a line.
    #[must_use]
    pub fn suppress(mut self, suppress: Pattern) -> Self {
        self.suppress = Some(suppress);
        self
    }

    /// Replaces the applicability globs. Passing an empty iterator
    /// restricts the rule to standard input.
    #[must_use]
    pub fn filenames<I, S>(mut self, filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filenames = Some(filenames.into_iter().map(Into::into).collect());
        self
    }

    /// Finishes the rule.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule {
            name: self.name,
            summary: self.summary,
            description: self.description,
            invalid: self.invalid,
            suppress: self.suppress,
            filenames: self
                .filenames
                .unwrap_or_else(|| DEFAULT_FILENAMES.iter().map(ToString::to_string).collect()),
        }
    }
}
