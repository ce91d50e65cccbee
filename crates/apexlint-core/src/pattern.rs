//! Regular-expression composers for context-sensitive matching.
//!
//! Apex analysis here is strictly line-oriented, so "is this inside a string
//! literal?" and "is this inside a comment?" are answered by rewriting the
//! pattern itself rather than by tracking parser state. [`not_string`]
//! prefixes a pattern with a sub-expression that consumes balanced
//! single-quoted strings from the start of the line; [`comment`] embeds a
//! pattern into the two Apex comment shapes. Both transforms are pure.
//!
//! The composed expressions rely on lookahead (`(?!/)`, and negative
//! lookahead in rule patterns), hence `fancy_regex` rather than plain
//! `regex`.

use std::fmt;
use std::ops::{BitOr, Range};

/// Matches zero or more complete single-quoted string literals from the
/// start of the line, then any run of non-quote characters. Whatever
/// follows can therefore only match outside a balanced run of strings.
const NOT_STRING_PREFIX: &str = r"^(?:[^']*'(?:\\\\|\\'|[^'\\])*')*[^']*";

/// Compilation flags carried by a [`Pattern`].
///
/// Combine with `|`: `Flags::IGNORE_CASE | Flags::VERBOSE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// Case-insensitive matching (`(?i)`).
    pub ignore_case: bool,
    /// Verbose syntax (`(?x)`): whitespace and `#` comments are ignored.
    pub verbose: bool,
}

impl Flags {
    /// No flags.
    pub const NONE: Self = Self {
        ignore_case: false,
        verbose: false,
    };

    /// Case-insensitive matching.
    pub const IGNORE_CASE: Self = Self {
        ignore_case: true,
        verbose: false,
    };

    /// Verbose pattern syntax.
    pub const VERBOSE: Self = Self {
        ignore_case: false,
        verbose: true,
    };

    /// The inline flag group these flags compile to.
    fn inline_prefix(self) -> &'static str {
        match (self.ignore_case, self.verbose) {
            (false, false) => "",
            (true, false) => "(?i)",
            (false, true) => "(?x)",
            (true, true) => "(?ix)",
        }
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            ignore_case: self.ignore_case || rhs.ignore_case,
            verbose: self.verbose || rhs.verbose,
        }
    }
}

/// An invalid composed regular expression.
///
/// Raised when a rule is misconfigured; fatal at registry construction,
/// before any scanning begins.
#[derive(Debug, thiserror::Error)]
#[error("invalid pattern `{pattern}`: {message}")]
pub struct PatternError {
    /// The offending pattern source text.
    pub pattern: String,
    /// The underlying compilation error.
    pub message: String,
}

/// An immutable compiled regular expression plus its flags.
///
/// Created once at rule-definition time and shared by all scans. The raw
/// source text is retained so composers can rewrite it.
#[derive(Debug)]
pub struct Pattern {
    source: String,
    flags: Flags,
    regex: fancy_regex::Regex,
}

impl Pattern {
    /// Compiles raw regex source text with the given flags.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the source does not compile.
    pub fn new(source: impl Into<String>, flags: Flags) -> Result<Self, PatternError> {
        let source = source.into();
        let regex = fancy_regex::Regex::new(&format!("{}{source}", flags.inline_prefix()))
            .map_err(|e| PatternError {
                pattern: source.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            source,
            flags,
            regex,
        })
    }

    /// Compiles a pattern matching `text` verbatim (regex-escaped).
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the escaped text does not compile.
    pub fn literal(text: &str) -> Result<Self, PatternError> {
        Self::new(fancy_regex::escape(text).into_owned(), Flags::NONE)
    }

    /// Recompiles this pattern with `flags` replacing (not merging) the
    /// current ones.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if recompilation fails.
    pub fn with_flags(&self, flags: Flags) -> Result<Self, PatternError> {
        Self::new(self.source.clone(), flags)
    }

    /// The raw source text, without the inline flag prefix.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flags this pattern was compiled with.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether the pattern matches anywhere in `text`.
    ///
    /// A runtime matching failure (e.g. backtrack limit exceeded) is
    /// reported as a non-match.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        match self.regex.is_match(text) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!("match aborted for `{}`: {e}", self.source);
                false
            }
        }
    }

    /// Iterates over all non-overlapping matches in `text`, leftmost first.
    #[must_use]
    pub fn matches<'p, 't>(&'p self, text: &'t str) -> Matches<'p, 't> {
        Matches {
            pattern: &self.source,
            inner: self.regex.captures_iter(text),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Iterator over the matches of a [`Pattern`] within one line of text.
///
/// Stops at the first runtime matching failure, which is logged.
pub struct Matches<'p, 't> {
    pattern: &'p str,
    inner: fancy_regex::CaptureMatches<'p, 't>,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = PatternMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok(captures) => Some(PatternMatch { captures }),
            Err(e) => {
                tracing::warn!("match aborted for `{}`: {e}", self.pattern);
                None
            }
        }
    }
}

/// A single match, exposing the extents of the whole match and of named
/// capture groups.
pub struct PatternMatch<'t> {
    captures: fancy_regex::Captures<'t>,
}

impl PatternMatch<'_> {
    /// Byte extent of the whole match within the line.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.captures.get(0).map_or(0..0, |m| m.start()..m.end())
    }

    /// Byte extent of the named capture group, if it participated in the
    /// match.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<Range<usize>> {
        self.captures.name(name).map(|m| m.start()..m.end())
    }
}

/// Trait seam letting composers accept either a literal string or an
/// already-built [`Pattern`].
///
/// A `&str` is regex-escaped and matched verbatim; a `Pattern` is passed
/// through unchanged.
pub trait IntoPattern {
    /// Converts `self` into a compiled [`Pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if compilation fails.
    fn into_pattern(self) -> Result<Pattern, PatternError>;
}

impl IntoPattern for Pattern {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Ok(self)
    }
}

impl IntoPattern for &Pattern {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Pattern::new(self.source.clone(), self.flags)
    }
}

impl IntoPattern for &str {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Pattern::literal(self)
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Pattern::literal(&self)
    }
}

/// Returns a [`Pattern`] for `input`, escaping it if necessary.
///
/// A literal string is regex-escaped; an existing pattern is returned
/// equivalent. If `flags` is supplied it replaces (never merges with) the
/// pattern's flags.
///
/// # Errors
///
/// Returns [`PatternError`] if compilation fails.
pub fn escape<P: IntoPattern>(input: P, flags: Option<Flags>) -> Result<Pattern, PatternError> {
    let pattern = input.into_pattern()?;
    match flags {
        Some(flags) => pattern.with_flags(flags),
        None => Ok(pattern),
    }
}

/// Returns a [`Pattern`] that matches `pattern` only outside single-quoted
/// strings.
///
/// The rewrite consumes, anchored at line start, every complete
/// `'...'`-literal (escape-aware: `\\` and `\'` do not terminate it) before
/// the payload, so the payload can only match text outside a balanced run
/// of strings. Flags are inherited.
///
/// # Errors
///
/// Returns [`PatternError`] if the rewritten pattern fails to compile.
pub fn not_string(pattern: &Pattern) -> Result<Pattern, PatternError> {
    Pattern::new(
        format!("{NOT_STRING_PREFIX}(?:{})", pattern.source()),
        pattern.flags(),
    )
}

/// Returns a [`Pattern`] that matches `input` inside a comment.
///
/// Two shapes are recognized on a single line: a `/* ... */` block comment
/// with the target strictly before the closing `*/` (a `*` not followed by
/// `/` does not close it), captured as `c`; and a `// ...` line comment,
/// captured as `cpp`. The result is additionally wrapped in [`not_string`]
/// so comment-shaped text inside a string literal does not count. Flags are
/// inherited from the input pattern.
///
/// # Errors
///
/// Returns [`PatternError`] if the composed pattern fails to compile.
pub fn comment<P: IntoPattern>(input: P) -> Result<Pattern, PatternError> {
    let target = input.into_pattern()?;
    let shaped = Pattern::new(
        format!(
            r"(?:/\*(?:\*(?!/)|[^*])*?(?P<c>{src}).*?\*/|//.*?(?P<cpp>{src}))",
            src = target.source()
        ),
        target.flags(),
    )?;
    not_string(&shaped)
}
