//! Diagnostic value types.

use std::fmt;

use crate::source::SourcePath;

/// The exact range within one line that a diagnostic points at.
///
/// Derived per match and consumed immediately by rendering; never
/// persisted. `start`/`end` are byte offsets into the newline-stripped
/// line, `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    /// Where the line came from.
    pub path: SourcePath,
    /// 1-based line number.
    pub line: usize,
    /// Byte offset where the span starts; also the reported column.
    pub start: usize,
    /// Byte offset one past the span end; equal to `start` for
    /// zero-length spans.
    pub end: usize,
}

impl SourceSpan {
    /// Span length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is zero-length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 0-based column of the span start.
    #[must_use]
    pub fn column(&self) -> usize {
        self.start
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column())
    }
}

/// One rule firing once at one location, prior to text rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the finding is.
    pub span: SourceSpan,
    /// One-line summary of the finding.
    pub summary: String,
    /// Optional long-form explanation.
    pub description: Option<String>,
    /// The original line text, newline stripped.
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_displays_path_line_column() {
        let span = SourceSpan {
            path: SourcePath::from_arg("Foo.cls"),
            line: 3,
            start: 8,
            end: 15,
        };
        assert_eq!(span.to_string(), "Foo.cls:3:8");
        assert_eq!(span.len(), 7);
        assert!(!span.is_empty());
    }

    #[test]
    fn zero_length_span() {
        let span = SourceSpan {
            path: SourcePath::Stdin,
            line: 1,
            start: 4,
            end: 4,
        };
        assert_eq!(span.to_string(), "<stdin>:1:4");
        assert!(span.is_empty());
    }
}
