//! Terminal rendering of diagnostics.

use crate::types::Diagnostic;

/// Indentation level for the source excerpt, in spaces.
const INDENT: usize = 1;

/// The two terminal styles, selected once per run by the driver.
///
/// `Plain` emits empty escape strings, so plain output is byte-identical
/// to colorized output minus the escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermStyle {
    /// No escape sequences.
    Plain,
    /// ANSI color escape sequences.
    Ansi,
}

impl TermStyle {
    /// Selects a style from a color capability probe.
    #[must_use]
    pub fn get(color: bool) -> Self {
        if color {
            Self::Ansi
        } else {
            Self::Plain
        }
    }

    /// Bold, for the location prefix.
    #[must_use]
    pub fn bold(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Ansi => "\x1b[1m",
        }
    }

    /// Bold red, for the `error:` marker.
    #[must_use]
    pub fn bold_red(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Ansi => "\x1b[1;31m",
        }
    }

    /// Muted color for long descriptions.
    #[must_use]
    pub fn gray(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Ansi => "\x1b[0;33m",
        }
    }

    /// Red, for the underline.
    #[must_use]
    pub fn red(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Ansi => "\x1b[0;31m",
        }
    }

    /// Reset to the default style.
    #[must_use]
    pub fn reset(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Ansi => "\x1b[0m",
        }
    }
}

impl Diagnostic {
    /// Formats this diagnostic for terminal output.
    ///
    /// The first line is always `path:line:column: error: summary`. With
    /// `verbose > 0` the long description follows, indented and muted.
    /// With `verbose >= 0` the offending source line is excerpted with a
    /// `^~~~` underline aligned exactly under the reported span (minimum
    /// width 1). Negative `verbose` reduces output to the summary line.
    #[must_use]
    pub fn render(&self, verbose: i32, style: TermStyle) -> String {
        let mut out = format!(
            "{}{}: {}error:{} {}",
            style.bold(),
            self.span,
            style.bold_red(),
            style.reset(),
            self.summary,
        );

        if verbose > 0 {
            if let Some(description) = &self.description {
                out.push('\n');
                out.push_str(style.gray());
                out.push_str(&indent(description, &" ".repeat(INDENT * 2)));
                out.push_str(style.reset());
            }
        }

        if verbose >= 0 {
            let arrow = format!(
                "{}^{}",
                " ".repeat(self.span.column()),
                "~".repeat(self.span.len().saturating_sub(1)),
            );
            let excerpt = format!(
                "{}\n{}{}{}",
                self.source,
                style.red(),
                arrow,
                style.reset()
            );
            out.push('\n');
            out.push_str(&indent(&excerpt, &" ".repeat(INDENT)));
        }

        out
    }
}

/// Prefixes every line of `text` that has content; blank lines pass
/// through unchanged.
fn indent(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_owned()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourcePath;
    use crate::types::SourceSpan;

    fn diagnostic(start: usize, end: usize, description: Option<&str>) -> Diagnostic {
        Diagnostic {
            span: SourceSpan {
                path: SourcePath::from_arg("Foo.cls"),
                line: 1,
                start,
                end,
            },
            summary: "Found FOO".to_owned(),
            description: description.map(ToOwned::to_owned),
            source: "FOO FOO".to_owned(),
        }
    }

    #[test]
    fn quiet_render_is_one_line() {
        let d = diagnostic(0, 3, None);
        assert_eq!(d.render(-1, TermStyle::Plain), "Foo.cls:1:0: error: Found FOO");
    }

    #[test]
    fn default_render_underlines_the_span() {
        let d = diagnostic(0, 3, None);
        assert_eq!(
            d.render(0, TermStyle::Plain),
            "Foo.cls:1:0: error: Found FOO\n FOO FOO\n ^~~"
        );
    }

    #[test]
    fn underline_is_padded_to_the_column() {
        let d = diagnostic(4, 7, None);
        assert_eq!(
            d.render(0, TermStyle::Plain),
            "Foo.cls:1:4: error: Found FOO\n FOO FOO\n     ^~~"
        );
    }

    #[test]
    fn zero_length_span_renders_single_caret() {
        let d = diagnostic(4, 4, None);
        assert_eq!(
            d.render(0, TermStyle::Plain),
            "Foo.cls:1:4: error: Found FOO\n FOO FOO\n     ^"
        );
    }

    #[test]
    fn description_requires_verbose() {
        let d = diagnostic(0, 3, Some("Instead of FOO, use BAR."));
        assert_eq!(
            d.render(0, TermStyle::Plain),
            "Foo.cls:1:0: error: Found FOO\n FOO FOO\n ^~~"
        );
        assert_eq!(
            d.render(1, TermStyle::Plain),
            "Foo.cls:1:0: error: Found FOO\n  Instead of FOO, use BAR.\n FOO FOO\n ^~~"
        );
    }

    #[test]
    fn multiline_description_is_indented_per_line() {
        let d = diagnostic(0, 3, Some("Because:\n  1. reasons.\n  2. more reasons."));
        assert_eq!(
            d.render(1, TermStyle::Plain),
            "Foo.cls:1:0: error: Found FOO\n  Because:\n    1. reasons.\n    2. more reasons.\n FOO FOO\n ^~~"
        );
    }

    #[test]
    fn ansi_style_wraps_location_error_description_and_underline() {
        let d = diagnostic(0, 3, Some("Instead of FOO, use BAR."));
        assert_eq!(
            d.render(1, TermStyle::Ansi),
            "\x1b[1mFoo.cls:1:0: \x1b[1;31merror:\x1b[0m Found FOO\n\
             \x1b[0;33m  Instead of FOO, use BAR.\x1b[0m\n \
             FOO FOO\n \x1b[0;31m^~~\x1b[0m"
        );
    }

    #[test]
    fn plain_and_ansi_differ_only_by_escapes() {
        let d = diagnostic(0, 3, Some("Instead of FOO, use BAR."));
        let ansi = d.render(1, TermStyle::Ansi);
        let plain = d.render(1, TermStyle::Plain);
        let stripped = ansi
            .replace("\x1b[1m", "")
            .replace("\x1b[1;31m", "")
            .replace("\x1b[0;33m", "")
            .replace("\x1b[0;31m", "")
            .replace("\x1b[0m", "");
        assert_eq!(stripped, plain);
    }
}
