//! # apexlint-core
//!
//! Core framework for line-oriented static analysis of Apex source code.
//!
//! This crate provides the building blocks the `apexlint` tool is assembled
//! from:
//!
//! - [`Pattern`] and the composers [`escape`], [`not_string`] and [`comment`]
//!   for building regular expressions that only fire in real code
//! - [`Rule`] for declarative detection rules with applicability filters and
//!   per-rule suppression
//! - [`Registry`] for deterministic rule selection
//! - [`Scanner`] for applying a rule set line by line
//! - [`Diagnostic`] and [`TermStyle`] for rendering findings
//!
//! ## Example
//!
//! ```ignore
//! use apexlint_core::{not_string, Flags, Pattern, Rule, Scanner, SourcePath, TermStyle};
//!
//! let invalid = not_string(&Pattern::new(r"(?P<cursor>@\s*future)", Flags::IGNORE_CASE)?)?;
//! let rule = Rule::builder("NoFuture", invalid)
//!     .summary("@future used")
//!     .build();
//!
//! let scanner = Scanner::new(vec![&rule], true)?;
//! for diagnostic in scanner.scan_file(&SourcePath::from_arg("Foo.cls"))? {
//!     println!("{}", diagnostic.render(0, TermStyle::Plain));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pattern;
mod registry;
mod render;
mod rule;
mod scanner;
mod source;
mod types;

pub use pattern::{comment, escape, not_string, Flags, IntoPattern, Matches, Pattern, PatternError, PatternMatch};
pub use registry::Registry;
pub use render::TermStyle;
pub use rule::{Finding, Rule, RuleBuilder, DEFAULT_FILENAMES};
pub use scanner::{ScanError, Scanner};
pub use source::SourcePath;
pub use types::{Diagnostic, SourceSpan};
