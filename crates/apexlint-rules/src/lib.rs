//! # apexlint-rules
//!
//! Built-in lint rules for Apex source code.
//!
//! ## Available Rules
//!
//! | Name | Summary | Files |
//! |------|---------|-------|
//! | `NoFutureInTest` | `@future` used in test class | `*Test.cls`, `TestUtils.cls`, `UnitTestFactory.cls` |
//! | `NoObjectMapKeys` | Map key might be mutable | `*.cls`, `*.trigger` |
//! | `NoObjectSetMembers` | Set member might be mutable | `*.cls`, `*.trigger` |
//! | `NoSeeAllData` | `SeeAllData` used in `@isTest` | `*.cls`, `*.trigger` |
//! | `NoTestMethod` | `testMethod` used instead of `@isTest` | `*.cls`, `*.trigger` |
//!
//! ## Usage
//!
//! ```ignore
//! let registry = apexlint_rules::registry()?;
//! let rules = registry.library(&select, &ignore);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod no_object_map_keys;
mod no_object_set_members;
mod no_see_all_data;
mod no_test_method;

pub use no_future_in_test::no_future_in_test;
pub use no_object_map_keys::no_object_map_keys;
pub use no_object_set_members::no_object_set_members;
pub use no_see_all_data::no_see_all_data;
pub use no_test_method::no_test_method;

/// Re-export core types for convenience.
pub use apexlint_core::{PatternError, Registry, Rule};

/// Guidance document for the mutable Map/Set key rules; doubles as their
/// suppression token when it appears in a trailing comment.
pub(crate) const MAPS_AND_SETS_DOC: &str =
    "https://github.com/quantcast/apexlint/blob/master/MAPS-AND-SETS.md";

/// Apex base types that are safe as Map keys and Set members: the
/// `System` namespace scalars plus the `Schema` field/type descriptors.
/// Spliced into verbose-mode patterns.
pub(crate) const BASE_TYPES: &str = r"(
               (System\.)?
               (
                   Blob
                   | Boolean
                   | Date
                   | DateTime
                   | Decimal
                   | Double
                   | Id
                   | Integer
                   | Long
                   | String
                   | Time
                   | Type
               )
           |
               (Schema\.)?
               (SObjectField|SObjectType)
           )";

/// Builds the registry of every built-in rule, the explicit table the
/// rest of the program selects from.
///
/// # Errors
///
/// Returns [`PatternError`] if any built-in pattern fails to compile;
/// callers fail fast before any scanning begins.
pub fn registry() -> Result<Registry, PatternError> {
    Ok(Registry::new(vec![
        no_future_in_test()?,
        no_object_map_keys()?,
        no_object_set_members()?,
        no_see_all_data()?,
        no_test_method()?,
    ]))
}

#[cfg(test)]
pub(crate) mod testutil {
    use apexlint_core::{Rule, Scanner, SourcePath, TermStyle};

    /// Scans `contents` as `path` with a single rule and compares the
    /// plain renders against `expected`.
    pub(crate) fn assert_match_lines(
        rule: &Rule,
        path: &str,
        contents: &str,
        verbose: i32,
        expected: &[&str],
    ) {
        let scanner = Scanner::new(vec![rule], true).expect("noqa pattern");
        let rendered: Vec<String> = scanner
            .scan_lines(contents.lines(), &SourcePath::from_arg(path))
            .map(|d| d.render(verbose, TermStyle::Plain))
            .collect();
        assert_eq!(rendered, expected, "contents: {contents:?}");
    }
}
