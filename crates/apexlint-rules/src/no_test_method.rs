//! Rule flagging the legacy `testMethod` modifier.

use apexlint_core::{Flags, Pattern, PatternError, Rule};

/// Rule name for testMethod detection.
pub const NAME: &str = "NoTestMethod";

/// Builds the rule: the `testMethod` keyword anywhere in source files.
///
/// # Errors
///
/// Returns [`PatternError`] if the pattern fails to compile.
pub fn no_test_method() -> Result<Rule, PatternError> {
    let invalid = Pattern::new(
        r"
        \b
        (?P<cursor>
            testMethod
        )
        \b",
        Flags::IGNORE_CASE | Flags::VERBOSE,
    )?;

    Ok(Rule::builder(NAME, invalid)
        .summary("testMethod used instead of @isTest")
        .build())
}
