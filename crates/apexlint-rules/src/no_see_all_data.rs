//! Rule forbidding `SeeAllData` in `@isTest` annotations.

use apexlint_core::{not_string, Flags, Pattern, PatternError, Rule};

/// Rule name for SeeAllData detection.
pub const NAME: &str = "NoSeeAllData";

/// Builds the rule: a `SeeAllData` argument inside `@isTest(...)`.
///
/// # Errors
///
/// Returns [`PatternError`] if the composed pattern fails to compile.
pub fn no_see_all_data() -> Result<Rule, PatternError> {
    let invalid = not_string(&Pattern::new(
        r"
        @\s*isTest
        \s*\(
        [^)]*
        (?P<cursor>
            \b
            SeeAllData
            \s*=
            .*?
        )
        \s*
        [,)]",
        Flags::IGNORE_CASE | Flags::VERBOSE,
    )?)?;

    Ok(Rule::builder(NAME, invalid)
        .summary("SeeAllData used in @isTest")
        .description(
            "The use of SeeAllData is forbidden because:\n\
             \x20 1. Row-locking conflicts can cause processes and deployments to fail.\n\
             \x20 2. It prevents concurrent test execution.\n\
             \x20 3. SeeAllData=false doesn't do anything in classes where SeeAllData=true.",
        )
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::assert_match_lines;

    #[test]
    fn see_all_data_argument_is_flagged() {
        let rule = no_see_all_data().unwrap();
        assert_match_lines(
            &rule,
            "FooTest.cls",
            "@isTest(SeeAllData=true)",
            0,
            &["FooTest.cls:1:8: error: SeeAllData used in @isTest\n \
               @isTest(SeeAllData=true)\n         ^~~~~~~~~~~~~~~"],
        );
    }

    #[test]
    fn whitespace_and_case_are_tolerated() {
        let rule = no_see_all_data().unwrap();
        assert_match_lines(
            &rule,
            "Foo.cls",
            "@ isTest ( seealldata = TRUE )",
            -1,
            &["Foo.cls:1:11: error: SeeAllData used in @isTest"],
        );
    }

    #[test]
    fn first_of_several_arguments_is_flagged() {
        let rule = no_see_all_data().unwrap();
        assert_match_lines(
            &rule,
            "Foo.cls",
            "@isTest(SeeAllData=true, isParallel=false)",
            -1,
            &["Foo.cls:1:8: error: SeeAllData used in @isTest"],
        );
    }

    #[test]
    fn plain_is_test_annotation_is_fine() {
        let rule = no_see_all_data().unwrap();
        assert_match_lines(&rule, "Foo.cls", "@isTest", -1, &[]);
        assert_match_lines(&rule, "Foo.cls", "@isTest(isParallel=true)", -1, &[]);
    }

    #[test]
    fn string_literals_do_not_fire() {
        let rule = no_see_all_data().unwrap();
        assert_match_lines(&rule, "Foo.cls", "'@isTest(SeeAllData=true)'", -1, &[]);
    }
}
