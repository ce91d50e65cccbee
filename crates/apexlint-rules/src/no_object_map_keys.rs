//! Rule flagging `Map` keys that are not immutable base types.
//!
//! A mutable key's hash can change after insertion, silently losing the
//! entry. Keys are fine when they are `System` scalars or `Schema`
//! field/type descriptors; everything else is reported.

use apexlint_core::{comment, not_string, Flags, Pattern, PatternError, Rule};

use crate::{BASE_TYPES, MAPS_AND_SETS_DOC};

/// Rule name for map-key detection.
pub const NAME: &str = "NoObjectMapKeys";

/// Builds the rule: `new Map<K, ...>` where `K` is not a base type.
///
/// # Errors
///
/// Returns [`PatternError`] if the composed pattern fails to compile.
pub fn no_object_map_keys() -> Result<Rule, PatternError> {
    let invalid = not_string(&Pattern::new(
        format!(
            r"\b
        new\s+ (?:Map)\s*<\s*
        (?!{BASE_TYPES})
        (?P<cursor>
            .+?
        )
        \s*,"
        ),
        Flags::IGNORE_CASE | Flags::VERBOSE,
    )?)?;

    Ok(Rule::builder(NAME, invalid)
        .summary("Map key might be mutable")
        .description(format!("See {MAPS_AND_SETS_DOC}"))
        .suppress(comment(MAPS_AND_SETS_DOC)?)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::assert_match_lines;

    #[test]
    fn base_type_keys_are_fine() {
        let rule = no_object_map_keys().unwrap();
        for contents in [
            "new Map<Blob, SObject>{}",
            "new Map<Boolean, SObject>{}",
            "new Map<Date, SObject>{}",
            "new Map<DateTime, SObject>{}",
            "new Map<Decimal, SObject>{}",
            "new Map<Double, SObject>{}",
            "new Map<Id, SObject>{}",
            "new Map<Integer, SObject>{}",
            "new Map<Long, SObject>{}",
            "new Map<String, SObject>{}",
            "new Map<Time, SObject>{}",
            "new Map<Type, SObject>{}",
            "new Map<SObjectField, SObject>{}",
            "new Map<SObjectType, SObject>{}",
            "new Map<Schema.SObjectField, SObject>{}",
            "new Map<Schema.SObjectType, SObject>{}",
            "new Map<System.Id, SObject>{}",
            "new Map<System.String, SObject>{}",
            "new Map<System.Type, SObject>{}",
        ] {
            assert_match_lines(&rule, "Foo.cls", contents, -1, &[]);
        }
    }

    #[test]
    fn case_does_not_matter() {
        let rule = no_object_map_keys().unwrap();
        assert_match_lines(&rule, "Foo.cls", "new map<id, sobject>{}", -1, &[]);
        assert_match_lines(&rule, "Foo.cls", "NEW MAP<ID, SOBJECT>{}", -1, &[]);
    }

    #[test]
    fn other_keys_are_flagged_with_the_key_underlined() {
        let rule = no_object_map_keys().unwrap();
        assert_match_lines(
            &rule,
            "Foo.cls",
            "new Map<SObject, SObject>{}",
            0,
            &["Foo.cls:1:8: error: Map key might be mutable\n \
               new Map<SObject, SObject>{}\n         ^~~~~~~"],
        );
    }

    #[test]
    fn string_literals_do_not_fire() {
        let rule = no_object_map_keys().unwrap();
        assert_match_lines(&rule, "Foo.cls", "'new Map<SObject, SObject>{}'", -1, &[]);
    }

    #[test]
    fn doc_link_in_a_comment_suppresses() {
        let rule = no_object_map_keys().unwrap();
        assert_match_lines(
            &rule,
            "Foo.cls",
            &format!("new Map<A, B>{{}} // {MAPS_AND_SETS_DOC}"),
            -1,
            &[],
        );
    }

    #[test]
    fn verbose_render_points_at_the_doc() {
        let rule = no_object_map_keys().unwrap();
        let expected = format!(
            "Foo.cls:1:8: error: Map key might be mutable\n  \
             See {MAPS_AND_SETS_DOC}\n \
             new Map<A, B>{{}}\n         ^"
        );
        assert_match_lines(&rule, "Foo.cls", "new Map<A, B>{}", 1, &[expected.as_str()]);
    }
}
