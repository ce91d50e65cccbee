//! Rule flagging `Set` members that are not immutable base types.
//!
//! Mirrors the map-key rule: a mutable member's hash can change after
//! insertion, making it unfindable.

use apexlint_core::{comment, not_string, Flags, Pattern, PatternError, Rule};

use crate::{BASE_TYPES, MAPS_AND_SETS_DOC};

/// Rule name for set-member detection.
pub const NAME: &str = "NoObjectSetMembers";

/// Builds the rule: `new Set<T>` where `T` is not a base type.
///
/// # Errors
///
/// Returns [`PatternError`] if the composed pattern fails to compile.
pub fn no_object_set_members() -> Result<Rule, PatternError> {
    let invalid = not_string(&Pattern::new(
        format!(
            r"\b
        new\s+ (?:Set)\s*<\s*
        (?!{BASE_TYPES})
        (?P<cursor>
            .+?
        )
        \s*>"
        ),
        Flags::IGNORE_CASE | Flags::VERBOSE,
    )?)?;

    Ok(Rule::builder(NAME, invalid)
        .summary("Set member might be mutable")
        .description(format!("See {MAPS_AND_SETS_DOC}"))
        .suppress(comment(MAPS_AND_SETS_DOC)?)
        .build())
}
