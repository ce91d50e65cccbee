//! Deterministic rule collection and selection.

use std::collections::HashSet;

use crate::rule::Rule;

/// Owns the full set of known rules, name-ordered.
///
/// The registry is an explicit init-time table: it is populated once
/// before any scanning begins and read-only afterwards. Selection is by
/// exact name; unknown names in `select`/`ignore` simply never match
/// (argument-time validation is the driver's job, via [`Registry::names`]).
#[derive(Debug, Default)]
pub struct Registry {
    rules: Vec<Rule>,
}

impl Registry {
    /// Builds a registry from `rules`, sorted by name for determinism.
    #[must_use]
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| a.name().cmp(b.name()));
        Self { rules }
    }

    /// Returns the enabled rules: restricted to `select` when non-empty,
    /// minus everything in `ignore`, in name order.
    #[must_use]
    pub fn library(&self, select: &HashSet<String>, ignore: &HashSet<String>) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|rule| select.is_empty() || select.contains(rule.name()))
            .filter(|rule| !ignore.contains(rule.name()))
            .collect()
    }

    /// The sorted names of all registered rules.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// All registered rules, in name order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Flags, Pattern};

    fn named(name: &str) -> Rule {
        Rule::builder(name, Pattern::new("FOO", Flags::NONE).unwrap())
            .summary("Found FOO")
            .build()
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn registry() -> Registry {
        Registry::new(vec![named("Charlie"), named("Alpha"), named("Bravo")])
    }

    #[test]
    fn rules_are_name_ordered() {
        assert_eq!(registry().names(), ["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn empty_select_means_all() {
        let registry = registry();
        let enabled = registry.library(&set(&[]), &set(&[]));
        assert_eq!(enabled.len(), 3);
    }

    #[test]
    fn select_restricts() {
        let registry = registry();
        let enabled = registry.library(&set(&["Bravo"]), &set(&[]));
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].name(), "Bravo");
    }

    #[test]
    fn ignore_applies_after_select() {
        let registry = registry();
        let enabled = registry.library(&set(&["Alpha", "Bravo"]), &set(&["Bravo"]));
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].name(), "Alpha");
    }

    #[test]
    fn unknown_names_are_not_an_error() {
        let registry = registry();
        let enabled = registry.library(&set(&["Nonexistent"]), &set(&["AlsoMissing"]));
        assert!(enabled.is_empty());
    }
}
