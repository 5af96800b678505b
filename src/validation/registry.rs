//! Validator entries and the registry that runs them

use chrono::{DateTime, Utc};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::document::{Document, SectionName};
use crate::store::FormStateStore;

/// Pass/fail verdict of a single rule run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

/// What a rule hands back to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDecision {
    pub outcome: Outcome,
    pub messages: Vec<String>,
}

impl RuleDecision {
    pub fn pass() -> Self {
        Self {
            outcome: Outcome::Pass,
            messages: Vec::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail,
            messages: vec![message.into()],
        }
    }

    pub fn fail_with(messages: Vec<String>) -> Self {
        Self {
            outcome: Outcome::Fail,
            messages,
        }
    }

    /// `pass` when `messages` is empty, `fail` carrying them otherwise
    pub fn from_messages(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            Self::pass()
        } else {
            Self::fail_with(messages)
        }
    }
}

/// A pure function from the current document to a verdict
pub type Rule = Box<dyn Fn(&Document) -> RuleDecision>;

/// Cached verdict of one entry.
///
/// `Unevaluated` is the conservative initial state: a section is never
/// reported valid before its rules have actually run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryOutcome {
    #[default]
    Unevaluated,
    Pass,
    Fail(Vec<String>),
}

impl EntryOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, EntryOutcome::Pass)
    }
}

/// One registered rule, its scope, and its cached outcome.
///
/// Scope and rule are fixed for the entry's lifetime; only the cached
/// outcome and its timestamp change, once per run.
pub struct ValidatorEntry {
    id: String,
    scope: Vec<SectionName>,
    rule: Rule,
    outcome: EntryOutcome,
    evaluated_at: Option<DateTime<Utc>>,
}

impl ValidatorEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scope(&self) -> &[SectionName] {
        &self.scope
    }

    pub fn outcome(&self) -> &EntryOutcome {
        &self.outcome
    }

    pub fn evaluated_at(&self) -> Option<DateTime<Utc>> {
        self.evaluated_at
    }

    fn in_scope(&self, name: SectionName) -> bool {
        self.scope.contains(&name)
    }

    fn run(&mut self, doc: &Document) {
        let result = catch_unwind(AssertUnwindSafe(|| (self.rule)(doc)));
        self.outcome = match result {
            Ok(decision) => match decision.outcome {
                Outcome::Pass => EntryOutcome::Pass,
                Outcome::Fail => EntryOutcome::Fail(decision.messages),
            },
            Err(_) => {
                warn!(id = %self.id, "validator crashed; recorded as failure");
                EntryOutcome::Fail(vec![format!("validator '{}' crashed", self.id)])
            }
        };
        self.evaluated_at = Some(Utc::now());
    }

    fn report(&self) -> RuleReport {
        RuleReport {
            id: self.id.clone(),
            scope: self.scope.clone(),
            outcome: self.outcome.clone(),
        }
    }
}

impl fmt::Debug for ValidatorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorEntry")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Outcome of one entry as returned to callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub id: String,
    pub scope: Vec<SectionName>,
    pub outcome: EntryOutcome,
}

/// Owns the validator entries for one wizard session.
///
/// Reads the store when asked to validate, never mutates it. Entries run
/// independently: one entry failing (or crashing) never skips a sibling.
#[derive(Debug, Default)]
pub struct ValidationRegistry {
    entries: Vec<ValidatorEntry>,
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry with outcome `Unevaluated`. Multiple entries may share
    /// a scope; entries are never removed during a session.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        scope: Vec<SectionName>,
        rule: impl Fn(&Document) -> RuleDecision + 'static,
    ) {
        let id = id.into();
        debug!(id = %id, ?scope, "validator registered");
        self.entries.push(ValidatorEntry {
            id,
            scope,
            rule: Box::new(rule),
            outcome: EntryOutcome::Unevaluated,
            evaluated_at: None,
        });
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Registered entries, in registration order
    pub fn entries(&self) -> &[ValidatorEntry] {
        &self.entries
    }

    /// Re-run every entry whose scope includes `name` against the store's
    /// current document; returns the refreshed reports for that scope
    pub fn validate_section(
        &mut self,
        name: SectionName,
        store: &FormStateStore,
    ) -> Vec<RuleReport> {
        let doc = store.document();
        let mut reports = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| e.in_scope(name)) {
            entry.run(doc);
            reports.push(entry.report());
        }
        debug!(section = %name, entries = reports.len(), "section validated");
        reports
    }

    /// Re-run every entry exactly once, in registration order; used before
    /// final submission
    pub fn validate_all(&mut self, store: &FormStateStore) -> Vec<RuleReport> {
        let doc = store.document();
        let mut reports = Vec::with_capacity(self.entries.len());
        for entry in &mut self.entries {
            entry.run(doc);
            reports.push(entry.report());
        }
        debug!(entries = reports.len(), "full document validated");
        reports
    }

    /// True iff every entry scoped to `name` has a cached `Pass`.
    /// Unevaluated entries count as not valid.
    pub fn is_section_valid(&self, name: SectionName) -> bool {
        self.entries
            .iter()
            .filter(|e| e.in_scope(name))
            .all(|e| e.outcome.is_pass())
    }

    /// True iff every registered entry has a cached `Pass`
    pub fn is_document_valid(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_pass())
    }

    /// Current reports without re-running anything
    pub fn reports(&self) -> Vec<RuleReport> {
        self.entries.iter().map(ValidatorEntry::report).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn store_with_holder(name: &str) -> FormStateStore {
        let mut store = FormStateStore::new();
        store
            .set_section(
                SectionName::LandHoldersInformation,
                json!([{ "name": name }]),
            )
            .unwrap();
        store
    }

    fn holder_named(expected: &'static str) -> impl Fn(&Document) -> RuleDecision {
        move |doc: &Document| {
            let found = doc
                .land_holders
                .as_deref()
                .unwrap_or_default()
                .iter()
                .any(|h| h.name.as_deref() == Some(expected));
            if found {
                RuleDecision::pass()
            } else {
                RuleDecision::fail(format!("no land holder named {expected}"))
            }
        }
    }

    mod outcomes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unevaluated_is_never_valid() {
            let mut registry = ValidationRegistry::new();
            registry.register(
                "always-pass",
                vec![SectionName::RuralProperties],
                |_| RuleDecision::pass(),
            );

            assert!(!registry.is_section_valid(SectionName::RuralProperties));
            assert!(!registry.is_document_valid());
        }

        #[test]
        fn test_section_with_no_entries_is_vacuously_valid() {
            let registry = ValidationRegistry::new();
            assert!(registry.is_section_valid(SectionName::RegistrarDetails));
            assert!(registry.is_document_valid());
        }

        #[test]
        fn test_run_flips_unevaluated_to_pass() {
            let mut registry = ValidationRegistry::new();
            let store = store_with_holder("Maria");
            registry.register(
                "maria-present",
                vec![SectionName::LandHoldersInformation],
                holder_named("Maria"),
            );

            let reports = registry.validate_section(SectionName::LandHoldersInformation, &store);
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].outcome, EntryOutcome::Pass);
            assert!(registry.is_section_valid(SectionName::LandHoldersInformation));
            assert!(reports[0].id == "maria-present");
        }

        #[test]
        fn test_rerun_replaces_cached_outcome() {
            let mut registry = ValidationRegistry::new();
            registry.register(
                "maria-present",
                vec![SectionName::LandHoldersInformation],
                holder_named("Maria"),
            );

            let store = store_with_holder("Maria");
            registry.validate_all(&store);
            assert!(registry.is_document_valid());

            // store changes, revalidation sees the new document
            let store = store_with_holder("Ana");
            let reports = registry.validate_all(&store);
            assert_eq!(
                reports[0].outcome,
                EntryOutcome::Fail(vec!["no land holder named Maria".to_string()])
            );
            assert!(!registry.is_document_valid());
        }

        #[test]
        fn test_evaluated_at_is_stamped_on_run() {
            let mut registry = ValidationRegistry::new();
            registry.register("r", vec![SectionName::PropertyRights], |_| {
                RuleDecision::pass()
            });
            assert!(registry.entries[0].evaluated_at().is_none());

            registry.validate_all(&FormStateStore::new());
            assert!(registry.entries[0].evaluated_at().is_some());
        }
    }

    mod scoping {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_validate_section_only_runs_in_scope_entries() {
            let mut registry = ValidationRegistry::new();
            registry.register("a", vec![SectionName::LandHoldersInformation], |_| {
                RuleDecision::pass()
            });
            registry.register("b", vec![SectionName::PropertyRights], |_| {
                RuleDecision::pass()
            });

            let store = FormStateStore::new();
            let reports = registry.validate_section(SectionName::PropertyRights, &store);
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].id, "b");

            // the out-of-scope entry keeps its conservative initial state
            assert!(!registry.is_section_valid(SectionName::LandHoldersInformation));
            assert!(registry.is_section_valid(SectionName::PropertyRights));
        }

        #[test]
        fn test_multi_section_entry_counts_for_each_scope_member() {
            let mut registry = ValidationRegistry::new();
            registry.register(
                "cross",
                vec![
                    SectionName::LandHoldersInformation,
                    SectionName::PropertyRights,
                ],
                |_| RuleDecision::fail("inconsistent"),
            );

            let store = FormStateStore::new();
            registry.validate_section(SectionName::PropertyRights, &store);
            assert!(!registry.is_section_valid(SectionName::LandHoldersInformation));
            assert!(!registry.is_section_valid(SectionName::PropertyRights));
        }

        #[test]
        fn test_validate_all_visits_each_entry_exactly_once() {
            use std::cell::Cell;
            use std::rc::Rc;

            let mut registry = ValidationRegistry::new();
            let runs = Rc::new(Cell::new(0usize));
            let counter = Rc::clone(&runs);
            // scoped to every section, still runs once per validate_all
            registry.register("wide", SectionName::ALL.to_vec(), move |_| {
                counter.set(counter.get() + 1);
                RuleDecision::pass()
            });
            registry.register("narrow", vec![SectionName::RuralProperties], |_| {
                RuleDecision::pass()
            });

            let store = FormStateStore::new();
            let reports = registry.validate_all(&store);
            assert_eq!(reports.len(), 2);
            assert_eq!(runs.get(), 1);
            assert_eq!(registry.entry_count(), 2);
        }

        #[test]
        fn test_reports_are_in_registration_order() {
            let mut registry = ValidationRegistry::new();
            for id in ["first", "second", "third"] {
                registry.register(id, vec![SectionName::RegistrarDetails], |_| {
                    RuleDecision::pass()
                });
            }
            let ids: Vec<String> = registry
                .validate_all(&FormStateStore::new())
                .into_iter()
                .map(|r| r.id)
                .collect();
            assert_eq!(ids, vec!["first", "second", "third"]);
        }
    }

    mod crash_containment {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_panicking_rule_becomes_failure_with_message() {
            let mut registry = ValidationRegistry::new();
            registry.register("broken", vec![SectionName::RuralProperties], |_| {
                panic!("rule bug")
            });

            let reports = registry.validate_all(&FormStateStore::new());
            let EntryOutcome::Fail(messages) = &reports[0].outcome else {
                panic!("expected failure");
            };
            assert!(!messages.is_empty());
            assert!(messages[0].contains("broken"));
        }

        #[test]
        fn test_siblings_still_run_when_one_entry_crashes() {
            let mut registry = ValidationRegistry::new();
            registry.register("broken", vec![SectionName::RuralProperties], |_| {
                panic!("rule bug")
            });
            registry.register("healthy", vec![SectionName::RuralProperties], |_| {
                RuleDecision::pass()
            });

            let reports = registry.validate_all(&FormStateStore::new());
            assert_eq!(reports.len(), 2);
            assert_eq!(reports[1].id, "healthy");
            assert_eq!(reports[1].outcome, EntryOutcome::Pass);
            // crashed sibling poisons the section, not the registry
            assert!(!registry.is_section_valid(SectionName::RuralProperties));
        }

        #[test]
        fn test_crash_does_not_corrupt_the_store() {
            let mut registry = ValidationRegistry::new();
            registry.register("broken", vec![SectionName::LandHoldersInformation], |_| {
                panic!("rule bug")
            });
            let store = store_with_holder("Maria");
            registry.validate_all(&store);
            assert_eq!(
                store.land_holders().unwrap()[0].name.as_deref(),
                Some("Maria")
            );
        }
    }

    #[test]
    fn test_decision_from_messages() {
        assert_eq!(RuleDecision::from_messages(vec![]), RuleDecision::pass());
        assert_eq!(
            RuleDecision::from_messages(vec!["bad".to_string()]),
            RuleDecision::fail("bad")
        );
    }
}
