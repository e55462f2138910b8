//! In-memory advancement catalog.
//!
//! `MemoryCatalog` stores advancement definitions and per-subject awarded
//! criteria in hash maps. It is the reference implementation of
//! [`AdvancementCatalog`] used by tests and by hosts without their own
//! advancement system.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{GrantError, NamespacedKey, SubjectId};

use super::definition::AdvancementDefinition;
use super::AdvancementCatalog;

/// Registry of advancement definitions plus per-subject progress.
///
/// ## Example
///
/// ```
/// use rust_advancements::catalog::{AdvancementCatalog, AdvancementDefinition, MemoryCatalog};
/// use rust_advancements::core::{NamespacedKey, SubjectId};
///
/// let key = NamespacedKey::parse("demo:trade").unwrap();
/// let mut catalog = MemoryCatalog::new();
/// catalog.register(AdvancementDefinition::new(key.clone(), "Trader").with_criterion("traded"));
///
/// let alice = SubjectId::new(1);
/// assert!(!catalog.is_completed(&key, alice));
/// catalog.award_all(&key, alice).unwrap();
/// assert!(catalog.is_completed(&key, alice));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    definitions: FxHashMap<NamespacedKey, AdvancementDefinition>,
    awarded: FxHashMap<(SubjectId, NamespacedKey), FxHashSet<String>>,
}

impl MemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, returning any definition it replaced.
    pub fn register(&mut self, definition: AdvancementDefinition) -> Option<AdvancementDefinition> {
        self.definitions.insert(definition.key.clone(), definition)
    }

    /// Get a definition by key.
    #[must_use]
    pub fn get(&self, key: &NamespacedKey) -> Option<&AdvancementDefinition> {
        self.definitions.get(key)
    }

    /// Criteria already awarded to `subject`, in definition order.
    #[must_use]
    pub fn awarded(&self, key: &NamespacedKey, subject: SubjectId) -> Vec<&str> {
        let Some(definition) = self.definitions.get(key) else {
            return Vec::new();
        };
        let awarded = self.awarded.get(&(subject, key.clone()));

        definition
            .criteria
            .iter()
            .filter(|c| awarded.is_some_and(|set| set.contains(*c)))
            .map(String::as_str)
            .collect()
    }

    /// Criteria not yet awarded to `subject`, in definition order.
    #[must_use]
    pub fn remaining(&self, key: &NamespacedKey, subject: SubjectId) -> Vec<&str> {
        let Some(definition) = self.definitions.get(key) else {
            return Vec::new();
        };
        let awarded = self.awarded.get(&(subject, key.clone()));

        definition
            .criteria
            .iter()
            .filter(|c| !awarded.is_some_and(|set| set.contains(*c)))
            .map(String::as_str)
            .collect()
    }

    /// Revoke every criterion of `key` from `subject`.
    pub fn revoke_all(&mut self, key: &NamespacedKey, subject: SubjectId) {
        self.awarded.remove(&(subject, key.clone()));
    }

    /// Get the number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &AdvancementDefinition> {
        self.definitions.values()
    }

    fn award(&mut self, key: &NamespacedKey, subject: SubjectId, criteria: &[String]) {
        self.awarded
            .entry((subject, key.clone()))
            .or_default()
            .extend(criteria.iter().cloned());
    }
}

impl AdvancementCatalog for MemoryCatalog {
    fn contains(&self, key: &NamespacedKey) -> bool {
        self.definitions.contains_key(key)
    }

    fn is_completed(&self, key: &NamespacedKey, subject: SubjectId) -> bool {
        self.contains(key) && self.remaining(key, subject).is_empty()
    }

    fn award_all(&mut self, key: &NamespacedKey, subject: SubjectId) -> Result<Vec<String>, GrantError> {
        if !self.contains(key) {
            return Err(GrantError::UnknownAdvancement(key.clone()));
        }

        let remaining: Vec<String> = self
            .remaining(key, subject)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.award(key, subject, &remaining);
        Ok(remaining)
    }

    fn award_next(&mut self, key: &NamespacedKey, subject: SubjectId) -> Result<Option<String>, GrantError> {
        if !self.contains(key) {
            return Err(GrantError::UnknownAdvancement(key.clone()));
        }

        let next = self.remaining(key, subject).first().map(|c| c.to_string());
        if let Some(criterion) = &next {
            self.award(key, subject, std::slice::from_ref(criterion));
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: SubjectId = SubjectId(1);
    const BOB: SubjectId = SubjectId(2);

    fn key(s: &str) -> NamespacedKey {
        NamespacedKey::parse(s).unwrap()
    }

    fn test_catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.register(AdvancementDefinition::new(key("demo:trade"), "Trader").with_criterion("traded"));
        catalog.register(AdvancementDefinition::new(key("demo:miner"), "Miner").with_steps(3));
        catalog
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = test_catalog();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&key("demo:trade")));
        assert!(!catalog.contains(&key("demo:missing")));
        assert_eq!(catalog.get(&key("demo:miner")).unwrap().title, "Miner");

        let replaced = catalog.register(AdvancementDefinition::new(key("demo:trade"), "Merchant"));
        assert_eq!(replaced.unwrap().title, "Trader");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_award_all() {
        let mut catalog = test_catalog();
        let miner = key("demo:miner");

        let awarded = catalog.award_all(&miner, ALICE).unwrap();
        assert_eq!(awarded, vec!["step_0", "step_1", "step_2"]);
        assert!(catalog.is_completed(&miner, ALICE));
        assert!(!catalog.is_completed(&miner, BOB));

        // Nothing left to award
        assert!(catalog.award_all(&miner, ALICE).unwrap().is_empty());
    }

    #[test]
    fn test_award_next_in_order() {
        let mut catalog = test_catalog();
        let miner = key("demo:miner");

        assert_eq!(catalog.award_next(&miner, ALICE).unwrap().as_deref(), Some("step_0"));
        assert_eq!(catalog.award_next(&miner, ALICE).unwrap().as_deref(), Some("step_1"));
        assert_eq!(catalog.awarded(&miner, ALICE), vec!["step_0", "step_1"]);
        assert_eq!(catalog.remaining(&miner, ALICE), vec!["step_2"]);
        assert!(!catalog.is_completed(&miner, ALICE));

        assert_eq!(catalog.award_next(&miner, ALICE).unwrap().as_deref(), Some("step_2"));
        assert!(catalog.is_completed(&miner, ALICE));
        assert_eq!(catalog.award_next(&miner, ALICE).unwrap(), None);
    }

    #[test]
    fn test_unknown_advancement() {
        let mut catalog = test_catalog();
        let missing = key("demo:missing");

        assert_eq!(
            catalog.award_all(&missing, ALICE),
            Err(GrantError::UnknownAdvancement(missing.clone()))
        );
        assert!(catalog.award_next(&missing, ALICE).is_err());
        assert!(!catalog.is_completed(&missing, ALICE));
        assert!(catalog.remaining(&missing, ALICE).is_empty());
    }

    #[test]
    fn test_revoke_all() {
        let mut catalog = test_catalog();
        let trade = key("demo:trade");

        catalog.award_all(&trade, ALICE).unwrap();
        assert!(catalog.is_completed(&trade, ALICE));

        catalog.revoke_all(&trade, ALICE);
        assert!(!catalog.is_completed(&trade, ALICE));
    }
}
