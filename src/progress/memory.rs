//! In-memory progress store.
//!
//! Backed by a persistent `im::HashMap`, so [`MemoryProgressStore::snapshot`]
//! is O(1) and snapshots share structure with the live store. Hosts that
//! want durability can export a [`ProgressSnapshot`] as bytes and load it
//! back on startup.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{StoreError, SubjectId};

use super::store::{ProgressKey, ProgressStore};

/// Serializable dump of a progress store, sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Every stored counter.
    pub entries: Vec<(ProgressKey, i64)>,
}

impl ProgressSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(self).map_err(StoreError::Encode)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        bincode::deserialize(bytes).map_err(StoreError::Decode)
    }
}

/// Progress store held entirely in memory.
///
/// ## Example
///
/// ```
/// use rust_advancements::core::{NamespacedKey, SubjectId};
/// use rust_advancements::progress::{MemoryProgressStore, ProgressKey, ProgressStore};
///
/// let advancement = NamespacedKey::parse("demo:trade").unwrap();
/// let key = ProgressKey::new(SubjectId::new(1), &advancement, "advancement_api").unwrap();
///
/// let mut store = MemoryProgressStore::new();
/// assert_eq!(store.get(&key), 0);
///
/// store.set(&key, 2);
/// let before = store.snapshot();
/// store.set(&key, 3);
///
/// assert_eq!(before.get(&key), 2);
/// assert_eq!(store.get(&key), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryProgressStore {
    counters: ImHashMap<ProgressKey, i64>,
}

impl MemoryProgressStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// O(1) copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Number of stored counters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Iterate over all stored counters.
    pub fn iter(&self) -> impl Iterator<Item = (&ProgressKey, &i64)> {
        self.counters.iter()
    }

    /// Iterate over the counters of one subject.
    pub fn for_subject(&self, subject: SubjectId) -> impl Iterator<Item = (&ProgressKey, &i64)> {
        self.counters.iter().filter(move |(key, _)| key.subject == subject)
    }

    /// Export every counter, sorted by key.
    #[must_use]
    pub fn export(&self) -> ProgressSnapshot {
        let mut entries: Vec<_> = self
            .counters
            .iter()
            .map(|(key, value)| (key.clone(), *value))
            .collect();
        entries.sort();
        ProgressSnapshot { entries }
    }

    /// Build a store from an exported snapshot.
    #[must_use]
    pub fn import(snapshot: ProgressSnapshot) -> Self {
        Self {
            counters: snapshot.entries.into_iter().collect(),
        }
    }

    /// Encode the store as bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        self.export().to_bytes()
    }

    /// Decode a store from bytes written by [`MemoryProgressStore::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(Self::import(ProgressSnapshot::from_bytes(bytes)?))
    }
}

impl ProgressStore for MemoryProgressStore {
    fn get(&self, key: &ProgressKey) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &ProgressKey, value: i64) {
        self.counters.insert(key.clone(), value);
    }

    fn remove(&mut self, key: &ProgressKey) -> Option<i64> {
        self.counters.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NamespacedKey;

    fn progress_key(subject: u64, advancement: &str) -> ProgressKey {
        let advancement = NamespacedKey::parse(advancement).unwrap();
        ProgressKey::new(SubjectId::new(subject), &advancement, "advancement_api").unwrap()
    }

    #[test]
    fn test_progress_key() {
        let key = progress_key(1, "minecraft:adventure/trade");
        assert_eq!(key.key.to_string(), "advancement_api:minecraft/adventure/trade");
        assert_eq!(key.to_string(), "Subject(1)/advancement_api:minecraft/adventure/trade");
    }

    #[test]
    fn test_get_set_remove() {
        let mut store = MemoryProgressStore::new();
        let key = progress_key(1, "demo:trade");

        assert_eq!(store.get(&key), 0);
        store.set(&key, -1);
        assert_eq!(store.get(&key), -1);
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove(&key), Some(-1));
        assert_eq!(store.remove(&key), None);
        assert_eq!(store.get(&key), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_subjects_are_independent() {
        let mut store = MemoryProgressStore::new();
        store.set(&progress_key(1, "demo:trade"), 2);
        store.set(&progress_key(2, "demo:trade"), 5);
        store.set(&progress_key(1, "demo:miner"), 1);

        assert_eq!(store.get(&progress_key(2, "demo:trade")), 5);
        assert_eq!(store.for_subject(SubjectId::new(1)).count(), 2);
        assert_eq!(store.for_subject(SubjectId::new(3)).count(), 0);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut store = MemoryProgressStore::new();
        let key = progress_key(1, "demo:trade");
        store.set(&key, 1);

        let snapshot = store.snapshot();
        store.set(&key, 2);
        store.set(&progress_key(2, "demo:trade"), 9);

        assert_eq!(snapshot.get(&key), 1);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut store = MemoryProgressStore::new();
        store.set(&progress_key(1, "demo:trade"), -1);
        store.set(&progress_key(2, "demo:miner"), 2);

        let bytes = store.to_bytes().unwrap();
        let restored = MemoryProgressStore::from_bytes(&bytes).unwrap();

        assert_eq!(restored.export(), store.export());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            MemoryProgressStore::from_bytes(&[0xff, 0xff, 0xff]),
            Err(StoreError::Decode(_))
        ));
    }
}
