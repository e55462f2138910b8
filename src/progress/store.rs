//! Progress store interface.
//!
//! Counters are persisted per `(subject, storage key)` by the host. The
//! engine only needs get/set/remove and never caches a value beyond a single
//! trigger's processing of a single event.
//!
//! ## Atomicity
//!
//! The engine performs a plain read followed by a write. There is no
//! compare-and-swap. One `AdvancementEngine` serializes its own updates
//! through `&mut self`, but a store shared by several engines or threads
//! must only see one delivery per subject at a time, or provide its own
//! per-key locking.

use serde::{Deserialize, Serialize};

use crate::core::{KeyError, NamespacedKey, SubjectId};

/// Composite identity of a progress record.
///
/// `key` is the storage key: the advancement key re-homed under the
/// configured storage namespace (see [`NamespacedKey::storage_key`]).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProgressKey {
    /// Whose progress.
    pub subject: SubjectId,

    /// Storage key of the advancement.
    pub key: NamespacedKey,
}

impl ProgressKey {
    /// Build the progress key for an advancement.
    pub fn new(
        subject: SubjectId,
        advancement: &NamespacedKey,
        storage_namespace: &str,
    ) -> Result<Self, KeyError> {
        Ok(Self {
            subject,
            key: advancement.storage_key(storage_namespace)?,
        })
    }
}

impl std::fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.subject, self.key)
    }
}

/// Persisted per-subject integer counters.
///
/// ## Implementation Notes
///
/// - `get`: Absent records read as 0
/// - `set`: Overwrites unconditionally
/// - `remove`: Erases the record; later reads return 0
pub trait ProgressStore {
    /// Read a counter.
    fn get(&self, key: &ProgressKey) -> i64;

    /// Write a counter.
    fn set(&mut self, key: &ProgressKey, value: i64);

    /// Erase a counter, returning its previous value if it existed.
    fn remove(&mut self, key: &ProgressKey) -> Option<i64>;
}
