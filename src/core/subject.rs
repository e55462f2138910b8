//! Subject identification.
//!
//! A subject is the acting entity whose progress is tracked, typically a
//! player. The engine never interprets subject IDs beyond equality and
//! hashing; hosts map their own identities (UUIDs, account IDs) onto them.
//!
//! ## Usage
//!
//! ```
//! use rust_advancements::core::SubjectId;
//!
//! let alice = SubjectId::new(1);
//! assert_eq!(alice.raw(), 1);
//! assert_eq!(format!("{}", alice), "Subject(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a subject (the actor of an event).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub u64);

impl SubjectId {
    /// Create a new subject ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subject({})", self.0)
    }
}

impl From<u64> for SubjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_id() {
        let id = SubjectId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Subject(42)");
        assert_eq!(SubjectId::from(42), id);
    }

    #[test]
    fn test_subject_ordering() {
        let mut ids = vec![SubjectId::new(3), SubjectId::new(1), SubjectId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![SubjectId::new(1), SubjectId::new(2), SubjectId::new(3)]);
    }
}
