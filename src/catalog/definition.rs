//! Advancement definitions - static advancement data.
//!
//! An `AdvancementDefinition` holds the immutable properties of a grantable
//! target: its key, a display title and its criteria in award order.
//! Per-subject completion state is kept by the catalog, not here.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::NamespacedKey;

/// Criteria names in award order. Most advancements have very few.
pub type Criteria = SmallVec<[String; 4]>;

/// A grantable target with one or more completable criteria.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementDefinition {
    /// Unique key.
    pub key: NamespacedKey,

    /// Human-readable title (for debugging/display).
    pub title: String,

    /// Criteria in award order. `StepByStep` triggers award the first one
    /// still remaining.
    pub criteria: Criteria,
}

impl AdvancementDefinition {
    /// Create a definition with no criteria.
    pub fn new(key: NamespacedKey, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            criteria: SmallVec::new(),
        }
    }

    /// Add a criterion (builder pattern). Duplicate names are ignored.
    #[must_use]
    pub fn with_criterion(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.has_criterion(&name) {
            self.criteria.push(name);
        }
        self
    }

    /// Add `count` criteria named `step_0`, `step_1`, ... (builder pattern).
    #[must_use]
    pub fn with_steps(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.with_criterion(format!("step_{}", i));
        }
        self
    }

    /// Check if a criterion exists.
    #[must_use]
    pub fn has_criterion(&self, name: &str) -> bool {
        self.criteria.iter().any(|c| c == name)
    }
}
