//! Trigger conditions.
//!
//! Conditions decide whether an event counts toward a trigger's progress.
//! The engine provides common condition types as data; hosts use
//! [`TriggerCondition::Predicate`] for anything else.
//!
//! Conditions must be deterministic. The engine does not guard against side
//! effects, but counters are only correct if evaluating the same
//! `(subject, event)` pair always gives the same answer.

use std::sync::Arc;

use crate::core::SubjectId;
use crate::events::Event;

/// Signature of a host-supplied condition.
pub type PredicateFn = dyn Fn(SubjectId, &Event) -> bool + Send + Sync;

/// A host-supplied predicate over `(subject, event)`.
#[derive(Clone)]
pub struct ConditionFn(Arc<PredicateFn>);

impl ConditionFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(SubjectId, &Event) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Call the predicate.
    pub fn test(&self, subject: SubjectId, event: &Event) -> bool {
        (self.0)(subject, event)
    }
}

impl std::fmt::Debug for ConditionFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ConditionFn(..)")
    }
}

/// A condition that must be met for an event to count.
#[derive(Clone, Debug, Default)]
pub enum TriggerCondition {
    // === Event Field Filters ===

    /// Involved entity must be of this kind.
    EntityIs(String),

    /// Involved block must be of this kind.
    BlockIs(String),

    /// Event must have specified tag.
    HasTag(String),

    /// Event must not have specified tag.
    NotTag(String),

    /// Value at index must be at least N.
    ValueAtLeast { index: usize, min: i64 },

    /// Value at index must be at most N.
    ValueAtMost { index: usize, max: i64 },

    // === Subject Filters ===

    /// The extracted subject must be this one.
    SubjectIs(SubjectId),

    // === Combinators ===

    /// All conditions must be true.
    All(Vec<TriggerCondition>),

    /// At least one condition must be true.
    Any(Vec<TriggerCondition>),

    /// Condition must be false.
    Not(Box<TriggerCondition>),

    // === Special ===

    /// Always matches (no filter).
    #[default]
    Always,

    /// Never matches (disabled trigger).
    Never,

    /// Host-supplied predicate.
    Predicate(ConditionFn),
}

impl TriggerCondition {
    /// Create an entity kind condition.
    pub fn entity_is(kind: impl Into<String>) -> Self {
        Self::EntityIs(kind.into())
    }

    /// Create a block kind condition.
    pub fn block_is(kind: impl Into<String>) -> Self {
        Self::BlockIs(kind.into())
    }

    /// Create a tag condition.
    pub fn has_tag(tag: impl Into<String>) -> Self {
        Self::HasTag(tag.into())
    }

    /// Create a minimum value condition.
    pub fn value_at_least(index: usize, min: i64) -> Self {
        Self::ValueAtLeast { index, min }
    }

    /// Create a condition from a closure.
    pub fn predicate(f: impl Fn(SubjectId, &Event) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(ConditionFn::new(f))
    }

    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    pub fn and(self, other: TriggerCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another condition with OR.
    pub fn or(self, other: TriggerCondition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            _ => Self::Any(vec![self, other]),
        }
    }
}

/// Evaluator for trigger conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied for `subject` by `event`.
    pub fn evaluate(condition: &TriggerCondition, subject: SubjectId, event: &Event) -> bool {
        match condition {
            TriggerCondition::EntityIs(kind) => event.entity_is(kind),

            TriggerCondition::BlockIs(kind) => event.block_is(kind),

            TriggerCondition::HasTag(tag) => event.has_tag(tag),

            TriggerCondition::NotTag(tag) => !event.has_tag(tag),

            TriggerCondition::ValueAtLeast { index, min } => event.value(*index, i64::MIN) >= *min,

            TriggerCondition::ValueAtMost { index, max } => event.value(*index, i64::MAX) <= *max,

            TriggerCondition::SubjectIs(expected) => subject == *expected,

            TriggerCondition::All(conditions) => {
                conditions.iter().all(|c| Self::evaluate(c, subject, event))
            }

            TriggerCondition::Any(conditions) => {
                conditions.iter().any(|c| Self::evaluate(c, subject, event))
            }

            TriggerCondition::Not(inner) => !Self::evaluate(inner, subject, event),

            TriggerCondition::Always => true,

            TriggerCondition::Never => false,

            TriggerCondition::Predicate(f) => f.test(subject, event),
        }
    }
}
