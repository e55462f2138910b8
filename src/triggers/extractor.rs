//! Subject extraction.
//!
//! An extractor turns a raw event into the subject whose progress should
//! change, or `None` when the event has no acting subject (an environmental
//! death, say). `None` silently ends processing of that event for the
//! trigger.
//!
//! Built-in event types resolve to a field extractor automatically via
//! [`SubjectExtractor::resolve_default`]; custom event types need either an
//! explicit extractor or an event type that is-a built-in type.

use std::sync::Arc;

use crate::core::SubjectId;
use crate::events::{Event, EventTypeId, EventTypeRegistry};

/// Signature of a host-supplied extractor.
pub type ExtractFn = dyn Fn(&Event) -> Option<SubjectId> + Send + Sync;

/// A host-supplied extractor closure.
#[derive(Clone)]
pub struct ExtractorFn(Arc<ExtractFn>);

impl ExtractorFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Event) -> Option<SubjectId> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Call the extractor.
    pub fn extract(&self, event: &Event) -> Option<SubjectId> {
        (self.0)(event)
    }
}

impl std::fmt::Debug for ExtractorFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExtractorFn(..)")
    }
}

/// Strategy for finding the acting subject of an event.
#[derive(Clone, Debug)]
pub enum SubjectExtractor {
    /// The event's `actor` field.
    Actor,

    /// The event's `killer` field.
    Killer,

    /// Host-supplied closure.
    Custom(ExtractorFn),

    /// Never yields a subject. Used for event types with no known shape.
    Absent,
}

impl SubjectExtractor {
    /// Create an extractor from a closure.
    pub fn custom(f: impl Fn(&Event) -> Option<SubjectId> + Send + Sync + 'static) -> Self {
        Self::Custom(ExtractorFn::new(f))
    }

    /// Extract the subject from an event.
    #[must_use]
    pub fn extract(&self, event: &Event) -> Option<SubjectId> {
        match self {
            Self::Actor => event.actor,
            Self::Killer => event.killer,
            Self::Custom(f) => f.extract(event),
            Self::Absent => None,
        }
    }

    /// Find the built-in extractor for an event type.
    ///
    /// The most specific built-in ancestor of `event_type` decides, so a
    /// custom subtype of `ENTITY_DIED` extracts the killer. Returns `None`
    /// when no ancestor has a known shape.
    #[must_use]
    pub fn resolve_default(event_type: EventTypeId, types: &EventTypeRegistry) -> Option<Self> {
        types.ancestors(event_type).find_map(|ancestor| match ancestor {
            EventTypeId::BLOCK_BROKEN
            | EventTypeId::BLOCK_PLACED
            | EventTypeId::ENTITY_INTERACTED
            | EventTypeId::SUBJECT_JOINED
            | EventTypeId::SUBJECT_JUMPED => Some(Self::Actor),
            EventTypeId::ENTITY_DIED => Some(Self::Killer),
            _ => None,
        })
    }

    /// Check if this extractor can never yield a subject.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}
