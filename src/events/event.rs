//! Event types and event payloads.
//!
//! Events represent things that happen in the host application. The engine
//! provides the event infrastructure; hosts fire events with an
//! `EventTypeId` and the fields relevant to that kind of event.
//!
//! ## Design Philosophy
//!
//! Event types are plain identifiers arranged in a hierarchy (see
//! [`EventTypeRegistry`](super::EventTypeRegistry)). The engine ships a small
//! set of built-in types for common event shapes; hosts add their own.

use serde::{Deserialize, Serialize};

use crate::core::SubjectId;

/// Event type identifier.
///
/// Built-in types are exposed as associated constants. Hosts should allocate
/// their own types from [`EventTypeId::FIRST_CUSTOM`] upwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventTypeId(pub u32);

impl EventTypeId {
    /// Root of the hierarchy. Every event is-a `ANY`.
    pub const ANY: EventTypeId = EventTypeId(0);
    /// Any block event.
    pub const BLOCK: EventTypeId = EventTypeId(1);
    /// A subject broke a block.
    pub const BLOCK_BROKEN: EventTypeId = EventTypeId(2);
    /// A subject placed a block.
    pub const BLOCK_PLACED: EventTypeId = EventTypeId(3);
    /// Any entity event.
    pub const ENTITY: EventTypeId = EventTypeId(4);
    /// A subject interacted with an entity.
    pub const ENTITY_INTERACTED: EventTypeId = EventTypeId(5);
    /// An entity died, possibly killed by a subject.
    pub const ENTITY_DIED: EventTypeId = EventTypeId(6);
    /// Any event about the subject itself.
    pub const SUBJECT: EventTypeId = EventTypeId(7);
    /// A subject joined.
    pub const SUBJECT_JOINED: EventTypeId = EventTypeId(8);
    /// A subject jumped.
    pub const SUBJECT_JUMPED: EventTypeId = EventTypeId(9);

    /// First ID not reserved for built-in types.
    pub const FIRST_CUSTOM: u32 = 100;

    /// Create a new event type ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check whether this ID is in the built-in range.
    #[must_use]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_CUSTOM
    }
}

impl std::fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventType({})", self.0)
    }
}

/// An event with contextual data.
///
/// ## Event Data
///
/// - `event_type`: What kind of event this is
/// - `actor`: The subject that performed the action (if any)
/// - `killer`: The subject responsible for a death (if any)
/// - `entity`: Kind of entity involved, e.g. `"villager"`
/// - `block`: Kind of block involved, e.g. `"stone"`
/// - `values`: Numeric values (amounts, counts, etc.)
/// - `tags`: String keys for host-specific filtering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The type of event.
    pub event_type: EventTypeId,

    /// The subject that performed the action.
    pub actor: Option<SubjectId>,

    /// The subject that killed the entity, for death events.
    pub killer: Option<SubjectId>,

    /// Kind of entity involved.
    pub entity: Option<String>,

    /// Kind of block involved.
    pub block: Option<String>,

    /// Numeric values associated with the event.
    /// Hosts define the meaning of each index.
    pub values: Vec<i64>,

    /// String keys for custom event data.
    pub tags: Vec<String>,
}

impl Event {
    /// Create a new event with just a type.
    pub fn new(event_type: EventTypeId) -> Self {
        Self {
            event_type,
            actor: None,
            killer: None,
            entity: None,
            block: None,
            values: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the acting subject (builder pattern).
    #[must_use]
    pub fn with_actor(mut self, actor: SubjectId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Set the killing subject (builder pattern).
    #[must_use]
    pub fn with_killer(mut self, killer: SubjectId) -> Self {
        self.killer = Some(killer);
        self
    }

    /// Set the entity kind (builder pattern).
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the block kind (builder pattern).
    #[must_use]
    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = Some(block.into());
        self
    }

    /// Add a numeric value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.values.push(value);
        self
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get the value at `index`, or a default.
    #[must_use]
    pub fn value(&self, index: usize, default: i64) -> i64 {
        self.values.get(index).copied().unwrap_or(default)
    }

    /// Check if the event has a specific tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check if the involved entity is of the given kind.
    #[must_use]
    pub fn entity_is(&self, kind: &str) -> bool {
        self.entity.as_deref() == Some(kind)
    }

    /// Check if the involved block is of the given kind.
    #[must_use]
    pub fn block_is(&self, kind: &str) -> bool {
        self.block.as_deref() == Some(kind)
    }
}

/// Constructors for the built-in event shapes.
impl Event {
    /// A subject broke a block.
    pub fn block_broken(actor: SubjectId, block: impl Into<String>) -> Self {
        Self::new(EventTypeId::BLOCK_BROKEN)
            .with_actor(actor)
            .with_block(block)
    }

    /// A subject placed a block.
    pub fn block_placed(actor: SubjectId, block: impl Into<String>) -> Self {
        Self::new(EventTypeId::BLOCK_PLACED)
            .with_actor(actor)
            .with_block(block)
    }

    /// A subject interacted with an entity.
    pub fn entity_interacted(actor: SubjectId, entity: impl Into<String>) -> Self {
        Self::new(EventTypeId::ENTITY_INTERACTED)
            .with_actor(actor)
            .with_entity(entity)
    }

    /// An entity died. `killer` is `None` for environmental deaths.
    pub fn entity_died(entity: impl Into<String>, killer: Option<SubjectId>) -> Self {
        let event = Self::new(EventTypeId::ENTITY_DIED).with_entity(entity);
        match killer {
            Some(killer) => event.with_killer(killer),
            None => event,
        }
    }

    /// A subject joined.
    pub fn subject_joined(actor: SubjectId) -> Self {
        Self::new(EventTypeId::SUBJECT_JOINED).with_actor(actor)
    }

    /// A subject jumped.
    pub fn subject_jumped(actor: SubjectId) -> Self {
        Self::new(EventTypeId::SUBJECT_JUMPED).with_actor(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_id() {
        let id = EventTypeId::new(105);
        assert_eq!(id.raw(), 105);
        assert_eq!(format!("{}", id), "EventType(105)");
        assert!(!id.is_builtin());
        assert!(EventTypeId::ENTITY_DIED.is_builtin());
    }

    #[test]
    fn test_event_builder() {
        let event = Event::new(EventTypeId::new(100))
            .with_actor(SubjectId::new(1))
            .with_entity("villager")
            .with_block("stone")
            .with_value(5)
            .with_tag("night");

        assert_eq!(event.actor, Some(SubjectId::new(1)));
        assert!(event.entity_is("villager"));
        assert!(!event.entity_is("zombie"));
        assert!(event.block_is("stone"));
        assert_eq!(event.value(0, 0), 5);
        assert_eq!(event.value(3, -1), -1);
        assert!(event.has_tag("night"));
        assert!(!event.has_tag("day"));
    }

    #[test]
    fn test_builtin_constructors() {
        let alice = SubjectId::new(1);

        let broken = Event::block_broken(alice, "stone");
        assert_eq!(broken.event_type, EventTypeId::BLOCK_BROKEN);
        assert_eq!(broken.actor, Some(alice));

        let died = Event::entity_died("villager", Some(alice));
        assert_eq!(died.event_type, EventTypeId::ENTITY_DIED);
        assert_eq!(died.killer, Some(alice));
        assert_eq!(died.actor, None);

        let natural = Event::entity_died("villager", None);
        assert_eq!(natural.killer, None);

        assert_eq!(Event::subject_jumped(alice).event_type, EventTypeId::SUBJECT_JUMPED);
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::entity_interacted(SubjectId::new(2), "villager").with_value(3);
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
