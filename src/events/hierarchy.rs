//! Event type hierarchy.
//!
//! Triggers subscribe to an event type and receive every event whose type
//! *is-a* that type: a trigger on [`EventTypeId::ENTITY`] sees both
//! interactions and deaths. The hierarchy is an explicit parent table, so
//! matching is a walk up the parent chain rather than any runtime type
//! inspection.
//!
//! ```
//! use rust_advancements::events::{EventTypeConfig, EventTypeId, EventTypeRegistry};
//!
//! let mut types = EventTypeRegistry::new();
//! let villager_traded = EventTypeId::new(100);
//! types
//!     .register(EventTypeConfig::new(villager_traded, "VillagerTraded")
//!         .with_parent(EventTypeId::ENTITY_INTERACTED))
//!     .unwrap();
//!
//! assert!(types.is_a(villager_traded, EventTypeId::ENTITY));
//! assert!(!types.is_a(EventTypeId::ENTITY, villager_traded));
//! ```

use rustc_hash::FxHashMap;

use crate::core::RegistrationError;

use super::event::EventTypeId;

/// Configuration for an event type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventTypeConfig {
    /// Unique identifier for this event type.
    pub id: EventTypeId,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Description of when this event fires.
    pub description: String,

    /// Supertype. `None` only for the root.
    pub parent: Option<EventTypeId>,
}

impl EventTypeConfig {
    /// Create a new event type directly under the root.
    pub fn new(id: EventTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            parent: Some(EventTypeId::ANY),
        }
    }

    /// Add a description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set the supertype (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent: EventTypeId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Registry of known event types and their supertypes.
///
/// Parents must be registered before their children, which keeps the
/// hierarchy acyclic.
#[derive(Clone, Debug)]
pub struct EventTypeRegistry {
    types: FxHashMap<EventTypeId, EventTypeConfig>,
}

impl Default for EventTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTypeRegistry {
    /// Create a registry containing the built-in event types.
    pub fn new() -> Self {
        let mut types = FxHashMap::default();
        for config in builtin_types() {
            types.insert(config.id, config);
        }
        Self { types }
    }

    /// Register a host-defined event type.
    pub fn register(&mut self, config: EventTypeConfig) -> Result<(), RegistrationError> {
        if self.types.contains_key(&config.id) {
            return Err(RegistrationError::DuplicateEventType(config.id));
        }
        let parent = config.parent.unwrap_or(EventTypeId::ANY);
        if !self.types.contains_key(&parent) {
            return Err(RegistrationError::UnknownEventType(parent));
        }

        self.types.insert(config.id, EventTypeConfig {
            parent: Some(parent),
            ..config
        });
        Ok(())
    }

    /// Get an event type config by ID.
    #[must_use]
    pub fn get(&self, id: EventTypeId) -> Option<&EventTypeConfig> {
        self.types.get(&id)
    }

    /// Check if an event type is registered.
    #[must_use]
    pub fn contains(&self, id: EventTypeId) -> bool {
        self.types.contains_key(&id)
    }

    /// Get the direct supertype of an event type.
    #[must_use]
    pub fn parent(&self, id: EventTypeId) -> Option<EventTypeId> {
        self.types.get(&id).and_then(|config| config.parent)
    }

    /// Iterate `id` followed by each of its supertypes up to the root.
    ///
    /// Unknown IDs yield only themselves.
    pub fn ancestors(&self, id: EventTypeId) -> impl Iterator<Item = EventTypeId> + '_ {
        std::iter::successors(Some(id), move |current| self.parent(*current))
    }

    /// Check whether `id` is `ancestor` or one of its subtypes.
    #[must_use]
    pub fn is_a(&self, id: EventTypeId, ancestor: EventTypeId) -> bool {
        self.ancestors(id).any(|t| t == ancestor)
    }

    /// Number of registered event types, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the root type is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn builtin_types() -> Vec<EventTypeConfig> {
    let root = EventTypeConfig {
        id: EventTypeId::ANY,
        name: "Any".to_string(),
        description: "Root of the event hierarchy".to_string(),
        parent: None,
    };

    vec![
        root,
        EventTypeConfig::new(EventTypeId::BLOCK, "Block"),
        EventTypeConfig::new(EventTypeId::BLOCK_BROKEN, "BlockBroken")
            .with_parent(EventTypeId::BLOCK)
            .with_description("A subject broke a block"),
        EventTypeConfig::new(EventTypeId::BLOCK_PLACED, "BlockPlaced")
            .with_parent(EventTypeId::BLOCK)
            .with_description("A subject placed a block"),
        EventTypeConfig::new(EventTypeId::ENTITY, "Entity"),
        EventTypeConfig::new(EventTypeId::ENTITY_INTERACTED, "EntityInteracted")
            .with_parent(EventTypeId::ENTITY)
            .with_description("A subject interacted with an entity"),
        EventTypeConfig::new(EventTypeId::ENTITY_DIED, "EntityDied")
            .with_parent(EventTypeId::ENTITY)
            .with_description("An entity died, possibly killed by a subject"),
        EventTypeConfig::new(EventTypeId::SUBJECT, "Subject"),
        EventTypeConfig::new(EventTypeId::SUBJECT_JOINED, "SubjectJoined")
            .with_parent(EventTypeId::SUBJECT)
            .with_description("A subject joined"),
        EventTypeConfig::new(EventTypeId::SUBJECT_JUMPED, "SubjectJumped")
            .with_parent(EventTypeId::SUBJECT)
            .with_description("A subject jumped"),
    ]
}
