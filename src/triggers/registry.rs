//! Trigger registry.
//!
//! The registry validates trigger specs, stores the resulting triggers and
//! provides lookup by event type when events occur. Triggers are immutable
//! once registered and are never removed.
//!
//! ## Duplicate Keys
//!
//! Registering the same advancement key twice installs two independent
//! triggers. Both share one progress counter (the counter is keyed by
//! advancement, not by trigger), so a single event matching both advances
//! the counter twice.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::catalog::AdvancementCatalog;
use crate::core::{EngineConfig, NamespacedKey, RegistrationError};
use crate::events::{EventTypeId, EventTypeRegistry};
use crate::grant::GrantMode;

use super::condition::TriggerCondition;
use super::extractor::SubjectExtractor;
use super::increment::Increment;

/// Unique identifier for a registered trigger.
///
/// IDs are allocated in registration order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriggerId(pub u32);

impl TriggerId {
    /// Create a new trigger ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// Everything needed to register a trigger.
///
/// This is the direct registration surface: every field is explicit.
/// [`TriggerSpec::new`] fills in the defaults, and
/// [`TriggerBuilder`](super::TriggerBuilder) offers the same thing fluently.
///
/// | Field | Default |
/// |---|---|
/// | `condition` | `TriggerCondition::Always` |
/// | `target_value` | 1 |
/// | `extractor` | `None` (built-in resolver) |
/// | `grant_mode` | `GrantMode::AllAtOnce` |
/// | `increment` | `Increment::Constant(1)` |
/// | `parent` | `None` |
#[derive(Clone, Debug)]
pub struct TriggerSpec {
    /// Advancement key, e.g. `"demo:trade"`. Parsed at registration.
    pub key: String,

    /// Event type that activates the trigger, subtypes included.
    pub event_type: EventTypeId,

    /// Whether an event counts.
    pub condition: TriggerCondition,

    /// Progress needed per grant. Must be at least 1.
    pub target_value: i64,

    /// Subject extractor. `None` resolves the built-in default for
    /// `event_type`.
    pub extractor: Option<SubjectExtractor>,

    /// How reaching the target is granted.
    pub grant_mode: GrantMode,

    /// Progress per qualifying event.
    pub increment: Increment,

    /// Advancement the subject must have completed before this trigger
    /// makes (or resets) any progress.
    pub parent: Option<String>,
}

impl TriggerSpec {
    /// Create a spec with default settings.
    pub fn new(key: impl Into<String>, event_type: EventTypeId) -> Self {
        Self {
            key: key.into(),
            event_type,
            condition: TriggerCondition::Always,
            target_value: 1,
            extractor: None,
            grant_mode: GrantMode::default(),
            increment: Increment::default(),
            parent: None,
        }
    }

    /// Set the condition.
    #[must_use]
    pub fn with_condition(mut self, condition: TriggerCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Set the target value.
    #[must_use]
    pub fn with_target_value(mut self, target_value: i64) -> Self {
        self.target_value = target_value;
        self
    }

    /// Set an explicit subject extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: SubjectExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the grant mode.
    #[must_use]
    pub fn with_grant_mode(mut self, grant_mode: GrantMode) -> Self {
        self.grant_mode = grant_mode;
        self
    }

    /// Set the increment.
    #[must_use]
    pub fn with_increment(mut self, increment: Increment) -> Self {
        self.increment = increment;
        self
    }

    /// Require another advancement to be completed first.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// A registered trigger.
#[derive(Clone, Debug)]
pub struct Trigger {
    /// Registration ID.
    pub id: TriggerId,

    /// Advancement this trigger progresses.
    pub key: NamespacedKey,

    /// Key the progress counter is stored under.
    pub storage_key: NamespacedKey,

    /// Event type this trigger listens for.
    pub event_type: EventTypeId,

    /// Whether an event counts.
    pub condition: TriggerCondition,

    /// Finds the acting subject.
    pub extractor: SubjectExtractor,

    /// Progress needed per grant (>= 1).
    pub target_value: i64,

    /// How reaching the target is granted.
    pub grant_mode: GrantMode,

    /// Progress per qualifying event.
    pub increment: Increment,

    /// Advancement that gates progress, if any.
    pub parent: Option<NamespacedKey>,
}

/// Registry for triggers.
///
/// Stores triggers in registration order with an index by event type.
/// When an event fires, [`TriggerRegistry::matching`] returns every trigger
/// whose event type is the event's type or one of its supertypes.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    /// All registered triggers, indexed by `TriggerId`.
    triggers: Vec<Trigger>,

    /// Index by event type for fast lookup.
    by_event_type: FxHashMap<EventTypeId, Vec<TriggerId>>,

    /// Event types already warned about for lacking an extractor.
    warned_extractors: FxHashSet<EventTypeId>,
}

impl TriggerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a trigger, returning its ID.
    ///
    /// Nothing is registered if validation fails.
    pub fn register<C: AdvancementCatalog + ?Sized>(
        &mut self,
        spec: TriggerSpec,
        catalog: &C,
        types: &EventTypeRegistry,
        config: &EngineConfig,
    ) -> Result<TriggerId, RegistrationError> {
        let key = config.parse_key(&spec.key)?;
        if !catalog.contains(&key) {
            return Err(RegistrationError::UnknownAdvancement(key));
        }

        if spec.target_value < 1 {
            return Err(RegistrationError::InvalidTargetValue(spec.target_value));
        }

        let parent = match spec.parent {
            Some(raw) => {
                let parent = config.parse_key(&raw)?;
                if !catalog.contains(&parent) {
                    return Err(RegistrationError::UnknownParent(parent));
                }
                Some(parent)
            }
            None => None,
        };

        if !types.contains(spec.event_type) {
            return Err(RegistrationError::UnknownEventType(spec.event_type));
        }

        let storage_key = key.storage_key(&config.storage_namespace)?;
        let extractor = match spec.extractor {
            Some(extractor) => extractor,
            None => self.default_extractor(spec.event_type, types),
        };

        let id = TriggerId::new(self.triggers.len() as u32);
        debug!(%id, %key, event_type = %spec.event_type, "registered trigger");

        self.by_event_type.entry(spec.event_type).or_default().push(id);
        self.triggers.push(Trigger {
            id,
            key,
            storage_key,
            event_type: spec.event_type,
            condition: spec.condition,
            extractor,
            target_value: spec.target_value,
            grant_mode: spec.grant_mode,
            increment: spec.increment,
            parent,
        });

        Ok(id)
    }

    /// Resolve the built-in extractor, warning once per event type when
    /// there is none.
    fn default_extractor(&mut self, event_type: EventTypeId, types: &EventTypeRegistry) -> SubjectExtractor {
        if let Some(extractor) = SubjectExtractor::resolve_default(event_type, types) {
            return extractor;
        }

        if self.warned_extractors.insert(event_type) {
            let name = types.get(event_type).map_or("<unknown>", |config| config.name.as_str());
            warn!(
                %event_type,
                name,
                "no subject extractor found for event type; triggers on it will never progress"
            );
        }
        SubjectExtractor::Absent
    }

    /// Find every trigger activated by an event of type `event_type`,
    /// in registration order.
    #[must_use]
    pub fn matching(&self, event_type: EventTypeId, types: &EventTypeRegistry) -> Vec<TriggerId> {
        let mut ids: Vec<TriggerId> = types
            .ancestors(event_type)
            .filter_map(|ancestor| self.by_event_type.get(&ancestor))
            .flatten()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Get a trigger by ID.
    #[must_use]
    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(id.index())
    }

    /// Iterate the triggers registered for an advancement key.
    pub fn triggers_for<'a>(&'a self, key: &'a NamespacedKey) -> impl Iterator<Item = &'a Trigger> + 'a {
        self.triggers.iter().filter(move |t| t.key == *key)
    }

    /// Distinct advancement keys, in order of first registration.
    #[must_use]
    pub fn keys(&self) -> Vec<&NamespacedKey> {
        let mut seen = FxHashSet::default();
        self.triggers
            .iter()
            .map(|t| &t.key)
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Get total trigger count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Iterate all triggers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AdvancementDefinition, MemoryCatalog};

    fn key(s: &str) -> NamespacedKey {
        NamespacedKey::parse(s).unwrap()
    }

    fn test_catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.register(AdvancementDefinition::new(key("demo:trade"), "Trader").with_criterion("traded"));
        catalog.register(AdvancementDefinition::new(key("demo:miner"), "Miner").with_steps(3));
        catalog.register(AdvancementDefinition::new(key("adventure/root"), "Adventure").with_criterion("joined"));
        catalog
    }

    fn register(
        registry: &mut TriggerRegistry,
        spec: TriggerSpec,
    ) -> Result<TriggerId, RegistrationError> {
        registry.register(spec, &test_catalog(), &EventTypeRegistry::new(), &EngineConfig::default())
    }

    #[test]
    fn test_trigger_id() {
        let id = TriggerId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Trigger(5)");
    }

    #[test]
    fn test_spec_defaults() {
        let spec = TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED);

        assert!(matches!(spec.condition, TriggerCondition::Always));
        assert_eq!(spec.target_value, 1);
        assert!(spec.extractor.is_none());
        assert_eq!(spec.grant_mode, GrantMode::AllAtOnce);
        assert!(matches!(spec.increment, Increment::Constant(1)));
        assert!(spec.parent.is_none());
    }

    #[test]
    fn test_register_resolves_defaults() {
        let mut registry = TriggerRegistry::new();
        let id = register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED)).unwrap();

        let trigger = registry.get(id).unwrap();
        assert_eq!(trigger.key, key("demo:trade"));
        assert_eq!(trigger.storage_key.to_string(), "advancement_api:demo/trade");
        assert!(matches!(trigger.extractor, SubjectExtractor::Killer));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_default_namespace() {
        let mut registry = TriggerRegistry::new();
        let id = register(&mut registry, TriggerSpec::new("adventure/root", EventTypeId::SUBJECT_JOINED)).unwrap();

        assert_eq!(registry.get(id).unwrap().key.to_string(), "minecraft:adventure/root");
    }

    #[test]
    fn test_register_validation() {
        let mut registry = TriggerRegistry::new();

        assert!(matches!(
            register(&mut registry, TriggerSpec::new("", EventTypeId::ENTITY_DIED)),
            Err(RegistrationError::InvalidKey(_))
        ));
        assert!(matches!(
            register(&mut registry, TriggerSpec::new("Demo:Trade", EventTypeId::ENTITY_DIED)),
            Err(RegistrationError::InvalidKey(_))
        ));
        assert_eq!(
            register(&mut registry, TriggerSpec::new("demo:missing", EventTypeId::ENTITY_DIED)),
            Err(RegistrationError::UnknownAdvancement(key("demo:missing")))
        );

        let mut zero_target = TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED);
        zero_target.target_value = 0;
        assert_eq!(
            register(&mut registry, zero_target),
            Err(RegistrationError::InvalidTargetValue(0))
        );

        let mut bad_parent = TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED);
        bad_parent.parent = Some("demo:nowhere".to_string());
        assert_eq!(
            register(&mut registry, bad_parent),
            Err(RegistrationError::UnknownParent(key("demo:nowhere")))
        );

        assert_eq!(
            register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::new(404))),
            Err(RegistrationError::UnknownEventType(EventTypeId::new(404)))
        );

        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_without_known_extractor() {
        let mut registry = TriggerRegistry::new();
        let id = register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::ENTITY)).unwrap();
        let again = register(&mut registry, TriggerSpec::new("demo:miner", EventTypeId::ENTITY)).unwrap();

        assert!(registry.get(id).unwrap().extractor.is_absent());
        assert!(registry.get(again).unwrap().extractor.is_absent());
        assert_eq!(registry.warned_extractors.len(), 1);
    }

    #[test]
    fn test_matching_uses_hierarchy() {
        let types = EventTypeRegistry::new();
        let mut registry = TriggerRegistry::new();

        let on_death = register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED)).unwrap();
        let on_entity = register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::ENTITY)).unwrap();
        let on_block = register(&mut registry, TriggerSpec::new("demo:miner", EventTypeId::BLOCK_BROKEN)).unwrap();
        let on_any = register(&mut registry, TriggerSpec::new("demo:miner", EventTypeId::ANY)).unwrap();

        assert_eq!(
            registry.matching(EventTypeId::ENTITY_DIED, &types),
            vec![on_death, on_entity, on_any]
        );
        assert_eq!(
            registry.matching(EventTypeId::ENTITY_INTERACTED, &types),
            vec![on_entity, on_any]
        );
        assert_eq!(registry.matching(EventTypeId::BLOCK_BROKEN, &types), vec![on_block, on_any]);
        // Supertype events do not activate subtype triggers
        assert_eq!(registry.matching(EventTypeId::ENTITY, &types), vec![on_entity, on_any]);
    }

    #[test]
    fn test_duplicate_keys_register_independently() {
        let mut registry = TriggerRegistry::new();

        let first = register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED)).unwrap();
        let second = register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED)).unwrap();

        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.triggers_for(&key("demo:trade")).count(), 2);
        assert_eq!(registry.keys(), vec![&key("demo:trade")]);
    }

    #[test]
    fn test_keys_in_registration_order() {
        let mut registry = TriggerRegistry::new();
        register(&mut registry, TriggerSpec::new("demo:miner", EventTypeId::BLOCK_BROKEN)).unwrap();
        register(&mut registry, TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED)).unwrap();
        register(&mut registry, TriggerSpec::new("demo:miner", EventTypeId::BLOCK_PLACED)).unwrap();

        assert_eq!(registry.keys(), vec![&key("demo:miner"), &key("demo:trade")]);
    }
}
