//! Trigger system for event-driven advancement progress.
//!
//! A trigger binds an event type to an advancement: when a matching event
//! occurs, the trigger finds the acting subject, checks its condition and
//! advances that subject's progress counter.
//!
//! ## Key Components
//!
//! - [`SubjectExtractor`]: Finds whose progress an event affects
//! - [`TriggerCondition`]: Rules for when an event counts
//! - [`Increment`]: How much progress an event is worth
//! - [`TriggerSpec`]: Everything needed to register a trigger
//! - [`Trigger`]: A registered, immutable trigger
//! - [`TriggerRegistry`]: Validation, storage and lookup for triggers
//!
//! ## Example Usage
//!
//! ```
//! use rust_advancements::catalog::{AdvancementDefinition, MemoryCatalog};
//! use rust_advancements::core::{EngineConfig, NamespacedKey};
//! use rust_advancements::events::{EventTypeId, EventTypeRegistry};
//! use rust_advancements::triggers::{TriggerCondition, TriggerRegistry, TriggerSpec};
//!
//! let mut catalog = MemoryCatalog::new();
//! catalog.register(
//!     AdvancementDefinition::new(NamespacedKey::parse("demo:trade").unwrap(), "Trader")
//!         .with_criterion("traded"),
//! );
//!
//! let types = EventTypeRegistry::new();
//! let mut registry = TriggerRegistry::new();
//!
//! // "Kill a villager"
//! let mut spec = TriggerSpec::new("demo:trade", EventTypeId::ENTITY_DIED);
//! spec.condition = TriggerCondition::entity_is("villager");
//!
//! let id = registry
//!     .register(spec, &catalog, &types, &EngineConfig::default())
//!     .unwrap();
//!
//! assert_eq!(registry.matching(EventTypeId::ENTITY_DIED, &types), vec![id]);
//! ```

mod condition;
mod extractor;
mod increment;
mod registry;

pub use condition::{ConditionEvaluator, ConditionFn, PredicateFn, TriggerCondition};
pub use extractor::{ExtractFn, ExtractorFn, SubjectExtractor};
pub use increment::{AmountFn, Increment, IncrementFn};
pub use registry::{Trigger, TriggerId, TriggerRegistry, TriggerSpec};
