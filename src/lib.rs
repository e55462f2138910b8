//! # rust-advancements
//!
//! An event-driven progress engine for achievement-style advancements.
//!
//! Hosts register triggers that bind an event type to an advancement. Each
//! delivered event advances a per-subject counter, and reaching the
//! trigger's target awards the advancement's criteria through the host's
//! catalog.
//!
//! ## Design Principles
//!
//! 1. **Host-Owned State**: Advancement definitions live in an
//!    [`AdvancementCatalog`] and counters in a [`ProgressStore`]. The engine
//!    owns neither and caches nothing between events.
//!
//! 2. **Configuration Over Convention**: Event types form an extensible
//!    hierarchy. Hosts add their own types at startup and triggers match
//!    subtypes with is-a semantics.
//!
//! 3. **Per-Trigger Isolation**: Nothing one trigger does while handling an
//!    event, including a panicking host callback, stops the others.
//!
//! ## Modules
//!
//! - `core`: Subject IDs, namespaced keys, configuration, errors
//! - `events`: Event payloads and the event type hierarchy
//! - `triggers`: Conditions, subject extractors, increments, registry
//! - `grant`: Grant modes and the counter state machine
//! - `progress`: Progress store trait and in-memory store
//! - `catalog`: Advancement catalog trait and in-memory catalog
//! - `engine`: Registration, dispatch, progress queries and resets

pub mod core;
pub mod events;
pub mod triggers;
pub mod grant;
pub mod progress;
pub mod catalog;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    SubjectId, NamespacedKey, EngineConfig,
    ConfigError, GrantError, KeyError, RegistrationError, StoreError,
};

pub use crate::events::{Event, EventTypeId, EventTypeConfig, EventTypeRegistry};

pub use crate::triggers::{
    TriggerCondition, ConditionEvaluator, SubjectExtractor, Increment,
    TriggerId, Trigger, TriggerSpec, TriggerRegistry,
};

pub use crate::grant::{GrantMode, GrantPlan, COMPLETED_SENTINEL};

pub use crate::progress::{ProgressKey, ProgressStore, MemoryProgressStore, ProgressSnapshot};

pub use crate::catalog::{AdvancementCatalog, AdvancementDefinition, MemoryCatalog};

pub use crate::engine::{
    AdvancementEngine, TriggerBuilder, DispatchReport, GrantRecord,
    TriggerFailure, CallbackStage, ResetOutcome,
};
