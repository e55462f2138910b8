//! Advancement engine.
//!
//! [`AdvancementEngine`] ties the pieces together: it owns the event type
//! hierarchy and the trigger registry, and drives the host's catalog and
//! progress store when events are delivered.
//!
//! ## Dispatch
//!
//! `dispatch` runs every trigger whose event type is the event's type or a
//! supertype of it, in registration order, to completion on the caller's
//! thread. For each trigger:
//!
//! 1. Extract the subject. No subject ends processing silently.
//! 2. Evaluate the condition. `false` ends processing silently.
//! 3. Compute the increment. Zero or negative ends processing silently.
//! 4. Check the parent gate, if the trigger has a parent.
//! 5. Read the counter, plan the grant, award any fires, write the counter.
//!
//! With [`EngineConfig::isolate_panics`] set, a panic inside a host
//! callback (steps 1-3) is caught, logged and reported as a
//! [`TriggerFailure`]; the remaining triggers still run.
//!
//! ## Concurrency
//!
//! All mutation goes through `&mut self`, so one engine applies updates for
//! a subject in delivery order. The store's read-then-write is not atomic.
//! If several engines share one physical store, the host must serialize
//! delivery per subject.
//!
//! ## Example
//!
//! ```
//! use rust_advancements::catalog::{AdvancementDefinition, MemoryCatalog};
//! use rust_advancements::core::{NamespacedKey, SubjectId};
//! use rust_advancements::engine::AdvancementEngine;
//! use rust_advancements::events::{Event, EventTypeId};
//! use rust_advancements::progress::MemoryProgressStore;
//! use rust_advancements::triggers::TriggerCondition;
//!
//! let mut catalog = MemoryCatalog::new();
//! catalog.register(
//!     AdvancementDefinition::new(NamespacedKey::parse("demo:trade").unwrap(), "Trader")
//!         .with_criterion("traded"),
//! );
//!
//! let mut engine = AdvancementEngine::new(catalog, MemoryProgressStore::new());
//! engine
//!     .trigger_on("demo:trade", EventTypeId::ENTITY_DIED)
//!     .condition(TriggerCondition::entity_is("villager"))
//!     .build()
//!     .unwrap();
//!
//! let alice = SubjectId::new(1);
//! let report = engine.dispatch(&Event::entity_died("villager", Some(alice)));
//!
//! assert_eq!(report.grants.len(), 1);
//! assert_eq!(engine.progress("demo:trade", alice).unwrap(), -1);
//! ```

mod builder;
mod dispatch;

pub use builder::TriggerBuilder;
pub use dispatch::{CallbackStage, DispatchReport, GrantRecord, TriggerFailure};

use tracing::{debug, error, trace, warn};

use crate::catalog::AdvancementCatalog;
use crate::core::{ConfigError, EngineConfig, KeyError, NamespacedKey, RegistrationError, SubjectId};
use crate::events::{Event, EventTypeConfig, EventTypeId, EventTypeRegistry};
use crate::progress::{ProgressKey, ProgressStore};
use crate::triggers::{TriggerId, TriggerRegistry, TriggerSpec};

use dispatch::Outcome;

/// Result of a reset request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The counter was erased. `previous` is its old value, if one was
    /// stored.
    Reset { previous: Option<i64> },

    /// A trigger for the advancement requires `parent`, which the subject
    /// has not completed. Nothing changed.
    Blocked { parent: NamespacedKey },
}

impl ResetOutcome {
    /// Check if the counter was erased.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        matches!(self, ResetOutcome::Reset { .. })
    }
}

/// Event-driven advancement progress engine.
///
/// Generic over the host's catalog `C` and progress store `S`.
#[derive(Debug)]
pub struct AdvancementEngine<C, S> {
    config: EngineConfig,
    event_types: EventTypeRegistry,
    registry: TriggerRegistry,
    catalog: C,
    store: S,
}

impl<C, S> AdvancementEngine<C, S>
where
    C: AdvancementCatalog,
    S: ProgressStore,
{
    /// Create an engine with the default configuration.
    pub fn new(catalog: C, store: S) -> Self {
        Self {
            config: EngineConfig::default(),
            event_types: EventTypeRegistry::new(),
            registry: TriggerRegistry::new(),
            catalog,
            store,
        }
    }

    /// Create an engine with a validated configuration.
    pub fn with_config(config: EngineConfig, catalog: C, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(catalog, store)
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the event type hierarchy.
    pub fn event_types(&self) -> &EventTypeRegistry {
        &self.event_types
    }

    /// Add a custom event type.
    pub fn register_event_type(&mut self, config: EventTypeConfig) -> Result<(), RegistrationError> {
        let id = config.id;
        self.event_types.register(config)?;
        debug!(event_type = %id, "registered event type");
        Ok(())
    }

    /// Get the trigger registry.
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Get the catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Get the catalog mutably.
    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    /// Get the progress store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the progress store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Take back the catalog and store.
    pub fn into_parts(self) -> (C, S) {
        (self.catalog, self.store)
    }

    /// Register a trigger from an explicit spec.
    pub fn register(&mut self, spec: TriggerSpec) -> Result<TriggerId, RegistrationError> {
        let key = spec.key.clone();
        self.registry
            .register(spec, &self.catalog, &self.event_types, &self.config)
            .inspect_err(|e| warn!(%key, "trigger registration rejected: {}", e))
    }

    /// Start a fluent registration for `key`. The event type must be set
    /// with [`TriggerBuilder::on`].
    pub fn trigger(&mut self, key: impl Into<String>) -> TriggerBuilder<'_, C, S> {
        TriggerBuilder::new(self, key.into(), None)
    }

    /// Start a fluent registration for `key` on `event_type`.
    pub fn trigger_on(&mut self, key: impl Into<String>, event_type: EventTypeId) -> TriggerBuilder<'_, C, S> {
        TriggerBuilder::new(self, key.into(), Some(event_type))
    }

    /// Deliver an event to every matching trigger.
    pub fn dispatch(&mut self, event: &Event) -> DispatchReport {
        let ids = self.registry.matching(event.event_type, &self.event_types);
        let mut report = DispatchReport {
            event_type: event.event_type,
            matched: ids.len(),
            ..DispatchReport::default()
        };

        for id in ids {
            let Some(trigger) = self.registry.get(id) else {
                continue;
            };

            match dispatch::process(
                trigger,
                event,
                &mut self.catalog,
                &mut self.store,
                self.config.isolate_panics,
            ) {
                Ok(Outcome::Skipped(reason)) => {
                    trace!(trigger = %id, ?reason, "trigger skipped");
                }
                Ok(Outcome::Progressed(grant)) => {
                    report.progressed += 1;
                    if let Some(grant) = grant {
                        debug!(
                            trigger = %id,
                            advancement = %grant.advancement,
                            subject = %grant.subject,
                            fires = grant.fires,
                            "advancement granted"
                        );
                        report.grants.push(grant);
                    }
                }
                Err(failure) => {
                    error!(
                        trigger = %id,
                        advancement = %failure.advancement,
                        stage = %failure.stage,
                        "trigger callback panicked: {}",
                        failure.message
                    );
                    report.failures.push(failure);
                }
            }
        }

        report
    }

    /// Read the raw counter for an advancement.
    ///
    /// The value is uninterpreted: `-1` means completed for `AllAtOnce`
    /// triggers, otherwise it is progress toward the next fire.
    pub fn progress(&self, key: &str, subject: SubjectId) -> Result<i64, KeyError> {
        let key = self.progress_key(key, subject)?;
        Ok(self.store.get(&key))
    }

    /// Erase the counter for an advancement, unless a trigger for it has a
    /// parent the subject has not completed.
    pub fn reset_progress(&mut self, key: &str, subject: SubjectId) -> Result<ResetOutcome, KeyError> {
        let key = self.config.parse_key(key)?;
        self.reset_key(&key, subject)
    }

    /// Reset every registered advancement for a subject, honoring parent
    /// gates. Returns the number of counters erased.
    pub fn reset_all(&mut self, subject: SubjectId) -> usize {
        let keys: Vec<NamespacedKey> = self.registry.keys().into_iter().cloned().collect();

        let mut erased = 0;
        for key in keys {
            match self.reset_key(&key, subject) {
                Ok(ResetOutcome::Reset { previous: Some(_) }) => erased += 1,
                Ok(_) => {}
                Err(e) => warn!(%key, %subject, "reset failed: {}", e),
            }
        }
        erased
    }

    fn reset_key(&mut self, key: &NamespacedKey, subject: SubjectId) -> Result<ResetOutcome, KeyError> {
        if let Some(parent) = self.blocking_parent(key, subject) {
            debug!(%key, %parent, %subject, "reset blocked by incomplete parent");
            return Ok(ResetOutcome::Blocked { parent });
        }

        let progress_key = ProgressKey::new(subject, key, &self.config.storage_namespace)?;
        let previous = self.store.remove(&progress_key);
        trace!(key = %progress_key, ?previous, "progress reset");
        Ok(ResetOutcome::Reset { previous })
    }

    /// First parent among the triggers for `key` that `subject` has not
    /// completed.
    fn blocking_parent(&self, key: &NamespacedKey, subject: SubjectId) -> Option<NamespacedKey> {
        self.registry
            .triggers_for(key)
            .filter_map(|trigger| trigger.parent.as_ref())
            .find(|parent| !self.catalog.is_completed(parent, subject))
            .cloned()
    }

    fn progress_key(&self, key: &str, subject: SubjectId) -> Result<ProgressKey, KeyError> {
        let key = self.config.parse_key(key)?;
        ProgressKey::new(subject, &key, &self.config.storage_namespace)
    }
}
