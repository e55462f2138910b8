//! Fluent trigger registration.

use crate::catalog::AdvancementCatalog;
use crate::core::RegistrationError;
use crate::events::EventTypeId;
use crate::grant::GrantMode;
use crate::progress::ProgressStore;
use crate::triggers::{Increment, SubjectExtractor, TriggerCondition, TriggerId, TriggerSpec};

use super::AdvancementEngine;

/// Staged trigger registration bound to an engine.
///
/// Created by [`AdvancementEngine::trigger`] or
/// [`AdvancementEngine::trigger_on`]. Unset fields take the
/// [`TriggerSpec`] defaults, and [`TriggerBuilder::build`] runs the same
/// validation as [`AdvancementEngine::register`].
#[must_use = "nothing is registered until `build` is called"]
pub struct TriggerBuilder<'e, C, S> {
    engine: &'e mut AdvancementEngine<C, S>,
    event_type: Option<EventTypeId>,
    spec: TriggerSpec,
}

impl<'e, C, S> TriggerBuilder<'e, C, S>
where
    C: AdvancementCatalog,
    S: ProgressStore,
{
    pub(super) fn new(
        engine: &'e mut AdvancementEngine<C, S>,
        key: String,
        event_type: Option<EventTypeId>,
    ) -> Self {
        Self {
            engine,
            event_type,
            spec: TriggerSpec::new(key, event_type.unwrap_or_default()),
        }
    }

    /// Set the advancement key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.spec.key = key.into();
        self
    }

    /// Set the event type the trigger listens for.
    pub fn on(mut self, event_type: EventTypeId) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Set the condition.
    pub fn condition(mut self, condition: TriggerCondition) -> Self {
        self.spec.condition = condition;
        self
    }

    /// Set the target value.
    pub fn target_value(mut self, target_value: i64) -> Self {
        self.spec.target_value = target_value;
        self
    }

    /// Set an explicit subject extractor.
    pub fn extractor(mut self, extractor: SubjectExtractor) -> Self {
        self.spec.extractor = Some(extractor);
        self
    }

    /// Set the grant mode.
    pub fn grant_mode(mut self, grant_mode: GrantMode) -> Self {
        self.spec.grant_mode = grant_mode;
        self
    }

    /// Set the increment.
    pub fn increment(mut self, increment: Increment) -> Self {
        self.spec.increment = increment;
        self
    }

    /// Require another advancement to be completed first.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.spec.parent = Some(parent.into());
        self
    }

    /// Validate and register the trigger.
    pub fn build(self) -> Result<TriggerId, RegistrationError> {
        let event_type = self.event_type.ok_or(RegistrationError::MissingEventType)?;
        let spec = TriggerSpec {
            event_type,
            ..self.spec
        };
        self.engine.register(spec)
    }
}
