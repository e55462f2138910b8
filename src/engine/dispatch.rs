//! Per-trigger event processing.
//!
//! Each matched trigger runs the same pipeline: extract the subject, test
//! the condition, compute the increment, check the parent gate, then read,
//! plan, award and write. Any step can end processing for that trigger
//! without affecting the others.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{trace, warn};

use crate::catalog::AdvancementCatalog;
use crate::core::{NamespacedKey, SubjectId};
use crate::events::{Event, EventTypeId};
use crate::grant::{GrantMode, GrantPlan};
use crate::progress::{ProgressKey, ProgressStore};
use crate::triggers::{ConditionEvaluator, Trigger, TriggerId};

/// Host callback that can fail during dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackStage {
    Extractor,
    Condition,
    Increment,
}

impl std::fmt::Display for CallbackStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CallbackStage::Extractor => "extractor",
            CallbackStage::Condition => "condition",
            CallbackStage::Increment => "increment",
        };
        f.write_str(name)
    }
}

/// A fire executed against the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantRecord {
    /// Trigger that fired.
    pub trigger: TriggerId,

    /// Advancement awarded.
    pub advancement: NamespacedKey,

    /// Subject awarded.
    pub subject: SubjectId,

    /// Mode the trigger fired in.
    pub mode: GrantMode,

    /// Number of target-widths consumed.
    pub fires: u64,

    /// Criteria the catalog actually awarded. Empty when the advancement
    /// was already complete.
    pub criteria: Vec<String>,
}

/// A trigger whose host callback panicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerFailure {
    /// Failed trigger.
    pub trigger: TriggerId,

    /// Advancement the trigger progresses.
    pub advancement: NamespacedKey,

    /// Callback that panicked.
    pub stage: CallbackStage,

    /// Panic message, when it was a string.
    pub message: String,
}

/// Result of delivering one event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Type of the delivered event.
    pub event_type: EventTypeId,

    /// Triggers activated by the event type.
    pub matched: usize,

    /// Triggers that wrote a new counter value.
    pub progressed: usize,

    /// Fires, in trigger registration order.
    pub grants: Vec<GrantRecord>,

    /// Triggers isolated after a callback panic.
    pub failures: Vec<TriggerFailure>,
}

impl DispatchReport {
    /// Check if any trigger fired.
    #[must_use]
    pub fn fired(&self) -> bool {
        !self.grants.is_empty()
    }

    /// Check if any trigger failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Fires awarded to one subject.
    pub fn grants_for(&self, subject: SubjectId) -> impl Iterator<Item = &GrantRecord> {
        self.grants.iter().filter(move |grant| grant.subject == subject)
    }
}

/// Why a trigger stopped without writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Skip {
    NoSubject,
    ConditionFailed,
    NonPositiveIncrement,
    ParentIncomplete,
    ZeroSum,
}

/// Outcome of running one trigger against one event.
#[derive(Debug)]
pub(crate) enum Outcome {
    Skipped(Skip),
    Progressed(Option<GrantRecord>),
}

/// Run one trigger's pipeline.
///
/// Returns `Err` only when a host callback panicked under isolation.
pub(crate) fn process<C, S>(
    trigger: &Trigger,
    event: &Event,
    catalog: &mut C,
    store: &mut S,
    isolate_panics: bool,
) -> Result<Outcome, TriggerFailure>
where
    C: AdvancementCatalog + ?Sized,
    S: ProgressStore + ?Sized,
{
    let guard = Guard { trigger, isolate_panics };

    let Some(subject) = guard.run(CallbackStage::Extractor, || trigger.extractor.extract(event))? else {
        return Ok(Outcome::Skipped(Skip::NoSubject));
    };

    if !guard.run(CallbackStage::Condition, || {
        ConditionEvaluator::evaluate(&trigger.condition, subject, event)
    })? {
        return Ok(Outcome::Skipped(Skip::ConditionFailed));
    }

    let increment = guard.run(CallbackStage::Increment, || trigger.increment.amount(event))?;
    if increment <= 0 {
        return Ok(Outcome::Skipped(Skip::NonPositiveIncrement));
    }

    if let Some(parent) = &trigger.parent {
        if !catalog.is_completed(parent, subject) {
            trace!(trigger = %trigger.id, %parent, %subject, "parent incomplete");
            return Ok(Outcome::Skipped(Skip::ParentIncomplete));
        }
    }

    let key = ProgressKey {
        subject,
        key: trigger.storage_key.clone(),
    };
    let current = store.get(&key);
    let Some(plan) = trigger.grant_mode.plan(current, increment, trigger.target_value) else {
        return Ok(Outcome::Skipped(Skip::ZeroSum));
    };

    let grant = if plan.fires_any() {
        award(trigger, subject, plan, catalog)
    } else {
        None
    };

    trace!(trigger = %trigger.id, %key, current, counter = plan.counter, "progress");
    store.set(&key, plan.counter);

    Ok(Outcome::Progressed(grant))
}

/// Execute a plan's fires against the catalog.
///
/// Catalog errors are logged and leave the counter as planned. A step-by-step
/// failure stops the remaining fires but still reports the criteria awarded
/// before it.
fn award<C: AdvancementCatalog + ?Sized>(
    trigger: &Trigger,
    subject: SubjectId,
    plan: GrantPlan,
    catalog: &mut C,
) -> Option<GrantRecord> {
    let criteria = match trigger.grant_mode {
        GrantMode::AllAtOnce => match catalog.award_all(&trigger.key, subject) {
            Ok(criteria) => criteria,
            Err(e) => {
                warn!(trigger = %trigger.id, %subject, "grant failed: {}", e);
                return None;
            }
        },
        GrantMode::StepByStep => {
            let mut criteria = Vec::new();
            for _ in 0..plan.fires {
                match catalog.award_next(&trigger.key, subject) {
                    Ok(Some(criterion)) => criteria.push(criterion),
                    Ok(None) => break,
                    Err(e) => {
                        warn!(
                            trigger = %trigger.id,
                            %subject,
                            awarded = criteria.len(),
                            "grant failed: {}",
                            e
                        );
                        if criteria.is_empty() {
                            return None;
                        }
                        break;
                    }
                }
            }
            criteria
        }
    };

    Some(GrantRecord {
        trigger: trigger.id,
        advancement: trigger.key.clone(),
        subject,
        mode: trigger.grant_mode,
        fires: plan.fires,
        criteria,
    })
}

/// Runs host callbacks, catching panics when isolation is on.
struct Guard<'a> {
    trigger: &'a Trigger,
    isolate_panics: bool,
}

impl Guard<'_> {
    fn run<T>(&self, stage: CallbackStage, f: impl FnOnce() -> T) -> Result<T, TriggerFailure> {
        if !self.isolate_panics {
            return Ok(f());
        }

        panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| TriggerFailure {
            trigger: self.trigger.id,
            advancement: self.trigger.key.clone(),
            stage,
            message: panic_message(payload.as_ref()),
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
