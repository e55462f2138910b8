//! Grant strategies.
//!
//! A grant strategy maps one counter update to a completion decision. Per
//! `(subject, trigger)` the engine reads the counter `C`, adds the event's
//! increment and asks [`GrantMode::plan`] what to store and how many awards
//! to fire.
//!
//! ## State Machine
//!
//! ```text
//!   fresh (0) --+--> in-progress (0 < C < target) --+--> fire
//!               |                                   |
//!               +-----------------------------------+
//!
//!   AllAtOnce:  fire -> completed (C = -1)
//!   StepByStep: fire -> in-progress (C = C mod target), one award per
//!               target-width consumed
//! ```
//!
//! `StepByStep` has no terminal state here: the catalog's own criteria
//! bookkeeping decides when the advancement is done.
//!
//! ```
//! use rust_advancements::grant::{GrantMode, GrantPlan};
//!
//! // A single event worth 7 against a target of 3 consumes two widths.
//! let plan = GrantMode::StepByStep.plan(0, 7, 3).unwrap();
//! assert_eq!(plan, GrantPlan { fires: 2, counter: 1 });
//!
//! let plan = GrantMode::AllAtOnce.plan(0, 1, 1).unwrap();
//! assert_eq!(plan, GrantPlan { fires: 1, counter: -1 });
//! ```

use serde::{Deserialize, Serialize};

/// Counter value stored once an `AllAtOnce` trigger has fired.
pub const COMPLETED_SENTINEL: i64 = -1;

/// How reaching the target value translates into awarded criteria.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantMode {
    /// Award every remaining criterion once the target is reached, then
    /// park the counter at [`COMPLETED_SENTINEL`].
    #[default]
    AllAtOnce,

    /// Award the next remaining criterion each time the target is reached
    /// and carry the remainder forward.
    StepByStep,
}

/// Result of applying one increment to a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrantPlan {
    /// Number of awards to fire. Always 0 or 1 for `AllAtOnce`.
    pub fires: u64,

    /// Counter value to store.
    pub counter: i64,
}

impl GrantPlan {
    /// Check if any award fires.
    #[must_use]
    pub fn fires_any(&self) -> bool {
        self.fires > 0
    }
}

impl GrantMode {
    /// Plan the counter update for `current + increment` against `target`.
    ///
    /// Returns `None` when the update must be discarded without writing:
    /// a non-positive increment, or a sum of exactly zero (an increment
    /// cancelling a negative counter). The sum saturates at `i64::MAX`.
    #[must_use]
    pub fn plan(self, current: i64, increment: i64, target: i64) -> Option<GrantPlan> {
        debug_assert!(target >= 1, "target value must be at least 1");

        if increment <= 0 {
            return None;
        }

        let value = current.saturating_add(increment);
        if value == 0 {
            return None;
        }

        if value < target {
            return Some(GrantPlan { fires: 0, counter: value });
        }

        let plan = match self {
            GrantMode::AllAtOnce => GrantPlan {
                fires: 1,
                counter: COMPLETED_SENTINEL,
            },
            // value >= target >= 1, so both operands are positive
            GrantMode::StepByStep => GrantPlan {
                fires: (value / target) as u64,
                counter: value % target,
            },
        };
        Some(plan)
    }
}
