//! Progress increments.
//!
//! Each qualifying event adds an increment to the subject's counter. The
//! default is a constant 1; hosts can read the amount from the event (items
//! crafted, distance travelled) or compute it in a closure.
//!
//! An increment of zero or less means "no progress": the engine discards the
//! event for that trigger without touching the store.

use std::sync::Arc;

use crate::events::Event;

/// Signature of a host-supplied increment function.
pub type AmountFn = dyn Fn(&Event) -> i64 + Send + Sync;

/// A host-supplied increment closure.
#[derive(Clone)]
pub struct IncrementFn(Arc<AmountFn>);

impl IncrementFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Event) -> i64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Call the function.
    pub fn amount(&self, event: &Event) -> i64 {
        (self.0)(event)
    }
}

impl std::fmt::Debug for IncrementFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IncrementFn(..)")
    }
}

/// How much progress a qualifying event contributes.
#[derive(Clone, Debug)]
pub enum Increment {
    /// A fixed amount per event.
    Constant(i64),

    /// The event value at `index`; events without that value contribute 0.
    Value { index: usize },

    /// Host-supplied closure.
    Custom(IncrementFn),
}

impl Default for Increment {
    fn default() -> Self {
        Self::Constant(1)
    }
}

impl Increment {
    /// Create an increment from a closure.
    pub fn custom(f: impl Fn(&Event) -> i64 + Send + Sync + 'static) -> Self {
        Self::Custom(IncrementFn::new(f))
    }

    /// Compute the increment for an event.
    #[must_use]
    pub fn amount(&self, event: &Event) -> i64 {
        match self {
            Self::Constant(amount) => *amount,
            Self::Value { index } => event.value(*index, 0),
            Self::Custom(f) => f.amount(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SubjectId;

    #[test]
    fn test_default_is_one() {
        let event = Event::subject_jumped(SubjectId::new(1));
        assert_eq!(Increment::default().amount(&event), 1);
    }

    #[test]
    fn test_value_increment() {
        let increment = Increment::Value { index: 1 };
        let event = Event::subject_jumped(SubjectId::new(1)).with_value(9).with_value(4);
        assert_eq!(increment.amount(&event), 4);

        let missing = Event::subject_jumped(SubjectId::new(1));
        assert_eq!(increment.amount(&missing), 0);
    }

    #[test]
    fn test_custom_increment() {
        let increment = Increment::custom(|event| if event.block_is("diamond_ore") { 5 } else { -1 });

        assert_eq!(increment.amount(&Event::block_broken(SubjectId::new(1), "diamond_ore")), 5);
        assert_eq!(increment.amount(&Event::block_broken(SubjectId::new(1), "dirt")), -1);
    }
}
