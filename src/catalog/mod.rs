//! Grantable-target catalog.
//!
//! The engine does not own advancement definitions. It validates trigger
//! keys against an [`AdvancementCatalog`] at registration time and calls
//! back into it when progress reaches a target. Hosts with their own
//! advancement system implement the trait; [`MemoryCatalog`] is provided
//! for everyone else.

mod definition;
mod memory;

pub use definition::{AdvancementDefinition, Criteria};
pub use memory::MemoryCatalog;

use crate::core::{GrantError, NamespacedKey, SubjectId};

/// Lookup and award interface for grantable targets.
///
/// ## Implementation Notes
///
/// - `contains`: Checked at registration; unknown keys are rejected
/// - `is_completed`: Used for parent gating; unknown keys are not completed
/// - `award_all`/`award_next`: Called synchronously during dispatch; an
///   `Err` is logged and leaves the stored counter as computed
pub trait AdvancementCatalog {
    /// Check if an advancement exists.
    fn contains(&self, key: &NamespacedKey) -> bool;

    /// Check if `subject` has every criterion of an advancement.
    fn is_completed(&self, key: &NamespacedKey, subject: SubjectId) -> bool;

    /// Award every remaining criterion. Returns the criteria awarded,
    /// which is empty if the advancement was already complete.
    fn award_all(&mut self, key: &NamespacedKey, subject: SubjectId) -> Result<Vec<String>, GrantError>;

    /// Award the first remaining criterion in the catalog's order.
    /// Returns `None` if nothing was left.
    fn award_next(&mut self, key: &NamespacedKey, subject: SubjectId) -> Result<Option<String>, GrantError>;
}
