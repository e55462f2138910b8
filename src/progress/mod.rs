//! Progress storage.
//!
//! The engine reads and writes counters through the [`ProgressStore`]
//! trait, injected by the host. [`MemoryProgressStore`] is a complete
//! in-memory implementation with cheap snapshots and a bincode export.

mod memory;
mod store;

pub use memory::{MemoryProgressStore, ProgressSnapshot};
pub use store::{ProgressKey, ProgressStore};
