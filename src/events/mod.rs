//! Event model.
//!
//! Hosts describe what happened with an [`Event`] and deliver it to the
//! engine. Every event carries an [`EventTypeId`]; the
//! [`EventTypeRegistry`] arranges those types into a hierarchy so a trigger
//! on a supertype also sees events of every subtype.
//!
//! ## Built-in Event Types
//!
//! | Type | Parent | Subject field |
//! |---|---|---|
//! | `BLOCK_BROKEN` | `BLOCK` | `actor` |
//! | `BLOCK_PLACED` | `BLOCK` | `actor` |
//! | `ENTITY_INTERACTED` | `ENTITY` | `actor` |
//! | `ENTITY_DIED` | `ENTITY` | `killer` |
//! | `SUBJECT_JOINED` | `SUBJECT` | `actor` |
//! | `SUBJECT_JUMPED` | `SUBJECT` | `actor` |

mod event;
mod hierarchy;

pub use event::{Event, EventTypeId};
pub use hierarchy::{EventTypeConfig, EventTypeRegistry};
