//! Error types.
//!
//! Every failure the engine can surface is a typed `thiserror` enum, grouped
//! by the operation that produces it:
//!
//! - [`KeyError`] - malformed namespaced keys
//! - [`RegistrationError`] - rejected trigger registrations
//! - [`GrantError`] - catalog failures when an award fires
//! - [`StoreError`] - progress snapshot encoding failures
//! - [`ConfigError`] - engine configuration parsing failures
//!
//! None of these abort event processing. Dispatch-time problems are logged
//! and reported per trigger; only registration and explicit host calls
//! return errors.

use thiserror::Error;

use crate::events::EventTypeId;

use super::key::NamespacedKey;

/// A key string could not be parsed into a `NamespacedKey`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key cannot be empty")]
    Empty,

    #[error("key '{0}' contains more than one ':' separator")]
    TooManySeparators(String),

    #[error("invalid namespace '{0}': expected one or more of [a-z0-9._-]")]
    InvalidNamespace(String),

    #[error("invalid path '{0}': expected one or more of [a-z0-9._/-]")]
    InvalidPath(String),
}

/// A trigger registration was rejected. Nothing was registered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("invalid advancement key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("advancement not found: {0}")]
    UnknownAdvancement(NamespacedKey),

    #[error("parent advancement not found: {0}")]
    UnknownParent(NamespacedKey),

    #[error("target value must be at least 1, got {0}")]
    InvalidTargetValue(i64),

    #[error("event type {0} is not registered")]
    UnknownEventType(EventTypeId),

    #[error("event type {0} is already registered")]
    DuplicateEventType(EventTypeId),

    #[error("event type must be set before building a trigger")]
    MissingEventType,
}

/// An award could not be applied by the catalog at fire time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GrantError {
    #[error("advancement not found: {0}")]
    UnknownAdvancement(NamespacedKey),
}

/// A progress snapshot could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode progress snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode progress snapshot: {0}")]
    Decode(#[source] bincode::Error),
}

/// Engine configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid engine config: {0}")]
    Invalid(#[from] KeyError),
}
