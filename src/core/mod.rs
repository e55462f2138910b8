//! Core engine types: subjects, namespaced keys, configuration, errors.
//!
//! This module contains the identity and ambient building blocks shared by
//! every other module. Hosts configure these via `EngineConfig` rather than
//! modifying the engine.

pub mod subject;
pub mod key;
pub mod config;
pub mod error;

pub use subject::SubjectId;
pub use key::{NamespacedKey, DEFAULT_NAMESPACE};
pub use config::{EngineConfig, DEFAULT_STORAGE_NAMESPACE};
pub use error::{ConfigError, GrantError, KeyError, RegistrationError, StoreError};
