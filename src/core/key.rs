//! Namespaced keys.
//!
//! Advancements are addressed by `namespace:path` keys such as
//! `minecraft:adventure/trade` or `demo:trade`. Keys are validated on
//! construction, so any `NamespacedKey` value is well-formed.
//!
//! ## Rules
//!
//! - namespace: one or more of `[a-z0-9._-]`
//! - path: one or more of `[a-z0-9._/-]`
//! - a bare `path` or `:path` takes the default namespace
//!
//! ```
//! use rust_advancements::core::NamespacedKey;
//!
//! let key: NamespacedKey = "adventure/trade".parse().unwrap();
//! assert_eq!(key.namespace(), "minecraft");
//! assert_eq!(key.to_string(), "minecraft:adventure/trade");
//!
//! assert!(NamespacedKey::parse("Demo:Trade").is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::KeyError;

/// Namespace used when a key string has none.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A validated `namespace:path` key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacedKey {
    namespace: String,
    path: String,
}

impl NamespacedKey {
    /// Create a key from its parts, validating both.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        let path = path.into();

        if !is_valid_namespace(&namespace) {
            return Err(KeyError::InvalidNamespace(namespace));
        }
        if !is_valid_path(&path) {
            return Err(KeyError::InvalidPath(path));
        }

        Ok(Self { namespace, path })
    }

    /// Parse a key, using [`DEFAULT_NAMESPACE`] when none is given.
    pub fn parse(input: &str) -> Result<Self, KeyError> {
        Self::parse_with_default(input, DEFAULT_NAMESPACE)
    }

    /// Parse a key, using `default_namespace` when none is given.
    pub fn parse_with_default(input: &str, default_namespace: &str) -> Result<Self, KeyError> {
        if input.is_empty() {
            return Err(KeyError::Empty);
        }

        let mut parts = input.split(':');
        let (namespace, path) = match (parts.next(), parts.next(), parts.next()) {
            (Some(path), None, None) => (default_namespace, path),
            (Some(""), Some(path), None) => (default_namespace, path),
            (Some(namespace), Some(path), None) => (namespace, path),
            _ => return Err(KeyError::TooManySeparators(input.to_string())),
        };

        Self::new(namespace, path)
    }

    /// Check that `namespace` is usable as a key namespace.
    pub fn validate_namespace(namespace: &str) -> Result<(), KeyError> {
        if is_valid_namespace(namespace) {
            Ok(())
        } else {
            Err(KeyError::InvalidNamespace(namespace.to_string()))
        }
    }

    /// The namespace part.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path part.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Re-home this key under `storage_namespace`.
    ///
    /// The original namespace becomes the first path segment, so
    /// `minecraft:adventure/trade` stored under `advancement_api` becomes
    /// `advancement_api:minecraft/adventure/trade`. Namespaces never contain
    /// `/`, so the first `/` always ends the namespace and distinct keys map
    /// to distinct storage keys.
    pub fn storage_key(&self, storage_namespace: &str) -> Result<NamespacedKey, KeyError> {
        Self::new(storage_namespace, format!("{}/{}", self.namespace, self.path))
    }
}

impl std::fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl std::str::FromStr for NamespacedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NamespacedKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NamespacedKey> for String {
    fn from(key: NamespacedKey) -> Self {
        key.to_string()
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-'))
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' | b'/'))
}
