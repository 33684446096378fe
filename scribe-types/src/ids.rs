//! Identifier types used throughout the Scribe core.
//!
//! Block keys are opaque strings (UUID v7 when generated locally, whatever
//! the store supplied otherwise). Entity keys are small integers allocated
//! per document, matching the raw format's `entityMap` keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a block within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    /// Generates a fresh key. Uses UUID v7 so keys created in sequence sort
    /// in creation order.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Wraps an existing key (for example one read from the store).
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier for an entity record in a document's entity map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(u64);

impl EntityKey {
    /// The key handed out to the first entity of a document.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// Creates an entity key from a raw number.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the underlying number.
    #[must_use]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// The key following this one, or `None` at `u64::MAX`.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
