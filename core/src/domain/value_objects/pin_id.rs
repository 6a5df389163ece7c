//! Gateway-issued PIN transaction identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier correlating a PIN send with its verification.
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(String);

impl PinId {
    /// Wrap a gateway identifier; blank identifiers are rejected
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
