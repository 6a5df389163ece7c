//! Normalized mobile phone number.

use serde::{Deserialize, Serialize};
use std::fmt;

use pv_shared::phone::{is_canonical_phone, mask_phone_number, normalize_phone_number};

/// A mobile number in the gateway's international format: thirteen digits
/// starting with the default country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize raw user input. Returns `None` for anything that is not a
    /// local or fully qualified Brazilian mobile number.
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_phone_number(raw).map(Self)
    }

    /// The normalized digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form safe for logs and display
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_canonical_phone(&value) {
            Ok(Self(value))
        } else {
            Err(format!("not a normalized phone number: {}", mask_phone_number(&value)))
        }
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}
