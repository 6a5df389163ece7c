use serde::{Deserialize, Serialize};

/// Any string is accepted; normalization decides whether it is a number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPhoneRequest {
    /// Phone number as typed, with or without punctuation and country code
    /// Examples: "(11) 99999-8888", "+55 11 99999-8888"
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCodeRequest {
    /// PIN received by SMS; surrounding whitespace is ignored
    pub code: String,
}
