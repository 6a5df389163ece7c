//! Verification session configuration

use serde::{Deserialize, Serialize};

/// Settings for verification sessions held by the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Seconds the success confirmation stays on screen before the flow restarts
    #[serde(default = "default_confirmation_delay")]
    pub confirmation_delay_secs: u64,

    /// Idle seconds after which a session is discarded
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Name of the cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the session cookie as Secure (HTTPS only)
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            confirmation_delay_secs: default_confirmation_delay(),
            idle_timeout_secs: default_idle_timeout(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            confirmation_delay_secs: std::env::var("CONFIRMATION_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.confirmation_delay_secs),
            idle_timeout_secs: std::env::var("SESSION_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.idle_timeout_secs),
            cookie_name: std::env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            secure_cookie: std::env::var("SESSION_SECURE_COOKIE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.secure_cookie),
        }
    }
}

fn default_confirmation_delay() -> u64 {
    4
}

fn default_idle_timeout() -> u64 {
    900  // 15 minutes
}

fn default_cookie_name() -> String {
    String::from("pv_session")
}
