//! Configuration for the verification service

use std::time::Duration;

use pv_shared::SessionConfig;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// How long clients keep the success confirmation visible before the
    /// flow restarts
    pub confirmation_delay: Duration,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_secs(4),
        }
    }
}

impl From<&SessionConfig> for VerificationServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            confirmation_delay: Duration::from_secs(config.confirmation_delay_secs),
        }
    }
}
