//! PIN Gateway Module
//!
//! Implementations of `PinGatewayTrait`:
//!
//! - **Infobip**: production 2FA API
//! - **Mock**: accepts a fixed PIN, for development without an account

use std::sync::Arc;
use std::time::Duration;

use pv_core::services::verification::PinGatewayTrait;
use pv_shared::{GatewayConfig, GatewayProvider};

use crate::InfrastructureError;

pub mod infobip;
pub mod mock_gateway;

pub use infobip::InfobipPinGateway;
pub use mock_gateway::MockPinGateway;

#[cfg(test)]
mod tests;

/// Create a PIN gateway based on configuration
///
/// A misconfigured Infobip provider is an error. There is no fallback to
/// the mock gateway.
///
/// # Arguments
///
/// * `config` - Gateway configuration with provider and credentials
///
/// # Returns
///
/// A shared gateway implementation
pub fn create_pin_gateway(
    config: &GatewayConfig,
) -> Result<Arc<dyn PinGatewayTrait>, InfrastructureError> {
    match config.provider {
        GatewayProvider::Infobip => {
            let credentials = config.credentials.clone().ok_or_else(|| {
                InfrastructureError::Config("Infobip provider requires credentials".to_string())
            })?;
            let gateway = InfobipPinGateway::new(
                credentials,
                Duration::from_secs(config.request_timeout_secs),
            )?;
            Ok(Arc::new(gateway))
        }
        GatewayProvider::Mock => {
            tracing::warn!(
                "Using mock PIN gateway; no SMS will be sent and PIN '{}' is always accepted",
                config.mock_pin_code
            );
            Ok(Arc::new(MockPinGateway::new(config.mock_pin_code.clone())))
        }
    }
}
