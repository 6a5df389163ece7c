//! Trait for the 2FA gateway integration

use async_trait::async_trait;

use crate::domain::value_objects::{PhoneNumber, PinId};

use super::types::{PinCheck, PinRequestFailure};

/// Trait for the external PIN gateway.
///
/// Implementations make exactly one outbound request per call and never
/// retry; every failure is converted into a typed result.
#[async_trait]
pub trait PinGatewayTrait: Send + Sync {
    /// Ask the gateway to send a PIN to `phone`
    async fn request_pin(&self, phone: &PhoneNumber) -> Result<PinId, PinRequestFailure>;

    /// Check `code` against the PIN issued under `pin_id`
    async fn check_pin(&self, pin_id: &PinId, code: &str) -> PinCheck;

    /// Boolean verification contract: true only for a confirmed match
    async fn verify_pin(&self, pin_id: &PinId, code: &str) -> bool {
        self.check_pin(pin_id, code).await.is_verified()
    }

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
