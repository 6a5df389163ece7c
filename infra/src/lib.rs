//! # Infrastructure Layer
//!
//! Concrete implementations of the core's outbound ports for the PhoneVerify
//! server.
//!
//! ## Architecture
//!
//! - **Gateway**: PIN gateways behind `PinGatewayTrait`
//!   - Infobip 2FA over HTTPS (reqwest)
//!   - In-process mock for local development

/// PIN gateway module - 2FA provider integrations
pub mod gateway;

pub use gateway::{create_pin_gateway, InfobipPinGateway, MockPinGateway};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
