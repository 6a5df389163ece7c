//! Shared utilities and common types for the PhoneVerify server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Error response structures
//! - Phone number normalization and masking

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use self::config::{
    AppConfig, ConfigError, CorsConfig, Environment, GatewayConfig, GatewayCredentials,
    GatewayProvider, LoggingConfig, ServerConfig, SessionConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::phone;
