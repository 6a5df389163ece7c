//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `gateway` - 2FA gateway provider and credentials
//! - `server` - HTTP server and CORS configuration
//! - `session` - Verification session lifetime and cookie settings

pub mod environment;
pub mod gateway;
pub mod server;
pub mod session;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use gateway::{GatewayConfig, GatewayCredentials, GatewayProvider};
pub use server::{CorsConfig, ServerConfig};
pub use session::SessionConfig;

/// Configuration errors. Any of these prevents the server from starting.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value: {key} (set {env} or add it to the secrets file)")]
    Missing { key: String, env: String },

    #[error("Invalid configuration value for {key}: {message}")]
    Invalid { key: String, message: String },

    #[error("Failed to read configuration source: {0}")]
    Source(#[from] ::config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Gateway configuration
    pub gateway: GatewayConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment.
    ///
    /// Fails when gateway credentials are absent or the mock gateway is
    /// selected in production; callers must treat that as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let gateway = GatewayConfig::from_env()?;
        gateway.ensure_allowed_in(environment)?;

        let mut session = SessionConfig::from_env();
        if environment.is_production() {
            session.secure_cookie = true;
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            gateway,
            session,
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        })
    }

    /// Configuration for local development against the mock gateway
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            gateway: GatewayConfig::mock(),
            session: SessionConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }
}
