//! PIN gateway configuration
//!
//! Credentials come from an optional TOML secrets file with an `[infobip]`
//! table, overridden field by field by `INFOBIP_*` environment variables.
//! They are read once at startup; a missing field is fatal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use ::config::{Config, File, FileFormat};

use super::{ConfigError, Environment};

/// Default location of the secrets file
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

/// Default timeout for a single gateway request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// PIN accepted by the development gateway
pub const DEFAULT_MOCK_PIN_CODE: &str = "123456";

// (secrets file key, environment variable)
const BASE_URL_KEY: (&str, &str) = ("base_url", "INFOBIP_BASE_URL");
const API_KEY_KEY: (&str, &str) = ("api_key", "INFOBIP_API_KEY");
const APP_ID_KEY: (&str, &str) = ("app_id", "INFOBIP_APP_ID");
const MSG_ID_KEY: (&str, &str) = ("msg_id", "INFOBIP_MSG_ID");

/// Which gateway implementation serves PIN requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayProvider {
    /// Infobip 2FA REST API
    #[default]
    Infobip,
    /// In-process gateway for local development
    Mock,
}

impl std::str::FromStr for GatewayProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "infobip" => Ok(GatewayProvider::Infobip),
            "mock" => Ok(GatewayProvider::Mock),
            other => Err(ConfigError::Invalid {
                key: "PIN_GATEWAY_PROVIDER".to_string(),
                message: format!("unknown provider '{}'", other),
            }),
        }
    }
}

/// Credentials for the 2FA gateway, immutable once loaded
#[derive(Clone, Deserialize, Serialize)]
pub struct GatewayCredentials {
    /// Base URL of the gateway account, including scheme
    pub base_url: String,
    /// API key sent as `Authorization: App {api_key}`
    pub api_key: String,
    /// 2FA application identifier
    pub application_id: String,
    /// Message template identifier
    pub message_id: String,
}

impl GatewayCredentials {
    /// Load credentials from the secrets file, with `lookup` supplying
    /// environment overrides
    pub fn load<F>(secrets_path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder().add_source(
            File::from(secrets_path)
                .format(FileFormat::Toml)
                .required(false),
        );
        for (key, var) in [BASE_URL_KEY, API_KEY_KEY, APP_ID_KEY, MSG_ID_KEY] {
            builder = builder.set_override_option(format!("infobip.{}", key), lookup(var))?;
        }
        let settings = builder.build()?;

        let field = |(key, var): (&str, &str)| -> Result<String, ConfigError> {
            settings
                .get_string(&format!("infobip.{}", key))
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::Missing {
                    key: format!("infobip.{}", key),
                    env: var.to_string(),
                })
        };

        Ok(Self {
            base_url: normalize_base_url(&field(BASE_URL_KEY)?),
            api_key: field(API_KEY_KEY)?,
            application_id: field(APP_ID_KEY)?,
            message_id: field(MSG_ID_KEY)?,
        })
    }
}

// The API key never reaches logs.
impl fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .field("application_id", &self.application_id)
            .field("message_id", &self.message_id)
            .finish()
    }
}

/// Gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Gateway implementation
    pub provider: GatewayProvider,
    /// Credentials, always present for the Infobip provider
    pub credentials: Option<GatewayCredentials>,
    /// Timeout for a single gateway request in seconds
    pub request_timeout_secs: u64,
    /// PIN accepted by the mock provider
    pub mock_pin_code: String,
}

impl GatewayConfig {
    /// Load from the process environment and the secrets file named by
    /// SECRETS_FILE (default `secrets.toml`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let secrets_file = std::env::var("SECRETS_FILE")
            .unwrap_or_else(|_| DEFAULT_SECRETS_FILE.to_string());
        Self::load(Path::new(&secrets_file), |key| std::env::var(key).ok())
    }

    /// Load using `lookup` for environment values
    pub fn load<F>(secrets_path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("PIN_GATEWAY_PROVIDER") {
            Some(value) => value.parse()?,
            None => GatewayProvider::default(),
        };

        let request_timeout_secs = match lookup("GATEWAY_TIMEOUT_SECS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "GATEWAY_TIMEOUT_SECS".to_string(),
                message: format!("'{}' is not a number of seconds", value),
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let credentials = match provider {
            GatewayProvider::Infobip => Some(GatewayCredentials::load(secrets_path, &lookup)?),
            GatewayProvider::Mock => None,
        };

        Ok(Self {
            provider,
            credentials,
            request_timeout_secs,
            mock_pin_code: lookup("MOCK_PIN_CODE")
                .unwrap_or_else(|| DEFAULT_MOCK_PIN_CODE.to_string()),
        })
    }

    /// Reject the mock gateway in production, where it would accept the
    /// fixed development PIN for any number
    pub fn ensure_allowed_in(&self, environment: Environment) -> Result<(), ConfigError> {
        if environment.is_production() && self.provider == GatewayProvider::Mock {
            return Err(ConfigError::Invalid {
                key: "PIN_GATEWAY_PROVIDER".to_string(),
                message: "the mock gateway cannot be used in production".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration for the development gateway
    pub fn mock() -> Self {
        Self {
            provider: GatewayProvider::Mock,
            credentials: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            mock_pin_code: DEFAULT_MOCK_PIN_CODE.to_string(),
        }
    }
}

/// Trim trailing slashes and default the scheme to https
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
