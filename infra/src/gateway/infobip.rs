//! Infobip 2FA Gateway Implementation
//!
//! Sends and verifies PINs through the Infobip 2FA REST API:
//!
//! - `POST {base_url}/2fa/2/pin` with `{applicationId, messageId, to}`
//! - `POST {base_url}/2fa/2/pin/{pinId}/verify` with `{pin}`
//!
//! Each call is a single request bounded by the client timeout. Nothing is
//! retried: a resend would bill another SMS.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use pv_core::domain::{PhoneNumber, PinId};
use pv_core::services::verification::{
    is_terminal_delivery_status, PinCheck, PinGatewayTrait, PinRequestFailure,
};
use pv_shared::GatewayCredentials;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendPinRequest<'a> {
    application_id: &'a str,
    message_id: &'a str,
    to: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendPinResponse {
    pin_id: Option<String>,
    sms_status: Option<String>,
}

#[derive(Debug, Serialize)]
struct VerifyPinRequest<'a> {
    pin: &'a str,
}

/// Infobip 2FA gateway
pub struct InfobipPinGateway {
    client: reqwest::Client,
    credentials: GatewayCredentials,
}

impl InfobipPinGateway {
    /// Create a gateway client with the authorization headers preset
    pub fn new(
        credentials: GatewayCredentials,
        request_timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let mut authorization = HeaderValue::from_str(&format!("App {}", credentials.api_key))
            .map_err(|_| {
                InfrastructureError::Config("API key contains characters not allowed in a header".to_string())
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()?;

        info!(
            base_url = %credentials.base_url,
            application_id = %credentials.application_id,
            timeout_secs = request_timeout.as_secs(),
            "Infobip 2FA gateway initialized"
        );

        Ok(Self { client, credentials })
    }

    fn send_pin_url(&self) -> String {
        format!("{}/2fa/2/pin", self.credentials.base_url)
    }

    fn verify_pin_url(&self, pin_id: &PinId) -> String {
        format!("{}/2fa/2/pin/{}/verify", self.credentials.base_url, pin_id)
    }
}

#[async_trait]
impl PinGatewayTrait for InfobipPinGateway {
    async fn request_pin(&self, phone: &PhoneNumber) -> Result<PinId, PinRequestFailure> {
        let body = SendPinRequest {
            application_id: &self.credentials.application_id,
            message_id: &self.credentials.message_id,
            to: phone.as_str(),
        };

        debug!(phone = %phone.masked(), "Requesting PIN from Infobip");

        let response = self
            .client
            .post(self.send_pin_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(phone = %phone.masked(), error = %e, "PIN request did not complete");
                PinRequestFailure::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(phone = %phone.masked(), status = status.as_u16(), "Infobip rejected PIN request");
            return Err(PinRequestFailure::HttpStatus(status.as_u16()));
        }

        let payload: SendPinResponse = response
            .json()
            .await
            .map_err(|e| PinRequestFailure::MalformedResponse(e.to_string()))?;

        if let Some(sms_status) = payload.sms_status.as_deref() {
            if is_terminal_delivery_status(sms_status) {
                warn!(phone = %phone.masked(), sms_status, "Infobip will not deliver PIN");
                return Err(PinRequestFailure::DeliveryRejected {
                    status: sms_status.to_string(),
                });
            }
        }

        let pin_id = payload.pin_id.and_then(|id| PinId::new(id)).ok_or_else(|| {
            PinRequestFailure::MalformedResponse("response has no pinId".to_string())
        })?;

        debug!(
            phone = %phone.masked(),
            pin_id = %pin_id,
            sms_status = payload.sms_status.as_deref().unwrap_or("unknown"),
            "Infobip issued PIN"
        );
        Ok(pin_id)
    }

    async fn check_pin(&self, pin_id: &PinId, code: &str) -> PinCheck {
        let response = match self
            .client
            .post(self.verify_pin_url(pin_id))
            .json(&VerifyPinRequest { pin: code })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(pin_id = %pin_id, error = %e, "PIN verification did not complete");
                return PinCheck::Transport(e.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(pin_id = %pin_id, status = status.as_u16(), "Infobip rejected PIN verification");
            return PinCheck::HttpStatus(status.as_u16());
        }

        let payload: serde_json::Value = match response.json().await {
            Ok(payload) => payload,
            Err(e) => return PinCheck::MalformedResponse(e.to_string()),
        };

        match payload.get("verified").and_then(serde_json::Value::as_bool) {
            Some(true) => PinCheck::Verified,
            Some(false) => PinCheck::Rejected,
            None => PinCheck::MalformedResponse("response has no boolean verified field".to_string()),
        }
    }

    fn provider_name(&self) -> &str {
        "infobip"
    }
}
