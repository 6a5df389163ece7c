//! Verification route handlers
//!
//! This module contains the endpoints of the two-step flow:
//! - Current display state
//! - Phone number submission (sends a PIN)
//! - PIN submission
//! - Cancelling a pending PIN
//!
//! Every endpoint answers with the session's display state and refreshes the
//! session cookie.

pub mod cancel;
pub mod state;
pub mod submit_code;
pub mod submit_phone;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

use pv_core::services::verification::{
    DisplayState, PinGatewayTrait, VerificationService, VerificationServiceConfig,
};
use pv_shared::SessionConfig;

use crate::session::{SessionHandle, SessionStore};

/// Application state that holds shared services
pub struct AppState {
    pub verification_service: VerificationService<dyn PinGatewayTrait>,
    pub sessions: SessionStore,
    pub session_config: SessionConfig,
}

impl AppState {
    pub fn new(gateway: Arc<dyn PinGatewayTrait>, session_config: SessionConfig) -> Self {
        Self {
            verification_service: VerificationService::new(
                gateway,
                VerificationServiceConfig::from(&session_config),
            ),
            sessions: SessionStore::new(session_config.idle_timeout_secs),
            session_config,
        }
    }

    /// Session named by the request's cookie, created when missing
    pub(crate) async fn session_for(&self, req: &HttpRequest) -> (Uuid, SessionHandle) {
        let requested = req
            .cookie(&self.session_config.cookie_name)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());
        self.sessions.get_or_create(requested).await
    }

    fn session_cookie(&self, session_id: Uuid) -> Cookie<'static> {
        Cookie::build(self.session_config.cookie_name.clone(), session_id.to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.session_config.secure_cookie)
            .finish()
    }

    /// Attach the session cookie to `response`
    pub(crate) fn with_session_cookie(
        &self,
        session_id: Uuid,
        mut response: HttpResponse,
    ) -> HttpResponse {
        if let Err(e) = response.add_cookie(&self.session_cookie(session_id)) {
            tracing::warn!(session_id = %session_id, error = %e, "Failed to set session cookie");
        }
        response
    }

    /// 200 response carrying `display`
    pub(crate) fn display_response(&self, session_id: Uuid, display: &DisplayState) -> HttpResponse {
        self.with_session_cookie(session_id, HttpResponse::Ok().json(display))
    }
}
