use actix_web::{web, HttpRequest, HttpResponse};

use pv_core::services::verification::DisplayState;

use super::AppState;
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/v1/verification/cancel
///
/// Drops the pending PIN and returns the session to the phone step. No
/// request body.
///
/// ## Errors
/// - 409 when no PIN is pending
pub async fn cancel(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let (session_id, handle) = state.session_for(&req).await;
    let mut session = handle.lock().await;

    match state.verification_service.cancel(&mut session) {
        Ok(()) => state.display_response(session_id, &DisplayState::for_session(&session)),
        Err(error) => state.with_session_cookie(session_id, handle_domain_error(&error)),
    }
}
