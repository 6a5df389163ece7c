use actix_web::{web, HttpRequest, HttpResponse};

use pv_core::services::verification::DisplayState;

use crate::dto::SubmitCodeRequest;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/verification/code
///
/// Checks the PIN against the gateway using the session's PIN id.
///
/// # Request Body
///
/// ```json
/// {
///     "code": "123456"
/// }
/// ```
///
/// # Response
///
/// ## 200 OK, verified
/// ```json
/// {
///     "step": "awaiting_phone",
///     "phone": null,
///     "notice": { "level": "success", "message": "ACCESS GRANTED" },
///     "reset_after_secs": 4
/// }
/// ```
///
/// The session is already reset; clients keep the confirmation visible for
/// `reset_after_secs` before showing the phone step. A wrong code is a 200
/// with an error notice and the session still awaiting the PIN.
///
/// ## Errors
/// - 400 for an unreadable or oversized body
/// - 409 when no PIN is pending
pub async fn submit_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<SubmitCodeRequest>,
) -> HttpResponse {
    let (session_id, handle) = state.session_for(&req).await;
    let mut session = handle.lock().await;
    session.touch();

    match state
        .verification_service
        .submit_code(&mut session, &request.code)
        .await
    {
        Ok(outcome) => {
            state.display_response(session_id, &DisplayState::after_code(&session, &outcome))
        }
        Err(error) => state.with_session_cookie(session_id, handle_domain_error(&error)),
    }
}
