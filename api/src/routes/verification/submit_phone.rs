use actix_web::{web, HttpRequest, HttpResponse};

use pv_core::services::verification::DisplayState;

use crate::dto::SubmitPhoneRequest;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/verification/phone
///
/// Normalizes the number and asks the gateway to send a PIN.
///
/// # Request Body
///
/// ```json
/// {
///     "phone": "(11) 99999-8888"
/// }
/// ```
///
/// # Response
///
/// ## 200 OK
/// ```json
/// {
///     "step": "awaiting_pin",
///     "phone": "5511****8888",
///     "notice": { "level": "info", "message": "Code sent to: 5511****8888" },
///     "reset_after_secs": null
/// }
/// ```
///
/// An invalid number or a failed delivery is also a 200 with a warning or
/// error notice and the step unchanged.
///
/// ## Errors
/// - 400 for an unreadable or oversized body
/// - 409 when the session is already awaiting a PIN
pub async fn submit_phone(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<SubmitPhoneRequest>,
) -> HttpResponse {
    let (session_id, handle) = state.session_for(&req).await;
    let mut session = handle.lock().await;
    session.touch();

    match state
        .verification_service
        .submit_phone(&mut session, &request.phone)
        .await
    {
        Ok(outcome) => {
            state.display_response(session_id, &DisplayState::after_phone(&session, &outcome))
        }
        Err(error) => state.with_session_cookie(session_id, handle_domain_error(&error)),
    }
}
