use actix_web::{web, HttpRequest, HttpResponse};

use pv_core::services::verification::DisplayState;

use super::AppState;

/// Handler for GET /api/v1/verification
///
/// Returns the display state of the caller's session, creating the session
/// on first contact.
///
/// # Response
///
/// ```json
/// {
///     "step": "awaiting_phone",
///     "phone": null,
///     "notice": null,
///     "reset_after_secs": null
/// }
/// ```
pub async fn get_state(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let (session_id, handle) = state.session_for(&req).await;
    let mut session = handle.lock().await;
    session.touch();

    state.display_response(session_id, &DisplayState::for_session(&session))
}
