use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use pv_core::errors::DomainError;
use pv_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::InvalidTransition { action, step } => {
            tracing::warn!(action, step = %step, "Rejected action for the current step");
            ErrorResponse::new(error_codes::INVALID_STEP, error.to_string())
                .add_detail("step", step)
                .to_response(StatusCode::CONFLICT)
        }
    }
}

/// Convert an unreadable JSON body into a 400 response
pub fn handle_json_error(error: &JsonPayloadError) -> HttpResponse {
    tracing::debug!(error = %error, "Rejected malformed request body");
    ErrorResponse::new(error_codes::BAD_REQUEST, error.to_string())
        .to_response(StatusCode::BAD_REQUEST)
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}
