//! Application factory
//!
//! Builds the Actix-web application from shared state, so the binary and
//! the integration tests serve exactly the same routes.

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{error::InternalError, web, App, HttpResponse};

use crate::handlers::error::{handle_json_error, not_found};
use crate::routes::verification::{
    cancel::cancel, state::get_state, submit_code::submit_code, submit_phone::submit_phone,
    AppState,
};

/// Largest accepted JSON body in bytes
const JSON_PAYLOAD_LIMIT: usize = 4096;

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: Cors,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, _req| {
            let response = handle_json_error(&err);
            InternalError::from_response(err, response).into()
        });

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)
        // Display state is per session and must never be cached
        .wrap(
            DefaultHeaders::new()
                .add(("Cache-Control", "no-store"))
                .add(("X-Content-Type-Options", "nosniff")),
        )
        .wrap(cors)
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/verification")
                    .route("", web::get().to(get_state))
                    .route("/phone", web::post().to(submit_phone))
                    .route("/code", web::post().to(submit_code))
                    .route("/cancel", web::post().to(cancel)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "phone-verify-api",
        "version": env!("CARGO_PKG_VERSION"),
        "gateway": state.verification_service.provider_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
