//! CORS middleware configuration for cross-origin requests.
//!
//! The verification page may be served from another origin than the API.
//! The session travels in a cookie, so credentials are always supported.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use pv_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given configuration.
///
/// Outside production an empty origin list allows any origin for easier
/// testing. In production only the configured origins are allowed.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age)
        .supports_credentials();

    if config.allowed_origins.is_empty() && !environment.is_production() {
        tracing::info!(%environment, "Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    if config.allowed_origins.is_empty() {
        tracing::warn!("No ALLOWED_ORIGINS configured; cross-origin requests will be refused");
    }

    for origin in &config.allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
