use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{error, info};

use pv_api::middleware::cors::create_cors;
use pv_api::telemetry::init_tracing;
use pv_api::{create_app, AppState};
use pv_infra::create_pin_gateway;
use pv_shared::{AppConfig, Environment, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables, environment-specific file first
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    // Initialize logging before configuration so its errors are recorded
    let environment = Environment::from_env();
    init_tracing(&LoggingConfig::from_env(environment));

    info!(%environment, "Starting PhoneVerify API Server");

    // Missing gateway credentials are fatal
    let config = AppConfig::from_env()
        .map_err(|e| {
            error!(error = %e, "Configuration is incomplete, refusing to start");
            e
        })
        .context("Failed to load configuration")?;

    let gateway =
        create_pin_gateway(&config.gateway).context("Failed to initialize the PIN gateway")?;
    info!(
        provider = gateway.provider_name(),
        timeout_secs = config.gateway.request_timeout_secs,
        "PIN gateway ready"
    );

    let app_state = web::Data::new(AppState::new(gateway, config.session.clone()));

    let bind_address = config.server.bind_address();
    info!(bind_address = %bind_address, "Server will bind");

    let cors_config = config.cors.clone();
    let mut server = HttpServer::new(move || {
        create_app(
            app_state.clone(),
            create_cors(&cors_config, environment),
        )
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")
}
