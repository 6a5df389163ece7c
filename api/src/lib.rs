// Library exports for the binary and integration tests

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod telemetry;

pub use app::create_app;
pub use routes::verification::AppState;
