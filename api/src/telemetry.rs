//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. Records emitted
//! through the `log` crate (actix-web's `Logger`) are forwarded to tracing.

use pv_shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber for `config`
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},actix_web=info", config.level)));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
