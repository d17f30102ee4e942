//! Conversions from the file/env configuration to runtime settings.

use std::time::Duration;

use apiary_config::ApiaryConfig;
use apiary_server::ServerConfig;
use apiary_telemetry::LogConfig;

/// Builds the transport settings from the `[server]` section.
#[must_use]
pub fn server_config(config: &ApiaryConfig) -> ServerConfig {
    let server = &config.server;
    ServerConfig::builder()
        .http_addr(server.http_addr.clone())
        .shutdown_timeout(Duration::from_secs(server.shutdown_timeout_secs))
        .request_timeout(Duration::from_millis(server.request_timeout_ms))
        .max_body_bytes(server.max_body_bytes)
        .build()
}

/// Builds the logging settings from the `[logging]` section.
///
/// Fields the file does not expose keep the production preset's values.
#[must_use]
pub fn log_config(config: &ApiaryConfig) -> LogConfig {
    let logging = &config.logging;
    LogConfig {
        enabled: logging.enabled,
        format: logging.format,
        ..LogConfig::production()
    }
    .with_level(logging.level.clone())
    .with_service_name(logging.service_name.clone())
}
