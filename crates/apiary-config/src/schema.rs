//! Configuration schema.

use std::net::SocketAddr;

use apiary_telemetry::{create_env_filter, LogFormat};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Root configuration of an Apiary service.
///
/// Every field has a default, so an empty file is a valid configuration.
/// Unknown keys are rejected.
///
/// ```
/// use apiary_config::ApiaryConfig;
///
/// let config: ApiaryConfig = toml::from_str(r#"
///     [server]
///     http_addr = "0.0.0.0:9000"
/// "#).unwrap();
///
/// assert_eq!(config.server.http_addr, "0.0.0.0:9000");
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApiaryConfig {
    /// Transport settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ApiaryConfig {
    /// Debug logging in pretty format, loopback address.
    #[must_use]
    pub fn development() -> Self {
        Self {
            server: ServerSection::default(),
            logging: LoggingSection {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                ..LoggingSection::default()
            },
        }
    }

    /// Info logging in JSON, listening on all interfaces.
    #[must_use]
    pub fn production() -> Self {
        Self {
            server: ServerSection {
                http_addr: "0.0.0.0:8080".to_string(),
                ..ServerSection::default()
            },
            logging: LoggingSection::default(),
        }
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .http_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid_value("server.http_addr", e.to_string()))?;

        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "server.request_timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "server.max_body_bytes",
                "must be greater than zero",
            ));
        }

        create_env_filter(&self.logging.level)
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;

        if self.logging.service_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.service_name",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Bind address, `ip:port`.
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// Seconds to wait for open connections on shutdown.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Milliseconds allowed for reading a request body.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Largest accepted request body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            request_timeout_ms: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_http_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    30_000
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Install a subscriber at startup.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive.
    #[serde(default = "default_level")]
    pub level: String,

    /// `json` or `pretty`.
    #[serde(default)]
    pub format: LogFormat,

    /// Service name reported in the startup line.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            format: LogFormat::default(),
            service_name: default_service_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "apiary".to_string()
}
