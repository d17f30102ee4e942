//! # Apiary Telemetry
//!
//! Installs the global `tracing` subscriber for an Apiary service.
//!
//! Every Apiary crate logs through `tracing`. This crate decides where
//! those events go: JSON lines for production, a pretty multi-line format
//! for development, filtered by an [`EnvFilter`](tracing_subscriber::EnvFilter)
//! directive such as `"info"` or `"apiary_server=debug,info"`.
//!
//! ```rust,no_run
//! use apiary_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production().with_service_name("users")).unwrap();
//! tracing::info!(route = "/users/:id", "ready");
//! ```

#![doc(html_root_url = "https://docs.rs/apiary-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result alias for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
