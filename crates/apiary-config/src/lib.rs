//! # Apiary Config
//!
//! Typed, layered configuration for Apiary services.
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:8080"
//! shutdown_timeout_secs = 30
//! request_timeout_ms = 30000
//! max_body_bytes = 2097152
//!
//! [logging]
//! level = "info"
//! format = "json"
//! service_name = "users"
//! ```
//!
//! Any key can be overridden from the environment as
//! `APIARY__SECTION__KEY`, e.g. `APIARY__SERVER__HTTP_ADDR=0.0.0.0:9000`.
//! See [`ConfigLoader`] for the layering order.

#![doc(html_root_url = "https://docs.rs/apiary-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod loader;
mod schema;

pub use apiary_telemetry::LogFormat;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ApiaryConfig, LoggingSection, ServerSection};

/// Environment prefix used by the reference binaries.
pub const DEFAULT_ENV_PREFIX: &str = "APIARY";
