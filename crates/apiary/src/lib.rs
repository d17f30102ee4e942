//! # Apiary
//!
//! **Declarative HTTP binding for plain Rust service methods**
//!
//! Apiary exposes ordinary methods as HTTP endpoints from a route table.
//! Each entry names an HTTP method, a path pattern with `:name` captures,
//! where every argument comes from (a path capture, the JSON body, or the
//! raw response writer), and the method to call. The method's return value
//! is rendered for it:
//!
//! | Method returns | Response |
//! |----------------|----------|
//! | `()` | 200, empty body |
//! | `Json<T>` | 200, `application/json` |
//! | `Bytes` / `Vec<u8>` | 200, body written as-is |
//! | `Result<(), ApiError>` | 200 empty, or `{"error": msg}` with the error's status |
//! | `Result<Json<T>, ApiError>` | the value, or `{"error": msg}` with the error's status |
//!
//! Requests that match no route get a 404, and arguments that fail to
//! decode get a 400 without the method ever running.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiary::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut routes = RouteTable::new();
//!     routes.get("/hello/:name", (path::<String>("name"),), |(name,)| {
//!         Json(format!("hello, {name}"))
//!     })?;
//!
//!     let config = ConfigLoader::new().with_env_prefix("APIARY").load()?;
//!     init_logging(&apiary::log_config(&config))?;
//!
//!     Server::new(apiary::server_config(&config), routes.into_dispatcher())
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/apiary/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod settings;

pub use settings::{log_config, server_config};

// Re-export core types
pub use apiary_core as core;

// Re-export the path matcher
pub use apiary_router as router;

// Re-export argument binding
pub use apiary_extract as extract;

// Re-export route table, dispatcher and transport
pub use apiary_server as server;

// Re-export logging setup
pub use apiary_telemetry as telemetry;

// Re-export configuration loading
pub use apiary_config as config;

pub use apiary_core::api_error;

/// Prelude module for convenient imports.
///
/// ```rust
/// use apiary::prelude::*;
///
/// let mut routes = RouteTable::new();
/// routes
///     .get("/ping", (), |()| Json("pong"))
///     .unwrap();
/// assert_eq!(routes.len(), 1);
/// ```
pub mod prelude {
    pub use apiary_config::{ApiaryConfig, ConfigLoader};
    pub use apiary_core::{api_error, ApiError, Json, ResponseWriter};
    pub use apiary_extract::{body, path, writer, FromParam};
    pub use apiary_server::{RouteTable, Server, ServerConfig, ShutdownSignal};
    pub use apiary_telemetry::{init_logging, LogConfig};
}
