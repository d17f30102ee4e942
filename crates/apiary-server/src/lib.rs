//! # Apiary Server
//!
//! Route table, dispatcher and HTTP transport for Apiary services.
//!
//! - [`RouteTable`] collects `(method, pattern, params, handler)`
//!   registrations and rejects invalid or conflicting ones up front
//! - [`Dispatcher`] is the frozen table: it matches, binds, invokes and
//!   renders, and is safe to share across tasks
//! - [`Server`] serves a dispatcher over HTTP/1.1 with hyper
//! - [`ShutdownSignal`] coordinates graceful shutdown, including the
//!   delayed trigger a service method can schedule for itself
//!
//! ## Example
//!
//! ```rust
//! use apiary_core::{ApiError, Json};
//! use apiary_extract::path;
//! use apiary_server::RouteTable;
//! use bytes::Bytes;
//! use http::{Request, StatusCode};
//!
//! let mut table = RouteTable::new();
//! table.get("/square/:n", (path::<i64>("n"),), |(n,)| Json(n * n))?;
//! let dispatcher = table.into_dispatcher();
//!
//! let response = dispatcher.dispatch(Request::get("/square/7").body(Bytes::new()).unwrap());
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(&response.body()[..], b"49");
//!
//! let response = dispatcher.dispatch(Request::get("/square/seven").body(Bytes::new()).unwrap());
//! assert_eq!(response.status(), StatusCode::BAD_REQUEST);
//! # Ok::<(), apiary_server::RegistrationError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/apiary-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod dispatch;
mod error;
mod server;
mod shutdown;
mod table;

pub use config::{
    ServerConfig, ServerConfigBuilder, DEFAULT_HTTP_ADDR, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
pub use dispatch::Dispatcher;
pub use error::{DispatchError, RegistrationError, ServerError};
pub use server::{HttpResponse, Server};
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
pub use table::{Endpoint, RouteTable};
