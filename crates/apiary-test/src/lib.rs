//! # Apiary Test
//!
//! In-memory testing for Apiary route tables. Requests go straight to the
//! [`Dispatcher`](apiary_server::Dispatcher) with no socket and no runtime,
//! so matching, binding, invocation and rendering are all exercised exactly
//! as the HTTP transport would exercise them.
//!
//! ```rust
//! use apiary_core::{ApiError, Json};
//! use apiary_extract::path;
//! use apiary_server::RouteTable;
//! use apiary_test::TestClient;
//! use http::StatusCode;
//!
//! let mut table = RouteTable::new();
//! table.get("/users/:id", (path::<i64>("id"),), |(id,)| {
//!     if id == 1 {
//!         Ok(Json(serde_json::json!({"id": 1, "name": "Alice"})))
//!     } else {
//!         Err(ApiError::not_found(format!("user {id} not found")))
//!     }
//! }).unwrap();
//!
//! let client = TestClient::new(table.into_dispatcher());
//!
//! client.get("/users/1").send()
//!     .assert_status(StatusCode::OK)
//!     .assert_json(&serde_json::json!({"id": 1, "name": "Alice"}));
//!
//! client.get("/users/9").send()
//!     .assert_error(StatusCode::NOT_FOUND, "user 9 not found");
//! ```

#![doc(html_root_url = "https://docs.rs/apiary-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod response;

pub use client::{TestClient, TestRequest};
pub use error::TestError;
pub use response::TestResponse;
