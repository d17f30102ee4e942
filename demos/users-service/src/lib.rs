//! # Users Service
//!
//! A small users API kept in memory, bound to HTTP with Apiary. It serves
//! as the reference service for the binding layer's behavior:
//!
//! - `GET /users/2` answers `{"id":2,"name":"Bob"}`
//! - `GET /users/99` answers 404 `{"error":"user 99 not found"}`
//! - `POST /users` with an existing id answers 409, a new id 201
//! - `GET /users/:id/avatar` would answer raw bytes, but no avatars exist
//! - `POST /shutdown` answers `Shutting down...` and stops the server a
//!   second later

#![forbid(unsafe_code)]

mod model;
mod routes;
mod service;

pub use model::{User, UserId};
pub use routes::routes;
pub use service::{UserService, SHUTDOWN_DELAY};
