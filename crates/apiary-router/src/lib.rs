//! Path matching for Apiary routes.
//!
//! This crate turns route patterns such as `/users/:id/avatar` into a
//! per-method segment trie and matches request paths against it, capturing
//! the raw text of every `:name` segment.
//!
//! # Matching rules
//!
//! - A pattern must start with `/`. The remainder is split on `/` without
//!   discarding empty segments, so `/users/` and `/users` are different shapes.
//! - A segment starting with `:` is a named parameter. Every other segment is
//!   a literal compared case-sensitively.
//! - A parameter matches any **non-empty** request segment.
//! - When two routes could match, the one with a literal at the first
//!   differing position wins. Matching backtracks, so a literal branch that
//!   dead-ends further down falls back to the parameter branch.
//!
//! # Example
//!
//! ```rust
//! use apiary_router::{Pattern, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.insert(Method::GET, Pattern::parse("/users/:id")?, "getUser")?;
//! router.insert(Method::GET, Pattern::parse("/users/me")?, "getCurrentUser")?;
//!
//! let m = router.match_route(&Method::GET, "/users/42").unwrap();
//! assert_eq!(*m.value, "getUser");
//! assert_eq!(m.params.get("id"), Some("42"));
//!
//! let m = router.match_route(&Method::GET, "/users/me").unwrap();
//! assert_eq!(*m.value, "getCurrentUser");
//! # Ok::<(), apiary_router::RouteError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//!            GET                         POST
//!             │                            │
//!          "users"                      "users"
//!         ┌───┴────┐                    (leaf)
//!       (leaf)    :id
//!                ┌─┴──────┐
//!              (leaf)  "avatar"
//!                       (leaf)
//! ```

#![doc(html_root_url = "https://docs.rs/apiary-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod node;
mod params;
mod pattern;
mod router;

pub use error::RouteError;
pub use params::Params;
pub use pattern::{Pattern, Segment};
pub use router::Router;

/// A matched route: the stored value, its pattern, and the captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'r, T> {
    /// Value registered for the route
    pub value: &'r T,
    /// Pattern the route was registered with
    pub pattern: &'r Pattern,
    /// Captured path parameters, in pattern order
    pub params: Params,
}

impl<'r, T> RouteMatch<'r, T> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(value: &'r T, pattern: &'r Pattern, params: Params) -> Self {
        Self {
            value,
            pattern,
            params,
        }
    }
}
