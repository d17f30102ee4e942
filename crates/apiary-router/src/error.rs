//! Route construction errors.

use http::Method;
use thiserror::Error;

/// Errors raised while building a router.
///
/// These are construction-time failures: a router that cannot be built
/// must stop the process from starting rather than misroute at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern text is malformed.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern as written
        pattern: String,
        /// What is wrong with it
        reason: String,
    },

    /// A route with the same method and pattern shape already exists.
    #[error("duplicate route {method} {pattern} (conflicts with {existing})")]
    DuplicateRoute {
        /// HTTP method of the rejected route
        method: Method,
        /// Pattern of the rejected route
        pattern: String,
        /// Pattern of the route already registered at that shape
        existing: String,
    },
}

impl RouteError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
