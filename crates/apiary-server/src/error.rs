//! Server error types.

use apiary_core::ApiError;
use apiary_extract::BindingError;
use apiary_router::RouteError;
use http::{Method, StatusCode};
use thiserror::Error;

/// Errors raised while building a route table.
///
/// Every variant is a programming error in the service's registration code;
/// the process is expected to refuse to start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The pattern is malformed or collides with an existing route.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// A path binding names a parameter the pattern does not declare.
    #[error("{method} {pattern}: path binding ':{name}' is not declared by the pattern")]
    UnknownPathParam {
        /// HTTP method of the route
        method: Method,
        /// Pattern as written
        pattern: String,
        /// Name of the missing parameter
        name: String,
    },

    /// More than one argument binds the request body.
    #[error("{method} {pattern}: at most one argument may bind the request body, found {count}")]
    MultipleBodies {
        /// HTTP method of the route
        method: Method,
        /// Pattern as written
        pattern: String,
        /// Number of body bindings
        count: usize,
    },

    /// More than one argument injects the response writer.
    #[error("{method} {pattern}: at most one argument may take the response writer, found {count}")]
    MultipleWriters {
        /// HTTP method of the route
        method: Method,
        /// Pattern as written
        pattern: String,
        /// Number of writer bindings
        count: usize,
    },
}

/// Request-time failures that stop a request before the method runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No route matches the method and path.
    #[error("no route for {method} {path}")]
    RouteNotFound {
        /// Request method
        method: Method,
        /// Request path
        path: String,
    },

    /// An argument could not be bound.
    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl DispatchError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Binding(err) => err.status_code(),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        ApiError::new(err.status_code(), err.to_string())
    }
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address is not a socket address.
    #[error("invalid address '{addr}': {source}")]
    InvalidAddress {
        /// Address as configured
        addr: String,
        /// Parse failure
        source: std::net::AddrParseError,
    },

    /// Failed to bind the listener.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address being bound
        addr: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// I/O error while serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
