//! The application outcome type.
//!
//! [`ApiError`] is what a service method returns on its error channel. It
//! carries an HTTP status and a human-readable message and is always rendered
//! as `{"error": <message>}` with that status. The status need not be a
//! failure: returning `ApiError::created("user 3 created")` is the supported
//! way to answer `201 Created` with a confirmation message instead of the
//! resource itself.

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// A status code paired with a message.
///
/// # Example
///
/// ```rust
/// use apiary_core::{api_error, ApiError};
/// use http::StatusCode;
///
/// let err = api_error!(StatusCode::NOT_FOUND, "user {} not found", 99);
/// assert_eq!(err.status(), StatusCode::NOT_FOUND);
/// assert_eq!(err.message(), "user 99 not found");
/// assert_eq!(&err.to_json()[..], br#"{"error":"user 99 not found"}"#);
///
/// // The same channel signals non-default success.
/// let created = ApiError::created("user 3 created");
/// assert!(created.is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// Creates an outcome with the given status and message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// `400 Bad Request`.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// `404 Not Found`.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// `409 Conflict`.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// `500 Internal Server Error`.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// `201 Created`, reported through the error channel.
    #[must_use]
    pub fn created(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, message)
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the carried status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Encodes the `{"error": <message>}` body.
    #[must_use]
    pub fn to_json(&self) -> Bytes {
        serde_json::to_vec(&ErrorBody {
            error: &self.message,
        })
        .map_or_else(
            |_| Bytes::from_static(br#"{"error":"internal error"}"#),
            Bytes::from,
        )
    }
}

/// Builds an [`ApiError`] from a status and a format string.
///
/// ```rust
/// use apiary_core::api_error;
/// use http::StatusCode;
///
/// let err = api_error!(StatusCode::CONFLICT, "user {} already exists", 1);
/// assert_eq!(err.to_string(), "user 1 already exists");
/// ```
#[macro_export]
macro_rules! api_error {
    ($status:expr, $($arg:tt)+) => {
        $crate::ApiError::new($status, format!($($arg)+))
    };
}
