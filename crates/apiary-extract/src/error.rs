//! Binding error types.

use std::fmt;

use apiary_core::ApiError;
use http::StatusCode;
use thiserror::Error;

/// Where a binding was reading from when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    /// A path capture
    Path,
    /// The request body
    Body,
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Body => write!(f, "body"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingErrorKind {
    Missing,
    InvalidValue,
    MalformedBody,
}

/// A request input could not be bound to a method argument.
///
/// Always answered with `400 Bad Request`; the method is never invoked.
///
/// # Example
///
/// ```rust
/// use apiary_extract::{BindingError, BindingSource};
/// use http::StatusCode;
///
/// let err = BindingError::invalid_value("id", "abc", "invalid digit found in string");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.binding_source(), BindingSource::Path);
/// assert_eq!(
///     err.to_string(),
///     "invalid path parameter 'id' (\"abc\"): invalid digit found in string"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BindingError {
    binding_source: BindingSource,
    kind: BindingErrorKind,
    field: Option<String>,
    message: String,
}

impl BindingError {
    /// A path capture the method reads was not present.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            binding_source: BindingSource::Path,
            kind: BindingErrorKind::Missing,
            message: format!("missing path parameter: {field}"),
            field: Some(field),
        }
    }

    /// A path capture could not be decoded into the target type.
    #[must_use]
    pub fn invalid_value(
        field: impl Into<String>,
        raw: &str,
        details: impl fmt::Display,
    ) -> Self {
        let field = field.into();
        Self {
            binding_source: BindingSource::Path,
            kind: BindingErrorKind::InvalidValue,
            message: format!("invalid path parameter '{field}' ({raw:?}): {details}"),
            field: Some(field),
        }
    }

    /// The body was empty, malformed, or of the wrong shape.
    #[must_use]
    pub fn malformed_body(details: impl fmt::Display) -> Self {
        Self {
            binding_source: BindingSource::Body,
            kind: BindingErrorKind::MalformedBody,
            message: format!("invalid request body: {details}"),
            field: None,
        }
    }

    /// Returns the source being read.
    #[must_use]
    pub fn binding_source(&self) -> BindingSource {
        self.binding_source
    }

    /// Returns the path parameter name, if the failure concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Returns a stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            BindingErrorKind::Missing => "MISSING_PARAMETER",
            BindingErrorKind::InvalidValue => "INVALID_PARAMETER",
            BindingErrorKind::MalformedBody => "INVALID_BODY",
        }
    }
}

impl From<BindingError> for ApiError {
    fn from(err: BindingError) -> Self {
        ApiError::new(err.status_code(), err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing() {
        let err = BindingError::missing("id");
        assert_eq!(err.field(), Some("id"));
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert_eq!(err.to_string(), "missing path parameter: id");
    }

    #[test]
    fn test_malformed_body() {
        let err = BindingError::malformed_body("expected value at line 1 column 1");
        assert_eq!(err.binding_source(), BindingSource::Body);
        assert_eq!(err.field(), None);
        assert_eq!(err.error_code(), "INVALID_BODY");
        assert!(err.to_string().starts_with("invalid request body:"));
    }

    #[test]
    fn test_every_kind_is_bad_request() {
        for err in [
            BindingError::missing("a"),
            BindingError::invalid_value("a", "b", "c"),
            BindingError::malformed_body("d"),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_into_api_error() {
        let api: ApiError = BindingError::invalid_value("id", "x", "nope").into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), r#"invalid path parameter 'id' ("x"): nope"#);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(BindingSource::Path.to_string(), "path");
        assert_eq!(BindingSource::Body.to_string(), "body");
    }
}
