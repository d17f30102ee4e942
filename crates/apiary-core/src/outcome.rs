//! Invocation outcomes and return-shape conversion.

use std::fmt;

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;

use crate::error::ApiError;

/// The shape of a service method's return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnShape {
    /// Returns nothing; any output goes through an injected writer.
    Nothing,
    /// Returns a value only.
    Value,
    /// Returns an error only.
    Error,
    /// Returns a value and an error.
    ValueAndError,
}

impl fmt::Display for ReturnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => write!(f, "nothing"),
            Self::Value => write!(f, "value"),
            Self::Error => write!(f, "error"),
            Self::ValueAndError => write!(f, "value+error"),
        }
    }
}

/// An encoded success body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// JSON-encoded value, sent as `application/json`.
    Json(Bytes),
    /// Opaque bytes, sent verbatim without a forced content type.
    Raw(Bytes),
}

impl ResponseBody {
    /// Returns the encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        match self {
            Self::Json(bytes) | Self::Raw(bytes) => bytes,
        }
    }
}

/// The result of one bound invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to render beyond what the writer already holds.
    Empty,
    /// A success value.
    Value {
        /// Status to send
        status: StatusCode,
        /// Encoded body
        body: ResponseBody,
    },
    /// A status-plus-message outcome, rendered as `{"error": ...}`.
    Failure(ApiError),
}

impl Outcome {
    /// Status this outcome renders with when nothing was written first.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Empty => StatusCode::OK,
            Self::Value { status, .. } => *status,
            Self::Failure(err) => err.status(),
        }
    }
}

impl From<ApiError> for Outcome {
    fn from(err: ApiError) -> Self {
        Self::Failure(err)
    }
}

/// A value a service method can return for the renderer to encode.
pub trait Payload {
    /// Encodes the value.
    ///
    /// # Errors
    ///
    /// Returns a 500 [`ApiError`] if encoding fails.
    fn into_body(self) -> Result<ResponseBody, ApiError>;
}

/// Wrapper marking a value to be rendered as JSON.
///
/// # Example
///
/// ```rust
/// use apiary_core::{IntoOutcome, Json, Outcome, ResponseBody};
/// use http::StatusCode;
///
/// let outcome = Json(vec![1, 2, 3]).into_outcome();
/// assert_eq!(
///     outcome,
///     Outcome::Value {
///         status: StatusCode::OK,
///         body: ResponseBody::Json("[1,2,3]".into()),
///     }
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Payload for Json<T> {
    fn into_body(self) -> Result<ResponseBody, ApiError> {
        serde_json::to_vec(&self.0)
            .map(|bytes| ResponseBody::Json(Bytes::from(bytes)))
            .map_err(|e| {
                tracing::error!(error = %e, "failed to encode response value");
                ApiError::internal(format!("failed to encode response: {e}"))
            })
    }
}

impl Payload for Bytes {
    fn into_body(self) -> Result<ResponseBody, ApiError> {
        Ok(ResponseBody::Raw(self))
    }
}

impl Payload for Vec<u8> {
    fn into_body(self) -> Result<ResponseBody, ApiError> {
        Ok(ResponseBody::Raw(Bytes::from(self)))
    }
}

fn value_outcome<P: Payload>(payload: P) -> Outcome {
    match payload.into_body() {
        Ok(body) => Outcome::Value {
            status: StatusCode::OK,
            body,
        },
        Err(err) => Outcome::Failure(err),
    }
}

/// Conversion from a service method's return type into an [`Outcome`].
///
/// Implemented for the four supported shapes:
///
/// | Return type | Shape |
/// |---|---|
/// | `()` | nothing |
/// | `Json<T>`, `Bytes`, `Vec<u8>` | value |
/// | `Result<(), ApiError>` | error |
/// | `Result<P, ApiError>` where `P: Payload` | value + error |
pub trait IntoOutcome {
    /// Shape recorded in the handler descriptor.
    const SHAPE: ReturnShape;

    /// Converts the return value.
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for () {
    const SHAPE: ReturnShape = ReturnShape::Nothing;

    fn into_outcome(self) -> Outcome {
        Outcome::Empty
    }
}

impl<P: Payload> IntoOutcome for P {
    const SHAPE: ReturnShape = ReturnShape::Value;

    fn into_outcome(self) -> Outcome {
        value_outcome(self)
    }
}

impl IntoOutcome for Result<(), ApiError> {
    const SHAPE: ReturnShape = ReturnShape::Error;

    fn into_outcome(self) -> Outcome {
        match self {
            Ok(()) => Outcome::Empty,
            Err(err) => Outcome::Failure(err),
        }
    }
}

impl<P: Payload> IntoOutcome for Result<P, ApiError> {
    const SHAPE: ReturnShape = ReturnShape::ValueAndError;

    fn into_outcome(self) -> Outcome {
        match self {
            Ok(payload) => value_outcome(payload),
            Err(err) => Outcome::Failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct User {
        id: i64,
        name: &'static str,
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not today"))
        }
    }

    fn shape_of<R: IntoOutcome>(_: &R) -> ReturnShape {
        R::SHAPE
    }

    #[test]
    fn test_shapes() {
        assert_eq!(shape_of(&()), ReturnShape::Nothing);
        assert_eq!(shape_of(&Json(1)), ReturnShape::Value);
        assert_eq!(shape_of(&Bytes::new()), ReturnShape::Value);
        assert_eq!(shape_of(&Ok::<(), ApiError>(())), ReturnShape::Error);
        assert_eq!(
            shape_of(&Ok::<_, ApiError>(vec![0u8])),
            ReturnShape::ValueAndError
        );
    }

    #[test]
    fn test_json_value() {
        let outcome = Json(User { id: 2, name: "Bob" }).into_outcome();
        assert_eq!(
            outcome,
            Outcome::Value {
                status: StatusCode::OK,
                body: ResponseBody::Json(Bytes::from_static(br#"{"id":2,"name":"Bob"}"#)),
            }
        );
    }

    #[test]
    fn test_raw_value() {
        let outcome = vec![0x89, b'P', b'N', b'G'].into_outcome();
        assert_eq!(
            outcome,
            Outcome::Value {
                status: StatusCode::OK,
                body: ResponseBody::Raw(Bytes::from_static(&[0x89, b'P', b'N', b'G'])),
            }
        );
    }

    #[test]
    fn test_error_only() {
        assert_eq!(Ok::<(), ApiError>(()).into_outcome(), Outcome::Empty);

        let err = ApiError::created("user 3 created");
        assert_eq!(
            Err::<(), _>(err.clone()).into_outcome(),
            Outcome::Failure(err)
        );
    }

    #[test]
    fn test_value_and_error() {
        let ok: Result<Json<i32>, ApiError> = Ok(Json(5));
        assert_eq!(ok.into_outcome().status(), StatusCode::OK);

        let err: Result<Json<i32>, ApiError> = Err(ApiError::not_found("user 99 not found"));
        assert_eq!(err.into_outcome().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_encoding_failure_is_internal_error() {
        let outcome = Json(Unencodable).into_outcome();
        match outcome {
            Outcome::Failure(err) => {
                assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
                assert!(err.message().contains("not today"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(ReturnShape::ValueAndError.to_string(), "value+error");
        assert_eq!(ReturnShape::Nothing.to_string(), "nothing");
    }
}
