//! Result rendering.
//!
//! [`render`] combines what an injected writer produced with the outcome of
//! the invocation and yields the final response.
//!
//! | Outcome | Status | Content-Type | Body |
//! |---|---|---|---|
//! | `Empty` | writer status or 200 | writer headers | writer body |
//! | `Value` / `Json` | 200 | `application/json` | JSON value |
//! | `Value` / `Raw` | 200 | not forced | bytes verbatim |
//! | `Failure` | carried status | `application/json` | `{"error": message}` |
//!
//! The status and headers are settled before any body byte. If the writer
//! already committed a status, the outcome's status and content type are
//! ignored and its body is appended after what was written.

use bytes::{Bytes, BytesMut};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::Response;

use crate::outcome::{Outcome, ResponseBody};
use crate::writer::WrittenResponse;
use crate::APPLICATION_JSON;

/// Renders an outcome on top of whatever the writer already holds.
///
/// # Example
///
/// ```rust
/// use apiary_core::{render, ApiError, Outcome, WrittenResponse};
/// use http::StatusCode;
///
/// let response = render(
///     WrittenResponse::default(),
///     Outcome::Failure(ApiError::conflict("user 1 already exists")),
/// );
/// assert_eq!(response.status(), StatusCode::CONFLICT);
/// assert_eq!(response.headers()["content-type"], "application/json");
/// assert_eq!(&response.body()[..], br#"{"error":"user 1 already exists"}"#);
/// ```
#[must_use]
pub fn render(written: WrittenResponse, outcome: Outcome) -> Response<Bytes> {
    let WrittenResponse {
        status: committed,
        mut headers,
        body: prefix,
    } = written;

    let status = outcome.status();
    let (json, tail) = match outcome {
        Outcome::Empty => (false, Bytes::new()),
        Outcome::Value {
            body: ResponseBody::Json(bytes),
            ..
        } => (true, bytes),
        Outcome::Value {
            body: ResponseBody::Raw(bytes),
            ..
        } => (false, bytes),
        Outcome::Failure(err) => (true, err.to_json()),
    };

    let status = match committed {
        None => {
            if json {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            }
            status
        }
        Some(written_status) => {
            if json || !tail.is_empty() {
                tracing::warn!(
                    committed = written_status.as_u16(),
                    ignored = status.as_u16(),
                    "response already committed by writer; appending body only"
                );
            }
            written_status
        }
    };

    let body = if prefix.is_empty() {
        tail
    } else if tail.is_empty() {
        prefix
    } else {
        let mut joined = BytesMut::with_capacity(prefix.len() + tail.len());
        joined.extend_from_slice(&prefix);
        joined.extend_from_slice(&tail);
        joined.freeze()
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
