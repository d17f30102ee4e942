//! Captured responses and assertions.

use apiary_core::APPLICATION_JSON;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TestError;

/// A response returned by [`TestClient`](crate::TestClient).
///
/// The `assert_*` methods panic with the response body in the message and
/// return `&Self`, so they chain.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    pub(crate) fn from_response(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns all headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as text, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the `content-type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the body does not deserialize into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Asserts the status code.
    #[track_caller]
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "unexpected status, body: {}",
            self.text()
        );
        self
    }

    /// Asserts a header value.
    #[track_caller]
    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        assert_eq!(self.header(name), Some(expected), "header {name}");
        self
    }

    /// Asserts that no `content-type` was set.
    #[track_caller]
    pub fn assert_no_content_type(&self) -> &Self {
        assert_eq!(self.content_type(), None, "content-type should be absent");
        self
    }

    /// Asserts the exact body bytes.
    #[track_caller]
    pub fn assert_body(&self, expected: impl AsRef<[u8]>) -> &Self {
        assert_eq!(
            &self.body[..],
            expected.as_ref(),
            "body was: {}",
            self.text()
        );
        self
    }

    /// Asserts a JSON body equal to `expected`, ignoring formatting.
    #[track_caller]
    pub fn assert_json<T: Serialize + ?Sized>(&self, expected: &T) -> &Self {
        self.assert_content_json();
        let actual: serde_json::Value = match serde_json::from_slice(&self.body) {
            Ok(value) => value,
            Err(e) => panic!("body is not JSON ({e}): {}", self.text()),
        };
        let expected = match serde_json::to_value(expected) {
            Ok(value) => value,
            Err(e) => panic!("expected value is not serializable: {e}"),
        };
        assert_eq!(actual, expected);
        self
    }

    /// Asserts an error envelope, `{"error": message}`, with `status`.
    #[track_caller]
    pub fn assert_error(&self, status: StatusCode, message: &str) -> &Self {
        self.assert_status(status)
            .assert_json(&serde_json::json!({ "error": message }))
    }

    #[track_caller]
    fn assert_content_json(&self) {
        assert_eq!(
            self.content_type(),
            Some(APPLICATION_JSON),
            "content-type should be JSON"
        );
    }
}
