//! Test error types.

use thiserror::Error;

/// Errors raised by the test client.
#[derive(Debug, Error)]
pub enum TestError {
    /// The request could not be built (bad URI or header).
    #[error("request build error: {0}")]
    RequestBuild(String),

    /// The body is not valid UTF-8.
    #[error("response body is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<http::Error> for TestError {
    fn from(err: http::Error) -> Self {
        Self::RequestBuild(err.to_string())
    }
}
