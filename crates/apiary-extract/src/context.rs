//! Per-request binding context.

use apiary_core::ResponseWriter;
use apiary_router::Params;
use bytes::Bytes;

/// Everything argument binding may read for one request: the path captures
/// of the matched route, the fully-read body, and the writer that injected
/// arguments share with the renderer.
///
/// # Example
///
/// ```rust
/// use apiary_extract::BindContext;
/// use apiary_router::Params;
/// use bytes::Bytes;
///
/// let mut params = Params::new();
/// params.push("id", "2");
///
/// let cx = BindContext::new(Bytes::new(), params);
///
/// assert_eq!(cx.params().get("id"), Some("2"));
/// assert!(!cx.writer().is_committed());
/// ```
#[derive(Debug, Clone)]
pub struct BindContext {
    body: Bytes,
    params: Params,
    writer: ResponseWriter,
}

impl BindContext {
    /// Creates a context with a fresh response writer.
    #[must_use]
    pub fn new(body: Bytes, params: Params) -> Self {
        Self {
            body,
            params,
            writer: ResponseWriter::new(),
        }
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder() -> BindContextBuilder {
        BindContextBuilder::default()
    }

    /// Returns the request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the path captures of the matched route.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the response writer for this request.
    #[must_use]
    pub fn writer(&self) -> &ResponseWriter {
        &self.writer
    }
}

/// Builder for [`BindContext`], mostly for tests.
#[derive(Debug, Default)]
pub struct BindContextBuilder {
    body: Bytes,
    params: Params,
}

impl BindContextBuilder {
    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the path captures.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Adds one path capture.
    #[must_use]
    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.params.push(name, value);
        self
    }

    /// Builds the context.
    #[must_use]
    pub fn build(self) -> BindContext {
        BindContext::new(self.body, self.params)
    }
}
