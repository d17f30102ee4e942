//! Raw response writer handed to methods that produce their own output.

use std::io;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct WriterState {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

/// Everything a writer accumulated during one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenResponse {
    /// Committed status, if any
    pub status: Option<StatusCode>,
    /// Headers set before the status was committed
    pub headers: HeaderMap,
    /// Body bytes written so far
    pub body: Bytes,
}

impl WrittenResponse {
    /// Returns `true` once a status has been committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }
}

/// A handle to the response under construction.
///
/// Follows streamed-response semantics: headers may be changed only until
/// the status is committed, the first committed status wins, and writing
/// body bytes commits `200 OK` if no status was written yet. Clones share
/// the same underlying response.
///
/// # Example
///
/// ```rust
/// use apiary_core::ResponseWriter;
/// use http::StatusCode;
///
/// let writer = ResponseWriter::new();
/// writer.set_header(http::header::CONTENT_TYPE, "text/plain".parse().unwrap());
/// writer.write_str("Shutting down...\n");
///
/// // Too late: the status is already committed.
/// writer.write_status(StatusCode::ACCEPTED);
///
/// let written = writer.take();
/// assert_eq!(written.status, Some(StatusCode::OK));
/// assert_eq!(&written.body[..], b"Shutting down...\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseWriter {
    state: Arc<Mutex<WriterState>>,
}

impl ResponseWriter {
    /// Creates a writer with nothing committed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header.
    ///
    /// Returns `false` and leaves the headers untouched if the status has
    /// already been committed.
    pub fn set_header(&self, name: HeaderName, value: HeaderValue) -> bool {
        let mut state = self.state.lock();
        if state.status.is_some() {
            tracing::warn!(header = %name, "header set after status was written; ignoring");
            return false;
        }
        state.headers.insert(name, value);
        true
    }

    /// Commits the response status.
    ///
    /// Only the first call has an effect.
    pub fn write_status(&self, status: StatusCode) {
        let mut state = self.state.lock();
        match state.status {
            None => state.status = Some(status),
            Some(existing) => {
                tracing::warn!(
                    committed = existing.as_u16(),
                    ignored = status.as_u16(),
                    "superfluous status write"
                );
            }
        }
    }

    /// Appends body bytes, committing `200 OK` if no status was written.
    pub fn write_bytes(&self, data: &[u8]) {
        let mut state = self.state.lock();
        state.status.get_or_insert(StatusCode::OK);
        state.body.extend_from_slice(data);
    }

    /// Appends UTF-8 text to the body.
    pub fn write_str(&self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Returns the committed status, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.state.lock().status
    }

    /// Returns `true` once a status has been committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.state.lock().status.is_some()
    }

    /// Takes the accumulated response, leaving the writer empty.
    #[must_use]
    pub fn take(&self) -> WrittenResponse {
        let state = std::mem::take(&mut *self.state.lock());
        WrittenResponse {
            status: state.status,
            headers: state.headers,
            body: state.body.freeze(),
        }
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
