//! Request builder over an in-memory dispatcher.

use std::sync::Arc;

use apiary_core::APPLICATION_JSON;
use apiary_server::Dispatcher;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Method, Request};
use serde::Serialize;

use crate::error::TestError;
use crate::response::TestResponse;

/// Sends requests straight to a [`Dispatcher`].
///
/// Cloning is cheap; clones share the dispatcher.
#[derive(Debug, Clone)]
pub struct TestClient {
    dispatcher: Arc<Dispatcher>,
}

impl TestClient {
    /// Creates a client that owns `dispatcher`.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self::from_shared(Arc::new(dispatcher))
    }

    /// Creates a client over a dispatcher shared with other code.
    #[must_use]
    pub fn from_shared(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Starts a GET request.
    #[must_use]
    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Starts a POST request.
    #[must_use]
    pub fn post(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Starts a PUT request.
    #[must_use]
    pub fn put(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Starts a PATCH request.
    #[must_use]
    pub fn patch(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Starts a DELETE request.
    #[must_use]
    pub fn delete(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Starts a request with any method.
    #[must_use]
    pub fn request(&self, method: Method, uri: &str) -> TestRequest<'_> {
        TestRequest {
            client: self,
            builder: Request::builder().method(method).uri(uri),
            body: Ok(Bytes::new()),
        }
    }
}

/// A request under construction.
#[derive(Debug)]
pub struct TestRequest<'a> {
    client: &'a TestClient,
    builder: http::request::Builder,
    body: Result<Bytes, TestError>,
}

impl TestRequest<'_> {
    /// Adds a header.
    #[must_use]
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets a raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Ok(body.into());
        self
    }

    /// Serializes `value` as the body and sets `content-type`.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.body = serde_json::to_vec(value).map(Bytes::from).map_err(TestError::from);
        self.builder = self
            .builder
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        self
    }

    /// Dispatches the request.
    ///
    /// # Errors
    ///
    /// Fails if the URI, a header, or the JSON body was invalid.
    pub fn try_send(self) -> Result<TestResponse, TestError> {
        let body = self.body?;
        let request = self.builder.body(body)?;
        let response = self.client.dispatcher.dispatch(request);
        Ok(TestResponse::from_response(response))
    }

    /// Dispatches the request, panicking if it could not be built.
    #[track_caller]
    pub fn send(self) -> TestResponse {
        match self.try_send() {
            Ok(response) => response,
            Err(e) => panic!("failed to build test request: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use apiary_core::Json;
    use apiary_extract::{body, path};
    use apiary_server::RouteTable;
    use http::StatusCode;

    fn client() -> TestClient {
        let mut table = RouteTable::new();
        table
            .get("/items/:id", (path::<u32>("id"),), |(id,)| Json(id))
            .unwrap()
            .post("/items", (body::<serde_json::Value>(),), |(value,)| Json(value))
            .unwrap()
            .delete("/items/:id", (path::<u32>("id"),), |(_,)| ())
            .unwrap();
        TestClient::new(table.into_dispatcher())
    }

    #[test]
    fn test_get() {
        let response = client().get("/items/7").send();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text(), "7");
    }

    #[test]
    fn test_post_json() {
        let response = client()
            .post("/items")
            .json(&serde_json::json!({"name": "lamp"}))
            .send();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text(), r#"{"name":"lamp"}"#);
    }

    #[test]
    fn test_raw_body_and_header() {
        let response = client()
            .post("/items")
            .header("x-trace", "abc")
            .body("[1,2]")
            .send();
        assert_eq!(response.text(), "[1,2]");
    }

    #[test]
    fn test_delete_empty() {
        let response = client().delete("/items/1").send();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_invalid_header_is_error() {
        let result = client()
            .get("/items/1")
            .header("bad header", "x")
            .try_send();
        assert!(matches!(result, Err(TestError::RequestBuild(_))));
    }

    #[test]
    #[should_panic(expected = "failed to build test request")]
    fn test_send_panics_on_bad_uri() {
        let _ = client().get("http://[::1").send();
    }
}
