//! Request dispatch.

use apiary_core::{render, ApiError, Outcome, WrittenResponse};
use apiary_extract::BindContext;
use apiary_router::Router;
use bytes::Bytes;
use http::{Request, Response};

use crate::error::DispatchError;
use crate::table::Endpoint;

/// A frozen route table.
///
/// `dispatch` is synchronous and keeps no per-request state on `self`, so a
/// dispatcher behind an `Arc` serves any number of concurrent requests.
///
/// # Example
///
/// ```rust
/// use apiary_core::Json;
/// use apiary_server::RouteTable;
/// use bytes::Bytes;
/// use http::{Request, StatusCode};
///
/// let mut table = RouteTable::new();
/// table.get("/ping", (), |()| Json("pong")).unwrap();
/// let dispatcher = table.into_dispatcher();
///
/// let request = Request::get("/ping").body(Bytes::new()).unwrap();
/// let response = dispatcher.dispatch(request);
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(&response.body()[..], br#""pong""#);
///
/// let request = Request::get("/pong").body(Bytes::new()).unwrap();
/// assert_eq!(dispatcher.dispatch(request).status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Router<Endpoint>,
}

impl Dispatcher {
    pub(crate) fn new(router: Router<Endpoint>) -> Self {
        Self { router }
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.router.len()
    }

    /// Returns `true` if there are no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.router.is_empty()
    }

    /// Serves one request whose body has already been read.
    ///
    /// Never fails: unmatched routes render 404 and binding failures render
    /// 400, both as `{"error": ...}`.
    #[must_use]
    pub fn dispatch(&self, request: Request<Bytes>) -> Response<Bytes> {
        let (parts, body) = request.into_parts();
        let path = parts.uri.path();

        tracing::debug!(method = %parts.method, path = %path, "dispatching request");

        let Some(matched) = self.router.match_route(&parts.method, path) else {
            let err = DispatchError::RouteNotFound {
                method: parts.method.clone(),
                path: path.to_string(),
            };
            tracing::warn!(method = %parts.method, path = %path, "no route matched");
            return reject(err);
        };

        let endpoint = matched.value;
        let route = matched.pattern.as_str();
        let cx = BindContext::new(body, matched.params);

        match endpoint.invoke(&cx) {
            Ok(outcome) => {
                if let Outcome::Failure(err) = &outcome {
                    tracing::debug!(
                        route = %route,
                        status = err.status().as_u16(),
                        message = %err.message(),
                        "method returned an error outcome"
                    );
                }
                render(cx.writer().take(), outcome)
            }
            Err(err) => {
                tracing::warn!(
                    route = %route,
                    source = %err.binding_source(),
                    error = %err,
                    "request rejected before invocation"
                );
                reject(err.into())
            }
        }
    }
}

fn reject(err: DispatchError) -> Response<Bytes> {
    render(WrittenResponse::default(), Outcome::Failure(ApiError::from(err)))
}
