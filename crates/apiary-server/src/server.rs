//! HTTP/1.1 transport.
//!
//! Accepts connections on a tokio listener, serves each one on its own task
//! with hyper, reads the request body under a size limit and a timeout, and
//! hands the buffered request to the [`Dispatcher`].
//!
//! ```rust,ignore
//! use apiary_server::{RouteTable, Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = RouteTable::new();
//!     let server = Server::new(ServerConfig::default(), table.into_dispatcher());
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use apiary_core::{render, ApiError, Outcome, WrittenResponse};
use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::error::ServerError;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Response type handed to hyper.
pub type HttpResponse = Response<Full<Bytes>>;

/// An HTTP server fronting one [`Dispatcher`].
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    /// Creates a server.
    #[must_use]
    pub fn new(config: ServerConfig, dispatcher: Dispatcher) -> Self {
        Self::with_shared(config, Arc::new(dispatcher))
    }

    /// Creates a server around a dispatcher that is also used elsewhere.
    #[must_use]
    pub fn with_shared(config: ServerConfig, dispatcher: Arc<Dispatcher>) -> Self {
        Self { config, dispatcher }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Serves until SIGINT or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_with_shutdown(ShutdownSignal::with_os_signals()).await
    }

    /// Binds the configured address and serves until `shutdown` fires.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddress {
                addr: self.config.http_addr().to_string(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        self.serve(listener, shutdown).await
    }

    /// Serves on an already-bound listener until `shutdown` fires, then
    /// waits up to the shutdown timeout for open connections to finish.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let local = listener.local_addr()?;
        tracing::info!(addr = %local, routes = self.dispatcher.len(), "server listening");

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();
        let stop = shutdown.recv();
        tokio::pin!(stop);

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote)) => {
                        let server = Arc::clone(&server);
                        let token = tracker.acquire();
                        let shutdown = shutdown.clone();
                        tokio::spawn(async move {
                            if let Err(e) = server.serve_connection(stream, remote, shutdown).await {
                                tracing::error!(remote = %remote, error = %e, "connection error");
                            }
                            drop(token);
                        });
                    }
                    Err(e) => tracing::error!(error = %e, "failed to accept connection"),
                },
                () = &mut stop => {
                    tracing::info!("shutdown signal received, no longer accepting");
                    break;
                }
            }
        }

        let timeout = server.config.shutdown_timeout();
        tracing::info!(
            active = tracker.active_connections(),
            timeout_ms = timeout.as_millis() as u64,
            "draining connections"
        );

        if tokio::time::timeout(timeout, tracker.wait_for_drain())
            .await
            .is_err()
        {
            tracing::warn!(
                active = tracker.active_connections(),
                "shutdown timeout reached with connections still open"
            );
        }

        tracing::info!("server stopped");
        Ok(())
    }

    async fn serve_connection(
        self: &Arc<Self>,
        stream: TcpStream,
        remote: SocketAddr,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let server = Arc::clone(self);
        let service = service_fn(move |req: Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { Ok::<_, Infallible>(server.handle(req).await) }
        });

        let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
        tokio::pin!(conn);

        tokio::select! {
            result = conn.as_mut() => result,
            () = shutdown.recv() => {
                tracing::debug!(remote = %remote, "closing connection for shutdown");
                conn.as_mut().graceful_shutdown();
                conn.await
            }
        }
    }

    async fn handle(&self, req: Request<Incoming>) -> HttpResponse {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let (parts, body) = req.into_parts();

        let limited = Limited::new(body, self.config.max_body_bytes());
        let collected = tokio::time::timeout(self.config.request_timeout(), limited.collect()).await;

        let response = match collected {
            Ok(Ok(collected)) => {
                let request = Request::from_parts(parts, collected.to_bytes());
                self.dispatcher.dispatch(request)
            }
            Ok(Err(e)) if e.downcast_ref::<LengthLimitError>().is_some() => {
                tracing::warn!(limit = self.config.max_body_bytes(), "request body too large");
                transport_error(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!(
                        "request body exceeds {} bytes",
                        self.config.max_body_bytes()
                    ),
                )
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "failed to read request body");
                transport_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to read request body: {e}"),
                )
            }
            Err(_) => {
                tracing::warn!("timed out reading request body");
                transport_error(StatusCode::REQUEST_TIMEOUT, "timed out reading request body")
            }
        };

        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "request completed"
        );

        response.map(Full::new)
    }
}

fn transport_error(status: StatusCode, message: impl Into<String>) -> Response<Bytes> {
    render(
        WrittenResponse::default(),
        Outcome::Failure(ApiError::new(status, message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use apiary_core::Json;
    use apiary_extract::body;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use crate::RouteTable;

    fn echo_dispatcher() -> Dispatcher {
        let mut table = RouteTable::new();
        table
            .get("/ping", (), |()| Json("pong"))
            .unwrap()
            .post("/echo", (body::<serde_json::Value>(),), |(value,)| Json(value))
            .unwrap();
        table.into_dispatcher()
    }

    async fn start(config: ServerConfig) -> (SocketAddr, ShutdownSignal, tokio::task::JoinHandle<Result<(), ServerError>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = ShutdownSignal::new();
        let server = Server::new(config, echo_dispatcher());
        let handle = tokio::spawn(server.serve(listener, shutdown.clone()));
        (addr, shutdown, handle)
    }

    async fn raw_request(addr: SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8_lossy(&response).into_owned()
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let config = ServerConfig::builder().http_addr("not-an-address").build();
        let result = Server::new(config, echo_dispatcher())
            .run_with_shutdown(ShutdownSignal::new())
            .await;
        assert!(matches!(result, Err(ServerError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn test_stops_when_already_triggered() {
        let config = ServerConfig::builder()
            .http_addr("127.0.0.1:0")
            .shutdown_timeout(Duration::from_millis(100))
            .build();
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            Server::new(config, echo_dispatcher()).run_with_shutdown(shutdown),
        )
        .await;
        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_serves_over_tcp() {
        let (addr, shutdown, handle) = start(ServerConfig::default()).await;

        let response = raw_request(
            addr,
            "GET /ping HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert!(response.contains("content-type: application/json"));
        assert!(response.ends_with("\"pong\""));

        let response = raw_request(
            addr,
            "POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: 7\r\nConnection: close\r\n\r\n{\"a\":1}",
        )
        .await;
        assert!(response.ends_with(r#"{"a":1}"#), "{response}");

        shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
    }

    #[tokio::test]
    async fn test_unknown_route_over_tcp() {
        let (addr, shutdown, _handle) = start(ServerConfig::default()).await;
        let response = raw_request(
            addr,
            "GET /nowhere HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 404"), "{response}");
        assert!(response.ends_with(r#"{"error":"no route for GET /nowhere"}"#));
        shutdown.trigger();
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = ServerConfig::builder().max_body_bytes(4).build();
        let (addr, shutdown, _handle) = start(config).await;

        let response = raw_request(
            addr,
            "POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: 11\r\nConnection: close\r\n\r\n[1,2,3,4,5]",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 413"), "{response}");
        assert!(response.ends_with(r#"{"error":"request body exceeds 4 bytes"}"#));
        shutdown.trigger();
    }

    #[tokio::test]
    async fn test_body_read_timeout() {
        let config = ServerConfig::builder()
            .request_timeout(Duration::from_millis(100))
            .build();
        let (addr, shutdown, _handle) = start(config).await;

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: 10\r\n\r\n[1")
            .await
            .unwrap();

        let expected = r#"{"error":"timed out reading request body"}"#;
        let mut received = Vec::new();
        let read = async {
            let mut chunk = [0u8; 512];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                received.extend_from_slice(&chunk[..n]);
                if n == 0 || received.ends_with(expected.as_bytes()) {
                    break;
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), read).await.unwrap();
        let response = String::from_utf8_lossy(&received);

        assert!(response.starts_with("HTTP/1.1 408"), "{response}");
        assert!(response.ends_with(expected), "{response}");
        shutdown.trigger();
    }
}
