//! Route table construction.
//!
//! A service is exposed by registering one [`Endpoint`] per (method,
//! pattern). An endpoint pairs a tuple of parameter specs with a closure
//! that receives the bound values:
//!
//! ```rust
//! use apiary_core::{ApiError, Json};
//! use apiary_extract::path;
//! use apiary_server::RouteTable;
//!
//! let mut table = RouteTable::new();
//! table
//!     .get("/users/:id", (path::<i64>("id"),), |(id,)| {
//!         if id == 1 {
//!             Ok(Json("Alice"))
//!         } else {
//!             Err(ApiError::not_found(format!("user {id} not found")))
//!         }
//!     })?
//!     .get("/health", (), |()| Json("ok"))?;
//!
//! let dispatcher = table.into_dispatcher();
//! assert_eq!(dispatcher.len(), 2);
//! # Ok::<(), apiary_server::RegistrationError>(())
//! ```
//!
//! All validation happens here, so a table that builds can only fail at
//! request time with 400 or 404.

use std::fmt;
use std::sync::Arc;

use apiary_core::{HandlerDescriptor, IntoOutcome, Outcome};
use apiary_extract::{BindContext, BindingError, ParamList};
use apiary_router::{Pattern, Router};
use http::Method;

use crate::dispatch::Dispatcher;
use crate::error::RegistrationError;

type ErasedInvoke = Arc<dyn Fn(&BindContext) -> Result<Outcome, BindingError> + Send + Sync>;

/// A bound service method: its descriptor plus a type-erased invoker.
#[derive(Clone)]
pub struct Endpoint {
    descriptor: HandlerDescriptor,
    invoke: ErasedInvoke,
}

impl Endpoint {
    /// Builds an endpoint from parameter specs and a handler.
    ///
    /// The handler receives the bound values as a tuple in the order of `params` and
    /// returns any [`IntoOutcome`] shape.
    pub fn new<P, F, R>(params: P, handler: F) -> Self
    where
        P: ParamList,
        F: Fn(P::Values) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        let descriptor = HandlerDescriptor::new(params.bindings(), R::SHAPE);
        let invoke: ErasedInvoke = Arc::new(move |cx: &BindContext| {
            let values = params.bind_all(cx)?;
            Ok(handler(values).into_outcome())
        });
        Self { descriptor, invoke }
    }

    /// Returns the static description of this endpoint.
    #[must_use]
    pub fn descriptor(&self) -> &HandlerDescriptor {
        &self.descriptor
    }

    /// Binds the arguments and, if that succeeds, runs the handler.
    ///
    /// # Errors
    ///
    /// Returns the [`BindingError`] of the first argument that failed. The
    /// handler is not called in that case.
    pub fn invoke(&self, cx: &BindContext) -> Result<Outcome, BindingError> {
        (self.invoke)(cx)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Mutable collection of routes, frozen into a [`Dispatcher`].
#[derive(Debug, Default)]
pub struct RouteTable {
    router: Router<Endpoint>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an endpoint under `method` and `pattern`.
    ///
    /// # Errors
    ///
    /// Fails if the pattern is invalid, if the (method, pattern) pair is
    /// already taken, if a path binding names an undeclared parameter, or if
    /// the endpoint binds the body or the writer more than once.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        endpoint: Endpoint,
    ) -> Result<&mut Self, RegistrationError> {
        let parsed = Pattern::parse(pattern)?;
        let descriptor = endpoint.descriptor();

        if let Some(name) = descriptor.path_names().find(|name| !parsed.has_param(name)) {
            return Err(RegistrationError::UnknownPathParam {
                method,
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }

        let bodies = descriptor.body_params();
        if bodies > 1 {
            return Err(RegistrationError::MultipleBodies {
                method,
                pattern: pattern.to_string(),
                count: bodies,
            });
        }

        let writers = descriptor.writer_params();
        if writers > 1 {
            return Err(RegistrationError::MultipleWriters {
                method,
                pattern: pattern.to_string(),
                count: writers,
            });
        }

        let signature = descriptor.to_string();
        self.router.insert(method.clone(), parsed, endpoint)?;

        tracing::info!(
            method = %method,
            pattern = %pattern,
            signature = %signature,
            "route registered"
        );
        Ok(self)
    }

    /// Registers a handler built inline from parameter specs.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn route<P, F, R>(
        &mut self,
        method: Method,
        pattern: &str,
        params: P,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        P: ParamList,
        F: Fn(P::Values) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.register(method, pattern, Endpoint::new(params, handler))
    }

    /// Registers a `GET` route.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn get<P, F, R>(
        &mut self,
        pattern: &str,
        params: P,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        P: ParamList,
        F: Fn(P::Values) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.route(Method::GET, pattern, params, handler)
    }

    /// Registers a `POST` route.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn post<P, F, R>(
        &mut self,
        pattern: &str,
        params: P,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        P: ParamList,
        F: Fn(P::Values) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.route(Method::POST, pattern, params, handler)
    }

    /// Registers a `PUT` route.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn put<P, F, R>(
        &mut self,
        pattern: &str,
        params: P,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        P: ParamList,
        F: Fn(P::Values) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.route(Method::PUT, pattern, params, handler)
    }

    /// Registers a `PATCH` route.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn patch<P, F, R>(
        &mut self,
        pattern: &str,
        params: P,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        P: ParamList,
        F: Fn(P::Values) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.route(Method::PATCH, pattern, params, handler)
    }

    /// Registers a `DELETE` route.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn delete<P, F, R>(
        &mut self,
        pattern: &str,
        params: P,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        P: ParamList,
        F: Fn(P::Values) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.route(Method::DELETE, pattern, params, handler)
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.router.len()
    }

    /// Returns `true` if no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.router.is_empty()
    }

    /// Freezes the table.
    #[must_use]
    pub fn into_dispatcher(self) -> Dispatcher {
        Dispatcher::new(self.router)
    }
}
