//! Parameter specs: one per method argument.

use std::any::type_name;
use std::marker::PhantomData;

use apiary_core::{ParamBinding, ParamSource, ResponseWriter};
use serde::de::DeserializeOwned;

use crate::codec::{decode_body, decode_param, FromParam};
use crate::context::BindContext;
use crate::error::BindingError;

/// A single argument binding.
///
/// A spec is created once, at registration, and then reused for every
/// request on its route.
pub trait Param: Send + Sync + 'static {
    /// Type of the bound argument.
    type Value;

    /// Static description of this binding.
    fn binding(&self) -> ParamBinding;

    /// Produces the argument for one request.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError`] if the request input cannot be decoded.
    fn bind(&self, cx: &BindContext) -> Result<Self::Value, BindingError>;
}

/// Binds a named path capture. Created by [`path`].
#[derive(Debug)]
pub struct PathParam<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

/// Binds the request body as JSON. Created by [`body`].
#[derive(Debug)]
pub struct BodyParam<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Injects the response writer. Created by [`writer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WriterParam;

/// Binds the path capture `name`, decoded with [`FromParam`].
///
/// ```rust
/// use apiary_extract::{path, BindContext, Param};
///
/// let cx = BindContext::builder().param("id", "abc").build();
/// assert!(path::<i64>("id").bind(&cx).is_err());
/// assert_eq!(path::<String>("id").bind(&cx).unwrap(), "abc");
/// ```
#[must_use]
pub fn path<T: FromParam>(name: impl Into<String>) -> PathParam<T> {
    PathParam {
        name: name.into(),
        _marker: PhantomData,
    }
}

/// Binds the request body, decoded as JSON into `T`.
#[must_use]
pub fn body<T: DeserializeOwned>() -> BodyParam<T> {
    BodyParam {
        _marker: PhantomData,
    }
}

/// Injects the live [`ResponseWriter`].
#[must_use]
pub fn writer() -> WriterParam {
    WriterParam
}

impl<T: FromParam + 'static> Param for PathParam<T> {
    type Value = T;

    fn binding(&self) -> ParamBinding {
        ParamBinding::new(ParamSource::Path(self.name.clone()), type_name::<T>())
    }

    fn bind(&self, cx: &BindContext) -> Result<T, BindingError> {
        let text = cx
            .params()
            .get(&self.name)
            .ok_or_else(|| BindingError::missing(&self.name))?;
        decode_param(&self.name, text)
    }
}

impl<T: DeserializeOwned + 'static> Param for BodyParam<T> {
    type Value = T;

    fn binding(&self) -> ParamBinding {
        ParamBinding::new(ParamSource::Body, type_name::<T>())
    }

    fn bind(&self, cx: &BindContext) -> Result<T, BindingError> {
        decode_body(cx.body())
    }
}

impl Param for WriterParam {
    type Value = ResponseWriter;

    fn binding(&self) -> ParamBinding {
        ParamBinding::new(ParamSource::Writer, type_name::<ResponseWriter>())
    }

    fn bind(&self, cx: &BindContext) -> Result<ResponseWriter, BindingError> {
        Ok(cx.writer().clone())
    }
}
