//! # Apiary Extract
//!
//! Argument binding for Apiary service methods.
//!
//! A method's arguments are described by a tuple of parameter specs. Each
//! spec names where its value comes from:
//!
//! | Spec | Source | Decoded with |
//! |------|--------|--------------|
//! | [`path::<T>("name")`](path) | named path capture | [`FromParam`] |
//! | [`body::<T>()`](body) | whole request body | JSON ([`decode_body`]) |
//! | [`writer()`](writer) | live response writer | injected, not decoded |
//!
//! The tuple implements [`ParamList`], which yields the static binding
//! descriptors at registration and the typed argument tuple per request.
//! A failure to bind any argument is a [`BindingError`] (400) and stops the
//! request before the method runs.
//!
//! ## Example
//!
//! ```rust
//! use apiary_extract::{body, path, BindContext, ParamList};
//! use apiary_router::Params;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Rename {
//!     name: String,
//! }
//!
//! let params = (path::<i64>("id"), body::<Rename>());
//!
//! let mut captures = Params::new();
//! captures.push("id", "7");
//! let cx = BindContext::builder()
//!     .params(captures)
//!     .body(r#"{"name":"Grace"}"#)
//!     .build();
//!
//! let (id, rename) = params.bind_all(&cx).unwrap();
//! assert_eq!(id, 7);
//! assert_eq!(rename.name, "Grace");
//! ```

#![doc(html_root_url = "https://docs.rs/apiary-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod context;
mod error;
mod list;
mod param;

pub use codec::{decode_body, decode_param, FromParam};
pub use context::{BindContext, BindContextBuilder};
pub use error::{BindingError, BindingSource};
pub use list::ParamList;
pub use param::{body, path, writer, BodyParam, Param, PathParam, WriterParam};
