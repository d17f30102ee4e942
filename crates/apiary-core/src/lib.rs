//! # Apiary Core
//!
//! Types shared by every layer of the Apiary binding stack:
//!
//! - [`ApiError`] - the status-plus-message outcome a service method returns,
//!   used for failures and for non-default success statuses alike
//! - [`Outcome`] and [`IntoOutcome`] - the tagged result of one invocation and
//!   the conversion from a method's return type
//! - [`ResponseWriter`] - the raw writer handle injected into methods that
//!   produce their own response
//! - [`HandlerDescriptor`] - the static description of a bound method
//! - [`render`] - the result renderer turning an outcome into a response

#![doc(html_root_url = "https://docs.rs/apiary-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod outcome;
pub mod render;
mod writer;

pub use descriptor::{HandlerDescriptor, ParamBinding, ParamSource};
pub use error::ApiError;
pub use outcome::{IntoOutcome, Json, Outcome, Payload, ResponseBody, ReturnShape};
pub use render::render;
pub use writer::{ResponseWriter, WrittenResponse};

/// Content type of every JSON response.
pub const APPLICATION_JSON: &str = "application/json";
