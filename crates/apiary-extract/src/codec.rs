//! Scalar and body decoding.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::BindingError;

/// Types that can be parsed from a single path segment.
///
/// Implemented for the primitive numeric types, `bool`, `char` and
/// `String`. Implement it for domain newtypes to bind them straight from
/// the path:
///
/// ```rust
/// use apiary_extract::FromParam;
/// use std::num::ParseIntError;
///
/// struct OrderId(u64);
///
/// impl FromParam for OrderId {
///     type Error = ParseIntError;
///
///     fn from_param(text: &str) -> Result<Self, Self::Error> {
///         text.parse().map(OrderId)
///     }
/// }
///
/// assert_eq!(OrderId::from_param("17").unwrap().0, 17);
/// assert!(OrderId::from_param("seventeen").is_err());
/// ```
pub trait FromParam: Sized {
    /// Reason a segment was rejected.
    type Error: fmt::Display;

    /// Parses the raw segment text.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the text is not a valid `Self`.
    fn from_param(text: &str) -> Result<Self, Self::Error>;
}

macro_rules! impl_from_param_via_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromParam for $t {
                type Error = <$t as std::str::FromStr>::Err;

                fn from_param(text: &str) -> Result<Self, Self::Error> {
                    text.parse()
                }
            }
        )*
    };
}

impl_from_param_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

/// Decodes one named path capture.
///
/// # Errors
///
/// Returns [`BindingError`] naming the parameter if `T` rejects the text.
pub fn decode_param<T: FromParam>(name: &str, text: &str) -> Result<T, BindingError> {
    T::from_param(text).map_err(|e| BindingError::invalid_value(name, text, e))
}

/// Decodes a JSON request body.
///
/// # Errors
///
/// Returns [`BindingError`] if the body is empty, is not valid JSON, or does
/// not match the shape of `T`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, BindingError> {
    if body.is_empty() {
        return Err(BindingError::malformed_body("empty request body"));
    }
    serde_json::from_slice(body).map_err(BindingError::malformed_body)
}
