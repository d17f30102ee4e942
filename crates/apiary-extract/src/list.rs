//! Tuples of parameter specs.

use apiary_core::ParamBinding;

use crate::context::BindContext;
use crate::error::BindingError;
use crate::param::Param;

/// An ordered list of parameter specs describing a method's arguments.
///
/// Implemented for `()` and for tuples of up to six [`Param`] specs. The
/// bound values come back as a tuple in the same order.
pub trait ParamList: Send + Sync + 'static {
    /// Tuple of bound argument values.
    type Values;

    /// Static binding descriptors, in argument order.
    fn bindings(&self) -> Vec<ParamBinding>;

    /// Binds every argument, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindingError`] encountered.
    fn bind_all(&self, cx: &BindContext) -> Result<Self::Values, BindingError>;
}

impl ParamList for () {
    type Values = ();

    fn bindings(&self) -> Vec<ParamBinding> {
        Vec::new()
    }

    fn bind_all(&self, _cx: &BindContext) -> Result<Self::Values, BindingError> {
        Ok(())
    }
}

macro_rules! impl_param_list_for_tuple {
    ($($P:ident),+) => {
        impl<$($P: Param),+> ParamList for ($($P,)+) {
            type Values = ($($P::Value,)+);

            #[allow(non_snake_case)]
            fn bindings(&self) -> Vec<ParamBinding> {
                let ($($P,)+) = self;
                vec![$($P.binding()),+]
            }

            #[allow(non_snake_case)]
            fn bind_all(&self, cx: &BindContext) -> Result<Self::Values, BindingError> {
                let ($($P,)+) = self;
                Ok(($($P.bind(cx)?,)+))
            }
        }
    };
}

impl_param_list_for_tuple!(P1);
impl_param_list_for_tuple!(P1, P2);
impl_param_list_for_tuple!(P1, P2, P3);
impl_param_list_for_tuple!(P1, P2, P3, P4);
impl_param_list_for_tuple!(P1, P2, P3, P4, P5);
impl_param_list_for_tuple!(P1, P2, P3, P4, P5, P6);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{body, path, writer};
    use apiary_core::ParamSource;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        name: String,
    }

    #[test]
    fn test_unit_list() {
        let cx = BindContext::builder().build();
        assert!(().bindings().is_empty());
        assert!(().bind_all(&cx).is_ok());
    }

    #[test]
    fn test_bindings_in_order() {
        let list = (path::<String>("org"), path::<u32>("id"), body::<Patch>(), writer());
        let sources: Vec<_> = list
            .bindings()
            .into_iter()
            .map(|b| b.source().clone())
            .collect();
        assert_eq!(
            sources,
            vec![
                ParamSource::Path("org".to_string()),
                ParamSource::Path("id".to_string()),
                ParamSource::Body,
                ParamSource::Writer,
            ]
        );
    }

    #[test]
    fn test_bind_all() {
        let cx = BindContext::builder()
            .param("org", "acme")
            .param("id", "9")
            .body(r#"{"name":"Ada"}"#)
            .build();

        let (org, id, patch) = (path::<String>("org"), path::<u32>("id"), body::<Patch>())
            .bind_all(&cx)
            .unwrap();
        assert_eq!(org, "acme");
        assert_eq!(id, 9);
        assert_eq!(patch.name, "Ada");
    }

    #[test]
    fn test_first_failure_wins() {
        let cx = BindContext::builder()
            .param("id", "nine")
            .body("not json")
            .build();

        let err = (path::<u32>("id"), body::<Patch>())
            .bind_all(&cx)
            .unwrap_err();
        assert_eq!(err.field(), Some("id"));
    }
}
