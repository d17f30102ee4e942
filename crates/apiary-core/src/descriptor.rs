//! Static description of a bound service method.

use std::fmt;

use crate::outcome::ReturnShape;

/// Where a method argument comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamSource {
    /// A named path capture, decoded from text
    Path(String),
    /// The whole request body, decoded as JSON
    Body,
    /// The live response writer
    Writer,
}

/// One argument binding: its source and the Rust type it produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamBinding {
    source: ParamSource,
    type_name: &'static str,
}

impl ParamBinding {
    /// Creates a binding.
    #[must_use]
    pub fn new(source: ParamSource, type_name: &'static str) -> Self {
        Self { source, type_name }
    }

    /// Returns the binding source.
    #[must_use]
    pub fn source(&self) -> &ParamSource {
        &self.source
    }

    /// Returns the target type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for ParamBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ParamSource::Path(name) => write!(f, "path :{name} -> {}", self.type_name),
            ParamSource::Body => write!(f, "body -> {}", self.type_name),
            ParamSource::Writer => write!(f, "writer"),
        }
    }
}

/// Describes how a method is bound: its arguments in order and its return
/// shape. Built once at registration and never changed.
///
/// # Example
///
/// ```rust
/// use apiary_core::{HandlerDescriptor, ParamBinding, ParamSource, ReturnShape};
///
/// let descriptor = HandlerDescriptor::new(
///     vec![ParamBinding::new(ParamSource::Path("id".into()), "i64")],
///     ReturnShape::ValueAndError,
/// );
/// assert!(!descriptor.injects_writer());
/// assert_eq!(descriptor.path_names().collect::<Vec<_>>(), vec!["id"]);
/// assert_eq!(descriptor.to_string(), "(path :id -> i64) -> value+error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerDescriptor {
    params: Vec<ParamBinding>,
    shape: ReturnShape,
}

impl HandlerDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(params: Vec<ParamBinding>, shape: ReturnShape) -> Self {
        Self { params, shape }
    }

    /// Returns the argument bindings in call order.
    #[must_use]
    pub fn params(&self) -> &[ParamBinding] {
        &self.params
    }

    /// Returns the return shape.
    #[must_use]
    pub fn shape(&self) -> ReturnShape {
        self.shape
    }

    /// Returns `true` if the method receives the response writer.
    #[must_use]
    pub fn injects_writer(&self) -> bool {
        self.writer_params() > 0
    }

    /// Number of body-bound arguments.
    #[must_use]
    pub fn body_params(&self) -> usize {
        self.count(|s| matches!(s, ParamSource::Body))
    }

    /// Number of writer-bound arguments.
    #[must_use]
    pub fn writer_params(&self) -> usize {
        self.count(|s| matches!(s, ParamSource::Writer))
    }

    /// Names of the path captures the method reads.
    pub fn path_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().filter_map(|p| match &p.source {
            ParamSource::Path(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&ParamSource) -> bool) -> usize {
        self.params.iter().filter(|p| pred(&p.source)).count()
    }
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.shape)
    }
}
