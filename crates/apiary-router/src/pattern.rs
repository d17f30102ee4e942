//! Route pattern parsing and single-pattern matching.

use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;
use crate::params::Params;

/// Prefix marking a named parameter segment.
const PARAM_PREFIX: char = ':';

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text, compared case-sensitively
    Literal(String),
    /// Named parameter (`:name`) capturing one non-empty segment
    Param(String),
}

/// A parsed route pattern such as `/users/:id/avatar`.
///
/// # Example
///
/// ```rust
/// use apiary_router::{Pattern, Segment};
///
/// let pattern = Pattern::parse("/users/:id")?;
/// assert_eq!(
///     pattern.segments(),
///     &[Segment::Literal("users".into()), Segment::Param("id".into())]
/// );
///
/// let params = pattern.match_path("/users/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
/// assert!(pattern.match_path("/users/42/extra").is_none());
/// # Ok::<(), apiary_router::RouteError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] if the pattern does not start
    /// with `/`, has a parameter with an empty name, or repeats a parameter
    /// name.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(RouteError::invalid_pattern(raw, "must start with '/'"));
        };

        let mut segments = Vec::new();
        for text in rest.split('/') {
            let segment = match text.strip_prefix(PARAM_PREFIX) {
                Some("") => {
                    return Err(RouteError::invalid_pattern(raw, "parameter name is empty"));
                }
                Some(name) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(n) if n == name))
                    {
                        return Err(RouteError::invalid_pattern(
                            raw,
                            format!("parameter ':{name}' appears more than once"),
                        ));
                    }
                    Segment::Param(name.to_string())
                }
                None => Segment::Literal(text.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the parameter names in the order they appear.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns `true` if the pattern declares a parameter with this name.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.param_names().any(|n| n == name)
    }

    /// Matches a request path against this pattern alone.
    ///
    /// Returns the captured parameters on success.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let mut params = Params::new();
        let mut request = split_path(path);

        for segment in &self.segments {
            let text = request.next()?;
            match segment {
                Segment::Literal(literal) if literal == text => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if text.is_empty() => return None,
                Segment::Param(name) => params.push(name.as_str(), text),
            }
        }

        if request.next().is_some() {
            return None;
        }
        Some(params)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Pattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Splits a request path into segments the same way patterns are split.
pub(crate) fn split_path(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}
