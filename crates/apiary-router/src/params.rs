//! Path captures, looked up by parameter name.

use smallvec::SmallVec;

/// One `:name` capture: the parameter name and the request segment it
/// matched, exactly as it appeared in the path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Capture {
    name: String,
    raw: String,
}

/// The captures of one route match.
///
/// Patterns never repeat a parameter name, so a name identifies at most one
/// capture. Values are raw segment text with no percent-decoding; turning
/// them into typed arguments is the binder's job.
///
/// Most routes capture one or two segments, which stay inline.
///
/// ```rust
/// use apiary_router::Params;
///
/// let mut captures = Params::new();
/// captures.push("id", "42");
/// captures.push("file", "a%20b.png");
///
/// assert_eq!(captures.get("id"), Some("42"));
/// assert_eq!(captures.get("file"), Some("a%20b.png"));
/// assert_eq!(captures.get("name"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    captures: SmallVec<[Capture; 2]>,
}

impl Params {
    /// No captures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the segment captured for `name`.
    pub fn push(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.captures.push(Capture {
            name: name.into(),
            raw: raw.into(),
        });
    }

    /// The raw segment captured for `name`, if the matched pattern has it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.raw.as_str())
    }

    /// `true` for a literal-only route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// `(name, raw)` pairs in the order the pattern declares them.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.captures
            .iter()
            .map(|c| (c.name.as_str(), c.raw.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, raw) in iter {
            params.push(name, raw);
        }
        params
    }
}
