//! Method-aware router.

use std::collections::HashMap;

use http::Method;

use crate::error::RouteError;
use crate::node::Node;
use crate::params::Params;
use crate::pattern::Pattern;
use crate::RouteMatch;

/// A router holding one segment trie per HTTP method.
///
/// Candidate routes are selected by method first, then matched by path.
/// The router is built once and is read-only afterwards, so shared
/// references can be matched from many threads at once.
///
/// # Example
///
/// ```rust
/// use apiary_router::{Pattern, Router, RouteError};
/// use http::Method;
///
/// let mut router = Router::new();
/// router.insert(Method::GET, Pattern::parse("/users")?, 1)?;
/// router.insert(Method::POST, Pattern::parse("/users")?, 2)?;
///
/// assert_eq!(router.match_route(&Method::POST, "/users").map(|m| *m.value), Some(2));
/// assert!(router.match_route(&Method::DELETE, "/users").is_none());
///
/// let err = router.insert(Method::GET, Pattern::parse("/users")?, 3).unwrap_err();
/// assert!(matches!(err, RouteError::DuplicateRoute { .. }));
/// # Ok::<(), RouteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Router<T> {
    trees: HashMap<Method, Node<T>>,
    route_count: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
            route_count: 0,
        }
    }

    /// Inserts a route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateRoute`] if a route with the same method
    /// and pattern shape is already registered. Parameter names do not
    /// count towards the shape: `/users/:id` and `/users/:uid` collide.
    pub fn insert(&mut self, method: Method, pattern: Pattern, value: T) -> Result<(), RouteError> {
        let raw = pattern.as_str().to_string();
        self.trees
            .entry(method.clone())
            .or_insert_with(Node::root)
            .insert(pattern, value)
            .map_err(|(_, existing)| RouteError::DuplicateRoute {
                method,
                pattern: raw,
                existing,
            })?;

        self.route_count += 1;
        Ok(())
    }

    /// Matches a request method and path.
    ///
    /// Returns `None` when no route of that method matches the path.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, T>> {
        let (leaf, captures) = self.trees.get(method)?.match_path(path)?;

        let params: Params = leaf
            .pattern
            .param_names()
            .zip(captures.iter().copied())
            .collect();

        Some(RouteMatch::new(&leaf.value, &leaf.pattern, params))
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}
