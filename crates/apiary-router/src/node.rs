//! Segment trie for one HTTP method.

use smallvec::SmallVec;

use crate::pattern::{split_path, Pattern, Segment};

/// A route stored at the end of a trie path.
#[derive(Debug, Clone)]
pub(crate) struct Leaf<T> {
    pub(crate) pattern: Pattern,
    pub(crate) value: T,
}

/// A node in the segment trie.
///
/// Literal children are kept sorted for binary search. Parameter children
/// are anonymous: capture names live on the leaf's pattern and are zipped
/// with the captured values after a match, so `/users/:id` and
/// `/users/:uid/avatar` can share the same parameter node.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    literal: String,
    literals: Vec<Node<T>>,
    param: Option<Box<Node<T>>>,
    leaf: Option<Leaf<T>>,
}

impl<T> Node<T> {
    pub(crate) fn root() -> Self {
        Self::with_literal(String::new())
    }

    fn with_literal(literal: String) -> Self {
        Self {
            literal,
            literals: Vec::new(),
            param: None,
            leaf: None,
        }
    }

    /// Inserts a route.
    ///
    /// On conflict the rejected value is handed back together with the
    /// pattern of the route already occupying that shape.
    pub(crate) fn insert(&mut self, pattern: Pattern, value: T) -> Result<(), (T, String)> {
        let mut node = self;
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.literal_child_mut(text),
                Segment::Param(_) => &mut **node
                    .param
                    .get_or_insert_with(|| Box::new(Node::with_literal(String::new()))),
            };
        }

        if let Some(existing) = &node.leaf {
            return Err((value, existing.pattern.as_str().to_string()));
        }
        node.leaf = Some(Leaf { pattern, value });
        Ok(())
    }

    fn literal_child_mut(&mut self, text: &str) -> &mut Node<T> {
        let index = match self
            .literals
            .binary_search_by(|c| c.literal.as_str().cmp(text))
        {
            Ok(index) => index,
            Err(index) => {
                self.literals
                    .insert(index, Node::with_literal(text.to_string()));
                index
            }
        };
        &mut self.literals[index]
    }

    fn literal_child(&self, text: &str) -> Option<&Node<T>> {
        self.literals
            .binary_search_by(|c| c.literal.as_str().cmp(text))
            .ok()
            .map(|i| &self.literals[i])
    }

    /// Matches a request path, returning the leaf and the captured values
    /// in pattern order.
    pub(crate) fn match_path<'n, 'p>(
        &'n self,
        path: &'p str,
    ) -> Option<(&'n Leaf<T>, SmallVec<[&'p str; 4]>)> {
        let segments: SmallVec<[&'p str; 8]> = split_path(path).collect();
        let mut captures = SmallVec::new();
        let leaf = self.match_segments(&segments, &mut captures)?;
        Some((leaf, captures))
    }

    fn match_segments<'n, 'p>(
        &'n self,
        segments: &[&'p str],
        captures: &mut SmallVec<[&'p str; 4]>,
    ) -> Option<&'n Leaf<T>> {
        let Some((&segment, rest)) = segments.split_first() else {
            return self.leaf.as_ref();
        };

        // Literal first: it wins the tie-break at this position.
        if let Some(child) = self.literal_child(segment) {
            if let Some(leaf) = child.match_segments(rest, captures) {
                return Some(leaf);
            }
        }

        if let Some(child) = &self.param {
            if !segment.is_empty() {
                captures.push(segment);
                if let Some(leaf) = child.match_segments(rest, captures) {
                    return Some(leaf);
                }
                captures.pop();
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(root: &mut Node<&'static str>, pattern: &str, value: &'static str) {
        root.insert(Pattern::parse(pattern).unwrap(), value).unwrap();
    }

    fn lookup(root: &Node<&'static str>, path: &str) -> Option<(&'static str, Vec<String>)> {
        root.match_path(path).map(|(leaf, captures)| {
            (
                leaf.value,
                captures.iter().map(|c| (*c).to_string()).collect(),
            )
        })
    }

    #[test]
    fn test_literals_stay_sorted() {
        let mut root = Node::root();
        insert(&mut root, "/zeta", "z");
        insert(&mut root, "/alpha", "a");
        insert(&mut root, "/mid", "m");

        let order: Vec<_> = root.literals.iter().map(|c| c.literal.as_str()).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
        assert_eq!(lookup(&root, "/mid").unwrap().0, "m");
    }

    #[test]
    fn test_literal_beats_param() {
        let mut root = Node::root();
        insert(&mut root, "/users/:id", "byId");
        insert(&mut root, "/users/me", "me");

        assert_eq!(lookup(&root, "/users/me").unwrap().0, "me");
        assert_eq!(
            lookup(&root, "/users/42").unwrap(),
            ("byId", vec!["42".to_string()])
        );
    }

    #[test]
    fn test_backtracks_from_dead_literal_branch() {
        let mut root = Node::root();
        insert(&mut root, "/users/me/settings", "settings");
        insert(&mut root, "/users/:id/avatar", "avatar");

        assert_eq!(
            lookup(&root, "/users/me/avatar").unwrap(),
            ("avatar", vec!["me".to_string()])
        );
    }

    #[test]
    fn test_backtracking_discards_stale_captures() {
        let mut root = Node::root();
        insert(&mut root, "/:a/x/y", "deep");
        insert(&mut root, "/:a/:b/z", "other");

        assert_eq!(
            lookup(&root, "/1/x/z").unwrap(),
            ("other", vec!["1".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_duplicate_shape_is_rejected() {
        let mut root = Node::root();
        insert(&mut root, "/users/:id", "first");

        let err = root
            .insert(Pattern::parse("/users/:uid").unwrap(), "second")
            .unwrap_err();
        assert_eq!(err, ("second", "/users/:id".to_string()));
    }

    #[test]
    fn test_shared_param_node_with_different_names() {
        let mut root = Node::root();
        insert(&mut root, "/users/:id", "user");
        insert(&mut root, "/users/:owner/avatar", "avatar");

        let (leaf, captures) = root.match_path("/users/5/avatar").unwrap();
        assert_eq!(leaf.value, "avatar");
        assert_eq!(leaf.pattern.param_names().collect::<Vec<_>>(), vec!["owner"]);
        assert_eq!(captures.as_slice(), &["5"]);
    }

    #[test]
    fn test_no_match() {
        let mut root = Node::root();
        insert(&mut root, "/users", "list");

        assert!(lookup(&root, "/posts").is_none());
        assert!(lookup(&root, "/").is_none());
    }
}
