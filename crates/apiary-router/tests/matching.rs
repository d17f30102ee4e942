//! Property tests for path matching.

use apiary_router::{Pattern, Router};
use http::Method;
use proptest::prelude::*;

/// A non-empty path segment without `/`.
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._~%-]{1,16}"
}

proptest! {
    #[test]
    fn param_captures_any_non_empty_segment(value in segment()) {
        let mut router = Router::new();
        router.insert(Method::GET, Pattern::parse("/users/:id").unwrap(), ()).unwrap();

        let path = format!("/users/{value}");
        let m = router.match_route(&Method::GET, &path).unwrap();
        prop_assert_eq!(m.params.get("id"), Some(value.as_str()));
    }

    #[test]
    fn literal_route_matches_only_itself(
        literals in proptest::collection::btree_set(segment(), 2..8),
    ) {
        let literals: Vec<String> = literals.into_iter().collect();
        let mut router = Router::new();
        for (i, literal) in literals.iter().enumerate() {
            let pattern = Pattern::parse(&format!("/{literal}")).unwrap();
            router.insert(Method::GET, pattern, i).unwrap();
        }

        for (i, literal) in literals.iter().enumerate() {
            let path = format!("/{literal}");
            let m = router.match_route(&Method::GET, &path).unwrap();
            prop_assert_eq!(*m.value, i);
            prop_assert!(m.params.is_empty());
            prop_assert!(router.match_route(&Method::POST, &path).is_none());
        }
    }

    #[test]
    fn literal_wins_over_param_at_same_position(value in segment(), literal in segment()) {
        let mut router = Router::new();
        router.insert(Method::GET, Pattern::parse("/items/:id").unwrap(), "param").unwrap();
        router
            .insert(Method::GET, Pattern::parse(&format!("/items/{literal}")).unwrap(), "literal")
            .unwrap();

        let m = router.match_route(&Method::GET, &format!("/items/{value}")).unwrap();
        if value == literal {
            prop_assert_eq!(*m.value, "literal");
        } else {
            prop_assert_eq!(*m.value, "param");
        }
    }

    #[test]
    fn single_pattern_agrees_with_router(a in segment(), b in segment()) {
        let pattern = Pattern::parse("/orgs/:org/users/:user").unwrap();
        let mut router = Router::new();
        router.insert(Method::GET, pattern.clone(), ()).unwrap();

        let path = format!("/orgs/{a}/users/{b}");
        let direct = pattern.match_path(&path);
        let routed = router.match_route(&Method::GET, &path).map(|m| m.params);
        prop_assert_eq!(direct, routed);
    }
}
