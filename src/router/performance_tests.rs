// Performance-focused tests for router scalability
//
// Lookups walk the trie one segment at a time, so cost should track path
// depth rather than the number of registered routes.

use super::{MatchOutcome, Router};
use std::time::Instant;

#[test]
fn test_router_performance_with_many_routes() {
    let mut router = Router::new();
    for i in 0..500 {
        router
            .get(&format!("/api/v1/resource{}/{{id}}", i), format!("handler_{}", i))
            .unwrap();
    }

    let start = Instant::now();
    for _ in 0..1000 {
        let result = router.match_route("GET", "/api/v1/resource250/123");
        assert!(result.is_matched());
    }
    let duration = start.elapsed();

    assert!(
        duration.as_millis() < 50,
        "Router performance degraded: {}ms for 1000 lookups with 500 routes",
        duration.as_millis()
    );
}

#[test]
fn test_router_thousands_of_routes_stay_correct() {
    let mut router = Router::new();
    for i in 0..2000 {
        router
            .get(&format!("/svc{}/items/{{item_id}}", i % 40), format!("list_{}", i % 40))
            .unwrap();
        router
            .post(&format!("/svc{}/items/{}", i % 40, i), format!("create_{}", i))
            .unwrap();
    }

    match router.match_route("GET", "/svc7/items/abc") {
        MatchOutcome::Matched(m) => {
            assert_eq!(m.handler().as_str(), "list_7");
            assert_eq!(m.get_path_param("item_id"), Some("abc"));
        }
        other => panic!("unexpected {other:?}"),
    }
    // literal /svc7/items/1007 only knows POST
    assert_eq!(router.match_route("GET", "/svc7/items/1007").status(), 405);
}

#[test]
fn test_router_worst_case_performance() {
    let mut router = Router::new();
    for path in ["/a", "/a/b", "/a/b/c", "/a/b/c/d", "/a/b/c/d/e", "/a/b/c/d/e/f"] {
        router.get(path, path.replace('/', "_")).unwrap();
    }

    let start = Instant::now();
    for _ in 0..1000 {
        let _ = router.match_route("GET", "/a/b/c/d/e/f");
    }
    let duration = start.elapsed();

    assert!(
        duration.as_millis() < 10,
        "Deep path matching too slow: {}ms",
        duration.as_millis()
    );
}

#[test]
fn test_router_common_prefix_efficiency() {
    let mut router = Router::new();
    router.get("/api/v1/users", "list_users").unwrap();
    router.get("/api/v1/users/{id}", "get_user").unwrap();
    router.get("/api/v1/users/{id}/profile", "get_profile").unwrap();
    router.get("/api/v1/posts", "list_posts").unwrap();
    router.get("/api/v1/posts/{id}", "get_post").unwrap();
    router.get("/api/v2/users", "list_users_v2").unwrap();
    router.get("/api/v2/posts", "list_posts_v2").unwrap();

    assert!(router.match_route("GET", "/api/v1/users").is_matched());
    assert!(router.match_route("GET", "/api/v1/users/123").is_matched());
    assert!(router.match_route("GET", "/api/v1/users/123/profile").is_matched());
    assert!(router.match_route("GET", "/api/v1/posts").is_matched());
    assert!(router.match_route("GET", "/api/v2/users").is_matched());
}

#[test]
fn test_router_parameter_extraction_performance() {
    let mut router = Router::new();
    router
        .get(
            "/api/{version}/users/{user_id}/posts/{post_id}/comments/{comment_id}",
            "get_comment",
        )
        .unwrap();

    let start = Instant::now();
    for _ in 0..1000 {
        let route_match = router
            .match_route("GET", "/api/v1/users/123/posts/456/comments/789")
            .into_match()
            .unwrap();
        assert_eq!(route_match.path_params.len(), 4);
        assert!(!route_match.path_params.spilled());
    }
    let duration = start.elapsed();

    assert!(
        duration.as_millis() < 20,
        "Parameter extraction too slow: {}ms",
        duration.as_millis()
    );
}
