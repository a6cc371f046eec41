#![allow(clippy::unwrap_used, clippy::expect_used)]

use routematch::dispatcher::{Dispatcher, HandlerResponse};
use routematch::router::{RouteOptions, Router};
use serde_json::json;

fn pet_router() -> Router {
    let mut router = Router::new();
    router.get("/pets", "list_pets").unwrap();
    router.post("/pets", "add_pet").unwrap();
    router.get("/pets/{id}", "get_pet").unwrap();
    router
        .add_route(
            "GET",
            "/users/{user_id}/posts/{post_id}",
            "get_post",
            RouteOptions::named("posts.show"),
        )
        .unwrap();
    router.get("/panic", "panic").unwrap();
    router.get("/orphan", "orphan").unwrap();
    router
}

fn pet_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("list_pets", |_req| {
        HandlerResponse::json(200, json!([{ "id": 1, "name": "Rex" }]))
    });
    dispatcher.register("add_pet", |_req| HandlerResponse::json(201, json!({ "id": 2 })));
    dispatcher.register("get_pet", |req| {
        HandlerResponse::json(200, json!({ "id": req.get_path_param("id") }))
    });
    dispatcher.register("get_post", |req| {
        HandlerResponse::json(
            200,
            json!({
                "route": req.route_name,
                "user": req.get_path_param("user_id"),
                "post": req.get_path_param("post_id"),
            }),
        )
    });
    dispatcher.register("panic", |_req| panic!("boom"));
    dispatcher
}

#[test]
fn test_dispatch_get_pet() {
    let resp = pet_dispatcher().handle(&pet_router(), "GET", "/pets/12345");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!({ "id": "12345" }));
    assert_eq!(resp.get_header("content-type"), Some("application/json"));
}

#[test]
fn test_dispatch_post_and_list() {
    let router = pet_router();
    let dispatcher = pet_dispatcher();
    assert_eq!(dispatcher.handle(&router, "POST", "/pets").status, 201);
    let resp = dispatcher.handle(&router, "get", "/pets");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body[0]["name"], "Rex");
}

#[test]
fn test_dispatch_multiple_params_and_name() {
    let resp = pet_dispatcher().handle(&pet_router(), "GET", "/users/7/posts/99");
    assert_eq!(resp.status, 200);
    assert_eq!(
        resp.body,
        json!({ "route": "posts.show", "user": "7", "post": "99" })
    );
}

#[test]
fn test_dispatch_head_drops_body() {
    let resp = pet_dispatcher().handle(&pet_router(), "HEAD", "/pets/1");
    assert_eq!(resp.status, 200);
    assert!(resp.body.is_null());
}

#[test]
fn test_dispatch_method_not_allowed() {
    let resp = pet_dispatcher().handle(&pet_router(), "DELETE", "/pets");
    assert_eq!(resp.status, 405);
    assert_eq!(resp.get_header("Allow"), Some("GET, HEAD, POST"));
    assert_eq!(
        resp.get_header("content-type"),
        Some("application/problem+json")
    );
    assert_eq!(resp.body["status"], 405);
}

#[test]
fn test_dispatch_not_found() {
    let resp = pet_dispatcher().handle(&pet_router(), "GET", "/cats");
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body["title"], "Not Found");
    assert!(resp.get_header("allow").is_none());
}

#[test]
fn test_dispatch_panicking_handler_is_500() {
    let resp = pet_dispatcher().handle(&pet_router(), "GET", "/panic");
    assert_eq!(resp.status, 500);
}

#[test]
fn test_dispatch_unregistered_handler_is_404() {
    let router = pet_router();
    let dispatcher = pet_dispatcher();
    let resp = dispatcher.handle(&router, "GET", "/orphan");
    assert_eq!(resp.status, 404);

    let missing = dispatcher.missing_handlers(&router);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].as_str(), "orphan");
}
