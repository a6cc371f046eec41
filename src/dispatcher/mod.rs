//! # Dispatcher Module
//!
//! The boundary between the matcher and the code that answers requests. The
//! router resolves a path to a [`HandlerRef`](crate::router::HandlerRef); the
//! dispatcher owns the functions behind those ids and turns every
//! [`MatchOutcome`](crate::router::MatchOutcome) into a response:
//!
//! | Outcome | Response |
//! |---|---|
//! | `Matched` | handler result, params in the request (HEAD: body dropped) |
//! | `MethodNotAllowed` | `405` + `Allow` header, RFC 7807 body |
//! | `NotFound` | `404`, RFC 7807 body |
//!
//! Handlers that panic are caught and answered with `500`.
//!
//! ## Handler Registration
//!
//! ```rust
//! use routematch::dispatcher::{Dispatcher, HandlerResponse};
//! use routematch::router::Router;
//!
//! let mut router = Router::new();
//! router.get("/pets/{id}", "get_pet").unwrap();
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register("get_pet", |req| {
//!     HandlerResponse::json(200, serde_json::json!({ "id": req.get_path_param("id") }))
//! });
//!
//! let resp = dispatcher.handle(&router, "GET", "/pets/7");
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body["id"], "7");
//!
//! let resp = dispatcher.handle(&router, "DELETE", "/pets/7");
//! assert_eq!(resp.status, 405);
//! assert_eq!(resp.get_header("Allow"), Some("GET, HEAD"));
//! ```

mod core;

pub use self::core::{
    Dispatcher, HandlerFn, HandlerRequest, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS,
};
