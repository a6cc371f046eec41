//! # Router Module
//!
//! Path matching and route resolution. Given registered
//! (method, pattern, handler) triples, the router resolves an incoming
//! (method, path) pair to one of three outcomes:
//!
//! - **Matched** - a route plus its path parameters, in path order
//! - **MethodNotAllowed** - the path exists, the method does not (405 + `Allow`)
//! - **NotFound** - the path does not exist (404)
//!
//! ## Architecture
//!
//! 1. **Compilation**: at registration, patterns such as `/pets/{id}` are
//!    compiled into literal and parameter segments ([`RoutePattern`]).
//!
//! 2. **Indexing**: segments are inserted into an arena-backed trie with one
//!    map of literal children and a single dynamic edge per node. Routes hang
//!    off the terminal node keyed by [`HttpMethod`](crate::method::HttpMethod).
//!    Registrations that land on an occupied (node, method) slot produce a
//!    [`ConflictWarning`] instead of failing.
//!
//! 3. **Matching**: the request path is walked segment by segment, preferring
//!    literal edges over the dynamic one. The method is resolved at the end
//!    of the walk, which is what separates a 405 from a 404.
//!
//! ## Example
//!
//! ```rust
//! use routematch::router::{MatchOutcome, Router};
//!
//! let mut router = Router::new();
//! router.get("/users/profile", "own_profile").unwrap();
//! router.get("/users/{user_id}", "get_user").unwrap();
//!
//! // literal segments win over parameters
//! let m = router.match_route("GET", "/users/profile").into_match().unwrap();
//! assert_eq!(m.route.handler.as_str(), "own_profile");
//!
//! // the path exists, but only for GET (and the implied HEAD)
//! match router.match_route("PUT", "/users/42") {
//!     MatchOutcome::MethodNotAllowed { allowed } => {
//!         assert_eq!(allowed.allow_header(), "GET, HEAD")
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Concurrency
//!
//! [`Router`] is immutable during lookups (`&self`) and is `Send + Sync`.
//! Build it at startup and share it. When routes must change while traffic is
//! flowing, wrap it in a [`SharedRouter`], which publishes copy-on-write
//! snapshots.
//!
//! ## Performance
//!
//! - Lookup is O(k) in the number of path segments, not the number of routes
//! - Shared prefixes are stored once
//! - No allocation per lookup besides the returned parameter values

mod conflict;
mod core;
mod error;
mod pattern;
mod radix;
mod route;
mod shared;
#[cfg(test)]
mod performance_tests;

pub use self::conflict::{ConflictKind, ConflictWarning, Resolution};
pub use self::core::{
    AllowedMethods, MatchOutcome, ParamVec, Registration, RouteMatch, Router, MAX_INLINE_PARAMS,
};
pub use self::error::RouterError;
pub use self::pattern::{path_components, RoutePattern, Segment};
pub use self::route::{HandlerRef, Route, RouteInfo, RouteOptions};
pub use self::shared::SharedRouter;
