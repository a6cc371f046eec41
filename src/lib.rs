//! # routematch
//!
//! **routematch** is a trie-based dynamic HTTP route matcher. Given a set of
//! registered (method, path-pattern, handler) triples it resolves an incoming
//! (method, path) pair to a handler and its path parameters, or tells the
//! caller precisely why it could not: the path does not exist (404), or it
//! exists but not for this method (405, with the exact `Allow` set).
//!
//! ## Architecture
//!
//! - **[`method`]** - case-insensitive normalisation into a closed method enum
//! - **[`router`]** - pattern compiler, arena trie, matcher, conflict detection,
//!   introspection, and lock-free published snapshots
//! - **[`dispatcher`]** - maps handler ids to functions and turns match
//!   outcomes into 200 / 404 / 405 responses
//! - **[`manifest`]** - declarative route tables in YAML, TOML or JSON
//! - **[`hot_reload`]** - republish a router when its manifest changes
//! - **[`runtime_config`]** - environment-driven router defaults
//! - **[`otel`]** - structured logging setup
//! - **[`cli`]** - the `routematch` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Router
//!     participant Dispatcher
//!     participant Handler
//!
//!     Transport->>Router: match_route("GET", "/users/42")
//!     Router->>Router: Walk trie (literal edge first,<br/>then dynamic edge)
//!     alt Path leaves the trie / no routes at node
//!         Router-->>Dispatcher: NotFound
//!         Dispatcher-->>Transport: 404
//!     else Path exists, method absent
//!         Router-->>Dispatcher: MethodNotAllowed {GET, HEAD}
//!         Dispatcher-->>Transport: 405 + Allow
//!     else Route found
//!         Router-->>Dispatcher: Matched(route, {user_id: "42"})
//!         Dispatcher->>Handler: HandlerRequest
//!         Handler-->>Dispatcher: HandlerResponse
//!         Dispatcher-->>Transport: response
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routematch::router::{MatchOutcome, RouteOptions, Router};
//!
//! let mut router = Router::new();
//! router.get("/users/profile", "own_profile").unwrap();
//! router.get("/users/{user_id}", "get_user").unwrap();
//! router
//!     .add_route("post", "/users", "create_user", RouteOptions::named("users.create"))
//!     .unwrap();
//!
//! match router.match_route("GET", "/users/42") {
//!     MatchOutcome::Matched(m) => {
//!         assert_eq!(m.route.handler.as_str(), "get_user");
//!         assert_eq!(m.get_path_param("user_id"), Some("42"));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//!
//! assert_eq!(router.match_route("DELETE", "/users").status(), 405);
//! assert_eq!(router.match_route("GET", "/teams").status(), 404);
//! ```
//!
//! ## Concurrency
//!
//! A built [`Router`](router::Router) is read-only for lookups and can be
//! shared across threads as is. For registration after traffic has started,
//! use [`SharedRouter`](router::SharedRouter): reads are lock-free, writes are
//! serialised and published as whole new snapshots.

pub mod cli;
pub mod dispatcher;
pub mod hot_reload;
pub mod manifest;
pub mod method;
pub mod otel;
pub mod router;
pub mod runtime_config;

pub use method::HttpMethod;
pub use router::{
    ConflictWarning, HandlerRef, MatchOutcome, RouteMatch, RouteOptions, Router, RouterError,
    SharedRouter,
};
