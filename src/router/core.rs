//! Router core module - registration and the match hot path.
//!
//! `match_route` allocates nothing except the parameter values it returns;
//! parameter lists of up to [`MAX_INLINE_PARAMS`] entries stay on the stack.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use super::conflict::{ConflictWarning, Resolution};
use super::error::RouterError;
use super::pattern::RoutePattern;
use super::radix::{InsertOutcome, MethodMap, RadixTree};
use super::route::{HandlerRef, Route, RouteInfo, RouteOptions};
use crate::method::HttpMethod;
use crate::runtime_config::RouterConfig;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted path parameters in path order.
///
/// Names are shared with the route table (`Arc<str>`); values are copied from
/// the request path verbatim.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A successful lookup
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Path parameters extracted from the URL (e.g., `{id}` → `("id", "123")`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.route.handler
    }

    /// Convert path_params to a HashMap
    /// Note: This allocates - use get_path_param() in hot paths instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Methods registered for a path, as reported with a 405
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedMethods(BTreeSet<HttpMethod>);

impl AllowedMethods {
    fn from_routes(routes: &MethodMap) -> Self {
        let mut set: BTreeSet<HttpMethod> = routes.keys().cloned().collect();
        if set.contains(&HttpMethod::Get) {
            set.insert(HttpMethod::Head);
        }
        Self(set)
    }

    #[must_use]
    pub fn contains(&self, method: &HttpMethod) -> bool {
        self.0.contains(method)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HttpMethod> + '_ {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for an HTTP `Allow` header, e.g. `GET, HEAD, PUT`
    #[must_use]
    pub fn allow_header(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AllowedMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, method) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(method.as_str())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AllowedMethods {
    type Item = &'a HttpMethod;
    type IntoIter = std::collections::btree_set::Iter<'a, HttpMethod>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<HttpMethod> for AllowedMethods {
    fn from_iter<I: IntoIterator<Item = HttpMethod>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of a lookup. Never an error: every (method, path) pair gets one.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Matched(RouteMatch),
    /// The path exists but has no route for the method (HTTP 405)
    MethodNotAllowed { allowed: AllowedMethods },
    /// The path does not exist (HTTP 404)
    NotFound,
}

impl MatchOutcome {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    /// HTTP status a dispatcher should answer with when no handler runs
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            MatchOutcome::Matched(_) => 200,
            MatchOutcome::MethodNotAllowed { .. } => 405,
            MatchOutcome::NotFound => 404,
        }
    }

    #[must_use]
    pub fn into_match(self) -> Option<RouteMatch> {
        match self {
            MatchOutcome::Matched(m) => Some(m),
            _ => None,
        }
    }
}

/// Result of one registration call
#[derive(Debug, Clone)]
pub struct Registration {
    /// The route now serving this (path, method) slot. When the registration
    /// was dropped this is the earlier route, not the one passed in.
    pub route: Arc<Route>,
    /// `false` when an existing route was kept and the new one dropped
    pub accepted: bool,
    /// Set when the registration collided with an earlier one
    pub warning: Option<ConflictWarning>,
}

/// Route table and matcher
///
/// Build it with repeated [`add_route`](Router::add_route) calls at startup,
/// then share it read-only (`&Router`, `Arc<Router>` or a
/// [`SharedRouter`](super::SharedRouter)) with request workers.
///
/// ```rust
/// use routematch::router::{MatchOutcome, Router};
///
/// let mut router = Router::new();
/// router.get("/users/{user_id}", "get_user").unwrap();
///
/// match router.match_route("GET", "/users/42") {
///     MatchOutcome::Matched(m) => assert_eq!(m.get_path_param("user_id"), Some("42")),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router {
    tree: RadixTree,
    /// Live routes in registration order (introspection only, never matched)
    routes: Vec<Arc<Route>>,
    warnings: Vec<ConflictWarning>,
    config: RouterConfig,
}

impl Router {
    /// An empty router with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register a handler for a method and path pattern.
    ///
    /// The method is case-insensitive. Conflicts with earlier registrations are
    /// reported in the returned [`Registration`] and never fail the call.
    ///
    /// # Errors
    ///
    /// Only for unusable input: an invalid method token, a pattern with
    /// ambiguous braces, or a pattern repeating a parameter name.
    pub fn add_route(
        &mut self,
        method: &str,
        pattern: &str,
        handler: impl Into<HandlerRef>,
        options: RouteOptions,
    ) -> Result<Registration, RouterError> {
        let method = HttpMethod::parse(method)?;
        let pattern = RoutePattern::compile(pattern)?;
        Ok(self.insert(method, pattern, handler.into(), options))
    }

    /// Register one handler under several methods at once.
    ///
    /// Every method and the pattern are validated before anything is
    /// registered, so an error leaves the table unchanged. Methods are
    /// registered in the order given; repeats are registered once.
    pub fn route<I, S>(
        &mut self,
        pattern: &str,
        methods: I,
        handler: impl Into<HandlerRef>,
        options: RouteOptions,
    ) -> Result<Vec<Registration>, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: SmallVec<[HttpMethod; 4]> = SmallVec::new();
        for method in methods {
            let method = HttpMethod::parse(method.as_ref())?;
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        let pattern = RoutePattern::compile(pattern)?;
        let handler = handler.into();

        Ok(unique
            .into_iter()
            .map(|method| self.insert(method, pattern.clone(), handler.clone(), options.clone()))
            .collect())
    }

    pub fn get(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerRef>,
    ) -> Result<Registration, RouterError> {
        self.add_route("GET", pattern, handler, RouteOptions::default())
    }

    pub fn post(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerRef>,
    ) -> Result<Registration, RouterError> {
        self.add_route("POST", pattern, handler, RouteOptions::default())
    }

    pub fn put(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerRef>,
    ) -> Result<Registration, RouterError> {
        self.add_route("PUT", pattern, handler, RouteOptions::default())
    }

    pub fn delete(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerRef>,
    ) -> Result<Registration, RouterError> {
        self.add_route("DELETE", pattern, handler, RouteOptions::default())
    }

    pub fn patch(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerRef>,
    ) -> Result<Registration, RouterError> {
        self.add_route("PATCH", pattern, handler, RouteOptions::default())
    }

    fn insert(
        &mut self,
        method: HttpMethod,
        pattern: RoutePattern,
        handler: HandlerRef,
        options: RouteOptions,
    ) -> Registration {
        let overwrite = options.overwrite.unwrap_or(self.config.default_overwrite);
        let name = options
            .name
            .unwrap_or_else(|| handler.as_str().to_string());
        let route = Arc::new(Route {
            method,
            pattern,
            handler,
            name,
            tags: options.tags,
        });

        match self.tree.insert(Arc::clone(&route), overwrite) {
            InsertOutcome::Inserted => {
                debug!(
                    method = %route.method,
                    pattern = %route.pattern,
                    handler = %route.handler,
                    "Route registered"
                );
                self.routes.push(Arc::clone(&route));
                Registration {
                    route,
                    accepted: true,
                    warning: None,
                }
            }
            InsertOutcome::Replaced(previous) => {
                let warning = ConflictWarning::between(&previous, &route, Resolution::Replaced);
                if let Some(slot) = self.routes.iter_mut().find(|r| Arc::ptr_eq(r, &previous)) {
                    *slot = Arc::clone(&route);
                }
                self.record(&warning);
                Registration {
                    route,
                    accepted: true,
                    warning: Some(warning),
                }
            }
            InsertOutcome::Rejected(existing) => {
                let warning =
                    ConflictWarning::between(&existing, &route, Resolution::KeptExisting);
                self.record(&warning);
                Registration {
                    route: existing,
                    accepted: false,
                    warning: Some(warning),
                }
            }
        }
    }

    fn record(&mut self, warning: &ConflictWarning) {
        warn!(
            kind = ?warning.kind,
            resolution = ?warning.resolution,
            method = %warning.method,
            existing = %warning.existing_path,
            incoming = %warning.incoming_path,
            winner = %warning.winner(),
            "Route conflict: {}",
            warning
        );
        self.warnings.push(warning.clone());
    }

    /// Resolve a request to a route, a 405 or a 404.
    ///
    /// `method` is matched case-insensitively. `path` is used as delivered by
    /// the transport layer; parameter values are not decoded.
    #[must_use]
    pub fn match_route(&self, method: &str, path: &str) -> MatchOutcome {
        self.match_method(&HttpMethod::normalize(method), path)
    }

    /// [`match_route`](Router::match_route) for an already-normalised method
    #[must_use]
    pub fn match_method(&self, method: &HttpMethod, path: &str) -> MatchOutcome {
        let match_start = Instant::now();
        let outcome = self.resolve(method, path);
        let match_duration = match_start.elapsed();

        if match_duration > self.config.slow_match_threshold {
            warn!(
                method = %method,
                path = %path,
                status = outcome.status(),
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            trace!(
                method = %method,
                path = %path,
                status = outcome.status(),
                duration_us = match_duration.as_micros(),
                "Route match attempt"
            );
        }

        outcome
    }

    fn resolve(&self, method: &HttpMethod, path: &str) -> MatchOutcome {
        let Some((routes, captures)) = self.tree.search(path) else {
            return MatchOutcome::NotFound;
        };
        if routes.is_empty() {
            return MatchOutcome::NotFound;
        }

        let route = routes.get(method).or_else(|| {
            // HEAD is served by the GET handler unless registered explicitly.
            if *method == HttpMethod::Head {
                routes.get(&HttpMethod::Get)
            } else {
                None
            }
        });

        let Some(route) = route else {
            return MatchOutcome::MethodNotAllowed {
                allowed: AllowedMethods::from_routes(routes),
            };
        };

        // Captures are positional; bind them to this route's own names since
        // the dynamic edge is shared by every parameter name at that depth.
        let path_params: ParamVec = route
            .pattern
            .param_names()
            .zip(captures)
            .map(|(name, value)| (Arc::clone(name), value.to_owned()))
            .collect();

        MatchOutcome::Matched(RouteMatch {
            route: Arc::clone(route),
            path_params,
        })
    }

    /// Methods a path accepts, or `None` if the path has no routes.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Option<AllowedMethods> {
        let (routes, _) = self.tree.search(path)?;
        if routes.is_empty() {
            return None;
        }
        Some(AllowedMethods::from_routes(routes))
    }

    /// Every live route in registration order
    #[must_use]
    pub fn list_routes(&self) -> Vec<RouteInfo> {
        self.routes.iter().map(|r| r.info()).collect()
    }

    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Conflict warnings accumulated since construction (or the last take)
    #[must_use]
    pub fn warnings(&self) -> &[ConflictWarning] {
        &self.warnings
    }

    /// Hand accumulated warnings to the caller, clearing them
    pub fn take_warnings(&mut self) -> Vec<ConflictWarning> {
        std::mem::take(&mut self.warnings)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Log a one-line summary of the table (first 10 routes)
    pub fn log_summary(&self) {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.pattern))
            .collect();

        info!(
            routes_count = self.routes.len(),
            trie_nodes = self.tree.node_count(),
            conflicts = self.warnings.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }
}
