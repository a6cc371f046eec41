//! Dispatcher core - turns a [`MatchOutcome`] into a response.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, error, warn};

use crate::method::HttpMethod;
use crate::router::{AllowedMethods, HandlerRef, MatchOutcome, ParamVec, Router};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Response header storage (stack-allocated for ≤16 headers)
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request data handed to a handler
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    pub method: HttpMethod,
    pub path: String,
    pub handler: HandlerRef,
    /// Name of the matched route
    pub route_name: String,
    /// Path parameters in path order
    pub path_params: ParamVec,
}

impl HandlerRequest {
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Response produced by a handler or by the dispatcher itself
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 405, etc.)
    pub status: u16,
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// RFC 7807 problem details response
    #[must_use]
    pub fn problem(status: u16, title: &str, detail: &str) -> Self {
        let mut resp = Self::json(
            status,
            serde_json::json!({
                "type": "about:blank",
                "title": title,
                "status": status,
                "detail": detail,
            }),
        );
        if let Some((_, v)) = resp.headers.first_mut() {
            *v = "application/problem+json".to_string();
        }
        resp
    }

    /// Get a header by name (case-insensitive)
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_header(&mut self, name: &str, value: String) {
        if let Some((_, v)) = self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            *v = value;
        } else {
            self.headers.push((Arc::from(name), value));
        }
    }
}

/// Handler function type
pub type HandlerFn = Arc<dyn Fn(HandlerRequest) -> HandlerResponse + Send + Sync>;

/// Resolves matched routes to registered handler functions
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<HandlerRef, HandlerFn>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(HandlerRef::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Dispatcher").field("handlers", &names).finish()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the function behind a handler id
    pub fn register<F>(&mut self, handler: impl Into<HandlerRef>, f: F)
    where
        F: Fn(HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        let handler = handler.into();
        if self.handlers.insert(handler.clone(), Arc::new(f)).is_some() {
            warn!(handler = %handler, "Handler re-registered, previous function replaced");
        }
    }

    #[must_use]
    pub fn has_handler(&self, handler: &str) -> bool {
        self.handlers.contains_key(handler)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler ids referenced by `router` that have no function registered
    #[must_use]
    pub fn missing_handlers(&self, router: &Router) -> Vec<HandlerRef> {
        let mut missing: Vec<HandlerRef> = router
            .routes()
            .iter()
            .map(|r| r.handler.clone())
            .filter(|h| !self.handlers.contains_key(h.as_str()))
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// Match and dispatch in one step
    #[must_use]
    pub fn handle(&self, router: &Router, method: &str, path: &str) -> HandlerResponse {
        let method = HttpMethod::normalize(method);
        let outcome = router.match_method(&method, path);
        self.dispatch(outcome, &method, path)
    }

    /// Produce a response for a lookup outcome.
    ///
    /// - `Matched`: the handler runs with the path parameters; a panicking
    ///   handler becomes a 500 and a missing one a 404. HEAD responses have
    ///   their body removed.
    /// - `MethodNotAllowed`: 405 with an `Allow` header.
    /// - `NotFound`: 404.
    #[must_use]
    pub fn dispatch(&self, outcome: MatchOutcome, method: &HttpMethod, path: &str) -> HandlerResponse {
        match outcome {
            MatchOutcome::Matched(route_match) => {
                let handler = route_match.route.handler.clone();
                let Some(f) = self.handlers.get(&handler) else {
                    warn!(handler = %handler, path = %path, "Handler not registered");
                    return HandlerResponse::problem(
                        404,
                        "Not Found",
                        &format!("No handler registered for '{handler}'"),
                    );
                };

                let request = HandlerRequest {
                    method: method.clone(),
                    path: path.to_string(),
                    handler: handler.clone(),
                    route_name: route_match.route.name.clone(),
                    path_params: route_match.path_params,
                };

                debug!(handler = %handler, method = %method, path = %path, "Dispatching request");
                let mut response = match catch_unwind(AssertUnwindSafe(|| f(request))) {
                    Ok(resp) => resp,
                    Err(_) => {
                        error!(handler = %handler, method = %method, path = %path, "Handler panicked");
                        HandlerResponse::problem(
                            500,
                            "Internal Server Error",
                            "The handler failed while processing the request",
                        )
                    }
                };
                if *method == HttpMethod::Head {
                    response.body = Value::Null;
                }
                response
            }
            MatchOutcome::MethodNotAllowed { allowed } => method_not_allowed(method, path, &allowed),
            MatchOutcome::NotFound => HandlerResponse::problem(
                404,
                "Not Found",
                &format!("No route matches '{path}'"),
            ),
        }
    }
}

fn method_not_allowed(method: &HttpMethod, path: &str, allowed: &AllowedMethods) -> HandlerResponse {
    let mut resp = HandlerResponse::problem(
        405,
        "Method Not Allowed",
        &format!("{method} is not supported for '{path}'"),
    );
    resp.set_header("allow", allowed.allow_header());
    if *method == HttpMethod::Head {
        resp.body = Value::Null;
    }
    resp
}
