use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::pattern::RoutePattern;
use crate::method::HttpMethod;

/// Opaque handler identifier
///
/// The matcher never calls handlers; it hands this reference back in
/// [`MatchOutcome::Matched`](super::MatchOutcome::Matched) and the dispatcher
/// resolves it. Cloning is an atomic increment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerRef(Arc<str>);

impl HandlerRef {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandlerRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for HandlerRef {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl Borrow<str> for HandlerRef {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for HandlerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HandlerRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(HandlerRef::from)
    }
}

/// Per-registration options
///
/// Replaces keyword arguments on the registration call. `Default` gives an
/// inferred name, the router's configured overwrite policy and no tags.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    /// Route name; defaults to the handler id
    pub name: Option<String>,
    /// Replace an existing route for the same (path, method) slot.
    /// `None` falls back to [`RouterConfig::default_overwrite`](crate::runtime_config::RouterConfig).
    pub overwrite: Option<bool>,
    /// Free-form tags carried through to introspection
    pub tags: Vec<String>,
}

impl RouteOptions {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// One registered route. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: HttpMethod,
    pub pattern: RoutePattern,
    pub handler: HandlerRef,
    pub name: String,
    pub tags: Vec<String>,
}

impl Route {
    /// Snapshot of this route for introspection
    #[must_use]
    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            method: self.method.clone(),
            path: self.pattern.to_string(),
            name: self.name.clone(),
            handler: self.handler.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Introspection record returned by [`Router::list_routes`](super::Router::list_routes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: HttpMethod,
    /// Pattern rendered back to a string (`{name}` for parameters)
    pub path: String,
    pub name: String,
    pub handler: HandlerRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_ref_serializes_as_plain_string() {
        let handler = HandlerRef::from("get_user");
        assert_eq!(serde_json::to_string(&handler).unwrap(), "\"get_user\"");

        let back: HandlerRef = serde_json::from_str("\"list_users\"").unwrap();
        assert_eq!(back.as_str(), "list_users");
    }

    #[test]
    fn test_route_info_json_carries_handler_id() {
        let route = Route {
            method: HttpMethod::Get,
            pattern: RoutePattern::compile("/users/{id}").unwrap(),
            handler: HandlerRef::from("get_user"),
            name: "users.get".to_string(),
            tags: Vec::new(),
        };
        let json = serde_json::to_value(route.info()).unwrap();
        assert_eq!(json["handler"], "get_user");
        assert_eq!(json["path"], "/users/{id}");
        assert!(json.get("tags").is_none());
    }
}
