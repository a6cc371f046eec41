//! Conflict detection
//!
//! Two registrations conflict when they end on the same trie node under the
//! same method: every concrete path that reaches one also reaches the other.
//! Because all parameter segments share a node's single dynamic edge,
//! `/users/{id}` and `/users/{name}` land on the same slot and conflict, while
//! `/users/profile` and `/users/{id}` land on different nodes and are resolved
//! by literal precedence at match time. The latter never warns.
//!
//! A conflict is never fatal. The registering call gets a [`ConflictWarning`]
//! back, the router keeps a copy for later inspection, and the warning is
//! logged.

use std::fmt;

use serde::Serialize;

use super::route::{HandlerRef, Route};
use crate::method::HttpMethod;

/// What kind of overlap was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The same pattern was registered twice for the method
    Duplicate,
    /// Same shape, different parameter names (`/a/{id}` vs `/a/{key}`)
    Ambiguous,
}

/// Which registration survived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The new route replaced the existing one (overwrite = true)
    Replaced,
    /// The existing route was kept and the new one dropped (overwrite = false)
    KeptExisting,
}

/// Non-fatal report produced when a registration conflicts with an earlier one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictWarning {
    pub kind: ConflictKind,
    pub resolution: Resolution,
    pub method: HttpMethod,
    pub existing_path: String,
    pub existing_handler: HandlerRef,
    pub incoming_path: String,
    pub incoming_handler: HandlerRef,
}

impl ConflictWarning {
    pub(crate) fn between(existing: &Route, incoming: &Route, resolution: Resolution) -> Self {
        let kind = if existing.pattern == incoming.pattern {
            ConflictKind::Duplicate
        } else {
            ConflictKind::Ambiguous
        };
        Self {
            kind,
            resolution,
            method: incoming.method.clone(),
            existing_path: existing.pattern.to_string(),
            existing_handler: existing.handler.clone(),
            incoming_path: incoming.pattern.to_string(),
            incoming_handler: incoming.handler.clone(),
        }
    }

    /// The handler that will serve this slot from now on
    #[must_use]
    pub fn winner(&self) -> &HandlerRef {
        match self.resolution {
            Resolution::Replaced => &self.incoming_handler,
            Resolution::KeptExisting => &self.existing_handler,
        }
    }
}

impl fmt::Display for ConflictWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ConflictKind::Duplicate => "duplicate route",
            ConflictKind::Ambiguous => "ambiguous route",
        };
        let outcome = match self.resolution {
            Resolution::Replaced => "replaced existing handler",
            Resolution::KeptExisting => "kept existing handler, new registration dropped",
        };
        write!(
            f,
            "{what} {} {} ({}) collides with {} ({}): {outcome}",
            self.method,
            self.incoming_path,
            self.incoming_handler,
            self.existing_path,
            self.existing_handler,
        )
    }
}
