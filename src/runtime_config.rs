//! # Runtime Configuration Module
//!
//! Environment-driven defaults for router behaviour. Load once at startup with
//! [`RouterConfig::from_env()`] and hand the result to
//! [`Router::with_config`](crate::router::Router::with_config).
//!
//! ## Environment Variables
//!
//! ### `ROUTEMATCH_OVERWRITE`
//!
//! Default overwrite policy for registrations that do not set
//! [`RouteOptions::overwrite`](crate::router::RouteOptions). When `true`, a
//! later registration for the same (path, method) slot replaces the earlier
//! one; when `false` the earlier one is kept. Either way a conflict warning is
//! recorded.
//!
//! Default: `false`
//!
//! ### `ROUTEMATCH_SLOW_MATCH_US`
//!
//! A single lookup slower than this many microseconds is logged at `WARN`.
//!
//! Default: `1000`
//!
//! ### `ROUTEMATCH_STRICT_CONFLICTS`
//!
//! Treat conflict warnings as failures where a caller can refuse a table:
//! `routematch check` exits non-zero and hot reload keeps the previous
//! snapshot.
//!
//! Default: `false`
//!
//! ## Usage
//!
//! ```rust
//! use routematch::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("overwrite by default: {}", config.default_overwrite);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Router behaviour loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Overwrite policy when a registration does not specify one
    pub default_overwrite: bool,
    /// Lookups slower than this are logged at WARN
    pub slow_match_threshold: Duration,
    /// Refuse route tables that produced conflict warnings
    pub strict_conflicts: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_overwrite: false,
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
            strict_conflicts: false,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_overwrite: env_bool("ROUTEMATCH_OVERWRITE")
                .unwrap_or(defaults.default_overwrite),
            slow_match_threshold: env::var("ROUTEMATCH_SLOW_MATCH_US")
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_micros)
                .unwrap_or(defaults.slow_match_threshold),
            strict_conflicts: env_bool("ROUTEMATCH_STRICT_CONFLICTS")
                .unwrap_or(defaults.strict_conflicts),
        }
    }
}

/// Read a boolean environment variable; unset or unrecognised gives `None`
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|v| parse_bool(&v))
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive)
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
