//! # Route Manifests
//!
//! Declarative route tables loaded from YAML, TOML or JSON. A manifest is the
//! file-based counterpart of a sequence of `add_route` calls: entries are
//! registered in file order, so conflicts resolve exactly as they would in
//! code.
//!
//! ```yaml
//! prefix: /api            # optional; prepended to every path verbatim
//! routes:
//!   - method: GET
//!     path: /users/{user_id}
//!     handler: get_user
//!   - methods: [PUT, PATCH]
//!     path: /users/{user_id}
//!     handler: update_user
//!     name: users.update
//!     overwrite: true
//!     tags: [users]
//! ```
//!
//! The prefix is plain string concatenation performed before compilation;
//! `prefix: /api` with `path: /` registers `/api/`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::router::{RouteOptions, Router};
use crate::runtime_config::RouterConfig;

/// A route table as read from a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default)]
    pub routes: Vec<ManifestRoute>,
}

/// One manifest entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    pub path: String,
    pub handler: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ManifestRoute {
    /// `method` and `methods` combined, in declaration order
    pub fn all_methods(&self) -> impl Iterator<Item = &str> + '_ {
        self.method
            .iter()
            .chain(self.methods.iter())
            .map(String::as_str)
    }

    fn options(&self) -> RouteOptions {
        RouteOptions {
            name: self.name.clone(),
            overwrite: self.overwrite,
            tags: self.tags.clone(),
        }
    }
}

impl RouteManifest {
    /// Load a manifest, choosing the format by file extension
    /// (`.yaml`/`.yml`, `.toml`, `.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route manifest {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let manifest = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "toml" => Self::from_toml_str(&content),
            "json" => Self::from_json_str(&content),
            other => bail!(
                "Unsupported route manifest extension '{}' for {} (expected yaml, yml, toml or json)",
                other,
                path.display()
            ),
        }
        .with_context(|| format!("Failed to parse route manifest {}", path.display()))?;

        debug!(path = %path.display(), routes = manifest.routes.len(), "Route manifest loaded");
        Ok(manifest)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Invalid YAML route manifest")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML route manifest")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid JSON route manifest")
    }

    /// Register every entry, in order, into a new router.
    ///
    /// Conflicts are recorded on the router as warnings; fatal pattern or
    /// method errors abort with the offending entry in the error context.
    pub fn build_router(&self, config: RouterConfig) -> Result<Router> {
        let mut router = Router::with_config(config);
        let prefix = self.prefix.as_deref().unwrap_or("");

        for (index, entry) in self.routes.iter().enumerate() {
            let full_path = format!("{}{}", prefix, entry.path);
            let methods: Vec<&str> = entry.all_methods().collect();
            if methods.is_empty() {
                bail!(
                    "Route #{} ({} -> {}) declares no method",
                    index + 1,
                    full_path,
                    entry.handler
                );
            }

            router
                .route(&full_path, methods, entry.handler.as_str(), entry.options())
                .with_context(|| {
                    format!(
                        "Invalid route #{} ({} -> {})",
                        index + 1,
                        full_path,
                        entry.handler
                    )
                })?;
        }

        info!(
            routes = router.len(),
            conflicts = router.warnings().len(),
            "Route manifest applied"
        );
        Ok(router)
    }
}
