//! # Hot Reload Module
//!
//! Live reloading of route manifests without restarting the process.
//!
//! ## Overview
//!
//! [`watch_manifest`] watches a manifest file and, on every modification:
//! - reloads and parses the manifest
//! - builds a fresh [`Router`] from it
//! - publishes the new table into a [`SharedRouter`] with one atomic swap
//! - calls the provided hook with the new snapshot
//!
//! Requests in flight keep matching against the snapshot they loaded; new
//! requests see the new table as soon as it is stored.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use routematch::hot_reload::watch_manifest;
//! use routematch::router::SharedRouter;
//! use routematch::runtime_config::RouterConfig;
//! use std::sync::Arc;
//!
//! let shared = Arc::new(SharedRouter::new(router));
//! let watcher = watch_manifest("routes.yaml", shared.clone(), RouterConfig::from_env(), |r| {
//!     println!("Reloaded {} routes", r.len());
//! })?;
//!
//! // Keep watcher alive for as long as reloads should happen
//! ```
//!
//! ## Error Handling
//!
//! If the new manifest fails to parse, contains a fatal pattern error, or
//! (with `strict_conflicts`) produced conflict warnings:
//! - the error is logged
//! - the previous table remains active
//!
//! Hot reload is a development convenience; production deployments should
//! ship route tables with the binary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::manifest::RouteManifest;
use crate::router::{Router, SharedRouter};
use crate::runtime_config::RouterConfig;

/// Rebuild the table from `manifest_path` and publish it into `shared`.
///
/// Returns the newly published snapshot. On error nothing is published.
pub fn reload_manifest(
    manifest_path: &Path,
    shared: &SharedRouter,
    config: RouterConfig,
) -> Result<Arc<Router>> {
    let manifest = RouteManifest::load(manifest_path)?;
    let router = manifest.build_router(config)?;

    if config.strict_conflicts && !router.warnings().is_empty() {
        for warning in router.warnings() {
            warn!(path = %manifest_path.display(), "{}", warning);
        }
        bail!(
            "{} route conflict(s) in {} with strict conflicts enabled",
            router.warnings().len(),
            manifest_path.display()
        );
    }

    router.log_summary();
    let router = Arc::new(router);
    shared.publish(Arc::clone(&router));
    Ok(router)
}

/// Watch a route manifest and republish the router when it changes.
///
/// The returned watcher must be kept alive; dropping it stops reloading.
pub fn watch_manifest<P, F>(
    manifest_path: P,
    shared: Arc<SharedRouter>,
    config: RouterConfig,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&Router) + Send + 'static,
{
    let path: PathBuf = manifest_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match reload_manifest(&watch_path, &shared, config) {
                        Ok(router) => {
                            info!(
                                path = %watch_path.display(),
                                routes = router.len(),
                                "hot-reload: applied route table"
                            );
                            on_reload(&router);
                        }
                        Err(e) => warn!(
                            path = %watch_path.display(),
                            error = %format!("{e:#}"),
                            "hot-reload: keeping previous route table"
                        ),
                    }
                }
            }
            Err(e) => warn!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
