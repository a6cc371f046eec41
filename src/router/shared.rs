//! Lock-free published router snapshots
//!
//! Request workers read the current [`Router`] through an `ArcSwap` without
//! taking any lock. Writers are serialised by a mutex; each write clones the
//! current table, applies the change to the clone and publishes it with a
//! single atomic store. A lookup that started before the store finishes on
//! the snapshot it loaded, so no reader ever sees a half-inserted route.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::{ArcSwap, Guard};
use tracing::info;

use super::core::{MatchOutcome, Registration, Router};
use super::error::RouterError;
use super::route::{HandlerRef, RouteInfo, RouteOptions};

/// A [`Router`] that can be queried concurrently and updated at runtime
#[derive(Debug)]
pub struct SharedRouter {
    current: ArcSwap<Router>,
    writer: Mutex<()>,
}

impl Default for SharedRouter {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl SharedRouter {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
            writer: Mutex::new(()),
        }
    }

    /// Borrow the current snapshot. Cheap; intended for a single request.
    #[must_use]
    pub fn snapshot(&self) -> Guard<Arc<Router>> {
        self.current.load()
    }

    /// Owned handle on the current snapshot
    #[must_use]
    pub fn load(&self) -> Arc<Router> {
        self.current.load_full()
    }

    #[must_use]
    pub fn match_route(&self, method: &str, path: &str) -> MatchOutcome {
        self.current.load().match_route(method, path)
    }

    #[must_use]
    pub fn list_routes(&self) -> Vec<RouteInfo> {
        self.current.load().list_routes()
    }

    /// Apply a fallible change to a copy of the table and publish it on success.
    ///
    /// On error nothing is published and the live snapshot is unchanged.
    pub fn try_update<T, E, F>(&self, change: F) -> Result<T, E>
    where
        F: FnOnce(&mut Router) -> Result<T, E>,
    {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Router::clone(&self.current.load());
        let out = change(&mut next)?;
        self.current.store(Arc::new(next));
        Ok(out)
    }

    /// Apply an infallible change and publish it
    pub fn update<T, F>(&self, change: F) -> T
    where
        F: FnOnce(&mut Router) -> T,
    {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Router::clone(&self.current.load());
        let out = change(&mut next);
        self.current.store(Arc::new(next));
        out
    }

    /// Register a route at runtime
    pub fn add_route(
        &self,
        method: &str,
        pattern: &str,
        handler: impl Into<HandlerRef>,
        options: RouteOptions,
    ) -> Result<Registration, RouterError> {
        let handler = handler.into();
        self.try_update(|router| router.add_route(method, pattern, handler, options))
    }

    /// Replace the whole table, returning the previous snapshot.
    ///
    /// Pass an `Arc<Router>` to keep a handle on exactly what was published.
    pub fn publish(&self, router: impl Into<Arc<Router>>) -> Arc<Router> {
        let router = router.into();
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        info!(routes_count = router.len(), "Publishing new routing table");
        self.current.swap(router)
    }
}
