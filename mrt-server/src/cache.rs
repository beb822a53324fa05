//! Caching layer for planned routes.
//!
//! The network is static for the lifetime of the process, so a planned
//! route for a given station pair never goes stale. The cache bounds
//! memory, not freshness: entries are evicted by capacity and a generous
//! TTL. No-route outcomes are cached too; errors are not.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::StationId;
use crate::planner::{PlanError, PlannedRoute, Planner};

/// Cache key: (start, destination) station pair.
type RouteKey = (StationId, StationId);

/// Cached outcome: a planned route, or `None` for station pairs the
/// network does not connect.
type RouteEntry = Option<Arc<PlannedRoute>>;

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// A planner with a route cache in front of it.
pub struct CachedPlanner {
    planner: Planner,
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl CachedPlanner {
    /// Wraps a planner with a cache of the given configuration.
    pub fn new(planner: Planner, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { planner, routes }
    }

    /// Plans a route, reusing a cached outcome when one exists.
    ///
    /// # Errors
    ///
    /// Propagates [`PlanError`] from the underlying planner. Failed
    /// queries are not cached.
    pub async fn plan(
        &self,
        start: &StationId,
        destination: &StationId,
    ) -> Result<Option<Arc<PlannedRoute>>, PlanError> {
        let key = (start.clone(), destination.clone());

        if let Some(entry) = self.routes.get(&key).await {
            trace!(start = %start, destination = %destination, "route cache hit");
            return Ok(entry);
        }

        let planned = self.planner.plan(start, destination)?.map(Arc::new);
        self.routes.insert(key, planned.clone()).await;

        Ok(planned)
    }

    /// The underlying planner.
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Number of cached entries (eventually consistent, for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Drops every cached entry.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}
