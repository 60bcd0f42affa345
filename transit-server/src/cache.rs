//! Response cache for planning results.
//!
//! Planning is read-only and deterministic for a fixed data set, so
//! responses are cached under a canonical key derived from the request
//! parameters. The cache wraps the planner's entry point from the outside
//! (get before compute, set after); the planner itself never sees it.
//! Invalidation is by key prefix and is driven by the mutation endpoints
//! of the surrounding system whenever network data changes; the core
//! never invalidates anything itself.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Itinerary;
use crate::planner::{Endpoint, PlanRequest};

/// Key prefix for journey-planning entries.
pub const JOURNEY_PREFIX: &str = "journey:";

/// Error from cache maintenance operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("cache invalidation failed: {0}")]
    Invalidation(String),
}

/// Configuration for the response cache.
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
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache of assembled itineraries keyed by canonical request string.
pub struct PlanCache {
    plans: MokaCache<String, Arc<Itinerary>>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .support_invalidation_closures()
            .build();

        Self { plans }
    }

    /// Canonical cache key for a request.
    ///
    /// Station endpoints key on their id, coordinate endpoints on the
    /// coordinate fixed to six decimal places, so equal requests always
    /// produce equal keys.
    pub fn request_key(request: &PlanRequest) -> String {
        fn endpoint_key(endpoint: &Endpoint) -> String {
            match endpoint {
                Endpoint::Station(id) => format!("st:{id}"),
                Endpoint::Coordinate(point) => format!("geo:{point}"),
            }
        }

        format!(
            "{JOURNEY_PREFIX}{}:{}",
            endpoint_key(&request.from),
            endpoint_key(&request.to)
        )
    }

    /// Get a cached plan.
    pub async fn get(&self, key: &str) -> Option<Arc<Itinerary>> {
        self.plans.get(key).await
    }

    /// Insert a plan.
    pub async fn insert(&self, key: String, plan: Arc<Itinerary>) {
        self.plans.insert(key, plan).await;
    }

    /// Invalidate every entry whose key starts with `prefix`.
    ///
    /// Called by mutation endpoints when stations, routes or segments
    /// change; cached plans may reference data that no longer exists.
    pub fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let prefix = prefix.to_string();
        self.plans
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
            .map(|_| ())
            .map_err(|e| CacheError::Invalidation(e.to_string()))
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }

    /// Number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }
}
