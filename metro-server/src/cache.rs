//! Caching layer for planned routes.
//!
//! Route results only depend on the graph and the two endpoints, so a
//! planned itinerary can be reused until the graph is replaced. Keys carry
//! the graph generation: an entry computed against an older graph can never
//! be served for a newer one, even if it lands after a reload.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::StationGroup;
use crate::planner::Itinerary;

/// Cache key for routes: (graph generation, start group, end group).
type RouteKey = (u64, StationGroup, StationGroup);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache of planned itineraries.
pub struct RouteCache {
    routes: MokaCache<RouteKey, Arc<Itinerary>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &RouteCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached itinerary.
    pub async fn get(
        &self,
        generation: u64,
        start: StationGroup,
        end: StationGroup,
    ) -> Option<Arc<Itinerary>> {
        self.routes.get(&(generation, start, end)).await
    }

    /// Insert an itinerary into the cache.
    pub async fn insert(
        &self,
        generation: u64,
        start: StationGroup,
        end: StationGroup,
        itinerary: Arc<Itinerary>,
    ) {
        self.routes.insert((generation, start, end), itinerary).await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationDisplayInfo;

    fn group(id: u32) -> StationGroup {
        StationGroup::new(id).unwrap()
    }

    fn itinerary(total_time: u32) -> Arc<Itinerary> {
        Arc::new(Itinerary {
            from_station: StationDisplayInfo::unknown(),
            to_station: StationDisplayInfo::unknown(),
            stations: vec![group(1)],
            segments: Vec::new(),
            total_time,
            transfer_count: 0,
            explored: 1,
        })
    }

    #[test]
    fn default_config() {
        let config = RouteCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache = RouteCache::new(&RouteCacheConfig::default());

        cache.insert(0, group(1), group(2), itinerary(7)).await;

        let hit = cache.get(0, group(1), group(2)).await.unwrap();
        assert_eq!(hit.total_time, 7);

        // Direction matters.
        assert!(cache.get(0, group(2), group(1)).await.is_none());
    }

    #[tokio::test]
    async fn generation_separates_entries() {
        let cache = RouteCache::new(&RouteCacheConfig::default());

        cache.insert(0, group(1), group(2), itinerary(7)).await;

        assert!(cache.get(1, group(1), group(2)).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_clears_entries() {
        let cache = RouteCache::new(&RouteCacheConfig::default());

        cache.insert(0, group(1), group(2), itinerary(7)).await;
        cache.invalidate_all();

        assert!(cache.get(0, group(1), group(2)).await.is_none());
    }
}
