//! The published station graph and the operations served from it.
//!
//! The graph is an immutable value behind an `Arc`. Queries clone the `Arc`
//! under a short read lock and then work on their own snapshot, so a query
//! that overlaps a reload sees either the old graph or the new one, never a
//! mix. Reloads build the new graph before taking the write lock and are
//! serialized against each other.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{RouteCache, RouteCacheConfig};
use crate::domain::StationGroup;
use crate::graph::{GraphStats, LineEntry, StationEntry, StationGraph};
use crate::planner::{Itinerary, Planner, RouteError, SearchConfig};
use crate::source::{EdgeSource, SourceError};

/// A built graph and when it was published.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: StationGraph,

    /// Incremented on every successful reload.
    pub generation: u64,

    pub loaded_at: DateTime<Utc>,
}

/// Route engine: graph snapshot, search configuration and route cache.
pub struct RouteEngine {
    current: RwLock<Arc<LoadedGraph>>,
    reload_lock: Mutex<()>,
    config: SearchConfig,
    routes: RouteCache,
}

impl RouteEngine {
    /// Build the initial graph from a source.
    ///
    /// Fails if the source cannot supply records; no engine is created.
    pub async fn load<S: EdgeSource>(
        source: &S,
        config: SearchConfig,
        cache_config: &RouteCacheConfig,
    ) -> Result<Self, SourceError> {
        let records = source.fetch().await?;
        let graph = StationGraph::build(&records);

        info!(
            source = %source.describe(),
            records = records.len(),
            stations = graph.station_count(),
            "Loaded station graph"
        );
        if graph.is_empty() {
            warn!(source = %source.describe(), "Station graph is empty, every route query will fail");
        }

        Ok(Self::from_graph(graph, config, cache_config))
    }

    /// Create an engine around an already built graph.
    pub fn from_graph(
        graph: StationGraph,
        config: SearchConfig,
        cache_config: &RouteCacheConfig,
    ) -> Self {
        let loaded = LoadedGraph {
            graph,
            generation: 0,
            loaded_at: Utc::now(),
        };

        Self {
            current: RwLock::new(Arc::new(loaded)),
            reload_lock: Mutex::new(()),
            config,
            routes: RouteCache::new(cache_config),
        }
    }

    /// Create an engine with an empty graph.
    ///
    /// Every name fails to resolve until a reload succeeds.
    pub fn empty(config: SearchConfig) -> Self {
        Self::from_graph(StationGraph::new(), config, &RouteCacheConfig::default())
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The currently published graph.
    pub async fn snapshot(&self) -> Arc<LoadedGraph> {
        self.current.read().await.clone()
    }

    /// Resolve a free-text station name.
    pub async fn resolve(&self, name: &str) -> Option<StationGroup> {
        self.snapshot().await.graph.resolve(name)
    }

    /// Plan a route between two station names.
    pub async fn find_route(&self, from: &str, to: &str) -> Result<Arc<Itinerary>, RouteError> {
        let loaded = self.snapshot().await;
        let graph = &loaded.graph;

        let (Some(start), Some(end)) = (graph.resolve(from), graph.resolve(to)) else {
            debug!(from, to, "Unresolved station name");
            return Err(RouteError::UnresolvedStation {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        if let Some(cached) = self.routes.get(loaded.generation, start, end).await {
            debug!(start = %start, end = %end, "Route cache hit");
            return Ok(cached);
        }

        let itinerary = Arc::new(Planner::new(graph, &self.config).route(start, end)?);
        self.routes
            .insert(loaded.generation, start, end, itinerary.clone())
            .await;

        Ok(itinerary)
    }

    /// All station groups with display names.
    pub async fn stations(&self) -> Vec<StationEntry> {
        self.snapshot().await.graph.stations()
    }

    /// All lines with the number of groups they serve.
    pub async fn lines(&self) -> Vec<LineEntry> {
        self.snapshot().await.graph.lines()
    }

    /// Summary of the published graph.
    pub async fn stats(&self) -> GraphStats {
        self.snapshot().await.graph.stats()
    }

    /// Rebuild the graph from a source and publish it.
    ///
    /// On failure the current graph stays published and the error is
    /// returned. Concurrent reloads run one after another.
    pub async fn reload<S: EdgeSource>(&self, source: &S) -> Result<Arc<LoadedGraph>, SourceError> {
        let _guard = self.reload_lock.lock().await;

        let records = match source.fetch().await {
            Ok(records) => records,
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "Reload failed, keeping current graph");
                return Err(e);
            }
        };
        let graph = StationGraph::build(&records);
        let generation = self.snapshot().await.generation + 1;

        let loaded = Arc::new(LoadedGraph {
            graph,
            generation,
            loaded_at: Utc::now(),
        });

        *self.current.write().await = loaded.clone();
        self.routes.invalidate_all();

        info!(
            source = %source.describe(),
            generation,
            stations = loaded.graph.station_count(),
            "Reloaded station graph"
        );

        Ok(loaded)
    }
}
