//! Search configuration for the route planner.

/// How the search decides that a station is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitStrategy {
    /// A station group is finalized the first time it is popped, whatever
    /// line the rider arrived on. A later arrival on a different line is
    /// never explored, even when continuing on that line would avoid a
    /// transfer further on. This can miss the cheapest route.
    #[default]
    ByStation,

    /// A station is finalized per (group, arriving line). Explores more
    /// states and always returns the cheapest route under the transfer
    /// penalty. Routes may differ from `ByStation`.
    ByStationAndLine,
}

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Minutes added whenever consecutive hops use different lines.
    pub transfer_penalty_mins: u32,

    /// Finalization strategy.
    pub strategy: VisitStrategy,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(transfer_penalty_mins: u32, strategy: VisitStrategy) -> Self {
        Self {
            transfer_penalty_mins,
            strategy,
        }
    }

    /// Default configuration with the line-aware strategy.
    pub fn line_aware() -> Self {
        Self {
            strategy: VisitStrategy::ByStationAndLine,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty_mins: 5,
            strategy: VisitStrategy::ByStation,
        }
    }
}
