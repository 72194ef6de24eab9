//! Transfer-aware shortest-path search.
//!
//! A label-setting search over station groups. Labels are popped in
//! non-decreasing cost order; each hop costs its ride time, plus the
//! transfer penalty when its line differs from the previous hop's line.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use tracing::{debug, trace};

use crate::domain::{LineId, StationGroup};
use crate::graph::StationGraph;

use super::config::{SearchConfig, VisitStrategy};
use super::itinerary::Itinerary;

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// One or both names have no alias entry
    #[error("invalid station name: {from} -> {to}")]
    UnresolvedStation { from: String, to: String },

    /// Both names resolve but no route connects them
    #[error("no path found from {from} to {to}")]
    NoPathFound { from: String, to: String },
}

/// Raw result of the search: the groups visited in order and the cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Station groups from start to end, inclusive.
    pub stations: Vec<StationGroup>,

    /// Ride minutes plus transfer penalties.
    pub total_cost: u32,

    /// Number of labels popped from the queue.
    pub explored: usize,
}

/// Search label: a partial route ending at `group`.
#[derive(Debug)]
struct Label {
    cost: u32,
    /// Insertion order, for stable extraction among equal costs.
    seq: u64,
    group: StationGroup,
    /// Groups before `group` on this route.
    path: Vec<StationGroup>,
    /// Line of the hop that reached `group`; `None` at the start.
    line: Option<LineId>,
}

// BinaryHeap is a max-heap: flip both keys so the cheapest, earliest-pushed
// label comes out first.
impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for Label {}

/// Priority queue that remembers insertion order.
struct LabelQueue {
    heap: BinaryHeap<Label>,
    next_seq: u64,
}

impl LabelQueue {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    fn push(
        &mut self,
        cost: u32,
        group: StationGroup,
        path: Vec<StationGroup>,
        line: Option<LineId>,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Label {
            cost,
            seq,
            group,
            path,
            line,
        });
    }

    fn pop(&mut self) -> Option<Label> {
        self.heap.pop()
    }
}

/// Route planner over a built station graph.
pub struct Planner<'a> {
    graph: &'a StationGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a StationGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Resolve both names and plan a route between them.
    pub fn plan(&self, from: &str, to: &str) -> Result<Itinerary, RouteError> {
        let (Some(start), Some(end)) = (self.graph.resolve(from), self.graph.resolve(to)) else {
            return Err(RouteError::UnresolvedStation {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        self.route(start, end)
    }

    /// Plan a route between two resolved station groups.
    pub fn route(&self, start: StationGroup, end: StationGroup) -> Result<Itinerary, RouteError> {
        let path = self
            .shortest_path(start, end)
            .ok_or_else(|| RouteError::NoPathFound {
                from: self.graph.display_or_unknown(&start).cn,
                to: self.graph.display_or_unknown(&end).cn,
            })?;

        Ok(Itinerary::reconstruct(
            self.graph,
            &path,
            self.config.transfer_penalty_mins,
        ))
    }

    /// Find the cheapest route between two station groups.
    ///
    /// Returns `None` if either group never appeared in an edge, or if no
    /// route connects them.
    pub fn shortest_path(&self, start: StationGroup, end: StationGroup) -> Option<PathResult> {
        if !self.graph.contains(&start) || !self.graph.contains(&end) {
            return None;
        }

        let penalty = self.config.transfer_penalty_mins;
        let mut queue = LabelQueue::new();
        let mut finalized: HashSet<(StationGroup, Option<LineId>)> = HashSet::new();
        let mut explored = 0;

        queue.push(0, start, Vec::new(), None);

        while let Some(label) = queue.pop() {
            explored += 1;

            if !finalized.insert(self.visit_key(label.group, label.line)) {
                continue;
            }

            let mut path = label.path;
            path.push(label.group);

            if label.group == end {
                debug!(
                    start = %start,
                    end = %end,
                    cost = label.cost,
                    hops = path.len() - 1,
                    explored,
                    "Route found"
                );
                return Some(PathResult {
                    stations: path,
                    total_cost: label.cost,
                    explored,
                });
            }

            for edge in self.graph.edges_from(&label.group) {
                // The connection table decides which line this hop rides.
                let Some(connection) = self.graph.connection(&label.group, &edge.to) else {
                    continue;
                };
                let line = connection.line;

                if finalized.contains(&self.visit_key(edge.to, Some(line))) {
                    continue;
                }

                let mut cost = label.cost.saturating_add(edge.minutes);
                if label.line.is_some_and(|previous| previous != line) {
                    cost = cost.saturating_add(penalty);
                }

                trace!(
                    from = %label.group,
                    to = %edge.to,
                    line = %line,
                    cost,
                    "Queue hop"
                );
                queue.push(cost, edge.to, path.clone(), Some(line));
            }
        }

        debug!(start = %start, end = %end, explored, "No route found");
        None
    }

    fn visit_key(
        &self,
        group: StationGroup,
        line: Option<LineId>,
    ) -> (StationGroup, Option<LineId>) {
        match self.config.strategy {
            VisitStrategy::ByStation => (group, None),
            VisitStrategy::ByStationAndLine => (group, line),
        }
    }
}
