//! In-memory station graph.
//!
//! Built once from the full record set and then only read. Every record is
//! stored in both directions, so the adjacency structure is logically
//! undirected even though hops are looked up directionally.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::domain::{LineId, StationDisplayInfo, StationGroup};

use super::aliases::AliasIndex;
use super::record::ConnectionRecord;

/// A directed hop out of a station group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: StationGroup,
    pub line: LineId,
    pub minutes: u32,
}

/// Line and ride time for one ordered pair of station groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub line: LineId,
    pub minutes: u32,
}

/// Summary of a built graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub stations: usize,
    pub edges: usize,
    pub aliases: usize,
    pub lines: usize,
}

/// A station group with its display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationEntry {
    pub group: StationGroup,
    #[serde(flatten)]
    pub info: StationDisplayInfo,
}

/// A line and how many station groups it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineEntry {
    pub line: LineId,
    pub stations: usize,
}

/// The station graph.
///
/// Holds the adjacency lists, the connection table, the alias index and
/// the display table.
///
/// The connection table keeps one entry per ordered pair. When two lines
/// join the same pair of groups, the record ingested last overwrites the
/// earlier one, and routes over that pair report the later line.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    adjacency: HashMap<StationGroup, Vec<Edge>>,
    connections: HashMap<(StationGroup, StationGroup), Connection>,
    aliases: AliasIndex,
    display: HashMap<StationGroup, StationDisplayInfo>,
}

impl StationGraph {
    /// Create an empty graph. Every query against it finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from connection records.
    pub fn build<'a>(records: impl IntoIterator<Item = &'a ConnectionRecord>) -> Self {
        let mut graph = Self::new();
        for record in records {
            graph.insert(record);
        }

        debug!(
            stations = graph.adjacency.len(),
            edges = graph.edge_count(),
            aliases = graph.aliases.len(),
            "Station graph built"
        );

        graph
    }

    /// Ingest one record: both directed hops, both connection entries,
    /// names and display info for both endpoints.
    fn insert(&mut self, record: &ConnectionRecord) {
        let from = record.from_group;
        let to = record.to_group;
        let connection = Connection {
            line: record.line_id,
            minutes: record.travel_time,
        };

        self.adjacency.entry(from).or_default().push(Edge {
            to,
            line: connection.line,
            minutes: connection.minutes,
        });
        self.connections.insert((from, to), connection);

        self.adjacency.entry(to).or_default().push(Edge {
            to: from,
            line: connection.line,
            minutes: connection.minutes,
        });
        self.connections.insert((to, from), connection);

        self.add_names(
            from,
            record.from_name_cn.as_deref(),
            record.from_name_en.as_deref(),
        );
        self.add_names(to, record.to_name_cn.as_deref(), record.to_name_en.as_deref());
    }

    fn add_names(&mut self, group: StationGroup, cn: Option<&str>, en: Option<&str>) {
        if let Some(cn) = cn {
            self.aliases.insert(cn, group);
        }
        if let Some(en) = en {
            self.aliases.insert(en, group);
        }

        self.display
            .entry(group)
            .and_modify(|info| info.merge(cn, en))
            .or_insert_with(|| StationDisplayInfo::new(group, cn, en));
    }

    /// Resolve a free-text station name to its group.
    pub fn resolve(&self, name: &str) -> Option<StationGroup> {
        self.aliases.resolve(name)
    }

    /// Whether the group appears in any edge.
    pub fn contains(&self, group: &StationGroup) -> bool {
        self.adjacency.contains_key(group)
    }

    /// Outgoing hops from a group, in ingestion order.
    pub fn edges_from(&self, group: &StationGroup) -> &[Edge] {
        self.adjacency.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    /// Line and time recorded for the ordered pair, if any.
    pub fn connection(&self, from: &StationGroup, to: &StationGroup) -> Option<Connection> {
        self.connections.get(&(*from, *to)).copied()
    }

    /// Display names for a group.
    pub fn display(&self, group: &StationGroup) -> Option<&StationDisplayInfo> {
        self.display.get(group)
    }

    /// Display names for a group, or a generic placeholder if unknown.
    pub fn display_or_unknown(&self, group: &StationGroup) -> StationDisplayInfo {
        self.display(group)
            .cloned()
            .unwrap_or_else(StationDisplayInfo::unknown)
    }

    /// Number of station groups.
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Whether the graph has no stations.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All station groups with display names, ordered by group id.
    pub fn stations(&self) -> Vec<StationEntry> {
        let mut stations: Vec<StationEntry> = self
            .adjacency
            .keys()
            .map(|group| StationEntry {
                group: *group,
                info: self.display_or_unknown(group),
            })
            .collect();
        stations.sort_by_key(|s| s.group);
        stations
    }

    /// All lines with the number of groups each serves, ordered by line id.
    pub fn lines(&self) -> Vec<LineEntry> {
        let mut served: BTreeMap<LineId, BTreeSet<StationGroup>> = BTreeMap::new();
        for (from, edges) in &self.adjacency {
            for edge in edges {
                let groups = served.entry(edge.line).or_default();
                groups.insert(*from);
                groups.insert(edge.to);
            }
        }

        served
            .into_iter()
            .map(|(line, groups)| LineEntry {
                line,
                stations: groups.len(),
            })
            .collect()
    }

    /// Summary counts for logging and the status endpoint.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            stations: self.station_count(),
            edges: self.edge_count(),
            aliases: self.aliases.len(),
            lines: self.lines().len(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_record() -> impl Strategy<Value = ConnectionRecord> {
        (1u32..30, 1u32..30, 1u32..6, 0u32..20).prop_map(|(from, to, line, minutes)| {
            ConnectionRecord::new(
                StationGroup::new(from).unwrap(),
                StationGroup::new(to).unwrap(),
                LineId(line),
                minutes,
            )
        })
    }

    proptest! {
        /// Every ingested hop has a mirrored hop with the same line and time.
        #[test]
        fn adjacency_is_symmetric(records in prop::collection::vec(arb_record(), 0..60)) {
            let graph = StationGraph::build(&records);

            for record in &records {
                let forward = Edge { to: record.to_group, line: record.line_id, minutes: record.travel_time };
                let backward = Edge { to: record.from_group, line: record.line_id, minutes: record.travel_time };
                prop_assert!(graph.edges_from(&record.from_group).contains(&forward));
                prop_assert!(graph.edges_from(&record.to_group).contains(&backward));
            }
            prop_assert_eq!(graph.edge_count(), records.len() * 2);
        }

        /// Connection table entries come in mirrored pairs.
        #[test]
        fn connections_are_symmetric(records in prop::collection::vec(arb_record(), 0..60)) {
            let graph = StationGraph::build(&records);

            for record in &records {
                prop_assert_eq!(
                    graph.connection(&record.from_group, &record.to_group).is_some(),
                    graph.connection(&record.to_group, &record.from_group).is_some()
                );
            }
        }
    }
}
