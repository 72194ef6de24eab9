//! Itinerary reconstruction.
//!
//! Turns the raw group path from the search into ride segments and
//! explicit transfer events with running time totals.

use tracing::warn;

use crate::domain::{LineId, StationDisplayInfo, StationGroup};
use crate::graph::StationGraph;

use super::search::PathResult;

/// One hop ridden on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    pub from_group: StationGroup,
    pub to_group: StationGroup,
    pub from: StationDisplayInfo,
    pub to: StationDisplayInfo,
    pub line: LineId,
    /// Ride time of this hop in minutes.
    pub minutes: u32,
    /// Minutes since departure, including this hop.
    pub cumulative_mins: u32,
}

/// A change of line between two rides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub penalty_mins: u32,
    /// Minutes since departure, including the penalty.
    pub cumulative_mins: u32,
    pub from_line: LineId,
    pub to_line: LineId,
}

/// A segment of an itinerary: a ride or a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Ride(Ride),
    Transfer(Transfer),
}

impl Segment {
    /// Minutes since departure at the end of this segment.
    pub fn cumulative_mins(&self) -> u32 {
        match self {
            Segment::Ride(ride) => ride.cumulative_mins,
            Segment::Transfer(transfer) => transfer.cumulative_mins,
        }
    }

    /// Returns true if this is a transfer.
    pub fn is_transfer(&self) -> bool {
        matches!(self, Segment::Transfer(_))
    }

    /// Returns the ride if this is a ride segment.
    pub fn as_ride(&self) -> Option<&Ride> {
        match self {
            Segment::Ride(ride) => Some(ride),
            Segment::Transfer(_) => None,
        }
    }
}

/// A complete route between two station groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    pub from_station: StationDisplayInfo,
    pub to_station: StationDisplayInfo,

    /// Station groups from origin to destination, inclusive.
    pub stations: Vec<StationGroup>,

    pub segments: Vec<Segment>,

    /// Cost reported by the search.
    pub total_time: u32,

    pub transfer_count: usize,

    /// Number of labels the search popped.
    pub explored: usize,
}

impl Itinerary {
    /// Build an itinerary from a search result.
    ///
    /// A hop with no connection table entry is skipped and logged; the rest
    /// of the route is still reported.
    pub fn reconstruct(graph: &StationGraph, path: &PathResult, penalty_mins: u32) -> Self {
        let mut segments = Vec::new();
        let mut cumulative = 0u32;
        let mut previous_line: Option<LineId> = None;

        for pair in path.stations.windows(2) {
            let (current, next) = (pair[0], pair[1]);

            let Some(connection) = graph.connection(&current, &next) else {
                warn!(from = %current, to = %next, "No connection for hop, skipping");
                continue;
            };

            if let Some(from_line) = previous_line
                && from_line != connection.line
            {
                cumulative = cumulative.saturating_add(penalty_mins);
                segments.push(Segment::Transfer(Transfer {
                    penalty_mins,
                    cumulative_mins: cumulative,
                    from_line,
                    to_line: connection.line,
                }));
            }

            cumulative = cumulative.saturating_add(connection.minutes);
            previous_line = Some(connection.line);

            segments.push(Segment::Ride(Ride {
                from_group: current,
                to_group: next,
                from: graph.display_or_unknown(&current),
                to: graph.display_or_unknown(&next),
                line: connection.line,
                minutes: connection.minutes,
                cumulative_mins: cumulative,
            }));
        }

        let transfer_count = segments.iter().filter(|s| s.is_transfer()).count();

        let (from_station, to_station) = match (path.stations.first(), path.stations.last()) {
            (Some(first), Some(last)) => (
                graph.display_or_unknown(first),
                graph.display_or_unknown(last),
            ),
            _ => (StationDisplayInfo::unknown(), StationDisplayInfo::unknown()),
        };

        Self {
            from_station,
            to_station,
            stations: path.stations.clone(),
            segments,
            total_time: path.total_cost,
            transfer_count,
            explored: path.explored,
        }
    }

    /// Ride segments only.
    pub fn rides(&self) -> impl Iterator<Item = &Ride> {
        self.segments.iter().filter_map(Segment::as_ride)
    }

    /// Whether the route stays on one line throughout.
    pub fn is_direct(&self) -> bool {
        self.transfer_count == 0
    }

    /// Sum of ride minutes, excluding transfer penalties.
    pub fn ride_minutes(&self) -> u32 {
        self.rides()
            .fold(0u32, |total, r| total.saturating_add(r.minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ConnectionRecord;

    fn group(id: u32) -> StationGroup {
        StationGroup::new(id).unwrap()
    }

    fn graph() -> StationGraph {
        StationGraph::build(&[
            ConnectionRecord::new(group(1), group(2), LineId(1), 3)
                .with_names(("A站", "A"), ("B站", "B")),
            ConnectionRecord::new(group(2), group(3), LineId(2), 4)
                .with_names(("B站", "B"), ("C站", "C")),
        ])
    }

    fn path(ids: &[u32], total_cost: u32) -> PathResult {
        PathResult {
            stations: ids.iter().map(|id| group(*id)).collect(),
            total_cost,
            explored: 0,
        }
    }

    #[test]
    fn transfer_marker_precedes_ride() {
        let itinerary = Itinerary::reconstruct(&graph(), &path(&[1, 2, 3], 12), 5);

        assert_eq!(itinerary.segments.len(), 3);
        assert!(itinerary.segments[0].as_ride().is_some());
        assert_eq!(
            itinerary.segments[1],
            Segment::Transfer(Transfer {
                penalty_mins: 5,
                cumulative_mins: 8,
                from_line: LineId(1),
                to_line: LineId(2),
            })
        );
        let last = itinerary.segments[2].as_ride().unwrap();
        assert_eq!(last.line, LineId(2));
        assert_eq!(last.minutes, 4);
        assert_eq!(last.cumulative_mins, 12);
        assert_eq!(last.from.en, "B");
        assert_eq!(last.to.cn, "C站");

        assert_eq!(itinerary.transfer_count, 1);
        assert_eq!(itinerary.total_time, 12);
        assert_eq!(itinerary.ride_minutes(), 7);
        assert!(!itinerary.is_direct());
        assert_eq!(itinerary.from_station.cn, "A站");
        assert_eq!(itinerary.to_station.en, "C");
    }

    #[test]
    fn single_station_has_no_segments() {
        let itinerary = Itinerary::reconstruct(&graph(), &path(&[2], 0), 5);

        assert!(itinerary.segments.is_empty());
        assert_eq!(itinerary.total_time, 0);
        assert_eq!(itinerary.transfer_count, 0);
        assert!(itinerary.is_direct());
        assert_eq!(itinerary.from_station, itinerary.to_station);
    }

    #[test]
    fn missing_connection_is_skipped() {
        // 1 and 3 are never directly connected.
        let itinerary = Itinerary::reconstruct(&graph(), &path(&[1, 3], 7), 5);

        assert!(itinerary.segments.is_empty());
        assert_eq!(itinerary.transfer_count, 0);
        assert_eq!(itinerary.total_time, 7);
    }

    #[test]
    fn cumulative_time_is_non_decreasing() {
        let itinerary = Itinerary::reconstruct(&graph(), &path(&[3, 2, 1], 12), 5);

        let totals: Vec<u32> = itinerary.segments.iter().map(Segment::cumulative_mins).collect();
        assert_eq!(totals, vec![4, 9, 12]);
    }

    #[test]
    fn huge_hop_times_saturate() {
        let graph = StationGraph::build(&[
            ConnectionRecord::new(group(1), group(2), LineId(1), u32::MAX - 1),
            ConnectionRecord::new(group(2), group(3), LineId(2), 10),
        ]);

        let itinerary = Itinerary::reconstruct(&graph, &path(&[1, 2, 3], u32::MAX), 5);

        let totals: Vec<u32> = itinerary.segments.iter().map(Segment::cumulative_mins).collect();
        assert_eq!(totals, vec![u32::MAX - 1, u32::MAX, u32::MAX]);
        assert_eq!(itinerary.ride_minutes(), u32::MAX);
        assert_eq!(itinerary.total_time, u32::MAX);
    }
}
