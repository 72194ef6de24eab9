//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LineId, StationDisplayInfo};
use crate::engine::LoadedGraph;
use crate::graph::{GraphStats, LineEntry, StationEntry};
use crate::planner::{Itinerary, Ride, Segment, Transfer, VisitStrategy};

/// Query string for `GET /route`.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Body for `POST /api/route`.
#[derive(Debug, Default, Deserialize)]
pub struct RouteRequest {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
}

/// Successful route response.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub success: bool,
    pub data: RouteData,
}

/// The planned route.
#[derive(Debug, Serialize)]
pub struct RouteData {
    pub path: Vec<PathSegment>,

    /// Total time in minutes, transfer penalties included.
    pub total_time: u32,

    pub from_station: StationDisplayInfo,
    pub to_station: StationDisplayInfo,
    pub transfer_count: usize,
}

impl RouteResponse {
    /// Create from an itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            success: true,
            data: RouteData {
                path: itinerary
                    .segments
                    .iter()
                    .map(PathSegment::from_segment)
                    .collect(),
                total_time: itinerary.total_time,
                from_station: itinerary.from_station.clone(),
                to_station: itinerary.to_station.clone(),
                transfer_count: itinerary.transfer_count,
            },
        }
    }
}

/// One entry of the route path: a ride or a transfer.
///
/// Both shapes carry a `transfer` flag so clients can tell them apart.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Ride(RideResult),
    Transfer(TransferResult),
}

impl PathSegment {
    /// Create from an itinerary segment.
    pub fn from_segment(segment: &Segment) -> Self {
        match segment {
            Segment::Ride(ride) => PathSegment::Ride(RideResult::from_ride(ride)),
            Segment::Transfer(transfer) => {
                PathSegment::Transfer(TransferResult::from_transfer(transfer))
            }
        }
    }
}

/// A ride between two adjacent stations.
#[derive(Debug, Serialize)]
pub struct RideResult {
    pub from_station: StationDisplayInfo,
    pub to_station: StationDisplayInfo,
    pub line_id: LineId,
    pub segment_time: u32,
    pub cumulative_time: u32,
    pub transfer: bool,
}

impl RideResult {
    /// Create from a ride segment.
    pub fn from_ride(ride: &Ride) -> Self {
        Self {
            from_station: ride.from.clone(),
            to_station: ride.to.clone(),
            line_id: ride.line,
            segment_time: ride.minutes,
            cumulative_time: ride.cumulative_mins,
            transfer: false,
        }
    }
}

/// A change of line.
#[derive(Debug, Serialize)]
pub struct TransferResult {
    pub transfer: bool,
    pub transfer_time: u32,
    pub cumulative_time: u32,

    /// Human-readable notice, e.g. "换乘到2号线".
    pub message: String,

    pub from_line: LineId,
    pub to_line: LineId,
}

impl TransferResult {
    /// Create from a transfer segment.
    pub fn from_transfer(transfer: &Transfer) -> Self {
        Self {
            transfer: true,
            transfer_time: transfer.penalty_mins,
            cumulative_time: transfer.cumulative_mins,
            message: transfer_message(transfer.to_line),
            from_line: transfer.from_line,
            to_line: transfer.to_line,
        }
    }
}

/// Notice shown when changing to a line.
pub fn transfer_message(line: LineId) -> String {
    format!("换乘到{}号线", line)
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_station: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_station: Option<String>,
}

/// Station listing.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationEntry>,
}

/// Line listing.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineEntry>,
}

/// State of the published graph.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,

    #[serde(flatten)]
    pub stats: GraphStats,

    pub transfer_penalty_mins: u32,
    pub line_aware: bool,
}

/// Result of a successful reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,

    #[serde(flatten)]
    pub stats: GraphStats,
}

impl ReloadResponse {
    /// Create from a freshly published graph.
    pub fn from_loaded(loaded: &LoadedGraph) -> Self {
        Self {
            success: true,
            generation: loaded.generation,
            loaded_at: loaded.loaded_at,
            stats: loaded.graph.stats(),
        }
    }
}

/// Whether the strategy tracks the arriving line.
pub(crate) fn is_line_aware(strategy: VisitStrategy) -> bool {
    strategy == VisitStrategy::ByStationAndLine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationGroup;
    use crate::graph::{ConnectionRecord, StationGraph};
    use crate::planner::{Planner, SearchConfig};
    use serde_json::json;

    fn group(id: u32) -> StationGroup {
        StationGroup::new(id).unwrap()
    }

    fn itinerary() -> Itinerary {
        let graph = StationGraph::build(&[
            ConnectionRecord::new(group(1), group(2), LineId(1), 3)
                .with_names(("莘庄", "Xinzhuang"), ("外环路", "Waihuan Road")),
            ConnectionRecord::new(group(2), group(3), LineId(2), 4)
                .with_names(("外环路", "Waihuan Road"), ("莲花路", "Lianhua Road")),
        ]);
        let config = SearchConfig::default();
        Planner::new(&graph, &config).plan("莘庄", "莲花路").unwrap()
    }

    #[test]
    fn route_response_shape() {
        let value = serde_json::to_value(RouteResponse::from_itinerary(&itinerary())).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["total_time"], json!(12));
        assert_eq!(value["data"]["transfer_count"], json!(1));
        assert_eq!(
            value["data"]["from_station"],
            json!({"cn": "莘庄", "en": "Xinzhuang"})
        );
        assert_eq!(value["data"]["to_station"]["en"], json!("Lianhua Road"));

        let path = value["data"]["path"].as_array().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(
            path[0],
            json!({
                "from_station": {"cn": "莘庄", "en": "Xinzhuang"},
                "to_station": {"cn": "外环路", "en": "Waihuan Road"},
                "line_id": 1,
                "segment_time": 3,
                "cumulative_time": 3,
                "transfer": false
            })
        );
        assert_eq!(
            path[1],
            json!({
                "transfer": true,
                "transfer_time": 5,
                "cumulative_time": 8,
                "message": "换乘到2号线",
                "from_line": 1,
                "to_line": 2
            })
        );
        assert_eq!(path[2]["cumulative_time"], json!(12));
    }

    #[test]
    fn error_response_omits_missing_stations() {
        let value = serde_json::to_value(ErrorResponse {
            success: false,
            message: "start and end station are required".to_string(),
            start_station: None,
            end_station: None,
        })
        .unwrap();

        assert_eq!(
            value,
            json!({"success": false, "message": "start and end station are required"})
        );
    }

    #[test]
    fn route_request_fields_are_optional() {
        let req: RouteRequest = serde_json::from_str(r#"{"start_station": "莘庄"}"#).unwrap();
        assert_eq!(req.start_station.as_deref(), Some("莘庄"));
        assert!(req.end_station.is_none());
    }

    #[test]
    fn status_flattens_stats() {
        let value = serde_json::to_value(StatusResponse {
            generation: 2,
            loaded_at: DateTime::<Utc>::UNIX_EPOCH,
            stats: GraphStats {
                stations: 3,
                edges: 4,
                aliases: 6,
                lines: 2,
            },
            transfer_penalty_mins: 5,
            line_aware: false,
        })
        .unwrap();

        assert_eq!(value["generation"], json!(2));
        assert_eq!(value["stations"], json!(3));
        assert_eq!(value["lines"], json!(2));
        assert_eq!(value["loaded_at"], json!("1970-01-01T00:00:00Z"));
    }
}
