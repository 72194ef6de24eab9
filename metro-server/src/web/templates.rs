//! Askama templates for the web frontend.

use askama::Template;

use crate::planner::{Itinerary, Segment};

use super::dto::transfer_message;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub station_count: usize,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route results fragment.
#[derive(Template)]
#[template(path = "route_results.html")]
pub struct RouteResultsTemplate {
    pub route: RouteView,
}

/// Error fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub from_cn: String,
    pub from_en: String,
    pub to_cn: String,
    pub to_en: String,
    pub duration_display: String,
    pub transfers: usize,
    pub segments: Vec<SegmentView>,
}

impl RouteView {
    /// Create from an itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            from_cn: itinerary.from_station.cn.clone(),
            from_en: itinerary.from_station.en.clone(),
            to_cn: itinerary.to_station.cn.clone(),
            to_en: itinerary.to_station.en.clone(),
            duration_display: format_minutes(itinerary.total_time),
            transfers: itinerary.transfer_count,
            segments: itinerary
                .segments
                .iter()
                .map(SegmentView::from_segment)
                .collect(),
        }
    }

    /// Whether origin and destination are the same station.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Segment view model (ride or transfer).
#[derive(Debug, Clone)]
pub enum SegmentView {
    Ride(RideView),
    Transfer(TransferView),
}

impl SegmentView {
    /// Create from an itinerary segment.
    pub fn from_segment(segment: &Segment) -> Self {
        match segment {
            Segment::Ride(ride) => SegmentView::Ride(RideView {
                line: ride.line.get(),
                from_cn: ride.from.cn.clone(),
                from_en: ride.from.en.clone(),
                to_cn: ride.to.cn.clone(),
                to_en: ride.to.en.clone(),
                minutes: ride.minutes,
                elapsed: ride.cumulative_mins,
            }),
            Segment::Transfer(transfer) => SegmentView::Transfer(TransferView {
                message: transfer_message(transfer.to_line),
                penalty: transfer.penalty_mins,
                elapsed: transfer.cumulative_mins,
            }),
        }
    }
}

/// Ride view model.
#[derive(Debug, Clone)]
pub struct RideView {
    pub line: u32,
    pub from_cn: String,
    pub from_en: String,
    pub to_cn: String,
    pub to_en: String,
    pub minutes: u32,
    /// Minutes since departure at the end of the ride.
    pub elapsed: u32,
}

/// Transfer view model.
#[derive(Debug, Clone)]
pub struct TransferView {
    pub message: String,
    pub penalty: u32,
    pub elapsed: u32,
}

/// Format a number of minutes as "1h 5m" or "12m".
fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}
