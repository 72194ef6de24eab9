//! Route planner using a transfer-penalized shortest-path search.
//!
//! This module answers "how do I get from station A to station B": it
//! resolves station names, searches the station graph, and reconstructs a
//! segmented itinerary with explicit transfers.

mod config;
mod itinerary;
mod search;


pub use config::{SearchConfig, VisitStrategy};
pub use itinerary::{Itinerary, Ride, Segment, Transfer};
pub use search::{PathResult, Planner, RouteError};
