//! Domain types for the metro route planner.
//!
//! Identifiers enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod line;
mod station;

pub use line::LineId;
pub use station::{InvalidStationGroup, StationDisplayInfo, StationGroup};

pub(crate) use station::non_blank;
