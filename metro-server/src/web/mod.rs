//! Web layer for the metro route planner.
//!
//! Provides HTTP endpoints for route queries, station and line listings,
//! status and reload.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
