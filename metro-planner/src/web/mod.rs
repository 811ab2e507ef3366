//! Web layer for the metro trip planner.
//!
//! Provides the booking page and HTTP endpoints for planning trips.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, DEFAULT_STATIC_DIR, create_router};
pub use state::AppState;
pub use templates::*;
