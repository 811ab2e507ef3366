//! Trip planner using Dijkstra search.
//!
//! This module implements the route engine that answers:
//! "I leave station X at this time - how do I get to station Y, and when
//! will I arrive?"
//!
//! The shortest route by distance is found first; the timetable is then
//! laid out leg by leg with a fixed wait at every interchange.

mod config;
mod engine;
mod shortest_path;

pub use config::{INTER_LEG_WAIT_MINS, RouteConfig};
pub use engine::{PlanError, RouteEngine, TripRequest, ValidationError};
pub use shortest_path::find_shortest_path;
