//! Domain types for the metro trip planner.
//!
//! This module contains the value types that describe the network and the
//! trips planned over it. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod itinerary;
mod network;
mod station;
mod time;

pub use error::NetworkError;
pub use itinerary::{Itinerary, Leg, Path};
pub use network::DistanceMatrix;
pub use station::{InvalidStation, MAX_STATIONS, Station};
pub use time::{MINUTES_PER_DAY, TimeError, TimeOfDay};
