//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Leg, Station};
use crate::planner::{RouteEngine, ValidationError};

/// A station picked by the client: a list index or a letter label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StationInput {
    /// 0-based position in the station list
    Index(usize),
    /// Station letter, e.g. "C"
    Label(String),
}

impl StationInput {
    /// Resolve to a station on the engine's network.
    pub fn resolve(&self, engine: &RouteEngine) -> Result<Station, ValidationError> {
        match self {
            StationInput::Index(index) => engine.station_at(*index),
            StationInput::Label(label) => engine.station_named(label),
        }
    }
}

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Boarding station
    pub start: StationInput,

    /// Destination station
    pub end: StationInput,

    /// Departure time in "H:MM AM|PM" format
    pub departure: String,
}

/// A station in the station list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Position in the list
    pub index: usize,

    /// Letter label
    pub label: String,
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    /// All stations, in index order
    pub stations: Vec<StationResult>,

    /// Earliest accepted departure
    pub opens: String,

    /// Latest accepted departure
    pub closes: String,
}

/// One leg of a planned trip.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Boarding station
    pub from: String,

    /// Alighting station
    pub to: String,

    /// Line length in kilometres
    pub distance_km: u32,

    /// Riding time in minutes
    pub travel_minutes: u32,

    /// Departure time
    pub departure_time: String,

    /// Arrival time
    pub arrival_time: String,
}

/// A planned trip.
#[derive(Debug, Serialize)]
pub struct TripResult {
    /// Origin station
    pub origin: String,

    /// Destination station
    pub destination: String,

    /// Stations in travel order
    pub route: Vec<String>,

    /// Departure time from origin
    pub departure_time: String,

    /// Arrival time at destination
    pub arrival_time: String,

    /// Total duration in minutes, waits included
    pub total_minutes: u32,

    /// Legs in travel order
    pub legs: Vec<LegResult>,
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    /// The planned trip
    pub trip: TripResult,

    /// Plain-text timetable
    pub timetable: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// What exactly was wrong, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

// Conversion implementations

impl StationListResponse {
    /// Describe the engine's network.
    pub fn from_engine(engine: &RouteEngine) -> Self {
        let stations = engine
            .network()
            .stations()
            .map(|s| StationResult {
                index: s.index(),
                label: s.to_string(),
            })
            .collect();

        Self {
            stations,
            opens: engine.config().opens.to_string(),
            closes: engine.config().closes.to_string(),
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            distance_km: leg.distance_km,
            travel_minutes: leg.travel_minutes,
            departure_time: leg.departure.to_string(),
            arrival_time: leg.arrival.to_string(),
        }
    }
}

impl TripResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let mut route = vec![itinerary.origin().to_string()];
        route.extend(itinerary.legs().iter().map(|leg| leg.to.to_string()));

        Self {
            origin: itinerary.origin().to_string(),
            destination: itinerary.destination().to_string(),
            route,
            departure_time: itinerary.departure().to_string(),
            arrival_time: itinerary.arrival().to_string(),
            total_minutes: itinerary.total_minutes(),
            legs: itinerary.legs().iter().map(LegResult::from_leg).collect(),
        }
    }
}

impl PlanTripResponse {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            trip: TripResult::from_itinerary(itinerary),
            timetable: itinerary.render(),
        }
    }
}
