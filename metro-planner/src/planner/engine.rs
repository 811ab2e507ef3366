//! The route engine: validates a trip request, finds the route and lays it
//! out against the clock.

use chrono::Duration;
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{
    DistanceMatrix, InvalidStation, Itinerary, Leg, Path, Station, TimeError, TimeOfDay,
};

use super::config::{INTER_LEG_WAIT_MINS, RouteConfig};
use super::shortest_path;

/// A request failed validation before any route was searched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Departure outside the operating window
    #[error("departure {departure} is outside operating hours ({opens} to {closes})")]
    OutsideOperatingHours {
        departure: TimeOfDay,
        opens: TimeOfDay,
        closes: TimeOfDay,
    },

    /// Label that does not name a station
    #[error("unknown station {input:?}: {source}")]
    UnknownStation {
        input: String,
        #[source]
        source: InvalidStation,
    },

    /// Station index past the end of the network
    #[error("station index {index} is out of range (network has {len} stations)")]
    StationIndexOutOfRange { index: usize, len: usize },

    /// Well-formed station that this network does not have
    #[error("station {0} is not on this network")]
    StationNotOnNetwork(Station),

    /// Start and end are the same station
    #[error("start and end station are both {0}")]
    SameStation(Station),

    /// Consecutive stations of a path with no direct line
    #[error("no direct line from {from} to {to}")]
    NoDirectLine { from: Station, to: Station },

    /// The trip would still be running at midnight
    #[error("trip departing {departure} does not reach {destination} before midnight")]
    PastMidnight {
        departure: TimeOfDay,
        destination: Station,
    },
}

/// Error from planning a trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Departure time could not be parsed
    #[error(transparent)]
    Parse(#[from] TimeError),

    /// Request is well-formed but not acceptable
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Search finished without reaching the destination
    #[error("no path found from {start} to {end}")]
    NoPath { start: Station, end: Station },
}

/// A validated-shape request for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRequest {
    /// Where the passenger boards.
    pub start: Station,

    /// Where the passenger wants to go.
    pub end: Station,

    /// When the passenger leaves `start`.
    pub departure: TimeOfDay,
}

impl TripRequest {
    /// Create a new trip request.
    pub fn new(start: Station, end: Station, departure: TimeOfDay) -> Self {
        Self {
            start,
            end,
            departure,
        }
    }
}

/// Plans trips over one immutable network.
///
/// The engine holds no mutable state, so one instance can serve any number
/// of queries, concurrently or in sequence, and stays usable after a query
/// fails.
#[derive(Debug, Clone)]
pub struct RouteEngine {
    network: DistanceMatrix,
    config: RouteConfig,
}

impl RouteEngine {
    /// Create an engine for `network`.
    pub fn new(network: DistanceMatrix, config: RouteConfig) -> Self {
        Self { network, config }
    }

    /// The network this engine plans over.
    pub fn network(&self) -> &DistanceMatrix {
        &self.network
    }

    /// The route configuration.
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Look up the station at `index`.
    pub fn station_at(&self, index: usize) -> Result<Station, ValidationError> {
        self.network
            .station(index)
            .ok_or(ValidationError::StationIndexOutOfRange {
                index,
                len: self.network.len(),
            })
    }

    /// Look up a station by a label typed by a user.
    pub fn station_named(&self, input: &str) -> Result<Station, ValidationError> {
        let station =
            Station::parse_normalized(input).map_err(|source| ValidationError::UnknownStation {
                input: input.to_string(),
                source,
            })?;
        if !self.network.contains(station) {
            return Err(ValidationError::StationNotOnNetwork(station));
        }
        Ok(station)
    }

    /// Check that a departure falls inside operating hours.
    pub fn validate_departure(&self, departure: TimeOfDay) -> Result<(), ValidationError> {
        if !self.config.is_operating(departure) {
            return Err(ValidationError::OutsideOperatingHours {
                departure,
                opens: self.config.opens,
                closes: self.config.closes,
            });
        }
        Ok(())
    }

    /// Find the shortest path between two stations.
    ///
    /// See [`shortest_path::find_shortest_path`].
    pub fn find_shortest_path(&self, start: Station, end: Station) -> Option<Path> {
        shortest_path::find_shortest_path(&self.network, start, end)
    }

    /// Lay a path out against the clock, starting at `departure`.
    ///
    /// Every leg after the first departs [`INTER_LEG_WAIT_MINS`] after the
    /// previous arrival. Riding time is rounded down to whole minutes.
    ///
    /// Fails if two consecutive stations of `path` have no direct line, or if
    /// the trip would not finish before midnight.
    pub fn build_itinerary(
        &self,
        path: &Path,
        departure: TimeOfDay,
    ) -> Result<Itinerary, ValidationError> {
        let hops = path.len().saturating_sub(1);
        let mut legs = Vec::with_capacity(hops);
        let mut clock = departure;
        let mut elapsed: u32 = 0;
        let past_midnight = ValidationError::PastMidnight {
            departure,
            destination: path.destination(),
        };

        for (i, (from, to)) in path.hops().enumerate() {
            let distance_km = self
                .network
                .distance(from, to)
                .ok_or(ValidationError::NoDirectLine { from, to })?;
            let travel_minutes = self.config.travel_minutes(distance_km);
            let arrival = clock
                .checked_add(Duration::minutes(i64::from(travel_minutes)))
                .ok_or_else(|| past_midnight.clone())?;

            legs.push(Leg {
                from,
                to,
                distance_km,
                travel_minutes,
                departure: clock,
                arrival,
            });
            elapsed = elapsed.saturating_add(travel_minutes);
            clock = arrival;

            // No wait after the final leg
            if i + 1 < hops {
                clock = clock
                    .checked_add(self.config.inter_leg_wait())
                    .ok_or_else(|| past_midnight.clone())?;
                elapsed = elapsed.saturating_add(INTER_LEG_WAIT_MINS);
            }
        }

        Ok(Itinerary::new(
            path.origin(),
            path.destination(),
            departure,
            legs,
            elapsed,
        ))
    }

    /// Plan a trip end to end.
    ///
    /// Checks the stations and departure window, then searches for a route
    /// and builds its timetable.
    pub fn plan(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        for station in [request.start, request.end] {
            if !self.network.contains(station) {
                return Err(ValidationError::StationNotOnNetwork(station).into());
            }
        }
        if request.start == request.end {
            return Err(ValidationError::SameStation(request.start).into());
        }
        self.validate_departure(request.departure)?;

        let Some(path) = self.find_shortest_path(request.start, request.end) else {
            debug!(start = %request.start, end = %request.end, "no path found");
            return Err(PlanError::NoPath {
                start: request.start,
                end: request.end,
            });
        };

        let itinerary = self.build_itinerary(&path, request.departure)?;
        debug!(
            route = %path,
            departure = %request.departure,
            total_minutes = itinerary.total_minutes(),
            "planned trip"
        );
        Ok(itinerary)
    }

    /// Plan a trip from raw user input: station labels and a 12-hour time.
    pub fn plan_from_input(
        &self,
        start: &str,
        end: &str,
        departure: &str,
    ) -> Result<Itinerary, PlanError> {
        let start = self.station_named(start)?;
        let end = self.station_named(end)?;
        let departure = TimeOfDay::parse_12h(departure)?;
        self.plan(&TripRequest::new(start, end, departure))
    }

    /// Plan a trip from station indices, as picked from a list.
    pub fn plan_from_indices(
        &self,
        start: usize,
        end: usize,
        departure: TimeOfDay,
    ) -> Result<Itinerary, PlanError> {
        let start = self.station_at(start)?;
        let end = self.station_at(end)?;
        self.plan(&TripRequest::new(start, end, departure))
    }
}

impl Default for RouteEngine {
    /// The reference network with default settings.
    fn default() -> Self {
        Self::new(DistanceMatrix::reference(), RouteConfig::default())
    }
}

impl From<EngineConfig> for RouteEngine {
    fn from(config: EngineConfig) -> Self {
        Self::new(config.network, config.route)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
