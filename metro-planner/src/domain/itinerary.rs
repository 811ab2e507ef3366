//! Routes and timetables.
//!
//! A `Path` is the ordered list of stations a trip passes through. An
//! `Itinerary` is that path laid out against the clock, one `Leg` per hop.

use std::fmt::{self, Write};

use super::{Station, TimeOfDay};

/// An ordered sequence of stations from origin to destination.
///
/// Always holds at least one station. A single-station path is a trip that
/// starts and ends at the same place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Station>);

impl Path {
    /// Build a path from its stations, or `None` if there are none.
    pub fn new(stations: Vec<Station>) -> Option<Self> {
        (!stations.is_empty()).then_some(Path(stations))
    }

    /// A path that never leaves `station`.
    pub fn single(station: Station) -> Self {
        Path(vec![station])
    }

    /// The first station.
    pub fn origin(&self) -> Station {
        self.0[0]
    }

    /// The last station.
    pub fn destination(&self) -> Station {
        self.0[self.0.len() - 1]
    }

    /// All stations in travel order.
    pub fn stations(&self) -> &[Station] {
        &self.0
    }

    /// Number of stations on the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a path holds at least one station.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive `(from, to)` station pairs.
    pub fn hops(&self) -> impl Iterator<Item = (Station, Station)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, station) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", station)?;
        }
        Ok(())
    }
}

/// One hop of an itinerary: a ride between two adjacent stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// Boarding station
    pub from: Station,
    /// Alighting station
    pub to: Station,
    /// Length of the line ridden, in kilometres
    pub distance_km: u32,
    /// Riding time in whole minutes
    pub travel_minutes: u32,
    /// Time the train leaves `from`
    pub departure: TimeOfDay,
    /// Time the train reaches `to`
    pub arrival: TimeOfDay,
}

/// A complete timetable for a trip.
///
/// # Invariants
///
/// - Consecutive legs connect (destination of one = origin of next)
/// - Each leg after the first departs a fixed wait after the previous arrival
/// - `total_minutes` runs from the first departure to the last arrival
/// - The whole trip falls within one day, so no leg arrives before it departs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    origin: Station,
    destination: Station,
    departure: TimeOfDay,
    legs: Vec<Leg>,
    total_minutes: u32,
}

impl Itinerary {
    pub(crate) fn new(
        origin: Station,
        destination: Station,
        departure: TimeOfDay,
        legs: Vec<Leg>,
        total_minutes: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            departure,
            legs,
            total_minutes,
        }
    }

    /// Station the trip starts from.
    pub fn origin(&self) -> Station {
        self.origin
    }

    /// Station the trip ends at.
    pub fn destination(&self) -> Station {
        self.destination
    }

    /// The legs, in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Departure from the origin.
    pub fn departure(&self) -> TimeOfDay {
        self.departure
    }

    /// Arrival at the destination.
    ///
    /// Equal to the departure when the trip has no legs.
    pub fn arrival(&self) -> TimeOfDay {
        self.legs.last().map_or(self.departure, |leg| leg.arrival)
    }

    /// Minutes from first departure to final arrival, waits included.
    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    /// Number of intermediate stops where the passenger waits.
    pub fn stops(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Render the plain-text timetable shown at the booking office.
    ///
    /// ```
    /// use metro_planner::planner::RouteEngine;
    /// use metro_planner::domain::{Station, TimeOfDay};
    ///
    /// let engine = RouteEngine::default();
    /// let a = Station::parse("A").unwrap();
    /// let e = Station::parse("E").unwrap();
    /// let path = engine.find_shortest_path(a, e).unwrap();
    /// let departure = TimeOfDay::parse_12h("6:00 AM").unwrap();
    /// let itinerary = engine.build_itinerary(&path, departure).unwrap();
    ///
    /// assert_eq!(
    ///     itinerary.render(),
    ///     "\nTrip A to E\n--------------\n\
    ///      A to E : Start at 06:00 AM - Stops at 06:16 AM\n\
    ///      Total time = 16 minutes\n"
    /// );
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out);
        let _ = writeln!(out, "Trip {} to {}", self.origin, self.destination);
        let _ = writeln!(out, "--------------");
        for leg in &self.legs {
            let _ = writeln!(
                out,
                "{} to {} : Start at {} - Stops at {}",
                leg.from, leg.to, leg.departure, leg.arrival
            );
        }
        let _ = writeln!(out, "Total time = {} minutes", self.total_minutes);
        out
    }
}
