//! Route configuration for the trip planner.

use std::num::NonZeroU32;

use chrono::Duration;
use serde::Deserialize;

use crate::domain::TimeOfDay;

/// Wait at every intermediate station before the next leg departs (minutes).
pub const INTER_LEG_WAIT_MINS: u32 = 10;

const DEFAULT_SPEED_KMH: NonZeroU32 = NonZeroU32::new(30).expect("30 is non-zero");
const DEFAULT_OPENS: TimeOfDay = TimeOfDay::from_hm(6, 0).expect("06:00 is a valid time");
const DEFAULT_CLOSES: TimeOfDay = TimeOfDay::from_hm(20, 0).expect("20:00 is a valid time");

/// Configuration parameters for building itineraries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Train speed in km/h, used for every line.
    pub speed_kmh: NonZeroU32,

    /// Earliest accepted departure (inclusive).
    pub opens: TimeOfDay,

    /// Latest accepted departure (inclusive).
    pub closes: TimeOfDay,
}

impl RouteConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(speed_kmh: NonZeroU32, opens: TimeOfDay, closes: TimeOfDay) -> Self {
        Self {
            speed_kmh,
            opens,
            closes,
        }
    }

    /// Riding time over `distance_km`, rounded down to whole minutes.
    pub fn travel_minutes(&self, distance_km: u32) -> u32 {
        let minutes = u64::from(distance_km) * 60 / u64::from(self.speed_kmh.get());
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }

    /// Returns true if a departure at `time` is within operating hours.
    pub fn is_operating(&self, time: TimeOfDay) -> bool {
        (self.opens..=self.closes).contains(&time)
    }

    /// Returns the inter-leg wait as a Duration.
    pub fn inter_leg_wait(&self) -> Duration {
        Duration::minutes(i64::from(INTER_LEG_WAIT_MINS))
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            opens: DEFAULT_OPENS,
            closes: DEFAULT_CLOSES,
        }
    }
}
