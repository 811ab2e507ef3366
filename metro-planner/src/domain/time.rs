//! Clock time handling for departure and arrival times.
//!
//! Passengers enter and read times on a 12-hour clock ("6:05 PM"). Inside
//! the planner every time is a count of minutes since midnight, so the
//! 12-hour representation only exists at the parsing and display edges.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day, stored as minutes since midnight in `[0, 1440)`.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse_12h("6:05 pm").unwrap();
/// assert_eq!(t.minutes(), 18 * 60 + 5);
/// assert_eq!(t.to_string(), "06:05 PM");
///
/// // Midnight and noon
/// assert_eq!(TimeOfDay::parse_12h("12:00 AM").unwrap().minutes(), 0);
/// assert_eq!(TimeOfDay::parse_12h("12:00 PM").unwrap().minutes(), 720);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: Self = TimeOfDay(0);

    /// Build a time from minutes since midnight.
    ///
    /// Returns `None` if `minutes` is 1440 or more.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(TimeOfDay(minutes))
    }

    /// Build a time from 24-hour clock components.
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimeOfDay(hour * 60 + minute))
    }

    /// Parse a time from `"H:MM AM"` / `"HH:MM PM"` format.
    ///
    /// The hour is 1-12 with an optional leading zero, the minute is exactly
    /// two digits, and the meridiem marker is case-insensitive. Surrounding
    /// whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_planner::domain::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse_12h("06:00 AM").is_ok());
    /// assert!(TimeOfDay::parse_12h("6:00 am").is_ok());
    ///
    /// // Invalid formats
    /// assert!(TimeOfDay::parse_12h("06:00").is_err());
    /// assert!(TimeOfDay::parse_12h("0600 AM").is_err());
    /// assert!(TimeOfDay::parse_12h("13:00 PM").is_err());
    /// ```
    pub fn parse_12h(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split_whitespace();
        let (Some(clock), Some(meridiem), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected H:MM AM|PM format"));
        };

        let (hour, minute) = clock
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected colon between hour and minute"))?;

        if hour.is_empty() || hour.len() > 2 {
            return Err(TimeError::new("hour must be 1 or 2 digits"));
        }
        let hour = parse_digits(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if !(1..=12).contains(&hour) {
            return Err(TimeError::new("hour must be 1-12"));
        }

        if minute.len() != 2 {
            return Err(TimeError::new("minute must be 2 digits"));
        }
        let minute = parse_digits(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let afternoon = if meridiem.eq_ignore_ascii_case("AM") {
            false
        } else if meridiem.eq_ignore_ascii_case("PM") {
            true
        } else {
            return Err(TimeError::new("expected AM or PM"));
        };

        // 12 AM is midnight and 12 PM is noon
        let hour = hour % 12 + if afternoon { 12 } else { 0 };
        Ok(TimeOfDay(hour * 60 + minute))
    }

    /// Returns minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the hour on a 24-hour clock (0-23).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Returns the hour on a 12-hour clock (1-12).
    pub fn hour_12(&self) -> u16 {
        match self.hour() % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Returns true from noon onwards.
    pub fn is_pm(&self) -> bool {
        self.hour() >= 12
    }

    /// Add a duration, or `None` if the result falls outside the same day.
    ///
    /// ```
    /// use metro_planner::domain::TimeOfDay;
    /// use chrono::Duration;
    ///
    /// let late = TimeOfDay::parse_12h("11:30 PM").unwrap();
    /// assert_eq!(late.checked_add(Duration::minutes(29)).unwrap().to_string(), "11:59 PM");
    /// assert_eq!(late.checked_add(Duration::minutes(30)), None);
    /// ```
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let (time, overflow_secs) = self.to_naive_time().overflowing_add_signed(duration);
        (overflow_secs == 0).then(|| Self::from(time))
    }

    /// Converts to a `NaiveTime` with zero seconds.
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .expect("hour and minute are always in range")
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates seconds.
    fn from(time: NaiveTime) -> Self {
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_12h(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_12h(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meridiem = if self.is_pm() { "PM" } else { "AM" };
        write!(f, "{:02}:{:02} {}", self.hour_12(), self.minute(), meridiem)
    }
}

/// Parse a short run of ASCII digits.
fn parse_digits(s: &str) -> Option<u16> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse_12h(s).unwrap()
    }

    #[test]
    fn parse_reference_times() {
        assert_eq!(t("06:00 AM").minutes(), 360);
        assert_eq!(t("12:00 PM").minutes(), 720);
        assert_eq!(t("12:00 AM").minutes(), 0);
        assert_eq!(t("08:00 PM").minutes(), 1200);
        assert_eq!(t("11:59 PM").minutes(), 1439);
    }

    #[test]
    fn parse_without_leading_zero() {
        assert_eq!(t("6:00 AM"), t("06:00 AM"));
        assert_eq!(t("1:05 PM").minutes(), 13 * 60 + 5);
    }

    #[test]
    fn parse_meridiem_case_insensitive() {
        assert_eq!(t("6:00 am"), t("6:00 AM"));
        assert_eq!(t("6:00 Pm"), t("6:00 PM"));
    }

    #[test]
    fn parse_tolerates_whitespace() {
        assert_eq!(t("  6:00   PM "), t("6:00 PM"));
    }

    #[test]
    fn parse_invalid_format() {
        // Missing meridiem
        assert!(TimeOfDay::parse_12h("06:00").is_err());
        // Trailing garbage
        assert!(TimeOfDay::parse_12h("06:00 AM now").is_err());
        // Missing colon
        assert!(TimeOfDay::parse_12h("0600 AM").is_err());
        assert!(TimeOfDay::parse_12h("06.00 AM").is_err());
        // Non-digit characters
        assert!(TimeOfDay::parse_12h("ab:cd AM").is_err());
        assert!(TimeOfDay::parse_12h("+6:00 AM").is_err());
        assert!(TimeOfDay::parse_12h(":00 AM").is_err());
        // Wrong meridiem
        assert!(TimeOfDay::parse_12h("06:00 XM").is_err());
        assert!(TimeOfDay::parse_12h("").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(TimeOfDay::parse_12h("0:30 AM").is_err());
        assert!(TimeOfDay::parse_12h("13:00 PM").is_err());
        assert!(TimeOfDay::parse_12h("06:60 AM").is_err());
        assert!(TimeOfDay::parse_12h("06:5 AM").is_err());
        assert!(TimeOfDay::parse_12h("06:005 AM").is_err());
        assert!(TimeOfDay::parse_12h("123:00 AM").is_err());
    }

    #[test]
    fn error_display() {
        let err = TimeOfDay::parse_12h("13:00 PM").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: hour must be 1-12");
    }

    #[test]
    fn display_format() {
        assert_eq!(TimeOfDay::MIDNIGHT.to_string(), "12:00 AM");
        assert_eq!(TimeOfDay::from_minutes(720).unwrap().to_string(), "12:00 PM");
        assert_eq!(TimeOfDay::from_minutes(376).unwrap().to_string(), "06:16 AM");
        assert_eq!(TimeOfDay::from_minutes(1439).unwrap().to_string(), "11:59 PM");
        assert_eq!(TimeOfDay::from_minutes(65).unwrap().to_string(), "01:05 AM");
    }

    #[test]
    fn roundtrip_every_minute() {
        for m in 0..MINUTES_PER_DAY {
            let time = TimeOfDay::from_minutes(m).unwrap();
            assert_eq!(TimeOfDay::parse_12h(&time.to_string()).unwrap().minutes(), m);
        }
    }

    #[test]
    fn from_minutes_bounds() {
        assert!(TimeOfDay::from_minutes(0).is_some());
        assert!(TimeOfDay::from_minutes(1439).is_some());
        assert!(TimeOfDay::from_minutes(1440).is_none());
    }

    #[test]
    fn from_hm_bounds() {
        assert_eq!(TimeOfDay::from_hm(20, 0).unwrap().minutes(), 1200);
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_hm(10, 60).is_none());
    }

    #[test]
    fn checked_add_within_day() {
        let dep = t("06:00 AM");
        assert_eq!(dep.checked_add(Duration::minutes(16)), Some(t("06:16 AM")));
        assert_eq!(t("11:59 PM").checked_add(Duration::zero()), Some(t("11:59 PM")));
    }

    #[test]
    fn checked_add_stops_at_midnight() {
        assert_eq!(t("11:30 PM").checked_add(Duration::minutes(45)), None);
        assert_eq!(t("11:59 PM").checked_add(Duration::minutes(1)), None);
    }

    #[test]
    fn twelve_hour_components() {
        assert_eq!((t("12:00 AM").hour_12(), t("12:00 AM").is_pm()), (12, false));
        assert_eq!((t("12:30 PM").hour_12(), t("12:30 PM").is_pm()), (12, true));
        assert_eq!((t("7:15 PM").hour_12(), t("7:15 PM").is_pm()), (7, true));
    }

    #[test]
    fn naive_time_conversion() {
        let time = t("02:45 PM");
        let naive = time.to_naive_time();
        assert_eq!(naive, NaiveTime::from_hms_opt(14, 45, 0).unwrap());
        assert_eq!(TimeOfDay::from(naive), time);
    }

    #[test]
    fn ordering() {
        assert!(t("11:59 AM") < t("12:00 PM"));
        assert!(t("12:00 AM") < t("01:00 AM"));
    }

    #[test]
    fn serde_uses_clock_strings() {
        let json = serde_json::to_string(&t("6:00 AM")).unwrap();
        assert_eq!(json, "\"06:00 AM\"");

        let parsed: TimeOfDay = serde_json::from_str("\"8:00 pm\"").unwrap();
        assert_eq!(parsed.minutes(), 1200);

        assert!(serde_json::from_str::<TimeOfDay>("\"20:00\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing arbitrary input never panics
        #[test]
        fn parse_never_panics(s in "\\PC{0,16}") {
            let _ = TimeOfDay::parse_12h(&s);
        }

        /// Any well-formed 12-hour string parses to a time in range
        #[test]
        fn well_formed_parses(hour in 1u16..=12, minute in 0u16..60, pm in any::<bool>()) {
            let s = format!("{}:{:02} {}", hour, minute, if pm { "pm" } else { "AM" });
            let time = TimeOfDay::parse_12h(&s).unwrap();
            prop_assert!(time.minutes() < MINUTES_PER_DAY);
            prop_assert_eq!(time.minute(), minute);
            prop_assert_eq!(time.hour() >= 12, pm);
        }

        /// Checked addition succeeds exactly when the sum stays inside the day
        #[test]
        fn checked_add_in_range(start in 0u16..MINUTES_PER_DAY, add in 0i64..3_000) {
            let time = TimeOfDay::from_minutes(start).unwrap();
            let sum = i64::from(start) + add;
            match time.checked_add(Duration::minutes(add)) {
                Some(later) => prop_assert_eq!(i64::from(later.minutes()), sum),
                None => prop_assert!(sum >= i64::from(MINUTES_PER_DAY)),
            }
        }
    }
}
