//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Itinerary, TimeOfDay};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Booking page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<String>,
    pub departure: TimePicker,
    pub opens: String,
    pub closes: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Trip timetable fragment.
#[derive(Template)]
#[template(path = "trip_results.html")]
pub struct TripResultsTemplate {
    pub trip: TripView,
}

/// Error fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One `<option>` of a select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: String, selected: bool) -> Self {
        Self { value, selected }
    }
}

/// Hour, minute and AM/PM selects for the departure time.
///
/// Only well-formed 12-hour times can be picked.
#[derive(Debug, Clone)]
pub struct TimePicker {
    pub hours: Vec<SelectOption>,
    pub minutes: Vec<SelectOption>,
    pub meridiems: Vec<SelectOption>,
}

impl TimePicker {
    /// Build the selects with `initial` pre-selected.
    pub fn new(initial: TimeOfDay) -> Self {
        let hours = (1..=12)
            .map(|h| SelectOption::new(h.to_string(), h == initial.hour_12()))
            .collect();
        let minutes = (0..60)
            .map(|m| SelectOption::new(format!("{:02}", m), m == initial.minute()))
            .collect();
        let meridiems = [("AM", false), ("PM", true)]
            .into_iter()
            .map(|(label, pm)| SelectOption::new(label.to_string(), pm == initial.is_pm()))
            .collect();

        Self {
            hours,
            minutes,
            meridiems,
        }
    }
}

/// Trip view model for templates.
#[derive(Debug, Clone)]
pub struct TripView {
    pub origin: String,
    pub destination: String,
    pub total_minutes: u32,
    pub legs: Vec<LegView>,
}

impl TripView {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let legs = itinerary
            .legs()
            .iter()
            .map(|leg| LegView {
                from: leg.from.to_string(),
                to: leg.to.to_string(),
                departure: leg.departure.to_string(),
                arrival: leg.arrival.to_string(),
                travel_minutes: leg.travel_minutes,
            })
            .collect();

        Self {
            origin: itinerary.origin().to_string(),
            destination: itinerary.destination().to_string(),
            total_minutes: itinerary.total_minutes(),
            legs,
        }
    }
}

/// Leg view model for templates.
#[derive(Debug, Clone)]
pub struct LegView {
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub travel_minutes: u32,
}
