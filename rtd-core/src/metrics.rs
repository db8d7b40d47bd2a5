//! Aggregate distance and duration of a trip's selected routes.
//!
//! The text-based totals parse the provider's display strings (`"5.1 km"`,
//! `"1 hour 5 mins"`) and are kept separate from the numeric totals so call
//! sites can switch to [`total_distance_meters`] and
//! [`total_duration_seconds`] without other changes. Downstream consumers
//! match on the exact [`NOT_AVAILABLE`] fallback.

use serde::Serialize;

use crate::{Direction, RouteLeg, TripRoute};

/// Placeholder rendered when a total cannot be derived.
pub const NOT_AVAILABLE: &str = "N/A";

const MINUTES_PER_HOUR: u64 = 60;
const METRES_PER_KILOMETRE: f64 = 1000.0;

/// Parse a distance display string into kilometres.
///
/// Accepts `"<number> km"` and `"<number> m"`; thousands separators are
/// ignored. Returns `None` for anything else.
///
/// # Examples
/// ```
/// use rtd_core::metrics::parse_distance_km;
///
/// assert_eq!(parse_distance_km("5.1 km"), Some(5.1));
/// assert_eq!(parse_distance_km("1,204 km"), Some(1204.0));
/// assert_eq!(parse_distance_km("850 m"), Some(0.85));
/// assert_eq!(parse_distance_km("unknown"), None);
/// ```
#[must_use]
pub fn parse_distance_km(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number_len = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(number_len);
    let value: f64 = number.replace(',', "").parse().ok()?;
    let unit = unit.trim_start();
    if unit.starts_with("km") {
        Some(value)
    } else if unit.starts_with('m') {
        Some(value / METRES_PER_KILOMETRE)
    } else {
        None
    }
}

/// Total of the outbound and return distance texts, formatted as
/// `"<x.y> km"`.
///
/// Each side is read with [`parse_distance_km`], so besides `"<n> km"` it
/// also accepts short legs the provider reports in metres (`"850 m"`) and
/// thousands separators (`"1,204 km"`). The sum itself is a plain addition
/// of the two kilometre values.
///
/// Returns [`NOT_AVAILABLE`] when either side is missing or unparseable.
#[must_use]
pub fn total_distance(outbound: Option<&str>, return_trip: Option<&str>) -> String {
    match (
        outbound.and_then(parse_distance_km),
        return_trip.and_then(parse_distance_km),
    ) {
        (Some(there), Some(back)) => format!("{:.1} km", there + back),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Hours and minutes found in a duration display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationParts {
    /// Count preceding the first `hour` token.
    pub hours: u64,
    /// Count preceding the first `min` token.
    pub minutes: u64,
}

/// Extract the hour and minute counts from a duration display string.
///
/// Matches `<n> hour` and `<n> min` anywhere in the text, each optional.
/// Other units (days, seconds) are ignored.
#[must_use]
pub fn parse_duration(text: &str) -> DurationParts {
    DurationParts {
        hours: count_before_unit(text, "hour").unwrap_or(0),
        minutes: count_before_unit(text, "min").unwrap_or(0),
    }
}

/// Sum duration texts and render `"H hours M mins"`, `"H hours"`,
/// `"M mins"` or [`NOT_AVAILABLE`] when the total is zero.
///
/// Minutes of 60 or more roll over into hours. Missing entries count as zero.
///
/// # Examples
/// ```
/// use rtd_core::metrics::total_duration;
///
/// assert_eq!(total_duration([Some("2 hours 15 mins"), Some("1 hour")]), "3 hours 15 mins");
/// assert_eq!(total_duration([Some("45 mins"), Some("20 mins")]), "1 hours 5 mins");
/// assert_eq!(total_duration([None, None]), "N/A");
/// ```
#[must_use]
pub fn total_duration<'a, I>(texts: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let total = texts
        .into_iter()
        .flatten()
        .map(parse_duration)
        .fold(DurationParts::default(), |acc, parts| DurationParts {
            hours: acc.hours.saturating_add(parts.hours),
            minutes: acc.minutes.saturating_add(parts.minutes),
        });
    let hours = total
        .hours
        .saturating_add(total.minutes.div_euclid(MINUTES_PER_HOUR));
    let minutes = total.minutes.rem_euclid(MINUTES_PER_HOUR);

    match (hours, minutes) {
        (0, 0) => NOT_AVAILABLE.to_owned(),
        (0, m) => format!("{m} mins"),
        (h, 0) => format!("{h} hours"),
        (h, m) => format!("{h} hours {m} mins"),
    }
}

/// First run of ASCII digits followed (after optional whitespace) by `unit`.
fn count_before_unit(text: &str, unit: &str) -> Option<u64> {
    let mut rest = text;
    while let Some(digit_at) = rest.find(|c: char| c.is_ascii_digit()) {
        let (_, from_digits) = rest.split_at(digit_at);
        let digits_len = from_digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(from_digits.len());
        let (digits, after) = from_digits.split_at(digits_len);
        if after.trim_start().starts_with(unit) {
            return digits.parse().ok();
        }
        rest = after;
    }
    None
}

/// Display totals for a trip's selected outbound and return legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripMetrics {
    /// Total distance text, e.g. `"10.0 km"`.
    pub total_distance: String,
    /// Total duration text, e.g. `"1 hours 5 mins"`.
    pub total_duration: String,
}

impl TripMetrics {
    /// Derive totals from the selected path of each direction.
    ///
    /// # Examples
    /// ```
    /// use rtd_core::TripRoute;
    /// use rtd_core::metrics::TripMetrics;
    ///
    /// let metrics = TripMetrics::from_trip_route(&TripRoute::default());
    /// assert_eq!(metrics.total_distance, "N/A");
    /// assert_eq!(metrics.total_duration, "N/A");
    /// ```
    #[must_use]
    pub fn from_trip_route(trip: &TripRoute) -> Self {
        let outbound = selected_leg(trip, Direction::Outbound);
        let back = selected_leg(trip, Direction::Return);
        Self {
            total_distance: total_distance(
                outbound.map(|leg| leg.distance.text.as_str()),
                back.map(|leg| leg.distance.text.as_str()),
            ),
            total_duration: total_duration([
                outbound.map(|leg| leg.duration.text.as_str()),
                back.map(|leg| leg.duration.text.as_str()),
            ]),
        }
    }
}

/// Sum of both selected legs' distance values, if both exist.
#[must_use]
pub fn total_distance_meters(trip: &TripRoute) -> Option<u64> {
    let there = selected_leg(trip, Direction::Outbound)?.distance.value;
    let back = selected_leg(trip, Direction::Return)?.distance.value;
    Some(there.saturating_add(back))
}

/// Sum of both selected legs' duration values, if both exist.
#[must_use]
pub fn total_duration_seconds(trip: &TripRoute) -> Option<u64> {
    let there = selected_leg(trip, Direction::Outbound)?.duration.value;
    let back = selected_leg(trip, Direction::Return)?.duration.value;
    Some(there.saturating_add(back))
}

fn selected_leg(trip: &TripRoute, direction: Direction) -> Option<&RouteLeg> {
    trip.direction(direction).selected.primary_leg()
}
