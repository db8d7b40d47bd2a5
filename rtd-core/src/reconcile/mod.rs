//! Rebuild provider-shaped records from persisted trip route JSON.
//!
//! Persisted trip routes lose their native geometry types on the way through
//! storage. The builders here turn that plain data (or a fresh provider
//! response serialised the same way) back into [`ProviderPathResult`]s the
//! engine and renderers can treat like freshly fetched ones.
//!
//! Reconstruction never fails. Malformed fields are logged as a
//! [`ReconstructionWarning`] and replaced by defaults: empty lists, zero
//! coordinates and zero-valued metrics. Reconstructing an already
//! reconstructed record yields the same record.

mod coordinate;

pub use coordinate::{CoordinateInput, normalize_coordinate, try_coordinate};
pub(crate) use coordinate::normalize_path;

use log::warn;
use serde_json::Value;
use thiserror::Error;

use crate::{
    Direction, DirectionRoute, EndpointPair, GeoPoint, LatLngBounds, PathRequest,
    ProviderPathResult, ProviderRoute, RouteLeg, RouteStep, TextValue, TravelMode, TripRoute,
};

/// A defaulted field found while reconstructing a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructionWarning {
    /// A coordinate had none of the recognised encodings.
    #[error("malformed coordinate in `{field}`; using (0, 0)")]
    MalformedCoordinate {
        /// Field holding the coordinate.
        field: &'static str,
    },
    /// A list-valued field held something other than an array.
    #[error("expected an array for `{field}`; using an empty list")]
    NotAnArray {
        /// Field holding the value.
        field: &'static str,
    },
    /// Bounds were present but incomplete or inverted.
    #[error("malformed route bounds; deriving them instead")]
    MalformedBounds,
    /// A trip route record had no entry for a direction.
    #[error("trip route has no usable `{direction}` record")]
    MissingDirection {
        /// The absent direction.
        direction: Direction,
    },
    /// A JSON-encoded string could not be decoded.
    #[error("embedded JSON could not be decoded: {message}")]
    MalformedRecord {
        /// Decoder message.
        message: String,
    },
}

pub(crate) fn report(warning: &ReconstructionWarning) {
    warn!("trip route reconstruction: {warning}");
}

/// Endpoints known for the direction being reconstructed.
///
/// Used to fill in bounds and request metadata missing from a record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReconcileContext {
    /// Origin of the direction, if known.
    pub origin: Option<GeoPoint>,
    /// Destination of the direction, if known.
    pub destination: Option<GeoPoint>,
}

impl ReconcileContext {
    /// Context with both endpoints known.
    #[must_use]
    pub const fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin: Some(origin),
            destination: Some(destination),
        }
    }

    /// Context with nothing known.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            origin: None,
            destination: None,
        }
    }

    /// Context for one direction of a trip; the return direction swaps the
    /// endpoints.
    #[must_use]
    pub const fn for_direction(endpoints: Option<EndpointPair>, direction: Direction) -> Self {
        match endpoints {
            Some(pair) => {
                let (origin, destination) = pair.for_direction(direction);
                Self::new(origin, destination)
            }
            None => Self::unknown(),
        }
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::spanning(self.origin?, self.destination?))
    }

    fn request(&self) -> Option<PathRequest> {
        Some(PathRequest {
            origin: self.origin?,
            destination: self.destination?,
            travel_mode: TravelMode::Driving,
        })
    }
}

/// Rebuild one provider path from plain data.
///
/// A record without a usable route (no legs and no overview geometry)
/// yields [`ProviderPathResult::empty`]. JSON-encoded strings are decoded
/// first.
///
/// # Examples
/// ```
/// use rtd_core::reconcile::{ReconcileContext, reconstruct_path};
/// use rtd_core::GeoPoint;
/// use serde_json::json;
///
/// let ctx = ReconcileContext::new(
///     GeoPoint { lat: 19.0, lng: 72.8 },
///     GeoPoint { lat: 18.5, lng: 73.8 },
/// );
/// let raw = json!({
///     "routes": [{
///         "legs": [{
///             "distance": {"text": "150 km", "value": 150000},
///             "start_location": {"latitude": 19.0, "longitude": 72.8},
///             "end_location": [18.5, 73.8],
///         }],
///         "overview_polyline": {"points": "abc"},
///     }]
/// });
///
/// let path = reconstruct_path(&raw, &ctx);
/// let leg = path.primary_leg().expect("leg");
/// assert_eq!(leg.distance.text, "150 km");
/// assert_eq!(leg.end_location, GeoPoint { lat: 18.5, lng: 73.8 });
/// assert_eq!(path.routes[0].overview_polyline, "abc");
/// assert!(path.request.is_some());
///
/// assert!(reconstruct_path(&json!({"routes": []}), &ctx).is_empty());
/// ```
#[must_use]
pub fn reconstruct_path(raw: &Value, ctx: &ReconcileContext) -> ProviderPathResult {
    let decoded = embedded_json(raw);
    let record = decoded.as_ref().unwrap_or(raw);

    let routes: Vec<ProviderRoute> = array(record.get("routes"), "routes")
        .iter()
        .filter_map(|route| rebuild_route(route, ctx))
        .collect();
    if routes.is_empty() {
        return ProviderPathResult::empty();
    }

    ProviderPathResult {
        routes,
        request: rebuild_request(record.get("request")).or_else(|| ctx.request()),
        geocoded_waypoints: array(record.get("geocoded_waypoints"), "geocoded_waypoints").to_vec(),
    }
}

/// Rebuild one direction's `{selected, suggested, customPath}` record.
///
/// Empty suggestions are dropped and an empty custom path becomes `None`.
#[must_use]
pub fn reconstruct_direction(raw: &Value, ctx: &ReconcileContext) -> DirectionRoute {
    let decoded = embedded_json(raw);
    let record = decoded.as_ref().unwrap_or(raw);

    let selected = record
        .get("selected")
        .map_or_else(ProviderPathResult::empty, |path| reconstruct_path(path, ctx));
    let suggested = array(record.get("suggested"), "suggested")
        .iter()
        .map(|path| reconstruct_path(path, ctx))
        .filter(|path| !path.is_empty())
        .collect();
    let custom_path = record
        .get("customPath")
        .or_else(|| record.get("custom_path"))
        .map(|path| reconstruct_path(path, ctx))
        .filter(|path| !path.is_empty());

    DirectionRoute {
        selected,
        suggested,
        custom_path,
    }
}

/// Rebuild a whole trip route, each direction independently.
///
/// `endpoints` are the trip's source and destination; the return direction
/// is reconstructed with them swapped. A missing or malformed direction is
/// logged and left empty without affecting the other.
#[must_use]
pub fn reconstruct_trip_route(raw: &Value, endpoints: Option<EndpointPair>) -> TripRoute {
    let decoded = embedded_json(raw);
    let record = decoded.as_ref().unwrap_or(raw);

    let mut trip = TripRoute::default();
    for direction in Direction::BOTH {
        let ctx = ReconcileContext::for_direction(endpoints, direction);
        *trip.direction_mut(direction) = match record.get(direction.as_str()) {
            Some(entry) if entry.is_object() || entry.is_string() => {
                reconstruct_direction(entry, &ctx)
            }
            _ => {
                report(&ReconstructionWarning::MissingDirection { direction });
                DirectionRoute::default()
            }
        };
    }
    trip
}

/// Parse and reconstruct a trip route stored as JSON text.
///
/// # Errors
/// Returns the decoder error when `text` is not JSON at all; any JSON value
/// is accepted and reconstructed best-effort.
pub fn parse_trip_route(
    text: &str,
    endpoints: Option<EndpointPair>,
) -> Result<TripRoute, serde_json::Error> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(reconstruct_trip_route(&raw, endpoints))
}

/// Decode a value that holds JSON as a string, one level deep.
fn embedded_json(raw: &Value) -> Option<Value> {
    let Value::String(text) = raw else {
        return None;
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::String(_)) => None,
        Ok(decoded) => Some(decoded),
        Err(err) => {
            report(&ReconstructionWarning::MalformedRecord {
                message: err.to_string(),
            });
            None
        }
    }
}

fn array<'a>(value: Option<&'a Value>, field: &'static str) -> &'a [Value] {
    match value {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => &[],
        Some(_) => {
            report(&ReconstructionWarning::NotAnArray { field });
            &[]
        }
    }
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn text_value(value: Option<&Value>) -> TextValue {
    let Some(pair) = value else {
        return TextValue::default();
    };
    let amount = pair.get("value").and_then(|raw| {
        raw.as_u64().or_else(|| {
            raw.as_f64()
                .filter(|number| number.is_finite() && *number >= 0.0)
                // `as` saturates above `u64::MAX`.
                .map(|number| number.round() as u64)
        })
    });
    TextValue::new(text(pair, "text"), amount.unwrap_or(0))
}

fn travel_mode(value: &Value) -> TravelMode {
    value
        .get("travel_mode")
        .or_else(|| value.get("travelMode"))
        .and_then(Value::as_str)
        .and_then(TravelMode::parse)
        .unwrap_or_default()
}

fn rebuild_route(raw: &Value, ctx: &ReconcileContext) -> Option<ProviderRoute> {
    if !raw.is_object() {
        return None;
    }
    let legs: Vec<RouteLeg> = array(raw.get("legs"), "legs")
        .iter()
        .map(rebuild_leg)
        .collect();
    let overview_path = normalize_path(raw.get("overview_path"), "overview_path");
    if legs.is_empty() && overview_path.is_empty() {
        return None;
    }

    let mut route = ProviderRoute {
        bounds: None,
        legs,
        overview_path,
        overview_polyline: overview_polyline(raw.get("overview_polyline")),
        summary: text(raw, "summary"),
        copyrights: text(raw, "copyrights"),
        warnings: array(raw.get("warnings"), "warnings")
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        waypoint_order: array(raw.get("waypoint_order"), "waypoint_order")
            .iter()
            .filter_map(Value::as_u64)
            .filter_map(|order| u32::try_from(order).ok())
            .collect(),
    };
    route.bounds = rebuild_bounds(raw.get("bounds"))
        .or_else(|| ctx.bounds())
        .or_else(|| route.effective_bounds());
    Some(route)
}

fn overview_polyline(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(points)) => points.clone(),
        Some(encoded) => text(encoded, "points"),
        None => String::new(),
    }
}

fn rebuild_bounds(value: Option<&Value>) -> Option<LatLngBounds> {
    let raw = value.filter(|bounds| !bounds.is_null())?;
    let edge = |key: &str| raw.get(key).and_then(Value::as_f64);
    let bounds = match (edge("north"), edge("south"), edge("east"), edge("west")) {
        (Some(north), Some(south), Some(east), Some(west)) => Some(LatLngBounds {
            north,
            south,
            east,
            west,
        }),
        _ => corner_bounds(raw),
    };
    let well_formed = bounds.filter(LatLngBounds::is_well_formed);
    if well_formed.is_none() {
        report(&ReconstructionWarning::MalformedBounds);
    }
    well_formed
}

fn corner_bounds(raw: &Value) -> Option<LatLngBounds> {
    let northeast = try_coordinate(raw.get("northeast").into())?;
    let southwest = try_coordinate(raw.get("southwest").into())?;
    Some(LatLngBounds {
        north: northeast.lat,
        south: southwest.lat,
        east: northeast.lng,
        west: southwest.lng,
    })
}

fn rebuild_leg(raw: &Value) -> RouteLeg {
    let via_waypoints = match raw.get("via_waypoints") {
        Some(points) => normalize_path(Some(points), "via_waypoints"),
        None => array(raw.get("via_waypoint"), "via_waypoint")
            .iter()
            .map(|via| normalize_coordinate(via.get("location"), "via_waypoint.location"))
            .collect(),
    };
    RouteLeg {
        distance: text_value(raw.get("distance")),
        duration: text_value(raw.get("duration")),
        start_address: text(raw, "start_address"),
        end_address: text(raw, "end_address"),
        start_location: normalize_coordinate(raw.get("start_location"), "leg.start_location"),
        end_location: normalize_coordinate(raw.get("end_location"), "leg.end_location"),
        steps: array(raw.get("steps"), "steps")
            .iter()
            .map(rebuild_step)
            .collect(),
        via_waypoints,
    }
}

fn rebuild_step(raw: &Value) -> RouteStep {
    let path = raw.get("path").or_else(|| raw.get("lat_lngs"));
    let instructions = raw
        .get("instructions")
        .or_else(|| raw.get("html_instructions"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    RouteStep {
        distance: text_value(raw.get("distance")),
        duration: text_value(raw.get("duration")),
        start_location: normalize_coordinate(raw.get("start_location"), "step.start_location"),
        end_location: normalize_coordinate(raw.get("end_location"), "step.end_location"),
        path: normalize_path(path, "step.path"),
        instructions,
        travel_mode: travel_mode(raw),
    }
}

fn rebuild_request(value: Option<&Value>) -> Option<PathRequest> {
    let raw = value?;
    Some(PathRequest {
        origin: request_point(raw.get("origin"))?,
        destination: request_point(raw.get("destination"))?,
        travel_mode: travel_mode(raw),
    })
}

/// Request endpoints may be plain points or `{location: point}` objects.
fn request_point(value: Option<&Value>) -> Option<GeoPoint> {
    try_coordinate(value.into())
        .or_else(|| try_coordinate(value.and_then(|place| place.get("location")).into()))
}
