//! Response types for the Directions web service.
//!
//! The REST service returns geometry as encoded polylines and nests bounds
//! as `northeast`/`southwest` corners. These types mirror that JSON; the
//! conversion into [`rtd_core::ProviderPathResult`] lives in the sibling
//! `convert` module.
//!
//! See: <https://developers.google.com/maps/documentation/directions/get-directions>

use rtd_core::{GeoPoint, TextValue};
use serde::Deserialize;

/// Top-level Directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code.
    ///
    /// Common values:
    /// - `"OK"` - at least one route was found
    /// - `"ZERO_RESULTS"` - no route between the points
    /// - `"NOT_FOUND"` - an endpoint could not be geocoded
    /// - `"OVER_QUERY_LIMIT"` / `"REQUEST_DENIED"` - quota or key problems
    pub status: String,

    /// Detail supplied with non-`OK` statuses.
    #[serde(default)]
    pub error_message: Option<String>,

    /// Geocoding metadata for each waypoint, passed through untouched.
    #[serde(default)]
    pub geocoded_waypoints: Vec<serde_json::Value>,

    /// Alternatives in provider order.
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// An encoded polyline wrapper, `{"points": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub struct EncodedPolyline {
    /// Polyline-encoded coordinates at precision 5.
    #[serde(default)]
    pub points: String,
}

/// Viewport corners.
#[derive(Debug, Deserialize)]
pub struct Bounds {
    /// North-east corner.
    pub northeast: GeoPoint,
    /// South-west corner.
    pub southwest: GeoPoint,
}

/// One alternative route.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Route viewport.
    #[serde(default)]
    pub bounds: Option<Bounds>,
    /// Provider attribution.
    #[serde(default)]
    pub copyrights: String,
    /// Legs in travel order.
    #[serde(default)]
    pub legs: Vec<Leg>,
    /// Simplified route geometry.
    #[serde(default)]
    pub overview_polyline: EncodedPolyline,
    /// Short description of the route.
    #[serde(default)]
    pub summary: String,
    /// Warnings to display with the route.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Visiting order of optimised waypoints.
    #[serde(default)]
    pub waypoint_order: Vec<u32>,
}

/// A leg between consecutive stops.
#[derive(Debug, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub distance: TextValue,
    #[serde(default)]
    pub duration: TextValue,
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
    #[serde(default)]
    pub start_location: GeoPoint,
    #[serde(default)]
    pub end_location: GeoPoint,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Pass-through points that shaped this leg.
    #[serde(default)]
    pub via_waypoint: Vec<ViaWaypoint>,
}

/// A pass-through point attached to a leg.
#[derive(Debug, Deserialize)]
pub struct ViaWaypoint {
    /// Where the route was pinned.
    pub location: GeoPoint,
}

/// A single manoeuvre.
#[derive(Debug, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub distance: TextValue,
    #[serde(default)]
    pub duration: TextValue,
    #[serde(default)]
    pub start_location: GeoPoint,
    #[serde(default)]
    pub end_location: GeoPoint,
    /// Instructions with HTML markup.
    #[serde(default)]
    pub html_instructions: String,
    #[serde(default)]
    pub polyline: EncodedPolyline,
    /// Mode name such as `"DRIVING"`.
    #[serde(default)]
    pub travel_mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "status": "OK",
            "geocoded_waypoints": [{"geocoder_status": "OK", "place_id": "abc"}],
            "routes": [{
                "bounds": {
                    "northeast": {"lat": 19.1, "lng": 73.9},
                    "southwest": {"lat": 18.5, "lng": 72.8}
                },
                "legs": [{
                    "distance": {"text": "148 km", "value": 148012},
                    "duration": {"text": "2 hours 51 mins", "value": 10270},
                    "start_location": {"lat": 19.07, "lng": 72.87},
                    "end_location": {"lat": 18.52, "lng": 73.85},
                    "steps": [{
                        "html_instructions": "Head <b>south</b>",
                        "polyline": {"points": "_p~iF~ps|U"},
                        "travel_mode": "DRIVING"
                    }],
                    "via_waypoint": []
                }],
                "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC"},
                "summary": "Mumbai - Pune Expy",
                "warnings": [],
                "waypoint_order": []
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert_eq!(response.geocoded_waypoints.len(), 1);
        let route = response.routes.first().expect("one route");
        assert_eq!(route.summary, "Mumbai - Pune Expy");
        let leg = route.legs.first().expect("one leg");
        assert_eq!(leg.distance.value, 148_012);
        assert_eq!(leg.duration.text, "2 hours 51 mins");
        assert_eq!(
            leg.steps.first().map(|step| step.travel_mode.as_str()),
            Some("DRIVING")
        );
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "routes": []
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.error_message.as_deref(),
            Some("The provided API key is invalid.")
        );
        assert!(response.routes.is_empty());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"status": "OK", "routes": [{"legs": [{}]}]}"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");

        let route = response.routes.first().expect("one route");
        assert!(route.bounds.is_none());
        assert!(route.overview_polyline.points.is_empty());
        assert_eq!(route.legs.len(), 1);
    }
}
