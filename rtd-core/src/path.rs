//! Provider-shaped path records.
//!
//! These types mirror the directions result shape that consumers persist and
//! read back (for example the certificate generator reads
//! `selected.routes[0].legs[0].distance.text`). Field names are the wire
//! names and must not change.

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, LatLngBounds};

/// Travel mode understood by the directions provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TravelMode {
    /// Road travel by car.
    #[default]
    Driving,
    /// Pedestrian paths.
    Walking,
    /// Cycle paths.
    Bicycling,
    /// Public transport.
    Transit,
}

impl TravelMode {
    /// Wire name in the provider's casing.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "DRIVING",
            Self::Walking => "WALKING",
            Self::Bicycling => "BICYCLING",
            Self::Transit => "TRANSIT",
        }
    }

    /// Parse a mode name case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "driving" => Some(Self::Driving),
            "walking" => Some(Self::Walking),
            "bicycling" => Some(Self::Bicycling),
            "transit" => Some(Self::Transit),
            _ => None,
        }
    }
}

/// A human-readable text paired with its numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextValue {
    /// Display text, e.g. `"5.1 km"` or `"1 hour 5 mins"`.
    pub text: String,
    /// Metres for distances, seconds for durations.
    pub value: u64,
}

impl TextValue {
    /// Construct a text/value pair.
    pub fn new(text: impl Into<String>, value: u64) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

/// One manoeuvre within a leg.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteStep {
    /// Step distance.
    pub distance: TextValue,
    /// Step duration.
    pub duration: TextValue,
    /// Where the step starts.
    pub start_location: GeoPoint,
    /// Where the step ends.
    pub end_location: GeoPoint,
    /// Full step polyline.
    pub path: Vec<GeoPoint>,
    /// Driver instructions (may contain markup).
    pub instructions: String,
    /// Mode used for this step.
    pub travel_mode: TravelMode,
}

/// A leg between two consecutive stops of a route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Leg distance.
    pub distance: TextValue,
    /// Leg duration.
    pub duration: TextValue,
    /// Geocoded start address.
    pub start_address: String,
    /// Geocoded end address.
    pub end_address: String,
    /// Leg start.
    pub start_location: GeoPoint,
    /// Leg end.
    pub end_location: GeoPoint,
    /// Ordered steps.
    pub steps: Vec<RouteStep>,
    /// Intermediate points introduced by dragging the route.
    #[serde(default)]
    pub via_waypoints: Vec<GeoPoint>,
}

/// One alternative route returned by the provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderRoute {
    /// Viewport covering the route.
    pub bounds: Option<LatLngBounds>,
    /// Legs in travel order.
    pub legs: Vec<RouteLeg>,
    /// Simplified route geometry.
    pub overview_path: Vec<GeoPoint>,
    /// Encoded form of `overview_path`.
    pub overview_polyline: String,
    /// Short description such as the main road name.
    pub summary: String,
    /// Provider attribution.
    pub copyrights: String,
    /// Provider warnings to show with the route.
    pub warnings: Vec<String>,
    /// Order in which waypoints are visited.
    pub waypoint_order: Vec<u32>,
}

impl ProviderRoute {
    /// Sum of every leg's distance value in metres.
    #[must_use]
    pub fn distance_meters(&self) -> u64 {
        self.legs.iter().map(|leg| leg.distance.value).sum()
    }

    /// Every coordinate the route touches: overview path, leg endpoints and
    /// step paths.
    pub fn points(&self) -> impl Iterator<Item = &GeoPoint> {
        self.overview_path.iter().chain(self.legs.iter().flat_map(|leg| {
            [&leg.start_location, &leg.end_location]
                .into_iter()
                .chain(leg.steps.iter().flat_map(|step| step.path.iter()))
        }))
    }

    /// The stored bounds, or the bounds of [`ProviderRoute::points`].
    #[must_use]
    pub fn effective_bounds(&self) -> Option<LatLngBounds> {
        self.bounds.or_else(|| LatLngBounds::from_points(self.points()))
    }
}

/// Request metadata echoed with a result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    /// Requested origin.
    pub origin: GeoPoint,
    /// Requested destination.
    pub destination: GeoPoint,
    /// Requested travel mode.
    pub travel_mode: TravelMode,
}

/// A directions result: the unit stored for each candidate and exchanged in
/// a [`TripRoute`](crate::TripRoute).
///
/// The engine keeps one route per result; a fresh provider response carries
/// every alternative.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderPathResult {
    /// Alternative routes.
    pub routes: Vec<ProviderRoute>,
    /// Request that produced the result.
    pub request: Option<PathRequest>,
    /// Provider geocoding metadata, passed through untouched.
    #[serde(default)]
    pub geocoded_waypoints: Vec<serde_json::Value>,
}

impl ProviderPathResult {
    /// A result with nothing to render.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            routes: Vec::new(),
            request: None,
            geocoded_waypoints: Vec::new(),
        }
    }

    /// Whether the result has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The first (displayed) route.
    #[must_use]
    pub fn primary_route(&self) -> Option<&ProviderRoute> {
        self.routes.first()
    }

    /// The first leg of the first route.
    #[must_use]
    pub fn primary_leg(&self) -> Option<&RouteLeg> {
        self.primary_route().and_then(|route| route.legs.first())
    }

    /// Split a multi-alternative result into one result per route, keeping
    /// the shared request and geocoding metadata.
    #[must_use]
    pub fn into_alternatives(self) -> Vec<Self> {
        let Self {
            routes,
            request,
            geocoded_waypoints,
        } = self;
        routes
            .into_iter()
            .map(|route| Self {
                routes: vec![route],
                request,
                geocoded_waypoints: geocoded_waypoints.clone(),
            })
            .collect()
    }

    /// Whether two results describe the same geometry and metrics.
    ///
    /// Compares the fields that identify a route rather than every float so
    /// records that went through text storage still match.
    #[must_use]
    pub fn same_route(&self, other: &Self) -> bool {
        match (self.primary_route(), other.primary_route()) {
            (Some(lhs), Some(rhs)) => {
                lhs.overview_polyline == rhs.overview_polyline
                    && lhs.summary == rhs.summary
                    && lhs.overview_path.len() == rhs.overview_path.len()
                    && lhs.distance_meters() == rhs.distance_meters()
            }
            (None, None) => true,
            _ => false,
        }
    }
}

/// Distance and duration of a candidate's primary leg.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegMetric {
    /// Display distance, e.g. `"5.1 km"`.
    pub distance_text: String,
    /// Distance in metres.
    pub distance_value_meters: u64,
    /// Display duration, e.g. `"12 mins"`.
    pub duration_text: String,
    /// Duration in seconds.
    pub duration_value_seconds: u64,
}

impl LegMetric {
    /// Metric of the first leg of `path`, zero-valued when there is none.
    #[must_use]
    pub fn of(path: &ProviderPathResult) -> Self {
        path.primary_leg().map_or_else(Self::default, |leg| Self {
            distance_text: leg.distance.text.clone(),
            distance_value_meters: leg.distance.value,
            duration_text: leg.duration.text.clone(),
            duration_value_seconds: leg.duration.value,
        })
    }
}
