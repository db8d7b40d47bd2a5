//! Test doubles for the provider and renderer capabilities.
//!
//! Enabled for unit tests and, through the `test-support` feature, for
//! downstream crates' tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::metrics::parse_duration;
use crate::{
    CandidateKey, DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint, Geofence,
    GeofenceRole, LatLngBounds, PathRequest, PathStyle, ProviderPathResult, ProviderRoute,
    RouteLeg, RouteRenderer, RouteStep, TextValue,
};

type Script = (GeoPoint, GeoPoint, Result<Vec<ProviderRoute>, DirectionsError>);

/// Provider answering from routes scripted per origin/destination pair.
///
/// Unscripted pairs fail with a `ZERO_RESULTS` status, the same way a real
/// service reports an unroutable request.
#[derive(Debug, Default)]
pub struct StubDirectionsProvider {
    scripts: Vec<Script>,
    calls: AtomicUsize,
    requests: Mutex<Vec<DirectionsRequest>>,
}

impl StubDirectionsProvider {
    /// A provider with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `origin -> destination` with `routes`.
    #[must_use]
    pub fn with_route(
        mut self,
        origin: GeoPoint,
        destination: GeoPoint,
        routes: Vec<ProviderRoute>,
    ) -> Self {
        self.scripts.push((origin, destination, Ok(routes)));
        self
    }

    /// Answer `origin -> destination` with `error`.
    #[must_use]
    pub fn with_error(
        mut self,
        origin: GeoPoint,
        destination: GeoPoint,
        error: DirectionsError,
    ) -> Self {
        self.scripts.push((origin, destination, Err(error)));
        self
    }

    /// Number of `route` calls served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in arrival order.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DirectionsProvider for StubDirectionsProvider {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<ProviderPathResult, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        request.validate()?;
        let scripted = self
            .scripts
            .iter()
            .find(|(origin, destination, _)| {
                *origin == request.origin && *destination == request.destination
            })
            .map(|(_, _, outcome)| outcome.clone());
        match scripted {
            Some(Ok(routes)) => Ok(ProviderPathResult {
                routes,
                request: Some(PathRequest {
                    origin: request.origin,
                    destination: request.destination,
                    travel_mode: request.travel_mode,
                }),
                geocoded_waypoints: Vec::new(),
            }),
            Some(Err(error)) => Err(error),
            None => Err(DirectionsError::Status {
                code: "ZERO_RESULTS".to_owned(),
                message: "no route scripted".to_owned(),
            }),
        }
    }
}

/// A one-leg route whose geometry and polyline depend on `distance_m`, so
/// routes of different lengths never compare equal.
#[must_use]
pub fn sample_route(distance_m: u64, distance_text: &str, duration_text: &str) -> ProviderRoute {
    let start = GeoPoint { lat: 10.0, lng: 20.0 };
    let end = GeoPoint { lat: 11.0, lng: 21.0 };
    let via = GeoPoint {
        lat: 10.5,
        lng: 20.0 + distance_m as f64 / 1_000_000.0,
    };
    let duration = parse_duration(duration_text);
    let seconds = duration.hours * 3_600 + duration.minutes * 60;
    let distance = TextValue::new(distance_text, distance_m);
    let step = RouteStep {
        distance: distance.clone(),
        duration: TextValue::new(duration_text, seconds),
        start_location: start,
        end_location: end,
        path: vec![start, via, end],
        instructions: format!("Drive {distance_text}"),
        ..RouteStep::default()
    };
    ProviderRoute {
        bounds: LatLngBounds::from_points(&[start, via, end]),
        legs: vec![RouteLeg {
            distance,
            duration: TextValue::new(duration_text, seconds),
            start_address: "Source depot".to_owned(),
            end_address: "Destination plant".to_owned(),
            start_location: start,
            end_location: end,
            steps: vec![step],
            via_waypoints: Vec::new(),
        }],
        overview_path: vec![start, via, end],
        overview_polyline: format!("poly-{distance_m}"),
        summary: format!("Route {distance_m}"),
        copyrights: "Test data".to_owned(),
        warnings: Vec::new(),
        waypoint_order: Vec::new(),
    }
}

/// Wrap a single route in a path result.
#[must_use]
pub fn single_path(route: ProviderRoute) -> ProviderPathResult {
    ProviderPathResult {
        routes: vec![route],
        request: None,
        geocoded_waypoints: Vec::new(),
    }
}

/// One call made on a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    /// `render` was called.
    Render(CandidateKey, PathStyle),
    /// `set_draggable` was called.
    SetDraggable(CandidateKey, bool),
    /// `remove` was called.
    Remove(CandidateKey),
    /// `render_geofence` was called.
    Geofence(GeofenceRole),
    /// `fit_viewport` was called.
    FitViewport(LatLngBounds),
}

/// Renderer that records calls and keeps the resulting map state.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Every call in order.
    pub calls: Vec<RenderCall>,
    /// Currently drawn candidates.
    pub rendered: BTreeMap<CandidateKey, (ProviderPathResult, PathStyle)>,
    /// Candidates currently draggable.
    pub draggable: BTreeSet<CandidateKey>,
    /// Drawn geofence circles.
    pub geofences: Vec<(GeofenceRole, Geofence)>,
    /// Last fitted viewport.
    pub viewport: Option<LatLngBounds>,
}

impl RecordingRenderer {
    /// Style of the drawn candidate at `key`.
    #[must_use]
    pub fn style(&self, key: CandidateKey) -> Option<&PathStyle> {
        self.rendered.get(&key).map(|(_, style)| style)
    }
}

impl RouteRenderer for RecordingRenderer {
    fn render(&mut self, key: CandidateKey, path: &ProviderPathResult, style: &PathStyle) {
        self.calls.push(RenderCall::Render(key, style.clone()));
        self.rendered.insert(key, (path.clone(), style.clone()));
    }

    fn set_draggable(&mut self, key: CandidateKey, draggable: bool) {
        self.calls.push(RenderCall::SetDraggable(key, draggable));
        if draggable {
            self.draggable.insert(key);
        } else {
            self.draggable.remove(&key);
        }
    }

    fn remove(&mut self, key: CandidateKey) {
        self.calls.push(RenderCall::Remove(key));
        self.rendered.remove(&key);
        self.draggable.remove(&key);
    }

    fn render_geofence(&mut self, role: GeofenceRole, geofence: &Geofence) {
        self.calls.push(RenderCall::Geofence(role));
        self.geofences.push((role, geofence.clone()));
    }

    fn fit_viewport(&mut self, bounds: LatLngBounds) {
        self.calls.push(RenderCall::FitViewport(bounds));
        self.viewport = Some(bounds);
    }
}
