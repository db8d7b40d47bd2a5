//! Facade crate for the RTD round-trip route engine.
//!
//! This crate re-exports the core domain types and exposes the dual-route
//! engine and the HTTP directions adapter behind feature flags.

#![forbid(unsafe_code)]

pub use rtd_core::{
    Direction, DirectionRoute, DirectionsError, DirectionsProvider, DirectionsRequest,
    EndpointPair, GeoPoint, Geofence, HeadlessRenderer, LatLngBounds, ProviderPathResult,
    RouteRenderer, TravelMode, TripEndpoints, TripMetrics, TripRoute,
};
pub use rtd_core::{metrics, reconcile};

#[cfg(feature = "engine")]
pub use rtd_engine::{ComputeOutcome, DualRouteEngine, EngineConfig, EngineError, RouteEvent};

#[cfg(feature = "http")]
pub use rtd_data::{HttpDirectionsProvider, HttpDirectionsProviderConfig, ProviderBuildError};
