//! Core domain types for the RTD route engine.
//!
//! This crate holds the value model shared by the engine, the HTTP adapter
//! and the CLI: coordinates and geofences, provider-shaped path records, the
//! persisted [`TripRoute`] shape, the [`DirectionsProvider`] and
//! [`RouteRenderer`] capabilities, reconciliation of persisted records and
//! aggregate trip metrics.
//!
//! Constructors that can see invalid input return `Result`; reconstruction
//! of persisted data never fails and defaults malformed fields instead.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bounds;
pub mod directions;
pub mod metrics;
mod path;
mod point;
pub mod reconcile;
pub mod render;
mod trip;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bounds::LatLngBounds;
pub use directions::{DirectionsError, DirectionsProvider, DirectionsRequest};
pub use metrics::TripMetrics;
pub use path::{
    LegMetric, PathRequest, ProviderPathResult, ProviderRoute, RouteLeg, RouteStep, TextValue,
    TravelMode,
};
pub use point::{GeoPoint, GeoPointError, Geofence};
pub use render::{CandidateKey, GeofenceRole, HeadlessRenderer, PathStyle, RouteRenderer};
pub use trip::{Direction, DirectionRoute, EndpointPair, TripEndpoints, TripRoute};
