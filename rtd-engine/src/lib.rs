//! Dual-direction route engine for RTD trips.
//!
//! This crate provides [`DualRouteEngine`], which computes, renders,
//! selects, customises and resets alternative driving routes for the
//! outbound (source to destination) and return (destination to source)
//! halves of a trip. Routes come from an injected
//! [`DirectionsProvider`](rtd_core::DirectionsProvider) and are mirrored onto
//! an injected [`RouteRenderer`](rtd_core::RouteRenderer). Every state
//! change publishes a [`RouteEvent`] carrying the full
//! [`TripRoute`](rtd_core::TripRoute) snapshot.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod direction_set;
mod engine;
mod error;
mod events;

pub use config::{EngineConfig, Stroke};
pub use direction_set::{DirectionSet, PathCandidate};
pub use engine::{
    ComputeOutcome, DualRouteEngine, PendingComputation, RequestToken, ResolvedComputation,
};
pub use error::EngineError;
pub use events::RouteEvent;
