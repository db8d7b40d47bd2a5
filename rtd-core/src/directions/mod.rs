//! Request alternative routes from a directions service.
//!
//! The [`DirectionsProvider`] trait abstracts the routing service the engine
//! talks to. Callers pass a [`DirectionsRequest`] and receive a
//! [`ProviderPathResult`](crate::ProviderPathResult) holding every
//! alternative the service returned.
//!
//! Implementations are injected into the engine so tests can substitute a
//! stub for the network-backed adapter.

mod error;
mod provider;

pub use error::DirectionsError;
pub use provider::{DirectionsProvider, DirectionsRequest};
