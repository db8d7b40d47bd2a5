//! Network adapters for the RTD route engine.
//!
//! The [`directions`] module talks to a Directions web service over HTTP
//! and implements [`rtd_core::DirectionsProvider`], so the engine can be
//! wired to a live routing backend.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod directions;

pub use directions::{HttpDirectionsProvider, HttpDirectionsProviderConfig, ProviderBuildError};
