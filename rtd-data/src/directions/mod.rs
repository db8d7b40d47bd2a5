//! HTTP directions provider for Directions-compatible REST services.
//!
//! This module provides [`HttpDirectionsProvider`], an implementation of
//! [`rtd_core::DirectionsProvider`] that fetches alternative routes from a
//! Directions web service and converts them into
//! [`rtd_core::ProviderPathResult`] values the engine renders.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use rtd_data::directions::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
//!
//! let config = HttpDirectionsProviderConfig::new("https://maps.googleapis.com")
//!     .with_api_key("your-key")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("rtd-console/1.0");
//! let provider = HttpDirectionsProvider::with_config(config)?;
//! # let _ = provider;
//! # Ok::<(), rtd_data::directions::ProviderBuildError>(())
//! ```

mod convert;
mod google;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpDirectionsProvider, HttpDirectionsProviderConfig,
    ProviderBuildError,
};
