//! Directions provider trait and request type.

use async_trait::async_trait;

use crate::{GeoPoint, ProviderPathResult, TravelMode};

use super::error::DirectionsError;

/// Parameters for a single directions lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    /// Start of the route.
    pub origin: GeoPoint,
    /// End of the route.
    pub destination: GeoPoint,
    /// Pass-through points between origin and destination.
    pub waypoints: Vec<GeoPoint>,
    /// Travel mode to route for.
    pub travel_mode: TravelMode,
    /// Whether the service should return alternative routes.
    pub provide_alternatives: bool,
}

impl DirectionsRequest {
    /// A driving request asking for alternatives, as issued by the engine.
    ///
    /// # Examples
    /// ```
    /// use rtd_core::{DirectionsRequest, GeoPoint, TravelMode};
    ///
    /// let request = DirectionsRequest::driving_alternatives(
    ///     GeoPoint { lat: 19.07, lng: 72.87 },
    ///     GeoPoint { lat: 18.52, lng: 73.85 },
    /// );
    /// assert!(request.provide_alternatives);
    /// assert_eq!(request.travel_mode, TravelMode::Driving);
    /// ```
    #[must_use]
    pub const fn driving_alternatives(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
            travel_mode: TravelMode::Driving,
            provide_alternatives: true,
        }
    }

    /// Add pass-through waypoints.
    #[must_use]
    pub fn with_waypoints(mut self, waypoints: Vec<GeoPoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Check every coordinate in the request is in range.
    pub fn validate(&self) -> Result<(), DirectionsError> {
        let invalid = std::iter::once(&self.origin)
            .chain(std::iter::once(&self.destination))
            .chain(self.waypoints.iter())
            .find(|point| !point.is_valid());
        match invalid {
            Some(point) => Err(DirectionsError::InvalidRequest {
                message: format!("coordinate ({}, {}) is out of range", point.lat, point.lng),
            }),
            None => Ok(()),
        }
    }
}

/// Fetch alternative routes between two points.
///
/// Implementations return every alternative in one
/// [`ProviderPathResult`]. A successful call with an empty `routes` list is
/// allowed; the engine treats it the same as a failed call.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use rtd_core::{DirectionsError, DirectionsProvider, DirectionsRequest, ProviderPathResult};
///
/// struct NothingProvider;
///
/// #[async_trait]
/// impl DirectionsProvider for NothingProvider {
///     async fn route(
///         &self,
///         request: &DirectionsRequest,
///     ) -> Result<ProviderPathResult, DirectionsError> {
///         request.validate()?;
///         Err(DirectionsError::Status {
///             code: "ZERO_RESULTS".to_owned(),
///             message: String::new(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Return the alternatives for `request`.
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<ProviderPathResult, DirectionsError>;
}
