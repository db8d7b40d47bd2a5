//! Coordinate and geofence value objects.
//!
//! Both types are plain values. [`GeoPoint::new`] validates its input so the
//! engine can reject out-of-range endpoints before issuing provider requests.

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS84 coordinate in decimal degrees.
///
/// # Examples
///
/// ```
/// use rtd_core::GeoPoint;
///
/// # fn main() -> Result<(), rtd_core::GeoPointError> {
/// let depot = GeoPoint::new(19.076, 72.8777)?;
/// assert_eq!(depot.lat, 19.076);
/// assert!(!depot.is_zero());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lng: f64,
}

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Latitude was non-finite or outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude was non-finite or outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

impl GeoPoint {
    /// The zero-value default, `(0, 0)`.
    pub const ZERO: Self = Self { lat: 0.0, lng: 0.0 };

    /// Validates and constructs a [`GeoPoint`].
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Check both components are finite and in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Self::new(self.lat, self.lng).is_ok()
    }

    /// Whether this is the `(0, 0)` placeholder callers pass before real
    /// endpoints are known.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

/// A circular geofence drawn around a trip endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    /// Circle centre; also the routing endpoint.
    pub center: GeoPoint,
    /// Radius in metres.
    pub radius_meters: f64,
    /// CSS colour used when drawing the circle.
    pub color: String,
}

impl Geofence {
    /// Construct a geofence.
    pub fn new(center: GeoPoint, radius_meters: f64, color: impl Into<String>) -> Self {
        Self {
            center,
            radius_meters,
            color: color.into(),
        }
    }
}
