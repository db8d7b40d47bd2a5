//! Latitude/longitude bounding boxes for route viewports.

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// A bounding box in the `{north, south, east, west}` shape persisted with
/// trip routes.
///
/// Boxes crossing the antimeridian are not modelled; `west <= east` is
/// assumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    /// Northern latitude edge.
    pub north: f64,
    /// Southern latitude edge.
    pub south: f64,
    /// Eastern longitude edge.
    pub east: f64,
    /// Western longitude edge.
    pub west: f64,
}

impl LatLngBounds {
    /// Smallest box containing both points.
    ///
    /// # Examples
    /// ```
    /// use rtd_core::{GeoPoint, LatLngBounds};
    ///
    /// let bounds = LatLngBounds::spanning(
    ///     GeoPoint { lat: 10.0, lng: 20.0 },
    ///     GeoPoint { lat: 5.0, lng: 25.0 },
    /// );
    /// assert_eq!(bounds.north, 10.0);
    /// assert_eq!(bounds.west, 20.0);
    /// ```
    #[must_use]
    pub fn spanning(a: GeoPoint, b: GeoPoint) -> Self {
        Self::from_rect(Rect::new(Coord::from(a), Coord::from(b)))
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let multi: MultiPoint<f64> = points
            .into_iter()
            .map(|point| Point::from(Coord::from(*point)))
            .collect();
        multi.bounding_rect().map(Self::from_rect)
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    /// Whether all four edges are finite and ordered.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        [self.north, self.south, self.east, self.west]
            .iter()
            .all(|edge| edge.is_finite())
            && self.south <= self.north
            && self.west <= self.east
    }

    /// Convert to a `geo` rectangle (`x = lng`, `y = lat`).
    #[must_use]
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
    }

    fn from_rect(rect: Rect<f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self {
            north: max.y,
            south: min.y,
            east: max.x,
            west: min.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn from_points_covers_all_points() {
        let points = [
            GeoPoint { lat: 1.0, lng: 2.0 },
            GeoPoint { lat: -3.0, lng: 4.0 },
            GeoPoint { lat: 2.0, lng: -1.0 },
        ];
        let bounds = LatLngBounds::from_points(&points).expect("non-empty input");
        assert_eq!(
            bounds,
            LatLngBounds {
                north: 2.0,
                south: -3.0,
                east: 4.0,
                west: -1.0,
            }
        );
    }

    #[rstest]
    fn from_points_is_none_for_empty_input() {
        assert!(LatLngBounds::from_points(&[]).is_none());
    }

    #[rstest]
    fn union_takes_outer_edges() {
        let a = LatLngBounds::spanning(GeoPoint { lat: 0.0, lng: 0.0 }, GeoPoint { lat: 1.0, lng: 1.0 });
        let b = LatLngBounds::spanning(GeoPoint { lat: 2.0, lng: -1.0 }, GeoPoint { lat: 0.5, lng: 0.5 });
        let merged = a.union(&b);
        assert_eq!(merged.north, 2.0);
        assert_eq!(merged.south, 0.0);
        assert_eq!(merged.east, 1.0);
        assert_eq!(merged.west, -1.0);
    }

    #[rstest]
    fn rejects_inverted_edges() {
        let bounds = LatLngBounds {
            north: 0.0,
            south: 1.0,
            east: 1.0,
            west: 0.0,
        };
        assert!(!bounds.is_well_formed());
    }

    #[rstest]
    fn rect_round_trip_preserves_edges() {
        let bounds = LatLngBounds {
            north: 19.2,
            south: 18.9,
            east: 73.0,
            west: 72.8,
        };
        assert_eq!(LatLngBounds::from_rect(bounds.to_rect()), bounds);
    }
}
