//! The trip route record exchanged with consumers and persisted as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, Geofence, LegMetric, ProviderPathResult};

/// Which half of the round trip a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Source to destination.
    Outbound,
    /// Destination back to source.
    Return,
}

impl Direction {
    /// Both directions in display order.
    pub const BOTH: [Self; 2] = [Self::Outbound, Self::Return];

    /// Lower-case name used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Return => "return",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted state of one direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionRoute {
    /// The currently selected path, including any dragged geometry.
    pub selected: ProviderPathResult,
    /// Alternatives as originally fetched, in display order.
    pub suggested: Vec<ProviderPathResult>,
    /// The last user-dragged path for this direction.
    pub custom_path: Option<ProviderPathResult>,
}

impl DirectionRoute {
    /// Whether there is nothing to render for this direction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.suggested.iter().all(ProviderPathResult::is_empty)
    }

    /// Metric of the selected path's first leg, if it has one.
    #[must_use]
    pub fn selected_metric(&self) -> Option<LegMetric> {
        self.selected
            .primary_leg()
            .map(|_| LegMetric::of(&self.selected))
    }
}

/// Outbound and return routes for one trip.
///
/// Serialises as `{"outbound": {..}, "return": {..}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripRoute {
    /// Source to destination.
    pub outbound: DirectionRoute,
    /// Destination to source.
    #[serde(rename = "return")]
    pub return_trip: DirectionRoute,
}

impl TripRoute {
    /// Borrow the record for `direction`.
    #[must_use]
    pub const fn direction(&self, direction: Direction) -> &DirectionRoute {
        match direction {
            Direction::Outbound => &self.outbound,
            Direction::Return => &self.return_trip,
        }
    }

    /// Mutably borrow the record for `direction`.
    pub const fn direction_mut(&mut self, direction: Direction) -> &mut DirectionRoute {
        match direction {
            Direction::Outbound => &mut self.outbound,
            Direction::Return => &mut self.return_trip,
        }
    }
}

/// Source and destination points of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndpointPair {
    /// Trip origin.
    pub source: GeoPoint,
    /// Trip destination.
    pub destination: GeoPoint,
}

impl EndpointPair {
    /// Origin and destination for `direction`; the return leg swaps them.
    #[must_use]
    pub const fn for_direction(&self, direction: Direction) -> (GeoPoint, GeoPoint) {
        match direction {
            Direction::Outbound => (self.source, self.destination),
            Direction::Return => (self.destination, self.source),
        }
    }
}

/// Geofenced endpoints supplied by the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEndpoints {
    /// Source geofence; its centre is the trip origin.
    pub source: Geofence,
    /// Destination geofence; its centre is the trip destination.
    pub destination: Geofence,
}

impl TripEndpoints {
    /// Geofence centres as a routing endpoint pair.
    #[must_use]
    pub const fn points(&self) -> EndpointPair {
        EndpointPair {
            source: self.source.center,
            destination: self.destination.center,
        }
    }
}
