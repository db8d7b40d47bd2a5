//! Errors surfaced by engine operations.

use rtd_core::{Direction, DirectionsError, GeoPointError};
use thiserror::Error;

/// Errors from [`DualRouteEngine`](crate::DualRouteEngine) operations.
///
/// A failed operation leaves the engine in its prior state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A direction's provider request failed or returned no routes.
    ///
    /// Neither direction is committed when this is returned.
    #[error("could not compute {direction} routes")]
    RouteComputation {
        /// Direction whose request failed.
        direction: Direction,
        /// Provider failure.
        #[source]
        source: DirectionsError,
    },
    /// A trip endpoint was outside the valid coordinate range.
    #[error("invalid {endpoint} coordinate")]
    InvalidCoordinate {
        /// `"source"` or `"destination"`.
        endpoint: &'static str,
        /// Validation failure.
        #[source]
        source: GeoPointError,
    },
    /// No candidate exists at the requested index.
    #[error("{direction} candidate {index} is out of range ({len} candidates)")]
    IndexOutOfRange {
        /// Direction addressed.
        direction: Direction,
        /// Requested index.
        index: usize,
        /// Number of candidates in the direction.
        len: usize,
    },
    /// A drag completion arrived for a candidate that is not draggable.
    #[error("{direction} candidate {index} is not draggable")]
    DragRejected {
        /// Direction addressed.
        direction: Direction,
        /// Candidate the callback named.
        index: usize,
    },
    /// A dragged path could not be read as a full route.
    #[error("dragged {direction} path for candidate {index} has no route leg")]
    DragReconciliation {
        /// Direction addressed.
        direction: Direction,
        /// Candidate that was dragged.
        index: usize,
    },
    /// No routes have been computed or loaded yet.
    #[error("no trip route has been computed or loaded")]
    NotReady,
    /// A trip route record had nothing to render in either direction.
    #[error("trip route record has no routes in either direction")]
    EmptyRecord,
}
