//! Render layer contract.
//!
//! The engine owns all route state; a renderer only mirrors it onto a map
//! surface. Renderers look up their native handles by [`CandidateKey`] and
//! never hand handles back to the engine. Drag completion is reported by the
//! host calling the engine's drag handler with the same key.

use crate::{Direction, Geofence, LatLngBounds, ProviderPathResult};

/// Arena index of a rendered candidate: direction plus display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateKey {
    /// Direction the candidate belongs to.
    pub direction: Direction,
    /// Position within the direction's candidate list.
    pub index: usize,
}

impl CandidateKey {
    /// Construct a key.
    #[must_use]
    pub const fn new(direction: Direction, index: usize) -> Self {
        Self { direction, index }
    }
}

/// Stroke style for a rendered path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    /// CSS colour.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: u8,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Which endpoint a geofence circle marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeofenceRole {
    /// Trip origin.
    Source,
    /// Trip destination.
    Destination,
}

/// Draws candidate paths and geofences.
///
/// The engine guarantees at most one draggable candidate per direction: it
/// always revokes the previous candidate before granting a new one.
pub trait RouteRenderer {
    /// Draw (or redraw) `path` for `key` with `style`.
    fn render(&mut self, key: CandidateKey, path: &ProviderPathResult, style: &PathStyle);

    /// Grant or revoke user dragging for `key`.
    fn set_draggable(&mut self, key: CandidateKey, draggable: bool);

    /// Remove the drawing for `key`.
    fn remove(&mut self, key: CandidateKey);

    /// Draw the circle for an endpoint geofence.
    fn render_geofence(&mut self, role: GeofenceRole, geofence: &Geofence);

    /// Move the viewport so `bounds` is visible.
    fn fit_viewport(&mut self, bounds: LatLngBounds);
}

/// A renderer for hosts without a map surface, such as the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessRenderer;

impl RouteRenderer for HeadlessRenderer {
    fn render(&mut self, _key: CandidateKey, _path: &ProviderPathResult, _style: &PathStyle) {}

    fn set_draggable(&mut self, _key: CandidateKey, _draggable: bool) {}

    fn remove(&mut self, _key: CandidateKey) {}

    fn render_geofence(&mut self, _role: GeofenceRole, _geofence: &Geofence) {}

    fn fit_viewport(&mut self, _bounds: LatLngBounds) {}
}
