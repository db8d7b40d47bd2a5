//! Engine configuration: candidate padding and path styling.

use rtd_core::{Direction, PathStyle};

/// Stroke weight and opacity for one selection state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke width in pixels.
    pub weight: u8,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Configuration for [`DualRouteEngine`](crate::DualRouteEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Each direction is padded to at least this many candidates by
    /// duplicating the shortest alternative.
    pub min_candidates: usize,
    /// Colour of every outbound candidate.
    pub outbound_color: String,
    /// Colour of every return candidate.
    pub return_color: String,
    /// Stroke of the selected candidate.
    pub selected: Stroke,
    /// Stroke of every other candidate.
    pub unselected: Stroke,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_candidates: 3,
            outbound_color: "blue".to_owned(),
            return_color: "purple".to_owned(),
            selected: Stroke {
                weight: 6,
                opacity: 1.0,
            },
            unselected: Stroke {
                weight: 4,
                opacity: 0.5,
            },
        }
    }
}

impl EngineConfig {
    /// Override the candidate padding target.
    #[must_use]
    pub const fn with_min_candidates(mut self, min_candidates: usize) -> Self {
        self.min_candidates = min_candidates;
        self
    }

    /// Override the per-direction colours.
    #[must_use]
    pub fn with_colors(
        mut self,
        outbound_color: impl Into<String>,
        return_color: impl Into<String>,
    ) -> Self {
        self.outbound_color = outbound_color.into();
        self.return_color = return_color.into();
        self
    }

    /// Colour used for candidates of `direction`.
    #[must_use]
    pub fn color_for(&self, direction: Direction) -> &str {
        match direction {
            Direction::Outbound => &self.outbound_color,
            Direction::Return => &self.return_color,
        }
    }

    /// Style for a candidate of `direction` in the given selection state.
    #[must_use]
    pub fn style_for(&self, direction: Direction, selected: bool) -> PathStyle {
        let stroke = if selected {
            self.selected
        } else {
            self.unselected
        };
        PathStyle {
            color: self.color_for(direction).to_owned(),
            weight: stroke.weight,
            opacity: stroke.opacity,
        }
    }
}
