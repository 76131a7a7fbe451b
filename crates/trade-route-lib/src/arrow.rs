//! Arrow geometry handed to map renderers
//!
//! Drawing is done elsewhere; this module only turns stored routes into paths
//! with a stroke width proportional to `weight / max_weight`.

use crate::Route;
use geo::LineString;

/// Styling parameters for route arrows
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrowStyle {
    /// Stroke width for the lightest routes, in pixels
    pub min_stroke_width: f64,
    /// Stroke width for the heaviest route, in pixels
    pub max_stroke_width: f64,
    /// Colour at the start of the arrow path
    pub path_start_colour: String,
    /// Colour at the end of the arrow path (arrow head side)
    pub path_end_colour: String,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            min_stroke_width: 1.0,
            max_stroke_width: 10.0,
            path_start_colour: "black".to_string(),
            path_end_colour: "orange".to_string(),
        }
    }
}

impl ArrowStyle {
    /// Stroke width for a weight, scaled against the collection maximum
    ///
    /// Falls back to the minimum width when `max_weight` is not positive.
    pub fn stroke_width(&self, weight: f64, max_weight: f64) -> f64 {
        let (min, max) = if self.min_stroke_width <= self.max_stroke_width {
            (self.min_stroke_width, self.max_stroke_width)
        } else {
            (self.max_stroke_width, self.min_stroke_width)
        };
        if max_weight <= 0.0 || !max_weight.is_finite() {
            return min;
        }
        let width = max * weight / max_weight;
        if width.is_nan() { min } else { width.max(min).min(max) }
    }
}

/// One drawable arrow per stored route
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Arrow {
    /// Identity of the route the arrow was built from
    pub identity: String,
    /// Resolved coordinates, from origin to destination
    pub path: LineString<f64>,
    /// Aggregate weight of the route
    pub weight: f64,
    /// Stroke width in pixels
    pub stroke_width: f64,
}

impl Arrow {
    pub(crate) fn from_route(route: &Route, max_weight: f64, style: &ArrowStyle) -> Self {
        Self {
            identity: route.identity().to_string(),
            path: route.line_string(),
            weight: route.weight(),
            stroke_width: style.stroke_width(route.weight(), max_weight),
        }
    }
}
