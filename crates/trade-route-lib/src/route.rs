//! Route storage module
//!
//! This module provides the `Route` struct: an ordered chain of points with a
//! weight and a precomputed canonical identity.

use crate::{DataError, Point, Result};
use geo::{Coord, LineString};
use smallvec::SmallVec;
use std::fmt;

/// Inline capacity for route points; most trade routes have only a few hops
pub(crate) const INLINE_POINTS: usize = 4;

/// Separator between length-prefixed point identities
const POINT_SEPARATOR: &str = " > ";

/// Represents a single route with its points, weight, and cached identity
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    /// Ordered points, never empty
    points: SmallVec<[Point; INLINE_POINTS]>,
    /// Weight (volume or frequency); only changed by collection merges
    weight: f64,
    /// Cached identity (computed once during construction)
    #[cfg_attr(feature = "serde", serde(rename = "identity"))]
    cached_identity: String,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Route {
    /// Create a new Route from an ordered sequence of points
    ///
    /// # Arguments
    /// * `points` - The points in travel order
    /// * `weight` - Volume or frequency carried along the route
    ///
    /// # Returns
    /// The route, or [`DataError::EmptyRoute`] if `points` is empty
    pub fn new(points: impl IntoIterator<Item = Point>, weight: f64) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("route::new");

        let points: SmallVec<[Point; INLINE_POINTS]> = points.into_iter().collect();
        if points.is_empty() {
            return Err(DataError::EmptyRoute);
        }
        if !weight.is_finite() {
            tracing::warn!("Route created with non-finite weight: {}", weight);
        }

        let cached_identity = Self::compute_identity(&points);
        Ok(Route {
            points,
            weight,
            cached_identity,
        })
    }

    /// Build the canonical identity of a point sequence
    ///
    /// Every point identity is prefixed with its byte length, so the encoding
    /// is decodable and distinct sequences never produce the same string.
    fn compute_identity(points: &[Point]) -> String {
        let mut identity = String::new();
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                identity.push_str(POINT_SEPARATOR);
            }
            let point_identity = point.identity();
            identity.push_str(&point_identity.len().to_string());
            identity.push('#');
            identity.push_str(&point_identity);
        }
        identity
    }

    /// Get the points in travel order
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get the weight
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Get the canonical identity
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn identity(&self) -> &str {
        &self.cached_identity
    }

    /// Number of points (always at least one)
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Resolved display coordinates in travel order
    pub fn coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.points.iter().map(Point::coord)
    }

    /// Resolved display coordinates as a line string
    pub fn line_string(&self) -> LineString<f64> {
        LineString::from(self.coords().collect::<Vec<_>>())
    }

    /// Merge another route's weight into this one
    #[inline]
    pub(crate) fn add_weight(&mut self, weight: f64) {
        self.weight += weight;
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cached_identity)
    }
}
