//! Unresolved route descriptions
//!
//! Loaders (files, forms, network payloads) describe routes with plain values.
//! These descriptors are resolved into [`Point`]s and [`Route`]s against a
//! [`Resolvers`] context only when they are added to a collection.

use crate::{Point, Resolvers, Result, Route};

/// A point before coordinate resolution
///
/// With the `serde` feature this reads `{"country": "GB"}` or
/// `{"lat": 5.34, "long": 6.12}`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum PointSpec {
    Country { country: String },
    LatLong { lat: f64, long: f64 },
}

impl PointSpec {
    pub fn country(code: impl Into<String>) -> Self {
        PointSpec::Country {
            country: code.into(),
        }
    }

    pub fn lat_long(lat: f64, long: f64) -> Self {
        PointSpec::LatLong { lat, long }
    }

    /// Country code, if this is a country point
    pub fn country_code(&self) -> Option<&str> {
        match self {
            PointSpec::Country { country } => Some(country),
            PointSpec::LatLong { .. } => None,
        }
    }

    /// Resolve into a [`Point`]
    pub fn resolve(&self, resolvers: &Resolvers) -> Result<Point> {
        match self {
            PointSpec::Country { country } => Point::country(resolvers, country.as_str()),
            PointSpec::LatLong { lat, long } => Point::lat_long(resolvers, *lat, *long),
        }
    }
}

/// A route before coordinate resolution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSpec {
    pub points: Vec<PointSpec>,
    pub weight: f64,
}

impl RouteSpec {
    pub fn new(points: Vec<PointSpec>, weight: f64) -> Self {
        Self { points, weight }
    }

    /// Resolve every point and build the [`Route`]
    ///
    /// Fails with [`crate::DataError::Configuration`] when a needed resolver is
    /// missing and with [`crate::DataError::EmptyRoute`] when there are no points.
    pub fn build(&self, resolvers: &Resolvers) -> Result<Route> {
        let points = self
            .points
            .iter()
            .map(|point| point.resolve(resolvers))
            .collect::<Result<Vec<Point>>>()?;
        Route::new(points, self.weight)
    }
}
