//! Points on a route
//!
//! A point is either a geographic position ([`LatLongPoint`]) or a country
//! ([`CountryPoint`]). Both resolve their display coordinate once, at
//! construction, through the configured [`Resolvers`]. Their identity strings
//! are derived from the constructor attributes only.

use crate::{Resolvers, Result};
use geo::Coord;
use std::fmt;

/// A point given by latitude and longitude in degrees
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatLongPoint {
    latitude: f64,
    longitude: f64,
    /// Resolved display coordinate
    coord: Coord<f64>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl LatLongPoint {
    /// Create a point, resolving its coordinate with the lat/long resolver
    ///
    /// Fails with [`crate::DataError::Configuration`] if no lat/long resolver
    /// has been configured.
    pub fn new(resolvers: &Resolvers, latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            tracing::warn!("Non-finite lat/long point: ({}, {})", latitude, longitude);
        }
        let coord = resolvers.resolve_lat_long(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            coord,
        })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn coord(&self) -> Coord<f64> {
        self.coord
    }

    /// Canonical identity, embedding the shortest decimal text of both values
    ///
    /// Numerically equal values give the same text, so `-0.0` reads as `0`.
    /// Every NaN reads as `NaN`.
    pub fn identity(&self) -> String {
        format!(
            "LatLong({},{})",
            unsigned_zero(self.latitude),
            unsigned_zero(self.longitude)
        )
    }
}

#[inline]
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// A point given by a country code, e.g. `"GB"`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CountryPoint {
    code: String,
    /// Resolved display coordinate
    coord: Coord<f64>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl CountryPoint {
    /// Create a point, resolving its coordinate with the country resolver
    ///
    /// Fails with [`crate::DataError::Configuration`] if no country resolver
    /// has been configured.
    pub fn new(resolvers: &Resolvers, code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        let coord = resolvers.resolve_country(&code)?;
        Ok(Self { code, coord })
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn coord(&self) -> Coord<f64> {
        self.coord
    }

    /// Canonical identity, embedding the code verbatim
    pub fn identity(&self) -> String {
        format!("Country({})", self.code)
    }
}

/// A location on a route
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Point {
    LatLong(LatLongPoint),
    Country(CountryPoint),
}

impl Point {
    /// Shorthand for building a [`LatLongPoint`]
    pub fn lat_long(resolvers: &Resolvers, latitude: f64, longitude: f64) -> Result<Self> {
        LatLongPoint::new(resolvers, latitude, longitude).map(Point::LatLong)
    }

    /// Shorthand for building a [`CountryPoint`]
    pub fn country(resolvers: &Resolvers, code: impl Into<String>) -> Result<Self> {
        CountryPoint::new(resolvers, code).map(Point::Country)
    }

    /// The display coordinate resolved at construction
    #[inline]
    pub fn coord(&self) -> Coord<f64> {
        match self {
            Point::LatLong(point) => point.coord(),
            Point::Country(point) => point.coord(),
        }
    }

    /// Canonical identity, a pure function of the constructor attributes
    pub fn identity(&self) -> String {
        match self {
            Point::LatLong(point) => point.identity(),
            Point::Country(point) => point.identity(),
        }
    }
}

impl From<LatLongPoint> for Point {
    fn from(point: LatLongPoint) -> Self {
        Point::LatLong(point)
    }
}

impl From<CountryPoint> for Point {
    fn from(point: CountryPoint) -> Self {
        Point::Country(point)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}
