//! Coordinate resolvers injected into point construction
//!
//! Projection is not owned by this crate. Callers configure a [`Resolvers`]
//! context with one lookup per point variant and pass it to the point
//! constructors, which fail with [`DataError::Configuration`] when the lookup
//! for their variant has not been set yet.

use crate::{DataError, Result};
use geo::Coord;
use std::fmt;
use std::sync::Arc;

/// Maps a latitude/longitude pair to a projected display coordinate.
pub trait LatLongResolver: Send + Sync {
    fn resolve(&self, latitude: f64, longitude: f64) -> Coord<f64>;
}

impl<F> LatLongResolver for F
where
    F: Fn(f64, f64) -> Coord<f64> + Send + Sync,
{
    #[inline]
    fn resolve(&self, latitude: f64, longitude: f64) -> Coord<f64> {
        self(latitude, longitude)
    }
}

/// Maps a country code to a projected display coordinate.
pub trait CountryResolver: Send + Sync {
    fn resolve(&self, code: &str) -> Coord<f64>;
}

impl<F> CountryResolver for F
where
    F: Fn(&str) -> Coord<f64> + Send + Sync,
{
    #[inline]
    fn resolve(&self, code: &str) -> Coord<f64> {
        self(code)
    }
}

/// Which resolver a point variant needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    LatLong,
    Country,
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverKind::LatLong => f.write_str("lat/long"),
            ResolverKind::Country => f.write_str("country"),
        }
    }
}

/// Resolver configuration threaded into point constructors
///
/// Cloning is cheap; resolvers are shared behind `Arc`. Setting a resolver
/// again replaces the previous one, which only affects points built afterwards.
#[derive(Clone, Default)]
pub struct Resolvers {
    lat_long: Option<Arc<dyn LatLongResolver>>,
    country: Option<Arc<dyn CountryResolver>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Resolvers {
    /// Create a context with no resolver configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the lat/long lookup, replacing any previous one
    pub fn set_lat_long_to_point_fn(&mut self, resolver: impl LatLongResolver + 'static) {
        if self.lat_long.is_some() {
            tracing::debug!("Replacing lat/long resolver");
        }
        self.lat_long = Some(Arc::new(resolver));
    }

    /// Configure the country lookup, replacing any previous one
    pub fn set_country_get_point_fn(&mut self, resolver: impl CountryResolver + 'static) {
        if self.country.is_some() {
            tracing::debug!("Replacing country resolver");
        }
        self.country = Some(Arc::new(resolver));
    }

    /// Builder form of [`Resolvers::set_lat_long_to_point_fn`]
    pub fn with_lat_long(mut self, resolver: impl LatLongResolver + 'static) -> Self {
        self.set_lat_long_to_point_fn(resolver);
        self
    }

    /// Builder form of [`Resolvers::set_country_get_point_fn`]
    pub fn with_country(mut self, resolver: impl CountryResolver + 'static) -> Self {
        self.set_country_get_point_fn(resolver);
        self
    }

    #[inline]
    pub fn has_lat_long(&self) -> bool {
        self.lat_long.is_some()
    }

    #[inline]
    pub fn has_country(&self) -> bool {
        self.country.is_some()
    }

    pub(crate) fn resolve_lat_long(&self, latitude: f64, longitude: f64) -> Result<Coord<f64>> {
        let resolver = self.lat_long.as_ref().ok_or(DataError::Configuration {
            resolver: ResolverKind::LatLong,
        })?;
        Ok(resolver.resolve(latitude, longitude))
    }

    pub(crate) fn resolve_country(&self, code: &str) -> Result<Coord<f64>> {
        let resolver = self.country.as_ref().ok_or(DataError::Configuration {
            resolver: ResolverKind::Country,
        })?;
        Ok(resolver.resolve(code))
    }
}

impl fmt::Debug for Resolvers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolvers")
            .field("lat_long", &self.has_lat_long())
            .field("country", &self.has_country())
            .finish()
    }
}
