//! Ready-made projections usable as lat/long resolvers
//!
//! The route model never calls these directly; pass one to
//! [`crate::Resolvers::set_lat_long_to_point_fn`] or wrap it in a country
//! lookup.

use geo::Coord;
use std::f64::consts::PI;

/// WGS84 semi-major axis used by EPSG:3857, in meters
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the side of the Web Mercator square, in meters
pub const MERCATOR_HALF_EXTENT: f64 = PI * EARTH_RADIUS;

/// Latitude at which Web Mercator y reaches [`MERCATOR_HALF_EXTENT`]
pub const MAX_LATITUDE: f64 = 85.05112878;

/// Web Mercator (EPSG:3857) in meters
///
/// Latitude is clamped to ±[`MAX_LATITUDE`] so the poles stay finite.
#[inline(always)]
pub fn wgs84_to_mercator(lat: f64, lon: f64) -> Coord<f64> {
    let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    Coord {
        x: EARTH_RADIUS * lon.to_radians(),
        y: EARTH_RADIUS * phi.tan().asinh(),
    }
}

/// Plate carrée: longitude as x, latitude as y, both in degrees
#[inline(always)]
pub fn equirectangular(lat: f64, lon: f64) -> Coord<f64> {
    Coord { x: lon, y: lat }
}

/// Whether both axes lie inside the Web Mercator square
#[inline(always)]
pub fn is_valid_mercator(coord: &Coord<f64>) -> bool {
    let bounds = -MERCATOR_HALF_EXTENT..=MERCATOR_HALF_EXTENT;
    bounds.contains(&coord.x) && bounds.contains(&coord.y)
}
