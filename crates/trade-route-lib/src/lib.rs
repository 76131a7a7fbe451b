//! Trade Route Library - Route Data Model and Aggregation Engine
//!
//! This library models trade and shipment routes for map visualization. Points
//! (geographic coordinates or country codes) are chained into ordered routes, and
//! routes are aggregated by identical point sequence into a weighted collection
//! whose maximum weight drives arrow thickness on the map.
//!
//! # Architecture
//!
//! - **[`Resolvers`]**: Injected coordinate lookups, configured before any point is built
//! - **[`Point`]**: A location on a route, either [`LatLongPoint`] or [`CountryPoint`]
//! - **[`Route`]**: Immutable ordered sequence of points with a weight
//! - **[`RouteCollection`]**: Deduplicates routes by identity, summing their weights
//! - **[`Arrow`]**: Geometry and stroke width handed to a renderer
//!
//! # Identity
//!
//! Points and routes are compared through canonical identity strings derived only
//! from their defining attributes. Route identities length-prefix every point
//! identity, so two different point sequences can never share an identity.

mod arrow;
mod collection;
mod ingest;
mod point;
mod resolver;
mod route;
pub mod utils;

// Public API exports
pub use arrow::{Arrow, ArrowStyle};
pub use collection::{CollectionInfo, Insertion, RouteCollection};
pub use ingest::{PointSpec, RouteSpec};
pub use point::{CountryPoint, LatLongPoint, Point};
pub use resolver::{CountryResolver, LatLongResolver, ResolverKind, Resolvers};
pub use route::Route;

/// Error types for the route model
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("No {resolver} resolver configured")]
    Configuration { resolver: ResolverKind },

    #[error("Empty route")]
    EmptyRoute,
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn() -> RouteCollection = RouteCollection::new;
        let _: fn() -> Resolvers = Resolvers::new;
        let _: fn() -> ArrowStyle = ArrowStyle::default;
    }

    #[test]
    fn test_error_messages() {
        let err = DataError::Configuration {
            resolver: ResolverKind::Country,
        };
        assert_eq!(err.to_string(), "No country resolver configured");
        assert_eq!(DataError::EmptyRoute.to_string(), "Empty route");
    }
}
