//! RouteCollection - Aggregating store for routes
//!
//! This module deduplicates routes by their canonical identity. Adding a route
//! whose point sequence is already stored merges it by summing weights, and the
//! maximum weight is kept up to date so renderers can scale arrows against it.

use crate::{Arrow, ArrowStyle, Resolvers, Result, Route, RouteSpec};

use geo::Rect;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::HashMap;

/// Information about the route collection
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CollectionInfo {
    /// Number of distinct routes
    pub route_count: usize,
    /// Sum of all stored weights
    pub total_weight: f64,
    /// Largest stored weight (0 when empty)
    pub max_weight: f64,
}

/// Outcome of [`RouteCollection::add_route`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The route's identity was new and it was stored as is
    Inserted,
    /// A route with the same identity existed and the weights were summed
    Merged,
}

/// Cached statistics for the collection
///
/// These are updated incrementally when routes are added, avoiding a full
/// rescan except when a merge lowers the current maximum.
#[derive(Debug, Clone, Default)]
struct CachedStats {
    /// Largest stored weight (0 when empty)
    max_weight: f64,
    /// Sum of all stored weights
    total_weight: f64,
    /// Bounding box of all resolved coordinates (None if empty)
    bounding_box: Option<Rect<f64>>,
}

/// Store of distinct routes keyed by identity
///
/// Enumeration order is the order in which identities were first inserted.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    /// Stored routes, in first-insertion order
    routes: Vec<Route>,
    /// Identity to position in `routes`
    index: HashMap<String, usize>,
    /// Cached statistics (incrementally updated)
    cached_stats: CachedStats,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteCollection {
    /// Create an empty route collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route to the collection
    ///
    /// If a stored route has the same identity its weight becomes the sum of
    /// both weights and its points are kept; otherwise the route is stored.
    pub fn add_route(&mut self, route: Route) -> Insertion {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::add_route");

        if let Some(&position) = self.index.get(route.identity()) {
            let stored = &mut self.routes[position];
            let previous_weight = stored.weight();
            stored.add_weight(route.weight());
            let merged_weight = stored.weight();
            tracing::debug!(
                "Merged route {} ({} + {} = {})",
                route.identity(),
                previous_weight,
                route.weight(),
                merged_weight
            );
            self.update_stats_for_merge(previous_weight, merged_weight, route.weight());
            return Insertion::Merged;
        }

        self.update_stats_for_added_route(&route);
        self.index
            .insert(route.identity().to_string(), self.routes.len());
        self.routes.push(route);
        Insertion::Inserted
    }

    /// Build routes from specs and add them in order
    ///
    /// Every route is built before any is added, so on error the collection is
    /// left unchanged.
    pub fn add_specs(&mut self, resolvers: &Resolvers, specs: &[RouteSpec]) -> Result<()> {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::add_specs");

        let routes = specs
            .iter()
            .map(|spec| spec.build(resolvers))
            .collect::<Result<Vec<Route>>>()?;
        self.add_routes(routes);
        Ok(())
    }

    /// Build routes from specs in parallel and add them in input order
    ///
    /// Point resolution and identity computation run on the rayon pool; the
    /// merge into the collection stays sequential.
    pub fn add_specs_parallel(&mut self, resolvers: &Resolvers, specs: &[RouteSpec]) -> Result<()> {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::add_specs_parallel");

        let routes = specs
            .par_iter()
            .map(|spec| spec.build(resolvers))
            .collect::<Result<Vec<Route>>>()?;
        self.add_routes(routes);
        Ok(())
    }

    /// Add already built routes in order
    pub fn add_routes(&mut self, routes: impl IntoIterator<Item = Route>) {
        let before = self.routes.len();
        let mut added = 0usize;
        for route in routes {
            self.add_route(route);
            added += 1;
        }
        tracing::info!(
            "Added {} routes ({} new, {} distinct)",
            added,
            self.routes.len() - before,
            self.routes.len()
        );
    }

    /// Get the number of distinct routes
    #[inline]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Get the largest stored weight, or 0 if the collection is empty
    ///
    /// This is O(1) as the value is cached and updated incrementally.
    #[inline]
    pub fn max_weight(&self) -> f64 {
        self.cached_stats.max_weight
    }

    /// Get the sum of all stored weights
    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.cached_stats.total_weight
    }

    /// Get all routes, in first-insertion order
    ///
    /// The slice is a read-only view; callers cannot alter stored weights.
    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a stored route by identity
    #[inline]
    pub fn get_route(&self, identity: &str) -> Option<&Route> {
        self.index.get(identity).map(|&position| &self.routes[position])
    }

    /// Bounding box of every resolved coordinate, or `None` if empty
    #[inline]
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        self.cached_stats.bounding_box
    }

    /// Get collection information
    ///
    /// This is O(1) as all values are cached.
    #[inline]
    pub fn get_info(&self) -> CollectionInfo {
        CollectionInfo {
            route_count: self.routes.len(),
            total_weight: self.cached_stats.total_weight,
            max_weight: self.cached_stats.max_weight,
        }
    }

    /// Arrow geometry for every route, scaled against the maximum weight
    pub fn arrows(&self, style: &ArrowStyle) -> Vec<Arrow> {
        let max_weight = self.max_weight();
        self.routes
            .iter()
            .map(|route| Arrow::from_route(route, max_weight, style))
            .collect()
    }

    /// Check if the collection is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Clear all routes from the collection
    pub fn clear(&mut self) {
        self.routes.clear();
        self.index.clear();
        self.cached_stats = CachedStats::default();
    }

    /// Update cached statistics when a new identity is stored
    #[inline]
    fn update_stats_for_added_route(&mut self, route: &Route) {
        let weight = route.weight();
        self.cached_stats.max_weight = if self.routes.is_empty() {
            weight
        } else {
            self.cached_stats.max_weight.max(weight)
        };
        self.cached_stats.total_weight += weight;

        for coord in route.coords() {
            let bbox = match self.cached_stats.bounding_box {
                Some(bbox) => Rect::new(
                    geo::Coord {
                        x: bbox.min().x.min(coord.x),
                        y: bbox.min().y.min(coord.y),
                    },
                    geo::Coord {
                        x: bbox.max().x.max(coord.x),
                        y: bbox.max().y.max(coord.y),
                    },
                ),
                None => Rect::new(coord, coord),
            };
            self.cached_stats.bounding_box = Some(bbox);
        }
    }

    /// Update cached statistics when a stored weight changed through a merge
    #[inline]
    fn update_stats_for_merge(&mut self, previous_weight: f64, merged_weight: f64, added: f64) {
        self.cached_stats.total_weight += added;

        if merged_weight >= self.cached_stats.max_weight {
            self.cached_stats.max_weight = merged_weight;
        } else if previous_weight >= self.cached_stats.max_weight {
            // The previous maximum shrank; another route may now be largest
            self.rebuild_max_weight();
        }
    }

    /// Recompute the maximum weight from scratch
    fn rebuild_max_weight(&mut self) {
        self.cached_stats.max_weight = self
            .routes
            .iter()
            .map(Route::weight)
            .reduce(f64::max)
            .unwrap_or(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, PointSpec};
    use geo::Coord;

    fn test_resolvers() -> Resolvers {
        Resolvers::new()
            .with_lat_long(|_: f64, _: f64| Coord { x: 3.0, y: 4.0 })
            .with_country(|_: &str| Coord { x: 8.0, y: 9.0 })
    }

    fn test_points() -> (Point, Point, Point) {
        let resolvers = test_resolvers();
        (
            Point::lat_long(&resolvers, 5.34, 6.12).unwrap(),
            Point::country(&resolvers, "ZA").unwrap(),
            Point::country(&resolvers, "GB").unwrap(),
        )
    }

    #[test]
    fn test_collection_creation() {
        let collection = RouteCollection::new();
        assert_eq!(collection.route_count(), 0);
        assert_eq!(collection.max_weight(), 0.0);
        assert!(collection.is_empty());
        assert!(collection.bounding_box().is_none());
    }

    #[test]
    fn test_adds_new_routes() {
        let (l, za, gb) = test_points();
        let route1 = Route::new([l.clone(), za.clone(), gb.clone()], 20.0).unwrap();
        let route2 = Route::new([l, gb, za], 20.0).unwrap();
        assert_ne!(route1.identity(), route2.identity());

        let mut collection = RouteCollection::new();
        assert_eq!(collection.add_route(route1), Insertion::Inserted);
        assert_eq!(collection.route_count(), 1);
        assert_eq!(collection.add_route(route2), Insertion::Inserted);
        assert_eq!(collection.route_count(), 2);
    }

    #[test]
    fn test_combines_weight_of_same_route() {
        let (l, za, gb) = test_points();
        let route1 = Route::new([l.clone(), za.clone(), gb.clone()], 20.0).unwrap();
        let route2 = Route::new([l, za, gb], 10.0).unwrap();

        let mut collection = RouteCollection::new();
        collection.add_route(route1);
        assert_eq!(collection.route_count(), 1);
        assert_eq!(collection.routes()[0].weight(), 20.0);

        assert_eq!(collection.add_route(route2), Insertion::Merged);
        assert_eq!(collection.route_count(), 1);
        assert_eq!(collection.routes()[0].weight(), 30.0);
        assert_eq!(collection.max_weight(), 30.0);
    }

    #[test]
    fn test_max_weight_single_route() {
        let (l, za, gb) = test_points();
        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([l, za, gb], 20.0).unwrap());
        assert_eq!(collection.max_weight(), 20.0);
    }

    #[test]
    fn test_max_weight_multiple_routes() {
        let (l, za, gb) = test_points();
        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([l.clone(), za.clone()], 10.0).unwrap());
        collection.add_route(Route::new([za, gb.clone()], 30.0).unwrap());
        collection.add_route(Route::new([l, gb], 20.0).unwrap());
        assert_eq!(collection.max_weight(), 30.0);
        assert_eq!(collection.total_weight(), 60.0);
    }

    #[test]
    fn test_max_weight_all_negative() {
        let (l, za, gb) = test_points();
        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([l.clone(), za], -5.0).unwrap());
        collection.add_route(Route::new([l, gb], -2.0).unwrap());
        assert_eq!(collection.max_weight(), -2.0);
    }

    #[test]
    fn test_max_weight_after_negative_merge() {
        let (l, za, gb) = test_points();
        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([l.clone(), za.clone()], 30.0).unwrap());
        collection.add_route(Route::new([l.clone(), gb], 20.0).unwrap());
        collection.add_route(Route::new([l, za], -25.0).unwrap());

        assert_eq!(collection.route_count(), 2);
        assert_eq!(collection.max_weight(), 20.0);
        assert_eq!(collection.total_weight(), 25.0);
    }

    #[test]
    fn test_get_route_by_identity() {
        let (l, za, _) = test_points();
        let route = Route::new([l, za], 7.0).unwrap();
        let identity = route.identity().to_string();

        let mut collection = RouteCollection::new();
        collection.add_route(route);

        assert_eq!(collection.get_route(&identity).map(Route::weight), Some(7.0));
        assert!(collection.get_route("missing").is_none());
    }

    #[test]
    fn test_routes_keep_insertion_order() {
        let (l, za, gb) = test_points();
        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([gb.clone()], 1.0).unwrap());
        collection.add_route(Route::new([l.clone()], 1.0).unwrap());
        collection.add_route(Route::new([za], 1.0).unwrap());
        collection.add_route(Route::new([gb], 1.0).unwrap());

        let first: Vec<_> = collection
            .routes()
            .iter()
            .map(|route| route.points()[0].identity())
            .collect();
        assert_eq!(first, vec!["Country(GB)", "LatLong(5.34,6.12)", "Country(ZA)"]);
    }

    #[test]
    fn test_bounding_box() {
        let resolvers = Resolvers::new().with_lat_long(|lat: f64, long: f64| Coord { x: long, y: lat });
        let a = Point::lat_long(&resolvers, 10.0, -5.0).unwrap();
        let b = Point::lat_long(&resolvers, -3.0, 20.0).unwrap();

        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([a, b], 1.0).unwrap());

        let bbox = collection.bounding_box().unwrap();
        assert_eq!(bbox.min(), Coord { x: -5.0, y: -3.0 });
        assert_eq!(bbox.max(), Coord { x: 20.0, y: 10.0 });
    }

    #[test]
    fn test_get_info() {
        let (l, za, gb) = test_points();
        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([l.clone(), za.clone()], 10.0).unwrap());
        collection.add_route(Route::new([l, za], 5.0).unwrap());
        collection.add_route(Route::new([gb], 2.0).unwrap());

        let info = collection.get_info();
        assert_eq!(info.route_count, 2);
        assert_eq!(info.total_weight, 17.0);
        assert_eq!(info.max_weight, 15.0);
    }

    #[test]
    fn test_clear() {
        let (l, za, _) = test_points();
        let mut collection = RouteCollection::new();
        collection.add_route(Route::new([l, za], 10.0).unwrap());
        assert_eq!(collection.route_count(), 1);

        collection.clear();
        assert_eq!(collection.route_count(), 0);
        assert!(collection.is_empty());
        assert_eq!(collection.max_weight(), 0.0);
        assert_eq!(collection.total_weight(), 0.0);
        assert!(collection.bounding_box().is_none());
        assert_eq!(collection.get_info(), CollectionInfo::default());
    }

    #[test]
    fn test_add_specs_merges_in_order() {
        let specs = vec![
            RouteSpec::new(vec![PointSpec::country("ZA"), PointSpec::country("GB")], 20.0),
            RouteSpec::new(vec![PointSpec::country("GB"), PointSpec::country("ZA")], 5.0),
            RouteSpec::new(vec![PointSpec::country("ZA"), PointSpec::country("GB")], 10.0),
        ];

        let mut collection = RouteCollection::new();
        collection.add_specs(&test_resolvers(), &specs).unwrap();
        assert_eq!(collection.route_count(), 2);
        assert_eq!(collection.routes()[0].weight(), 30.0);
        assert_eq!(collection.max_weight(), 30.0);
    }

    #[test]
    fn test_signed_zero_coordinates_merge() {
        let specs = vec![
            RouteSpec::new(vec![PointSpec::lat_long(0.0, 10.0), PointSpec::country("GB")], 20.0),
            RouteSpec::new(vec![PointSpec::lat_long(-0.0, 10.0), PointSpec::country("GB")], 10.0),
        ];

        let mut collection = RouteCollection::new();
        collection.add_specs(&test_resolvers(), &specs).unwrap();
        assert_eq!(collection.route_count(), 1);
        assert_eq!(collection.max_weight(), 30.0);
    }

    #[test]
    fn test_add_specs_parallel_matches_sequential() {
        let specs: Vec<RouteSpec> = (0..200)
            .map(|i| {
                RouteSpec::new(
                    vec![
                        PointSpec::lat_long((i % 7) as f64, 1.5),
                        PointSpec::country(if i % 2 == 0 { "GB" } else { "KE" }),
                    ],
                    i as f64,
                )
            })
            .collect();
        let resolvers = test_resolvers();

        let mut sequential = RouteCollection::new();
        sequential.add_specs(&resolvers, &specs).unwrap();
        let mut parallel = RouteCollection::new();
        parallel.add_specs_parallel(&resolvers, &specs).unwrap();

        assert_eq!(sequential.get_info(), parallel.get_info());
        let sequential_ids: Vec<_> = sequential.routes().iter().map(Route::identity).collect();
        let parallel_ids: Vec<_> = parallel.routes().iter().map(Route::identity).collect();
        assert_eq!(sequential_ids, parallel_ids);
    }

    #[test]
    fn test_add_specs_failure_leaves_collection_unchanged() {
        let specs = vec![
            RouteSpec::new(vec![PointSpec::country("GB")], 1.0),
            RouteSpec::new(vec![PointSpec::lat_long(1.0, 2.0)], 1.0),
        ];
        let only_country = Resolvers::new().with_country(|_: &str| Coord { x: 8.0, y: 9.0 });

        let mut collection = RouteCollection::new();
        assert!(collection.add_specs_parallel(&only_country, &specs).is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let resolvers = test_resolvers();
        let l = Point::lat_long(&resolvers, 5.34, 6.12).unwrap();
        let za = Point::country(&resolvers, "ZA").unwrap();
        let gb = Point::country(&resolvers, "GB").unwrap();

        let route1 = Route::new([l.clone(), za.clone(), gb.clone()], 20.0).unwrap();
        let route2 = Route::new([l, gb, za], 20.0).unwrap();
        assert_ne!(route1.identity(), route2.identity());

        let mut collection = RouteCollection::new();
        collection.add_route(route1);
        collection.add_route(route2);
        assert_eq!(collection.route_count(), 2);
        assert_eq!(collection.max_weight(), 20.0);
    }
}
