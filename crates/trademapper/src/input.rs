//! Loading route and country files
//!
//! Both files are JSON. Country centroids are projected with the selected
//! projection and installed as the country resolver.

use crate::error::{AppError, AppResult};
use crate::settings::Projection;
use geo::Coord;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use trade_route_lib::{CountryResolver, RouteSpec, utils};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let file = File::open(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the array of routes
pub fn load_routes(path: &Path) -> AppResult<Vec<RouteSpec>> {
    let specs: Vec<RouteSpec> = read_json(path)?;
    tracing::info!("Loaded {} routes from {}", specs.len(), path.display());
    Ok(specs)
}

/// Geographic centre of a country in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Centroid {
    pub lat: f64,
    pub long: f64,
}

/// Country code to centroid lookup
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CountryTable {
    centroids: HashMap<String, Centroid>,
}

impl CountryTable {
    pub fn load(path: &Path) -> AppResult<Self> {
        let table: CountryTable = read_json(path)?;
        tracing::info!(
            "Loaded {} country centroids from {}",
            table.country_count(),
            path.display()
        );
        Ok(table)
    }

    #[inline]
    pub fn country_count(&self) -> usize {
        self.centroids.len()
    }

    #[inline]
    pub fn get(&self, code: &str) -> Option<Centroid> {
        self.centroids.get(code).copied()
    }

    /// Reject routes with country codes missing from the table
    ///
    /// The resolver built by [`CountryTable::into_resolver`] only ever sees
    /// codes that passed this check.
    pub fn check(&self, specs: &[RouteSpec]) -> AppResult<()> {
        for (route, spec) in specs.iter().enumerate() {
            for code in spec.points.iter().filter_map(|point| point.country_code()) {
                if self.get(code).is_none() {
                    return Err(AppError::UnknownCountry {
                        route,
                        code: code.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Country resolver projecting each centroid
    pub fn into_resolver(self, projection: Projection) -> impl CountryResolver + 'static {
        let project = projection.function();
        let projected: HashMap<String, Coord<f64>> = self
            .centroids
            .into_iter()
            .map(|(code, centroid)| {
                let coord = project(centroid.lat, centroid.long);
                if projection == Projection::Mercator && !utils::is_valid_mercator(&coord) {
                    tracing::warn!("Centroid of {} is outside Web Mercator bounds", code);
                }
                (code, coord)
            })
            .collect();

        move |code: &str| match projected.get(code) {
            Some(coord) => *coord,
            None => {
                tracing::error!("No centroid for country {}", code);
                Coord {
                    x: f64::NAN,
                    y: f64::NAN,
                }
            }
        }
    }
}
