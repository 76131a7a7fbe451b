use clap::{Parser, ValueEnum};
use geo::Coord;
use std::path::PathBuf;
use trade_route_lib::{ArrowStyle, utils};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Trade Mapper - Aggregate trade routes and size their map arrows
pub struct Settings {
    /// JSON file with an array of routes: [{"points": [{"country": "GB"}, {"lat": 5.3, "long": 6.1}], "weight": 20}]
    #[clap(short, long, value_name = "FILE")]
    pub routes: PathBuf,

    /// JSON file mapping country codes to centroids: {"GB": {"lat": 54.0, "long": -2.0}}
    #[clap(short, long, value_name = "FILE")]
    pub countries: Option<PathBuf>,

    /// Projection used to turn lat/long into map coordinates
    #[clap(short, long, value_enum, default_value_t = Projection::Mercator)]
    pub projection: Projection,

    /// Stroke width of the lightest arrows in pixels
    #[clap(long, default_value = "1.0")]
    pub min_stroke_width: f64,

    /// Stroke width of the heaviest arrow in pixels
    #[clap(long, default_value = "10.0")]
    pub max_stroke_width: f64,

    /// Output format of the report written to stdout
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Resolve routes on all cores before aggregating them
    #[clap(long, default_value = "false")]
    pub parallel: bool,

    /// Only log warnings and errors (overridden by RUST_LOG)
    #[clap(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Settings {
    /// Arrow style built from the stroke width options
    pub fn arrow_style(&self) -> ArrowStyle {
        ArrowStyle {
            min_stroke_width: self.min_stroke_width,
            max_stroke_width: self.max_stroke_width,
            ..ArrowStyle::default()
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Web Mercator, in meters
    Mercator,
    /// Plate carrée, in degrees
    Equirectangular,
}

impl Projection {
    pub fn function(self) -> fn(f64, f64) -> Coord<f64> {
        match self {
            Projection::Mercator => utils::wgs84_to_mercator,
            Projection::Equirectangular => utils::equirectangular,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
