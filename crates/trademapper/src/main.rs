//! Trade Mapper - command line front end
//!
//! Loads routes from JSON, configures the coordinate resolvers, aggregates the
//! routes and prints the arrows a map renderer would draw.

mod error;
mod input;
mod logging;
mod report;
mod settings;

use clap::Parser;
use error::AppResult;
use input::CountryTable;
use report::Report;
use settings::{OutputFormat, Settings};
use std::process::ExitCode;
use trade_route_lib::{Resolvers, RouteCollection};

fn main() -> ExitCode {
    let settings = Settings::parse();
    logging::setup_logging(settings.quiet);

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> AppResult<()> {
    profiling::scope!("trademapper::run");

    let specs = input::load_routes(&settings.routes)?;

    let mut resolvers = Resolvers::new();
    resolvers.set_lat_long_to_point_fn(settings.projection.function());
    match &settings.countries {
        Some(path) => {
            let table = CountryTable::load(path)?;
            table.check(&specs)?;
            resolvers.set_country_get_point_fn(table.into_resolver(settings.projection));
        }
        None => tracing::info!("No country table given, country points cannot be resolved"),
    }

    let mut collection = RouteCollection::new();
    if settings.parallel {
        collection.add_specs_parallel(&resolvers, &specs)?;
    } else {
        collection.add_specs(&resolvers, &specs)?;
    }

    let report = Report::new(&collection, settings.arrow_style());
    let mut stdout = std::io::stdout().lock();
    match settings.format {
        OutputFormat::Text => report.write_text(&mut stdout)?,
        OutputFormat::Json => report.write_json(&mut stdout)?,
    }
    Ok(())
}
