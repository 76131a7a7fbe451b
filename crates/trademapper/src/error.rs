use std::path::PathBuf;
use thiserror::Error;
use trade_route_lib::DataError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Route {route} uses unknown country code {code:?}")]
    UnknownCountry { route: usize, code: String },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
