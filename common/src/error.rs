//! Error types

use crate::backup::BackupError;
use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown collection type: {0}")]
    UnknownSeries(String),

    #[error("Years {start}-{stop} are outside the range {min}-{max} allowed for {series}")]
    YearOutOfBounds {
        series: String,
        start: i32,
        stop: i32,
        min: i32,
        max: i32,
    },

    #[error("Start year {start} is after stop year {stop}")]
    InvertedYearRange { start: i32, stop: i32 },

    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
