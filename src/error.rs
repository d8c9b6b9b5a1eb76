// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("HTTP error fetching {url}: {message}")]
    Http { url: String, message: String },

    #[error("The data_source '{given}', is not supported. Supported values: {supported}")]
    UnsupportedSource { given: String, supported: String },

    #[error("The model '{given}' is not implemented. Implemented models: {implemented}")]
    UnsupportedModel { given: String, implemented: String },

    #[error("The value of 'kind' needs to be one of {expected}, got '{given}'")]
    UnsupportedKind { given: String, expected: String },

    #[error("Unknown subset '{0}'")]
    UnknownSubset(String),

    #[error("Could not parse date '{0}'")]
    Date(String),

    #[error("Malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },

    #[error("No local data at {0} (run a fetch first)")]
    MissingData(PathBuf),

    #[error("Path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Failure of a single region/subset fit. The batch logs these and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("need more than {params} points, got {points}")]
    TooFewPoints { points: usize, params: usize },

    #[error("series has {0} missing value(s)")]
    MissingValues(usize),

    #[error("degenerate series: {0}")]
    Degenerate(&'static str),

    #[error("non-finite model value")]
    NonFinite,
}
