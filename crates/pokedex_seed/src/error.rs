//! Error types for the seeding pipeline.

use std::path::PathBuf;

/// Failure of a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Why a species produced no record at all.
#[derive(Debug, thiserror::Error)]
pub enum SpeciesError {
    #[error("species lookup failed: {0}")]
    Species(#[source] FetchError),
    #[error("form lookup for {form} failed: {source}")]
    Form {
        form: String,
        #[source]
        source: FetchError,
    },
}

/// Failures reading or writing the pokedex file. All of these end the run.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid pokedex file: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot serialize pokedex: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Run-level failures. A missing roster is not one of them; that
/// generation is skipped and reported instead.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
    #[error("cannot build HTTP client: {0}")]
    Client(String),
}
