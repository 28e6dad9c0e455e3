//! Error types for cs-config.

use std::path::PathBuf;

use cs_core::ConfigError;
use thiserror::Error;

/// Failure to read or parse configuration input.
///
/// Semantic problems in well-formed input are [`ConfigError`]s.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type LoadResult<T> = Result<T, LoadError>;
