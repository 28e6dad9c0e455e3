//! Configuration error shared by every crate that validates input.
//!
//! Sub-crates keep their own error enums and wrap `ConfigError` as one
//! variant, so a malformed configuration is reported the same way whether it
//! was caught by the zone map builder or by the JSON loader.

use thiserror::Error;

/// Malformed configuration.  `field` is a path into the input document such
/// as `zones[3].capacity` or `links[0].destination`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration at `{field}`: {reason}")]
pub struct ConfigError {
    pub field:  String,
    pub reason: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: field.into(), reason: reason.into() }
    }
}

/// Shorthand result type for configuration-time operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
