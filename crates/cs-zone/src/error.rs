//! Zone-map error type.

use thiserror::Error;

use cs_core::{ConfigError, LinkId, ZoneId};

/// Errors produced by `cs-zone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("zone {0} not found")]
    NotFound(ZoneId),

    #[error("link {0} not found")]
    LinkNotFound(LinkId),

    #[error("zone {zone} is full ({capacity} {counter})")]
    CapacityExceeded {
        zone:     ZoneId,
        capacity: u32,
        counter:  &'static str,
    },

    #[error("zone {zone} {counter} counter would drop below zero")]
    CounterUnderflow {
        zone:    ZoneId,
        counter: &'static str,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
