//! Transport error type.

use thiserror::Error;

use cs_core::ZoneId;

/// Errors produced by `cs-transport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("no route from {from} to {to}")]
    Unreachable { from: ZoneId, to: ZoneId },

    #[error("zone {0} not found in zone map")]
    ZoneNotFound(ZoneId),
}

pub type TransportResult<T> = Result<T, TransportError>;
