use thiserror::Error;

use cs_zone::ZoneError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PopulationError {
    #[error("zone counter write failed: {0}")]
    Zone(#[from] ZoneError),

    #[error("population invariant violated: {0}")]
    InvariantViolation(String),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
