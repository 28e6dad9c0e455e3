//! Error types for cs-stats.

use cs_core::Tick;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Samples must be appended in strictly increasing tick order.
    #[error("tick {tick} aggregated after {last}")]
    OutOfOrder { last: Tick, tick: Tick },
}

pub type StatsResult<T> = Result<T, StatsError>;
