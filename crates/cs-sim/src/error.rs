//! Error types for cs-sim.

use cs_core::{ConfigError, Tick};
use thiserror::Error;

use crate::ClockState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("cannot {action} a {from} clock")]
    InvalidTransition {
        from:   ClockState,
        action: &'static str,
    },
}

pub type ClockResult<T> = Result<T, ClockError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Bad input; no tick has run.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A tick could not complete.  Its staged state was discarded, the
    /// clock is stopped and the last good snapshot stays published.
    #[error("engine fault at {tick}: {reason}")]
    Fault { tick: Tick, reason: String },

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("engine is stopped")]
    Stopped,

    #[error("engine is paused; resume it before running")]
    Paused,
}

pub type EngineResult<T> = Result<T, EngineError>;
