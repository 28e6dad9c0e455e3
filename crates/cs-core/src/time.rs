//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  Tick 0 is the state
//! produced by configuration; the first completed tick is tick 1.  Integer
//! ticks keep every comparison exact and make snapshots reproducible.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        self.offset(1)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically part of the JSON document loaded by `cs-config` and passed to
/// the engine builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  Only the synthetic population generator draws from
    /// it; the tick loop itself is fully deterministic.
    pub seed: u64,

    /// Worker thread count for the parallel decision phase.  `None` uses all
    /// logical cores.  Results never depend on this value.
    pub num_threads: Option<usize>,

    /// Ticks run by `SimulationEngine::run_to_end`.
    pub total_ticks: u64,

    /// Capacity assigned to links that do not declare one.
    pub default_link_capacity: u32,

    /// Emit observer snapshots every N ticks.  1 = every tick.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which `run_to_end` stops (inclusive: the last completed
    /// tick carries this number).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                  42,
            num_threads:           None,
            total_ticks:           100,
            default_link_capacity: 100,
            output_interval_ticks: 1,
        }
    }
}
