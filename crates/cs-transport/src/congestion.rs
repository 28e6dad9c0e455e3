//! Congestion functions.
//!
//! # Pluggability
//!
//! [`TransportModel`][crate::TransportModel] is generic over
//! [`CongestionModel`], so applications can swap the cost curve at compile
//! time.  [`CongestionKind`] wraps the built-in curves for callers that pick
//! one at runtime from configuration.
//!
//! Every implementation must be monotonically non-decreasing in `load` and
//! return `base_cost` when `load == 0`.

/// Maps a link's free-flow cost and current load to an effective cost.
///
/// Implementations must be `Send + Sync`: the per-tick cost table is built
/// once and then read from every worker thread.
pub trait CongestionModel: Send + Sync {
    fn effective_cost(&self, base_cost: f64, load: u32, capacity: u32) -> f64;
}

/// `cost = base × (1 + load / capacity)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LinearCongestion;

impl CongestionModel for LinearCongestion {
    #[inline]
    fn effective_cost(&self, base_cost: f64, load: u32, capacity: u32) -> f64 {
        base_cost * (1.0 + load as f64 / capacity.max(1) as f64)
    }
}

/// Bureau of Public Roads curve: `cost = base × (1 + α (load / capacity)^β)`.
///
/// The classic calibration is `α = 0.15`, `β = 4`: almost free-flow below
/// capacity, steep above it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BprCongestion {
    pub alpha: f64,
    pub beta:  f64,
}

impl Default for BprCongestion {
    fn default() -> Self {
        Self { alpha: 0.15, beta: 4.0 }
    }
}

impl CongestionModel for BprCongestion {
    #[inline]
    fn effective_cost(&self, base_cost: f64, load: u32, capacity: u32) -> f64 {
        if load == 0 {
            return base_cost;
        }
        let ratio = load as f64 / capacity.max(1) as f64;
        base_cost * (1.0 + self.alpha * ratio.powf(self.beta))
    }
}

/// Runtime-selected congestion curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CongestionKind {
    Linear(LinearCongestion),
    Bpr(BprCongestion),
}

impl Default for CongestionKind {
    fn default() -> Self {
        CongestionKind::Linear(LinearCongestion)
    }
}

impl CongestionModel for CongestionKind {
    #[inline]
    fn effective_cost(&self, base_cost: f64, load: u32, capacity: u32) -> f64 {
        match self {
            CongestionKind::Linear(m) => m.effective_cost(base_cost, load, capacity),
            CongestionKind::Bpr(m)    => m.effective_cost(base_cost, load, capacity),
        }
    }
}
