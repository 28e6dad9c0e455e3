//! Engine observer trait for progress reporting and data collection.

use cs_core::Tick;

use crate::Snapshot;

/// Callbacks invoked by the engine's run loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Callbacks run on the engine's thread
/// between ticks; control requests made from here (through a handle) apply
/// at the next boundary.  Pausing from inside a callback blocks the run until
/// another thread resumes it.
pub trait SimObserver {
    /// Called before any phase of `tick` runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after `tick` was committed.  `transitions` is the number of
    /// employment changes it applied.
    fn on_tick_end(&mut self, _tick: Tick, _transitions: usize) {}

    /// Called every `output_interval_ticks` ticks with the snapshot just
    /// published.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once when a run returns without a fault.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
