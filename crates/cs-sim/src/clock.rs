//! `SimulationClock`: run state and tick counter, shared with viewers.
//!
//! ```text
//!   Idle ──start──▶ Running ◀──resume── Paused
//!                      │ ──────pause──────▶ │
//!                      └──stop──▶ Stopped ◀─┘   (stop is accepted anywhere)
//! ```
//!
//! Control requests may come from any thread through a [`ClockHandle`].
//! They only take effect at tick boundaries: the engine asks the clock for
//! the next tick with [`SimulationClock::next_tick`], which blocks while the
//! clock is paused.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use cs_core::Tick;

use crate::{ClockError, ClockResult};

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClockState {
    Idle,
    Running,
    Paused,
    Stopped,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClockState::Idle    => "idle",
            ClockState::Running => "running",
            ClockState::Paused  => "paused",
            ClockState::Stopped => "stopped",
        })
    }
}

/// How many ticks a run may advance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickBudget {
    Bounded(u64),
    /// Until stopped.
    Unbounded,
}

struct Inner {
    state:     ClockState,
    /// Last completed tick.  `Tick::ZERO` is the configured state.
    tick:      Tick,
    /// Ticks left in the current run; `None` = unbounded.
    remaining: Option<u64>,
}

struct Shared {
    inner: Mutex<Inner>,
    cond:  Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pause(&self) -> ClockResult<()> {
        let mut inner = self.lock();
        let from = inner.state;
        match from {
            ClockState::Running | ClockState::Paused => {
                inner.state = ClockState::Paused;
                Ok(())
            }
            _ => Err(ClockError::InvalidTransition { from, action: "pause" }),
        }
    }

    fn resume(&self) -> ClockResult<()> {
        let mut inner = self.lock();
        let from = inner.state;
        match from {
            ClockState::Running | ClockState::Paused => {
                inner.state = ClockState::Running;
                drop(inner);
                self.cond.notify_all();
                Ok(())
            }
            _ => Err(ClockError::InvalidTransition { from, action: "resume" }),
        }
    }

    fn stop(&self) {
        self.lock().state = ClockState::Stopped;
        self.cond.notify_all();
    }
}

// ── SimulationClock ───────────────────────────────────────────────────────────

/// The engine's clock.  Owned by the engine; viewers get a [`ClockHandle`].
pub struct SimulationClock {
    shared: Arc<Shared>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state:     ClockState::Idle,
                    tick:      Tick::ZERO,
                    remaining: Some(0),
                }),
                cond: Condvar::new(),
            }),
        }
    }

    pub fn state(&self) -> ClockState {
        self.shared.lock().state
    }

    /// Last completed tick.
    pub fn current_tick(&self) -> Tick {
        self.shared.lock().tick
    }

    pub fn handle(&self) -> ClockHandle {
        ClockHandle { shared: Arc::clone(&self.shared) }
    }

    /// Begin a run of `budget` ticks.
    ///
    /// Accepted from `Idle` and from `Running` (a new run after the previous
    /// budget was spent); the budget replaces whatever was left.
    pub fn start(&self, budget: TickBudget) -> ClockResult<()> {
        let mut inner = self.shared.lock();
        let from = inner.state;
        match from {
            ClockState::Idle | ClockState::Running => {
                inner.state     = ClockState::Running;
                inner.remaining = match budget {
                    TickBudget::Bounded(n) => Some(n),
                    TickBudget::Unbounded  => None,
                };
                Ok(())
            }
            _ => Err(ClockError::InvalidTransition { from, action: "start" }),
        }
    }

    pub fn pause(&self) -> ClockResult<()> {
        self.shared.pause()
    }

    pub fn resume(&self) -> ClockResult<()> {
        self.shared.resume()
    }

    /// Terminal.  Idempotent.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Tick boundary.  Blocks while paused, then returns the tick to run
    /// next, or `None` once the clock is stopped or the budget is spent.
    pub fn next_tick(&self) -> Option<Tick> {
        let mut inner = self.shared.lock();
        while inner.state == ClockState::Paused {
            log::debug!("clock paused at {}", inner.tick);
            inner = self.shared.cond.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }
        if inner.state != ClockState::Running || inner.remaining == Some(0) {
            return None;
        }
        Some(inner.tick.next())
    }

    /// Record `tick` as completed and charge it to the budget.
    pub fn complete_tick(&self, tick: Tick) {
        let mut inner = self.shared.lock();
        inner.tick = tick;
        if let Some(n) = inner.remaining.as_mut() {
            *n = n.saturating_sub(1);
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

// ── ClockHandle ───────────────────────────────────────────────────────────────

/// Cloneable control surface for other threads.
#[derive(Clone)]
pub struct ClockHandle {
    shared: Arc<Shared>,
}

impl ClockHandle {
    pub fn state(&self) -> ClockState {
        self.shared.lock().state
    }

    pub fn current_tick(&self) -> Tick {
        self.shared.lock().tick
    }

    /// Running → Paused; no-op when already paused.
    pub fn pause(&self) -> ClockResult<()> {
        self.shared.pause()
    }

    /// Paused → Running; no-op when already running.
    pub fn resume(&self) -> ClockResult<()> {
        self.shared.resume()
    }

    pub fn stop(&self) {
        self.shared.stop();
    }
}

impl fmt::Debug for ClockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("ClockHandle")
            .field("state", &inner.state)
            .field("tick", &inner.tick)
            .finish()
    }
}
