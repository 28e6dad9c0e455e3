//! `cs-sim`: clock and engine for the citysim framework.
//!
//! # Tick loop
//!
//! ```text
//! while clock.next_tick() yields t:        (blocks while paused)
//!   stage      copy the committed state
//!   ① Transport     loads from current routes → congested costs + routes
//!   ② Population    decide (parallel) → apply in ResidentId order → verify
//!   ③ Statistics    one sample per metric
//!   ④ Publish       commit the staged state, publish Arc<Snapshot>
//! ```
//!
//! A failure in any phase discards the staged state, stops the clock and
//! leaves the previous snapshot published.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | *(default)* decision phase on a pool of `num_threads`.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_config::CityConfig;
//! use cs_sim::SimulationEngine;
//!
//! let config = CityConfig::from_json_path(path)?;
//! let mut engine = SimulationEngine::configure(&config)?;
//! engine.run(10)?;
//! let snap = engine.latest_snapshot();
//! println!("{:?}", snap.series("employment_rate"));
//! ```

pub mod builder;
pub mod clock;
pub mod engine;
pub mod error;
pub mod observer;
pub mod snapshot;
pub mod state;


pub use builder::EngineBuilder;
pub use clock::{ClockHandle, ClockState, SimulationClock, TickBudget};
pub use engine::{EngineHandle, RunReport, SimulationEngine};
pub use error::{ClockError, ClockResult, EngineError, EngineResult};
pub use observer::{NoopObserver, SimObserver};
pub use snapshot::Snapshot;
pub use state::SimulationState;
