//! `cs-population`: residents and their employment decisions.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`resident`] | `Resident`, `EmploymentState`                               |
//! | [`builder`]  | `ResidentSpec`, `place_residents`: validated initial state  |
//! | [`context`]  | `DecisionContext<'a>`: read-only view for one tick          |
//! | [`decision`] | `Decision`, `Candidate`                                     |
//! | [`rule`]     | `EmploymentRule` trait, `ThresholdRule`                     |
//! | [`change`]   | `StateChange`                                               |
//! | [`model`]    | `PopulationModel<R>`: decide, apply, verify                 |
//! | [`error`]    | `PopulationError`, `PopulationResult<T>`                    |
//!
//! # Two-phase update
//!
//! 1. **Decide** (parallel with the `parallel` feature): every resident's
//!    rule runs against a shared `&DecisionContext`.  No mutation.
//! 2. **Apply** (sequential, ascending `ResidentId`): decisions are turned
//!    into zone counter writes through `ZoneMap`'s controlled accessors.
//!    When two residents want the last slot in a zone, the lower ID wins
//!    regardless of how many threads ran phase 1.

pub mod builder;
pub mod change;
pub mod context;
pub mod decision;
pub mod error;
pub mod model;
pub mod resident;
pub mod rule;

#[cfg(test)]
mod tests;

pub use builder::{place_residents, ResidentSpec};
pub use change::StateChange;
pub use context::DecisionContext;
pub use decision::{Candidate, Decision};
pub use error::{PopulationError, PopulationResult};
pub use model::{verify, PopulationModel};
pub use resident::{EmploymentState, Resident};
pub use rule::{EmploymentRule, ThresholdRule};
