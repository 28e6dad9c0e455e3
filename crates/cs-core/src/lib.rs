//! `cs-core`: foundational types for the `citysim` engine.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `ZoneId`, `LinkId`, `ResidentId`                  |
//! | [`time`]  | `Tick`, `SimConfig`                               |
//! | [`rng`]   | `SimRng` (seeded, for synthetic populations)      |
//! | [`error`] | `ConfigError`, `ConfigResult`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required for snapshot serialization in `cs-sim`.           |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ConfigError, ConfigResult};
pub use ids::{LinkId, ResidentId, ZoneId};
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
