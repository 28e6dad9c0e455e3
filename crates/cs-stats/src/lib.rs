//! `cs-stats`: metric time series aggregated once per tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`metric`]    | metric names (`employment_rate`, `population/<id>`, …) |
//! | [`series`]    | `Series`: immutable, restartable `(Tick, f64)` view    |
//! | [`collector`] | `StatisticsCollector`: one sample per metric per tick  |
//! | [`report`]    | `Report`: end-of-run text summary                      |
//! | [`error`]     | `StatsError`, `StatsResult<T>`                         |
//!
//! Metrics are kept in a `BTreeMap`, so every iteration over them (output
//! rows, serialized snapshots) is in name order.

pub mod collector;
pub mod error;
pub mod metric;
pub mod report;
pub mod series;


pub use collector::StatisticsCollector;
pub use error::{StatsError, StatsResult};
pub use report::Report;
pub use series::{Series, SeriesIter};
