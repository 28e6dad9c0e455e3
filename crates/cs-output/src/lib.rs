//! `cs-output`: simulation output writers for the citysim engine.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                          |
//! |-----------|---------|----------------------------------------|
//! | *(none)*  | CSV     | `metrics.csv`, `tick_summaries.csv`    |
//! | `sqlite`  | SQLite  | `output.db`                            |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`SnapshotOutputObserver`], which implements `cs_sim::SimObserver`.
//! Every published snapshot contributes one `(tick, metric, value)` row per
//! metric, in metric-name order.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, SnapshotOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SnapshotOutputObserver::new(writer);
//! engine.run_to_end(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotOutputObserver;
pub use row::{MetricRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
