//! The `OutputWriter` trait implemented by all backend writers.

use crate::{MetricRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned to the caller; [`SnapshotOutputObserver`] keeps the
/// first one for [`take_error`].
///
/// [`SnapshotOutputObserver`]: crate::SnapshotOutputObserver
/// [`take_error`]: crate::SnapshotOutputObserver::take_error
pub trait OutputWriter {
    /// Write a batch of metric samples, in order.
    fn write_metrics(&mut self, rows: &[MetricRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
