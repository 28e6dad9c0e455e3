//! `SnapshotOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use cs_core::Tick;
use cs_sim::{SimObserver, Snapshot};

use crate::row::{MetricRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes each published snapshot's samples and a
/// per-tick summary to any [`OutputWriter`].
///
/// Errors from the writer are stored because observer callbacks cannot
/// return one.  Check with [`take_error`](Self::take_error) after the run.
pub struct SnapshotOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SnapshotOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Metric rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            log::warn!("output write failed: {e}");
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SnapshotOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, transitions: usize) {
        let row = TickSummaryRow { tick: tick.0, transitions: transitions as u64 };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let tick = snapshot.tick();
        let rows: Vec<MetricRow> = snapshot
            .all_series()
            .iter()
            .filter_map(|(metric, series)| {
                let (t, value) = series.last()?;
                (t == tick).then(|| MetricRow { tick: tick.0, metric: metric.clone(), value })
            })
            .collect();

        if !rows.is_empty() {
            self.rows += rows.len();
            let result = self.writer.write_metrics(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
