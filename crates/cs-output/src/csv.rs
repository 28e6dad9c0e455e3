//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `metrics.csv` (`tick,metric,value`)
//! - `tick_summaries.csv` (`tick,transitions`)

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MetricRow, OutputResult, TickSummaryRow};

pub struct CsvWriter {
    metrics:   Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut metrics = Writer::from_path(dir.join("metrics.csv"))?;
        metrics.write_record(["tick", "metric", "value"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "transitions"])?;

        log::debug!("writing CSV output to {}", dir.display());
        Ok(Self { metrics, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, rows: &[MetricRow]) -> OutputResult<()> {
        for row in rows {
            self.metrics.write_record(&[
                row.tick.to_string(),
                row.metric.clone(),
                row.value.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries
            .write_record(&[row.tick.to_string(), row.transitions.to_string()])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
