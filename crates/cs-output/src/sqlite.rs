//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the configured output directory with two tables:
//! `metrics` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{MetricRow, OutputResult, TickSummaryRow};

pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS metrics (
                 tick   INTEGER NOT NULL,
                 metric TEXT    NOT NULL,
                 value  REAL    NOT NULL,
                 PRIMARY KEY (tick, metric)
             );
             CREATE INDEX IF NOT EXISTS metrics_by_name ON metrics (metric, tick);
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick        INTEGER PRIMARY KEY,
                 transitions INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }

    /// Read back one metric's samples in tick order.
    pub fn series(&self, metric: &str) -> OutputResult<Vec<(u64, f64)>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT tick, value FROM metrics WHERE metric = ?1 ORDER BY tick")?;
        let rows = stmt.query_map([metric], |r| Ok((r.get::<_, i64>(0)? as u64, r.get::<_, f64>(1)?)))?;
        Ok(rows.collect::<Result<_, _>>()?)
    }
}

impl OutputWriter for SqliteWriter {
    fn write_metrics(&mut self, rows: &[MetricRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO metrics (tick, metric, value) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.tick as i64, row.metric, row.value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, transitions) VALUES (?1, ?2)",
            rusqlite::params![row.tick as i64, row.transitions as i64],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
