//! Unit tests for cs-output.

use std::path::Path;

use cs_core::SimConfig;
use cs_population::{ResidentSpec, ThresholdRule};
use cs_sim::{EngineBuilder, SimulationEngine};
use cs_transport::CongestionKind;
use cs_zone::ZoneMapBuilder;

use crate::{CsvWriter, OutputWriter, SnapshotOutputObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two zones, eight residents in the first: 5 commute after tick 1.
fn engine(total_ticks: u64, interval: u64) -> SimulationEngine<ThresholdRule, CongestionKind> {
    let mut b = ZoneMapBuilder::new();
    let a  = b.add_zone(10).unwrap();
    let bz = b.add_zone(5).unwrap();
    b.add_link(a, bz, 1.0).unwrap();
    let specs = (0..8).map(|_| ResidentSpec::new(a, 100.0)).collect();
    let config = SimConfig {
        total_ticks,
        output_interval_ticks: interval,
        num_threads: Some(1),
        ..SimConfig::default()
    };
    EngineBuilder::new(b.build(), specs, ThresholdRule::new(2.0))
        .config(config)
        .build()
        .unwrap()
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut r = csv::Reader::from_path(path).unwrap();
    r.records()
        .map(|rec| rec.unwrap().iter().map(str::to_string).collect())
        .collect()
}

/// population, workers and occupation for two zones plus ten global metrics.
const METRICS_PER_TICK: usize = 6 + 10;

// ── CSV ───────────────────────────────────────────────────────────────────────

mod csv_tests {
    use super::*;

    #[test]
    fn one_row_per_metric_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SnapshotOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        engine(3, 1).run_to_end(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 3 * METRICS_PER_TICK);

        let rows = read_csv(&dir.path().join("metrics.csv"));
        assert_eq!(rows.len(), 3 * METRICS_PER_TICK);
        for tick in 1..=3u64 {
            let at: Vec<_> = rows.iter().filter(|r| r[0] == tick.to_string()).collect();
            assert_eq!(at.len(), METRICS_PER_TICK, "tick {tick}");
            let rate = at.iter().find(|r| r[1] == "employment_rate").unwrap();
            assert_eq!(rate[2].parse::<f64>().unwrap(), 0.625);
        }
    }

    #[test]
    fn rows_within_a_tick_are_name_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SnapshotOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        engine(1, 1).run_to_end(&mut obs).unwrap();

        let names: Vec<String> = read_csv(&dir.path().join("metrics.csv"))
            .into_iter()
            .map(|r| r[1].clone())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn interval_limits_published_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SnapshotOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        engine(4, 2).run_to_end(&mut obs).unwrap();

        let ticks: Vec<String> = read_csv(&dir.path().join("metrics.csv"))
            .into_iter()
            .map(|r| r[0].clone())
            .collect();
        assert_eq!(ticks.len(), 2 * METRICS_PER_TICK);
        assert!(ticks.iter().all(|t| t == "2" || t == "4"));
    }

    #[test]
    fn tick_summaries_every_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SnapshotOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        engine(3, 3).run_to_end(&mut obs).unwrap();

        let rows = read_csv(&dir.path().join("tick_summaries.csv"));
        let transitions: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(transitions, vec!["5", "0", "0"]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CsvWriter::new(&dir.path().join("no/such/dir")).is_err());
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
mod sqlite_tests {
    use super::*;
    use crate::SqliteWriter;

    #[test]
    fn metrics_table_matches_csv_shape() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SnapshotOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        engine(3, 1).run_to_end(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        drop(obs);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM metrics", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count as usize, 3 * METRICS_PER_TICK);

        let rate: f64 = conn
            .query_row(
                "SELECT value FROM metrics WHERE tick = 2 AND metric = 'employment_rate'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(rate, 0.625);

        let ticks: i64 = conn
            .query_row("SELECT COUNT(*) FROM tick_summaries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(ticks, 3);
    }

    #[test]
    fn series_reads_back_in_tick_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SnapshotOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        engine(4, 2).run_to_end(&mut obs).unwrap();
        let writer = obs.into_writer();

        let commuting = writer.series("commuting").unwrap();
        assert_eq!(commuting, vec![(2, 5.0), (4, 5.0)]);
        assert!(writer.series("no_such_metric").unwrap().is_empty());
    }
}
