//! commute: a small city run end to end.
//!
//! Usage: `commute [CITY.json] [OUT_DIR]`
//!
//! Without a config file the embedded four-zone city is used: two
//! residential suburbs, a downtown and a business park, with 200 synthetic
//! residents.  Metrics are written as CSV to `OUT_DIR` (default `output`).
//! Set `RUST_LOG=debug` for per-tick logging.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use cs_config::CityConfig;
use cs_output::{CsvWriter, SnapshotOutputObserver};
use cs_sim::SimulationEngine;

// ── Embedded city ─────────────────────────────────────────────────────────────

const CITY_JSON: &str = r#"{
    "zones": [
        { "name": "north",    "capacity": 120, "resident_share": 45 },
        { "name": "south",    "capacity": 100, "resident_share": 40 },
        { "name": "downtown", "capacity": 90,  "resident_share": 10 },
        { "name": "park",     "capacity": 60,  "resident_share": 5 }
    ],
    "links": [
        { "origin": "north",    "destination": "downtown", "base_cost": 2.0, "capacity": 40 },
        { "origin": "downtown", "destination": "north",    "base_cost": 2.0, "capacity": 40 },
        { "origin": "south",    "destination": "downtown", "base_cost": 2.5, "capacity": 30 },
        { "origin": "downtown", "destination": "south",    "base_cost": 2.5, "capacity": 30 },
        { "origin": "south",    "destination": "park",     "base_cost": 1.5, "capacity": 20 },
        { "origin": "park",     "destination": "south",    "base_cost": 1.5, "capacity": 20 },
        { "origin": "downtown", "destination": "park",     "base_cost": 3.0 }
    ],
    "synthetic": { "count": 200, "income_range": [800, 2400] },
    "rules":     { "commute_threshold": 6.0, "quit_threshold": 9.0 },
    "congestion": { "model": "bpr", "alpha": 0.15, "beta": 4.0 },
    "sim":       { "seed": 42, "total_ticks": 24, "output_interval_ticks": 4 }
}"#;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => CityConfig::from_json_path(Path::new(&path))
            .with_context(|| format!("loading {path}"))?,
        None => CityConfig::from_json_str(CITY_JSON)?,
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "output".into()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut engine = SimulationEngine::configure(&config)?;
    let state = engine.state();
    println!("=== commute ===");
    println!(
        "Zones: {}  |  Links: {}  |  Residents: {}  |  Ticks: {}",
        state.zones.zone_count(),
        state.zones.link_count(),
        state.residents.len(),
        engine.config().total_ticks,
    );

    let mut observer = SnapshotOutputObserver::new(CsvWriter::new(&out_dir)?);
    let t0 = Instant::now();
    let run = engine.run_to_end(&mut observer)?;
    let elapsed = t0.elapsed();

    if let Some(e) = observer.take_error() {
        log::error!("output incomplete: {e}");
    }

    println!(
        "Ran {} ticks in {:.1?} ({} transitions, {} metric rows)",
        run.ticks_run,
        elapsed,
        run.transitions,
        observer.rows_written(),
    );
    println!();

    let last = engine.shutdown();
    match last.report() {
        Some(report) => println!("{report}"),
        None => println!("No ticks were run."),
    }

    let summary = serde_json::to_string_pretty(&last.state().costs)?;
    std::fs::write(out_dir.join("final_costs.json"), summary)?;
    println!("Output written to {}", out_dir.display());
    Ok(())
}
