//! CSV resident import.
//!
//! # CSV format
//!
//! One row per resident, with a header.  `work_zone` may be left empty.
//! Zones are given by index or by name, as in the JSON document.
//!
//! ```csv
//! home_zone,work_zone,income
//! 0,,1200.0
//! A,B,950.5
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{LoadError, LoadResult, ResidentConfig, ZoneRef};

#[derive(Deserialize)]
struct ResidentRecord {
    home_zone: String,
    work_zone: Option<String>,
    income:    f64,
}

/// Load residents from a CSV file.
pub fn load_residents_csv(path: &Path) -> LoadResult<Vec<ResidentConfig>> {
    let file = std::fs::File::open(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    load_residents_reader(file)
}

/// Like [`load_residents_csv`] but accepts any `Read` source.
pub fn load_residents_reader<R: Read>(reader: R) -> LoadResult<Vec<ResidentConfig>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut residents = Vec::new();

    for result in csv_reader.deserialize::<ResidentRecord>() {
        let row = result?;
        residents.push(ResidentConfig {
            home_zone: ZoneRef::parse(&row.home_zone),
            work_zone: row.work_zone.filter(|w| !w.is_empty()).map(|w| ZoneRef::parse(&w)),
            income:    row.income,
        });
    }
    Ok(residents)
}
