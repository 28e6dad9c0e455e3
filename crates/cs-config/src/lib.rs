//! `cs-config`: the configuration input contract.
//!
//! A city is described by one JSON document:
//!
//! ```json
//! {
//!   "zones":      [{ "name": "A", "capacity": 10 }, { "name": "B", "capacity": 5 }],
//!   "links":      [{ "origin": "A", "destination": "B", "base_cost": 1.0 }],
//!   "residents":  [{ "home_zone": "A", "income": 1200.0 }],
//!   "rules":      { "commute_threshold": 2.0 },
//!   "congestion": { "model": "linear" },
//!   "sim":        { "seed": 7, "total_ticks": 50 }
//! }
//! ```
//!
//! Zones are referenced either by position (`0`) or by name (`"A"`).
//! Residents may additionally come from a CSV file (`residents_csv`, see
//! [`residents_csv`]) or be generated from each zone's `resident_share`
//! (`synthetic`, see [`synthetic`]).
//!
//! Parsing and validation are separate: [`CityConfig::from_json_str`] only
//! fails on malformed JSON, while [`CityConfig::build`] checks every value
//! and reports the first problem as a `ConfigError` naming its field path.
//!
//! # Crate layout
//!
//! | Module            | Contents                                              |
//! |-------------------|-------------------------------------------------------|
//! | [`document`]      | serde types mirroring the JSON document               |
//! | [`city`]          | `City`: validated, engine-ready configuration         |
//! | [`residents_csv`] | `home_zone,work_zone,income` import                   |
//! | [`synthetic`]     | seeded population from zone shares                    |
//! | [`error`]         | `LoadError`, `LoadResult<T>`                          |

pub mod city;
pub mod document;
pub mod error;
pub mod residents_csv;
pub mod synthetic;


pub use city::City;
pub use document::{
    CityConfig, CongestionConfig, LinkConfig, ResidentConfig, RulesConfig, SyntheticConfig,
    ZoneConfig, ZoneRef,
};
pub use error::{LoadError, LoadResult};
pub use residents_csv::{load_residents_csv, load_residents_reader};
