//! Serde types mirroring the JSON configuration document.

use std::fmt;
use std::path::{Path, PathBuf};

use cs_core::SimConfig;
use serde::{Deserialize, Serialize};

use crate::{LoadError, LoadResult};

/// Commute threshold used when `rules` omits one.
pub const DEFAULT_COMMUTE_THRESHOLD: f64 = 10.0;

// ── Top level ─────────────────────────────────────────────────────────────────

/// The whole configuration document, as parsed.  Nothing is validated until
/// [`build`](Self::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    pub zones: Vec<ZoneConfig>,

    #[serde(default)]
    pub links: Vec<LinkConfig>,

    #[serde(default)]
    pub residents: Vec<ResidentConfig>,

    /// CSV file with more residents, appended after `residents`.  Relative
    /// paths are resolved against the JSON file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residents_csv: Option<PathBuf>,

    /// Generate residents from each zone's `resident_share`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthetic: Option<SyntheticConfig>,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub congestion: CongestionConfig,

    #[serde(default)]
    pub sim: SimConfig,
}

impl CityConfig {
    /// Parse a document.  A `residents_csv` entry is left unresolved, and
    /// [`build`](Self::build) rejects it until
    /// [`import_residents_csv`](Self::import_residents_csv) has run.
    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse `path`, then import `residents_csv` if present.
    pub fn from_json_path(path: &Path) -> LoadResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        let mut config = Self::from_json_str(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.import_residents_csv(base)?;
        Ok(config)
    }

    /// Load the `residents_csv` file (relative to `base`) into `residents`
    /// and clear the entry.  No-op when the entry is absent.
    pub fn import_residents_csv(&mut self, base: &Path) -> LoadResult<()> {
        let Some(rel) = self.residents_csv.take() else {
            return Ok(());
        };
        let path = base.join(rel);
        let imported = crate::load_residents_csv(&path)?;
        log::info!("imported {} residents from {}", imported.len(), path.display());
        self.residents.extend(imported);
        Ok(())
    }
}

// ── Zones and links ───────────────────────────────────────────────────────────

/// A zone reference: its position in `zones`, or its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneRef {
    Index(u32),
    Name(String),
}

impl ZoneRef {
    /// Numeric text is an index, anything else a name.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.parse::<u32>() {
            Ok(i)  => ZoneRef::Index(i),
            Err(_) => ZoneRef::Name(s.to_string()),
        }
    }
}

impl fmt::Display for ZoneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneRef::Index(i) => write!(f, "{i}"),
            ZoneRef::Name(n)  => write!(f, "`{n}`"),
        }
    }
}

impl From<u32> for ZoneRef {
    fn from(i: u32) -> Self {
        ZoneRef::Index(i)
    }
}

impl From<&str> for ZoneRef {
    fn from(name: &str) -> Self {
        ZoneRef::Name(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Signed so that a negative value is reported by field, not as a parse
    /// error.
    pub capacity: i64,

    /// Percentage of the synthetic population living here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_share: Option<f64>,

    /// `[min, max)` income of synthetic residents of this zone.  Falls back
    /// to `synthetic.income_range`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub origin:      ZoneRef,
    pub destination: ZoneRef,
    pub base_cost:   f64,

    /// Falls back to `sim.default_link_capacity`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

// ── Residents ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentConfig {
    pub home_zone: ZoneRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_zone: Option<ZoneRef>,

    pub income: f64,
}

/// Seeded generation of residents from zone shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Total population to distribute.  Each zone receives
    /// `floor(count × resident_share / 100)`.
    pub count: u32,

    #[serde(default = "default_income_range")]
    pub income_range: [f64; 2],
}

fn default_income_range() -> [f64; 2] {
    [500.0, 2000.0]
}

// ── Behaviour ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Unemployed residents only accept work strictly cheaper than this.
    pub commute_threshold: f64,

    /// Commuters whose route costs more than this quit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quit_threshold: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hires_per_zone_per_tick: Option<u32>,

    /// City-wide cap on quits per tick; later quitters wait a tick.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quits_per_tick: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            commute_threshold:           DEFAULT_COMMUTE_THRESHOLD,
            quit_threshold:              None,
            max_hires_per_zone_per_tick: None,
            max_quits_per_tick:          None,
        }
    }
}

/// Congestion curve selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum CongestionConfig {
    #[default]
    Linear,
    Bpr {
        #[serde(default = "default_alpha")]
        alpha: f64,
        #[serde(default = "default_beta")]
        beta:  f64,
    },
}

fn default_alpha() -> f64 {
    0.15
}

fn default_beta() -> f64 {
    4.0
}
