//! Metric names.
//!
//! Global metrics are plain names.  Per-zone metrics are `<prefix>/<zone>`
//! where `<zone>` is the numeric zone id.

use cs_core::ZoneId;

/// Employed plus commuting residents over all residents; 0 with no residents.
pub const EMPLOYMENT_RATE: &str = "employment_rate";

/// Mean commute cost over commuting residents; 0 with no commuters.
pub const AVERAGE_COMMUTE_COST: &str = "average_commute_cost";

/// Mean link congestion percentage; 0 with no links.
pub const AVERAGE_CONGESTION: &str = "average_congestion";

/// Mean worker occupation percentage over zones; 0 with no zones.
pub const AVERAGE_OCCUPATION: &str = "average_occupation";

/// Mean accumulated wealth over all residents; 0 with no residents.
pub const AVERAGE_WEALTH: &str = "average_wealth";

/// Mean income of residents holding a job; 0 when nobody works.
pub const AVERAGE_INCOME: &str = "average_income";

pub const EMPLOYED:    &str = "employed";
pub const UNEMPLOYED:  &str = "unemployed";
pub const COMMUTING:   &str = "commuting";

/// Number of work-zone transitions applied during the tick.
pub const TRANSITIONS: &str = "transitions";

pub const POPULATION_PREFIX: &str = "population";
pub const WORKERS_PREFIX:    &str = "workers";
pub const OCCUPATION_PREFIX: &str = "occupation";

/// `population/<zone>`.
pub fn population(zone: ZoneId) -> String {
    format!("{POPULATION_PREFIX}/{}", zone.0)
}

/// `workers/<zone>`.
pub fn workers(zone: ZoneId) -> String {
    format!("{WORKERS_PREFIX}/{}", zone.0)
}

/// `occupation/<zone>`: workers over capacity, in percent.
pub fn occupation(zone: ZoneId) -> String {
    format!("{OCCUPATION_PREFIX}/{}", zone.0)
}
