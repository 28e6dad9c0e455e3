//! Seeded synthetic population.
//!
//! Each zone with a `resident_share` of `p` percent receives
//! `floor(count × p / 100)` residents, all unemployed, with incomes drawn
//! uniformly from the zone's `income_range` (or the generator's).  Zones are
//! filled in order and residents drawn in order, so one seed always yields
//! the same population.

use cs_core::{ConfigError, ConfigResult, SimRng, ZoneId};
use cs_population::ResidentSpec;

use crate::{SyntheticConfig, ZoneConfig};

pub fn generate(
    zones:  &[ZoneConfig],
    config: &SyntheticConfig,
    rng:    &mut SimRng,
) -> ConfigResult<Vec<ResidentSpec>> {
    validate_range(config.income_range, "synthetic.income_range")?;

    let mut total_share = 0.0;
    let mut specs = Vec::new();

    for (i, zone) in zones.iter().enumerate() {
        let Some(share) = zone.resident_share else { continue };
        let field = format!("zones[{i}].resident_share");
        if !share.is_finite() || !(0.0..=100.0).contains(&share) {
            return Err(ConfigError::new(field, "must be a percentage between 0 and 100"));
        }
        total_share += share;
        if total_share > 100.0 + 1e-9 {
            return Err(ConfigError::new(field, "resident shares add up to more than 100"));
        }

        let [min, max] = match zone.income_range {
            Some(range) => validate_range(range, &format!("zones[{i}].income_range"))?,
            None        => config.income_range,
        };
        let home = ZoneId(i as u32);
        let count = (config.count as f64 * share / 100.0).floor() as u32;
        for _ in 0..count {
            let income = if max > min { rng.gen_range(min..max) } else { min };
            specs.push(ResidentSpec::new(home, income));
        }
        log::debug!("synthetic population: {count} residents in zone {i}");
    }

    Ok(specs)
}

fn validate_range(range: [f64; 2], field: &str) -> ConfigResult<[f64; 2]> {
    let [min, max] = range;
    if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min {
        return Err(ConfigError::new(field, "must be [min, max] with 0 <= min <= max"));
    }
    Ok(range)
}
