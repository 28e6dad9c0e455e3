//! `City`: a validated configuration, ready for the engine.

use cs_core::{ConfigError, ConfigResult, SimConfig, SimRng, ZoneId};
use cs_population::{ResidentSpec, ThresholdRule};
use cs_transport::{BprCongestion, CongestionKind, LinearCongestion};
use cs_zone::{ZoneMap, ZoneMapBuilder};

use crate::{CityConfig, CongestionConfig, RulesConfig, ZoneRef};

/// Everything the engine needs to start, with every value checked.
///
/// Residents are still specs: occupancy is only claimed when the engine
/// places them, since that needs free-flow routes.
#[derive(Debug, Clone)]
pub struct City {
    pub zones:      ZoneMap,
    pub residents:  Vec<ResidentSpec>,
    pub rule:       ThresholdRule,
    pub max_hires_per_zone_per_tick: Option<u32>,
    pub max_quits_per_tick:          Option<u32>,
    pub congestion: CongestionKind,
    pub sim:        SimConfig,
}

impl CityConfig {
    /// Validate the document and build the zone map and resident specs.
    ///
    /// Fails on the first problem found, with a `ConfigError` whose `field`
    /// is a path into the document (`links[2].destination`).
    pub fn build(&self) -> ConfigResult<City> {
        if self.residents_csv.is_some() {
            return Err(ConfigError::new(
                "residents_csv",
                "not imported; call import_residents_csv or load with from_json_path",
            ));
        }
        validate_sim(&self.sim)?;
        let rule       = validate_rules(&self.rules)?;
        let congestion = congestion_kind(&self.congestion)?;

        let names = self.zone_names()?;
        let resolve = |r: &ZoneRef, field: String| resolve_zone(&names, r, field);

        let mut builder = ZoneMapBuilder::new().default_link_capacity(self.sim.default_link_capacity);
        for (i, zone) in self.zones.iter().enumerate() {
            let capacity = to_u32(zone.capacity, format!("zones[{i}].capacity"))?;
            match &zone.name {
                Some(name) => builder.add_named_zone(name.clone(), capacity)?,
                None       => builder.add_zone(capacity)?,
            };
        }
        for (i, link) in self.links.iter().enumerate() {
            let origin      = resolve(&link.origin, format!("links[{i}].origin"))?;
            let destination = resolve(&link.destination, format!("links[{i}].destination"))?;
            match link.capacity {
                None => builder.add_link(origin, destination, link.base_cost)?,
                Some(c) => {
                    let capacity = to_u32(c, format!("links[{i}].capacity"))?;
                    builder.add_link_with_capacity(origin, destination, link.base_cost, capacity)?
                }
            };
        }
        let zones = builder.build();

        let mut residents = Vec::with_capacity(self.residents.len());
        for (i, r) in self.residents.iter().enumerate() {
            let home = resolve(&r.home_zone, format!("residents[{i}].home_zone"))?;
            let mut spec = ResidentSpec::new(home, r.income);
            if let Some(work) = &r.work_zone {
                spec = spec.working_in(resolve(work, format!("residents[{i}].work_zone"))?);
            }
            residents.push(spec);
        }

        if let Some(synthetic) = &self.synthetic {
            let mut rng = SimRng::new(self.sim.seed);
            residents.extend(crate::synthetic::generate(&self.zones, synthetic, &mut rng)?);
        }

        log::info!(
            "configured {} zones, {} links, {} residents",
            zones.zone_count(),
            zones.link_count(),
            residents.len()
        );
        Ok(City {
            zones,
            residents,
            rule,
            max_hires_per_zone_per_tick: self.rules.max_hires_per_zone_per_tick,
            max_quits_per_tick:          self.rules.max_quits_per_tick,
            congestion,
            sim: self.sim.clone(),
        })
    }

    /// Zone names by position, rejecting duplicates.
    fn zone_names(&self) -> ConfigResult<Vec<Option<&str>>> {
        let mut names: Vec<Option<&str>> = Vec::with_capacity(self.zones.len());
        for (i, zone) in self.zones.iter().enumerate() {
            let name = zone.name.as_deref();
            if let Some(n) = name {
                if names.contains(&Some(n)) {
                    return Err(ConfigError::new(
                        format!("zones[{i}].name"),
                        format!("duplicate zone name `{n}`"),
                    ));
                }
            }
            names.push(name);
        }
        Ok(names)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn resolve_zone(names: &[Option<&str>], r: &ZoneRef, field: String) -> ConfigResult<ZoneId> {
    match r {
        ZoneRef::Index(i) if (*i as usize) < names.len() => Ok(ZoneId(*i)),
        ZoneRef::Index(i) => Err(ConfigError::new(field, format!("zone {i} does not exist"))),
        ZoneRef::Name(n) => names
            .iter()
            .position(|name| *name == Some(n.as_str()))
            .map(|i| ZoneId(i as u32))
            .ok_or_else(|| ConfigError::new(field, format!("no zone named `{n}`"))),
    }
}

fn to_u32(value: i64, field: String) -> ConfigResult<u32> {
    if value <= 0 {
        return Err(ConfigError::new(field, "capacity must be positive"));
    }
    u32::try_from(value).map_err(|_| ConfigError::new(field, "capacity too large"))
}

fn positive_finite(value: f64, field: &str) -> ConfigResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::new(field, "must be a finite, positive number"))
    }
}

fn validate_sim(sim: &SimConfig) -> ConfigResult<()> {
    if sim.num_threads == Some(0) {
        return Err(ConfigError::new("sim.num_threads", "must be at least 1"));
    }
    if sim.default_link_capacity == 0 {
        return Err(ConfigError::new("sim.default_link_capacity", "capacity must be positive"));
    }
    if sim.output_interval_ticks == 0 {
        return Err(ConfigError::new("sim.output_interval_ticks", "must be at least 1"));
    }
    Ok(())
}

fn validate_rules(rules: &RulesConfig) -> ConfigResult<ThresholdRule> {
    let mut rule = ThresholdRule::new(positive_finite(rules.commute_threshold, "rules.commute_threshold")?);
    if let Some(q) = rules.quit_threshold {
        let q = positive_finite(q, "rules.quit_threshold")?;
        if q < rule.commute_threshold {
            return Err(ConfigError::new(
                "rules.quit_threshold",
                format!("must not be below commute_threshold ({})", rule.commute_threshold),
            ));
        }
        rule = rule.with_quit_threshold(q);
    }
    if rules.max_hires_per_zone_per_tick == Some(0) {
        return Err(ConfigError::new("rules.max_hires_per_zone_per_tick", "must be at least 1"));
    }
    if rules.max_quits_per_tick == Some(0) {
        return Err(ConfigError::new("rules.max_quits_per_tick", "must be at least 1"));
    }
    Ok(rule)
}

fn congestion_kind(config: &CongestionConfig) -> ConfigResult<CongestionKind> {
    match *config {
        CongestionConfig::Linear => Ok(CongestionKind::Linear(LinearCongestion)),
        CongestionConfig::Bpr { alpha, beta } => {
            if !alpha.is_finite() || alpha < 0.0 {
                return Err(ConfigError::new("congestion.alpha", "must be a finite, non-negative number"));
            }
            if !beta.is_finite() || beta < 0.0 {
                return Err(ConfigError::new("congestion.beta", "must be a finite, non-negative number"));
            }
            Ok(CongestionKind::Bpr(BprCongestion { alpha, beta }))
        }
    }
}
