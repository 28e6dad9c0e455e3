//! Fluent builder for constructing a [`SimulationEngine`].

use cs_core::{ConfigError, SimConfig};
use cs_population::{place_residents, EmploymentRule, PopulationModel, ResidentSpec};
use cs_transport::{CongestionKind, CongestionModel, TransportModel};
use cs_zone::ZoneMap;

use crate::{EngineError, EngineResult, SimulationEngine};

/// Fluent builder for [`SimulationEngine<R, C>`].
///
/// # Required inputs
///
/// - [`ZoneMap`]: from [`cs_zone::ZoneMapBuilder`]
/// - resident specs: placed into their zones by [`build`](Self::build)
/// - `R: EmploymentRule`: e.g. [`cs_population::ThresholdRule`]
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                  |
/// |--------------------|--------------------------|
/// | `.config(c)`       | `SimConfig::default()`   |
/// | `.congestion(m)`   | `CongestionKind::Linear` |
/// | `.hire_limit(n)`   | no limit                 |
/// | `.quit_limit(n)`   | no limit                 |
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(zones, specs, ThresholdRule::new(2.0))
///     .config(config)
///     .build()?;
/// ```
pub struct EngineBuilder<R: EmploymentRule, C: CongestionModel = CongestionKind> {
    config:     SimConfig,
    zones:      ZoneMap,
    residents:  Vec<ResidentSpec>,
    rule:       R,
    congestion: C,
    hire_limit: Option<u32>,
    quit_limit: Option<u32>,
}

impl<R: EmploymentRule> EngineBuilder<R, CongestionKind> {
    pub fn new(zones: ZoneMap, residents: Vec<ResidentSpec>, rule: R) -> Self {
        Self {
            config:     SimConfig::default(),
            zones,
            residents,
            rule,
            congestion: CongestionKind::default(),
            hire_limit: None,
            quit_limit: None,
        }
    }
}

impl<R: EmploymentRule, C: CongestionModel> EngineBuilder<R, C> {
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the congestion curve.
    pub fn congestion<C2: CongestionModel>(self, congestion: C2) -> EngineBuilder<R, C2> {
        EngineBuilder {
            config:     self.config,
            zones:      self.zones,
            residents:  self.residents,
            rule:       self.rule,
            congestion,
            hire_limit: self.hire_limit,
            quit_limit: self.quit_limit,
        }
    }

    pub fn hire_limit(mut self, limit: Option<u32>) -> Self {
        self.hire_limit = limit;
        self
    }

    pub fn quit_limit(mut self, limit: Option<u32>) -> Self {
        self.quit_limit = limit;
        self
    }

    /// Validate the run configuration, place every resident, and return an
    /// engine whose tick-0 snapshot is already published.
    pub fn build(self) -> EngineResult<SimulationEngine<R, C>> {
        if self.config.num_threads == Some(0) {
            return Err(ConfigError::new("sim.num_threads", "must be at least 1").into());
        }
        if self.config.output_interval_ticks == 0 {
            return Err(ConfigError::new("sim.output_interval_ticks", "must be at least 1").into());
        }
        if self.hire_limit == Some(0) {
            return Err(ConfigError::new("rules.max_hires_per_zone_per_tick", "must be at least 1").into());
        }
        if self.quit_limit == Some(0) {
            return Err(ConfigError::new("rules.max_quits_per_tick", "must be at least 1").into());
        }

        let transport = TransportModel::new(self.congestion);
        let mut zones = self.zones;
        let costs     = transport.free_flow(&zones);
        let residents = place_residents(&mut zones, &costs, &self.residents)?;
        cs_population::verify(&zones, &residents)
            .map_err(|e| EngineError::Fault { tick: costs.tick(), reason: e.to_string() })?;

        let mut population = PopulationModel::new(self.rule);
        population.max_hires_per_zone_per_tick = self.hire_limit;
        population.max_quits_per_tick          = self.quit_limit;

        SimulationEngine::assemble(self.config, zones, residents, costs, transport, population)
    }
}
