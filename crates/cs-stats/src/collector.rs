//! `StatisticsCollector`: turns committed tick state into metric samples.

use std::collections::BTreeMap;

use cs_core::Tick;
use cs_population::{EmploymentState, Resident, StateChange};
use cs_transport::TickCosts;
use cs_zone::ZoneMap;

use crate::metric;
use crate::series::{SampleBuf, Series};
use crate::{Report, StatsError, StatsResult};

/// Owns every metric's samples.  One instance per engine.
#[derive(Debug, Default)]
pub struct StatisticsCollector {
    metrics:   BTreeMap<String, SampleBuf>,
    last_tick: Option<Tick>,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append exactly one sample per metric for `tick`.
    ///
    /// `tick` must be later than the previous aggregated tick; nothing is
    /// recorded otherwise.
    pub fn aggregate(
        &mut self,
        tick:      Tick,
        zones:     &ZoneMap,
        residents: &[Resident],
        costs:     &TickCosts,
        changes:   &[StateChange],
    ) -> StatsResult<()> {
        if let Some(last) = self.last_tick {
            if tick <= last {
                return Err(StatsError::OutOfOrder { last, tick });
            }
        }

        let mut employed     = 0u32;
        let mut commuting    = 0u32;
        let mut unemployed   = 0u32;
        let mut commute_sum  = 0.0;
        let mut income_sum   = 0.0;
        let mut wealth_sum   = 0.0;
        for r in residents {
            match r.state {
                EmploymentState::Employed   => employed += 1,
                EmploymentState::Unemployed => unemployed += 1,
                EmploymentState::Commuting  => {
                    commuting += 1;
                    commute_sum += r.commute_cost;
                }
            }
            if r.state.has_job() {
                income_sum += r.income;
            }
            wealth_sum += r.wealth;
        }
        let working = employed + commuting;

        let mut occupation_sum = 0.0;
        for zone in zones.zones() {
            let occupation = zone.occupation_pct();
            occupation_sum += occupation;
            self.push(metric::population(zone.id), tick, zone.residents() as f64);
            self.push(metric::workers(zone.id), tick, zone.workers() as f64);
            self.push(metric::occupation(zone.id), tick, occupation);
        }
        self.push(metric::EMPLOYMENT_RATE.into(), tick, ratio(working as f64, residents.len()));
        self.push(metric::AVERAGE_COMMUTE_COST.into(), tick, ratio(commute_sum, commuting as usize));
        self.push(metric::AVERAGE_INCOME.into(), tick, ratio(income_sum, working as usize));
        self.push(metric::AVERAGE_CONGESTION.into(), tick, costs.average_congestion());
        self.push(metric::AVERAGE_OCCUPATION.into(), tick, ratio(occupation_sum, zones.zone_count()));
        self.push(metric::AVERAGE_WEALTH.into(), tick, ratio(wealth_sum, residents.len()));
        self.push(metric::EMPLOYED.into(), tick, employed as f64);
        self.push(metric::COMMUTING.into(), tick, commuting as f64);
        self.push(metric::UNEMPLOYED.into(), tick, unemployed as f64);
        self.push(metric::TRANSITIONS.into(), tick, changes.len() as f64);

        self.last_tick = Some(tick);
        log::debug!(
            "{tick}: aggregated {} metrics ({working}/{} working)",
            self.metrics.len(),
            residents.len()
        );
        Ok(())
    }

    /// The samples of `name` so far, or `None` for an unknown metric.
    pub fn series(&self, name: &str) -> Option<Series> {
        self.metrics.get(name).map(SampleBuf::series)
    }

    /// Every metric, in name order.
    pub fn all_series(&self) -> BTreeMap<String, Series> {
        self.metrics
            .iter()
            .map(|(name, buf)| (name.clone(), buf.series()))
            .collect()
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.metrics.keys().map(String::as_str)
    }

    /// The most recent value of `name`.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.metrics.get(name)?.last().map(|(_, v)| v)
    }

    pub fn last_tick(&self) -> Option<Tick> {
        self.last_tick
    }

    /// Summary of the latest aggregated tick; `None` before the first one.
    pub fn report(&self) -> Option<Report> {
        let tick = self.last_tick?;
        let count = |name| self.latest(name).unwrap_or(0.0) as u64;

        let employed   = count(metric::EMPLOYED);
        let commuting  = count(metric::COMMUTING);
        let unemployed = count(metric::UNEMPLOYED);
        Some(Report {
            tick,
            total: employed + commuting + unemployed,
            employed,
            commuting,
            unemployed,
            employment_rate:      self.latest(metric::EMPLOYMENT_RATE).unwrap_or(0.0),
            average_commute_cost: self.latest(metric::AVERAGE_COMMUTE_COST).unwrap_or(0.0),
            average_congestion:   self.latest(metric::AVERAGE_CONGESTION).unwrap_or(0.0),
            average_occupation:   self.latest(metric::AVERAGE_OCCUPATION).unwrap_or(0.0),
            average_wealth:       self.latest(metric::AVERAGE_WEALTH).unwrap_or(0.0),
        })
    }

    fn push(&mut self, name: String, tick: Tick, value: f64) {
        self.metrics.entry(name).or_default().push((tick, value));
    }
}

fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

