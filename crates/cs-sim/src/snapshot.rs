//! `Snapshot`: the immutable view published to viewers.

use std::collections::BTreeMap;

use cs_core::Tick;
use cs_population::Resident;
use cs_stats::{Report, Series};
use cs_transport::TickCosts;
use cs_zone::ZoneMap;
use serde::Serialize;

use crate::SimulationState;

/// A committed tick: the full state plus every metric series as of that
/// tick.  Published as `Arc<Snapshot>` and never modified.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    state:  SimulationState,
    series: BTreeMap<String, Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<Report>,
}

impl Snapshot {
    pub(crate) fn new(
        state:  SimulationState,
        series: BTreeMap<String, Series>,
        report: Option<Report>,
    ) -> Self {
        Self { state, series, report }
    }

    pub fn tick(&self) -> Tick {
        self.state.tick
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn zones(&self) -> &ZoneMap {
        &self.state.zones
    }

    pub fn residents(&self) -> &[Resident] {
        &self.state.residents
    }

    pub fn costs(&self) -> &TickCosts {
        &self.state.costs
    }

    /// The series of `metric` up to this snapshot's tick.
    pub fn series(&self, metric: &str) -> Option<&Series> {
        self.series.get(metric)
    }

    pub fn all_series(&self) -> &BTreeMap<String, Series> {
        &self.series
    }

    /// Headline figures; `None` for the configured state at tick 0.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }
}
