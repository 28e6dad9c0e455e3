//! `SimulationState`: everything one tick reads and writes.

use cs_core::Tick;
use cs_population::Resident;
use cs_transport::TickCosts;
use cs_zone::ZoneMap;
use serde::Serialize;

/// Live city state.  Zones and residents are flat collections indexed by
/// their ids; a resident refers to zones only by `ZoneId`.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationState {
    /// Last committed tick.
    pub tick:      Tick,
    pub zones:     ZoneMap,
    /// Indexed by `ResidentId`.
    pub residents: Vec<Resident>,
    /// Costs used by the last committed tick (free flow for tick 0).
    pub costs:     TickCosts,
}
