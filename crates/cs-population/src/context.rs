//! Read-only state passed to every employment rule.

use cs_core::Tick;
use cs_transport::TickCosts;
use cs_zone::ZoneMap;

/// A read-only view of the tick being decided.
///
/// Built once per tick and shared immutably across all residents during the
/// decision phase.  Zone vacancy is as of the start of the tick: slots taken
/// by lower-ID residents in the same tick are only visible to the apply
/// phase.
pub struct DecisionContext<'a> {
    pub tick:  Tick,
    pub zones: &'a ZoneMap,
    /// Costs recomputed for this tick.
    pub costs: &'a TickCosts,
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn new(tick: Tick, zones: &'a ZoneMap, costs: &'a TickCosts) -> Self {
        Self { tick, zones, costs }
    }
}
