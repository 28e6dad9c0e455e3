//! `PopulationModel`: decide in parallel, apply in order.

use cs_core::{Tick, ZoneId};
use cs_transport::{LinkLoads, TickCosts};
use cs_zone::{ZoneError, ZoneMap};

use crate::{
    Decision, DecisionContext, EmploymentRule, EmploymentState, PopulationError,
    PopulationResult, Resident, StateChange,
};

/// Drives one [`EmploymentRule`] over the whole population each tick.
pub struct PopulationModel<R: EmploymentRule> {
    pub rule: R,

    /// Upper bound on new hires per zone per tick.  `None` = unlimited.
    pub max_hires_per_zone_per_tick: Option<u32>,

    /// Upper bound on quits across the whole city per tick.  Residents past
    /// the limit keep their job and current route until a later tick.
    pub max_quits_per_tick: Option<u32>,
}

impl<R: EmploymentRule> PopulationModel<R> {
    pub fn new(rule: R) -> Self {
        Self { rule, max_hires_per_zone_per_tick: None, max_quits_per_tick: None }
    }

    pub fn with_hire_limit(mut self, limit: u32) -> Self {
        self.max_hires_per_zone_per_tick = Some(limit);
        self
    }

    pub fn with_quit_limit(mut self, limit: u32) -> Self {
        self.max_quits_per_tick = Some(limit);
        self
    }

    /// Link loads generated by the current commuters' routes.
    pub fn link_loads(residents: &[Resident], link_count: usize) -> LinkLoads {
        LinkLoads::from_routes(
            link_count,
            residents.iter().filter(|r| r.is_commuting()).map(|r| r.route.as_slice()),
        )
    }

    /// Run both phases for `tick` and return every work-zone transition.
    ///
    /// `residents` must be indexed by `ResidentId`.  On error the caller must
    /// discard `zones` and `residents`: writes already applied this tick are
    /// not rolled back here.
    pub fn update_all(
        &self,
        tick:      Tick,
        zones:     &mut ZoneMap,
        residents: &mut [Resident],
        costs:     &TickCosts,
    ) -> PopulationResult<Vec<StateChange>> {
        let decisions = {
            let ctx = DecisionContext::new(tick, zones, costs);
            self.decide_all(residents, &ctx)
        };
        let changes = self.apply(tick, zones, residents, decisions)?;
        verify(zones, residents)?;

        log::debug!("{tick}: {} employment transitions", changes.len());
        Ok(changes)
    }

    /// Phase 1: evaluate the rule for every resident.  Read-only.
    ///
    /// The result is index-aligned with `residents`.  With the `parallel`
    /// feature this runs on the current Rayon pool.
    pub fn decide_all(&self, residents: &[Resident], ctx: &DecisionContext<'_>) -> Vec<Decision> {
        #[cfg(not(feature = "parallel"))]
        {
            residents.iter().map(|r| self.rule.decide(r, ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            residents.par_iter().map(|r| self.rule.decide(r, ctx)).collect()
        }
    }

    /// Phase 2: apply `decisions` in ascending `ResidentId` order, then pay
    /// every resident who holds a job at the end of the tick.
    ///
    /// A `Seek` whose candidates are all full (or over this tick's hire
    /// limit) is not an error: the resident simply stays unemployed.  A
    /// `Quit` over the quit limit is dropped the same way.
    pub fn apply(
        &self,
        tick:      Tick,
        zones:     &mut ZoneMap,
        residents: &mut [Resident],
        decisions: Vec<Decision>,
    ) -> PopulationResult<Vec<StateChange>> {
        if decisions.len() != residents.len() {
            return Err(PopulationError::InvariantViolation(format!(
                "{} decisions for {} residents",
                decisions.len(),
                residents.len()
            )));
        }

        let mut hires   = vec![0u32; zones.zone_count()];
        let mut quits   = 0u32;
        let mut changes = Vec::new();

        for (resident, decision) in residents.iter_mut().zip(decisions) {
            match decision {
                Decision::Stay => {}

                Decision::Reroute(route) => {
                    if !resident.is_commuting() {
                        return Err(PopulationError::InvariantViolation(format!(
                            "{} rerouted while {}",
                            resident.id, resident.state
                        )));
                    }
                    resident.commute_cost = route.total_cost;
                    resident.route        = route.links;
                }

                Decision::Seek(candidates) => {
                    if resident.state.has_job() {
                        return Err(PopulationError::InvariantViolation(format!(
                            "{} sought work while {}",
                            resident.id, resident.state
                        )));
                    }
                    for candidate in candidates {
                        if !self.may_hire(&hires, candidate.zone) {
                            continue;
                        }
                        match zones.assign_worker(candidate.zone) {
                            Ok(()) => {}
                            Err(ZoneError::CapacityExceeded { .. }) => continue,
                            Err(e) => return Err(e.into()),
                        }
                        hires[candidate.zone.index()] += 1;

                        resident.work_zone    = Some(candidate.zone);
                        resident.state        = EmploymentState::Commuting;
                        resident.commute_cost = candidate.route.total_cost;
                        resident.route        = candidate.route.links;

                        log::trace!("{tick}: {} hired in {}", resident.id, candidate.zone);
                        changes.push(StateChange {
                            resident:      resident.id,
                            old_work_zone: None,
                            new_work_zone: Some(candidate.zone),
                            state:         EmploymentState::Commuting,
                        });
                        break;
                    }
                }

                Decision::Quit => {
                    let Some(work) = resident.work_zone else {
                        return Err(PopulationError::InvariantViolation(format!(
                            "{} quit without a job",
                            resident.id
                        )));
                    };
                    if self.max_quits_per_tick.is_some_and(|limit| quits >= limit) {
                        log::trace!("{tick}: {} quit deferred", resident.id);
                        continue;
                    }
                    zones.release_worker(work)?;
                    quits += 1;

                    resident.work_zone    = None;
                    resident.state        = EmploymentState::Unemployed;
                    resident.commute_cost = 0.0;
                    resident.route.clear();

                    log::trace!("{tick}: {} quit {}", resident.id, work);
                    changes.push(StateChange {
                        resident:      resident.id,
                        old_work_zone: Some(work),
                        new_work_zone: None,
                        state:         EmploymentState::Unemployed,
                    });
                }
            }
        }

        for resident in residents.iter_mut().filter(|r| r.state.has_job()) {
            resident.wealth += resident.income;
        }

        Ok(changes)
    }

    fn may_hire(&self, hires: &[u32], zone: ZoneId) -> bool {
        match self.max_hires_per_zone_per_tick {
            None        => true,
            Some(limit) => hires.get(zone.index()).is_some_and(|&n| n < limit),
        }
    }
}

/// Recount zone occupancy from the residents and compare with the zone
/// counters.  Any mismatch or capacity breach is an invariant violation.
pub fn verify(zones: &ZoneMap, residents: &[Resident]) -> PopulationResult<()> {
    let mut living  = vec![0u32; zones.zone_count()];
    let mut working = vec![0u32; zones.zone_count()];

    for (i, r) in residents.iter().enumerate() {
        if r.id.index() != i {
            return Err(PopulationError::InvariantViolation(format!(
                "resident at index {i} has id {}",
                r.id
            )));
        }
        let home = living.get_mut(r.home_zone.index()).ok_or_else(|| {
            PopulationError::InvariantViolation(format!("{} lives in unknown {}", r.id, r.home_zone))
        })?;
        *home += 1;

        let expected_state = match r.work_zone {
            None                        => EmploymentState::Unemployed,
            Some(w) if w == r.home_zone => EmploymentState::Employed,
            Some(_)                     => EmploymentState::Commuting,
        };
        if r.state != expected_state {
            return Err(PopulationError::InvariantViolation(format!(
                "{} is {} but should be {expected_state}",
                r.id, r.state
            )));
        }
        if let Some(work) = r.work_zone {
            let slot = working.get_mut(work.index()).ok_or_else(|| {
                PopulationError::InvariantViolation(format!("{} works in unknown {work}", r.id))
            })?;
            *slot += 1;
        }
    }

    for zone in zones.zones() {
        let i = zone.id.index();
        if zone.residents() != living[i] || zone.workers() != working[i] {
            return Err(PopulationError::InvariantViolation(format!(
                "{} counters ({} residents, {} workers) disagree with population ({}, {})",
                zone.id,
                zone.residents(),
                zone.workers(),
                living[i],
                working[i]
            )));
        }
        if zone.residents() > zone.capacity || zone.workers() > zone.capacity {
            return Err(PopulationError::InvariantViolation(format!(
                "{} over capacity {}",
                zone.id, zone.capacity
            )));
        }
    }
    Ok(())
}
