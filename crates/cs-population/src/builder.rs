//! Validated construction of the initial population.

use cs_core::{ConfigError, ConfigResult, ResidentId, ZoneId};
use cs_transport::TickCosts;
use cs_zone::ZoneMap;

use crate::{EmploymentState, Resident};

/// Configuration for one resident, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ResidentSpec {
    pub home_zone: ZoneId,
    pub work_zone: Option<ZoneId>,
    pub income:    f64,
}

impl ResidentSpec {
    pub fn new(home_zone: ZoneId, income: f64) -> Self {
        Self { home_zone, work_zone: None, income }
    }

    pub fn working_in(mut self, work_zone: ZoneId) -> Self {
        self.work_zone = Some(work_zone);
        self
    }
}

/// Create residents from `specs`, registering each one with its home zone
/// and, when given, its work zone.
///
/// IDs are assigned sequentially in `specs` order.  A configured work zone
/// equal to the home zone yields an `Employed` resident; any other work zone
/// yields a `Commuting` resident routed with `costs` (normally free-flow).
///
/// Fails with a [`ConfigError`] naming `residents[i].<field>` when a zone is
/// missing or full, the income is negative or not finite, or the work zone
/// cannot be reached from home.
pub fn place_residents(
    zones: &mut ZoneMap,
    costs: &TickCosts,
    specs: &[ResidentSpec],
) -> ConfigResult<Vec<Resident>> {
    let mut residents = Vec::with_capacity(specs.len());

    for (i, spec) in specs.iter().enumerate() {
        let field = |name: &str| format!("residents[{i}].{name}");

        let id = ResidentId::try_from(i)
            .map_err(|_| ConfigError::new(format!("residents[{i}]"), "too many residents"))?;
        if !spec.income.is_finite() || spec.income < 0.0 {
            return Err(ConfigError::new(field("income"), "must be a finite, non-negative number"));
        }
        zones
            .assign_resident(spec.home_zone)
            .map_err(|e| ConfigError::new(field("home_zone"), e.to_string()))?;

        let mut resident = Resident::new(id, spec.home_zone, spec.income);

        if let Some(work) = spec.work_zone {
            if work == spec.home_zone {
                resident.state = EmploymentState::Employed;
            } else {
                let route = costs
                    .cheapest_route(zones, spec.home_zone, work)
                    .map_err(|e| ConfigError::new(field("work_zone"), e.to_string()))?;
                resident.state        = EmploymentState::Commuting;
                resident.commute_cost = route.total_cost;
                resident.route        = route.links;
            }
            zones
                .assign_worker(work)
                .map_err(|e| ConfigError::new(field("work_zone"), e.to_string()))?;
            resident.work_zone = Some(work);
        }

        residents.push(resident);
    }

    log::debug!(
        "placed {} residents ({} with a configured job)",
        residents.len(),
        residents.iter().filter(|r| r.state.has_job()).count()
    );
    Ok(residents)
}
