//! The `EmploymentRule` trait: the decision extension point.

use crate::{Candidate, DecisionContext, Decision, EmploymentState, Resident};

/// Pluggable employment behavior.
///
/// # Thread safety
///
/// The population model may call `decide` for many residents in parallel via
/// Rayon, so implementations must be `Send + Sync`.  A rule must be a pure
/// function of the resident and the context: anything else breaks
/// reproducibility across worker counts.
pub trait EmploymentRule: Send + Sync {
    fn decide(&self, resident: &Resident, ctx: &DecisionContext<'_>) -> Decision;
}

/// The default rule.
///
/// - An unemployed resident seeks work in any zone other than its home zone
///   that has a free worker slot and a travel cost strictly below
///   `commute_threshold`.  Candidates are ranked by (cost, zone id).
/// - A commuter follows the current cheapest route to work.  If
///   `quit_threshold` is set and that route costs more, the commuter quits.
/// - A resident employed in its home zone never changes.
///
/// Unreachable zones cost `f64::INFINITY` and are never candidates.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdRule {
    pub commute_threshold: f64,
    pub quit_threshold:    Option<f64>,
}

impl ThresholdRule {
    pub fn new(commute_threshold: f64) -> Self {
        Self { commute_threshold, quit_threshold: None }
    }

    pub fn with_quit_threshold(mut self, quit_threshold: f64) -> Self {
        self.quit_threshold = Some(quit_threshold);
        self
    }

    fn seek(&self, resident: &Resident, ctx: &DecisionContext<'_>) -> Decision {
        let home = resident.home_zone;
        let mut candidates: Vec<Candidate> = ctx
            .zones
            .zones()
            .iter()
            .filter(|z| z.id != home && z.has_vacancy())
            .filter(|z| ctx.costs.travel_cost(home, z.id) < self.commute_threshold)
            .filter_map(|z| {
                let route = ctx.costs.cheapest_route(ctx.zones, home, z.id).ok()?;
                Some(Candidate { zone: z.id, route })
            })
            .collect();

        if candidates.is_empty() {
            return Decision::Stay;
        }
        candidates.sort_by(|a, b| {
            a.route
                .total_cost
                .total_cmp(&b.route.total_cost)
                .then_with(|| a.zone.cmp(&b.zone))
        });
        Decision::Seek(candidates)
    }

    fn commute(&self, resident: &Resident, ctx: &DecisionContext<'_>) -> Decision {
        let Some(work) = resident.work_zone else {
            return Decision::Stay;
        };
        let Ok(route) = ctx.costs.cheapest_route(ctx.zones, resident.home_zone, work) else {
            // Unreachable: keep the job and the last known route.
            return Decision::Stay;
        };
        if self.quit_threshold.is_some_and(|q| route.total_cost > q) {
            return Decision::Quit;
        }
        if route.links == resident.route && route.total_cost == resident.commute_cost {
            Decision::Stay
        } else {
            Decision::Reroute(route)
        }
    }
}

impl EmploymentRule for ThresholdRule {
    fn decide(&self, resident: &Resident, ctx: &DecisionContext<'_>) -> Decision {
        match resident.state {
            EmploymentState::Unemployed => self.seek(resident, ctx),
            EmploymentState::Commuting  => self.commute(resident, ctx),
            EmploymentState::Employed   => Decision::Stay,
        }
    }
}
