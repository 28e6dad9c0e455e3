//! Unit tests for cs-population.

use cs_core::{Tick, ZoneId};
use cs_transport::{LinearCongestion, TransportModel};
use cs_zone::{ZoneMap, ZoneMapBuilder};

use crate::{
    place_residents, EmploymentRule, PopulationModel, PopulationResult, Resident, ResidentSpec,
    StateChange,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Zone A (capacity 10) and zone B (capacity 5) joined by A→B at cost 1.
fn two_zones() -> (ZoneMap, ZoneId, ZoneId) {
    let mut b = ZoneMapBuilder::new();
    let a  = b.add_named_zone("A", 10).unwrap();
    let bz = b.add_named_zone("B", 5).unwrap();
    b.add_link(a, bz, 1.0).unwrap();
    (b.build(), a, bz)
}

fn populate(map: &mut ZoneMap, specs: &[ResidentSpec]) -> Vec<Resident> {
    let free = TransportModel::new(LinearCongestion).free_flow(map);
    place_residents(map, &free, specs).unwrap()
}

/// One full tick: loads from the current routes, cost recompute, update.
fn step<R: EmploymentRule>(
    model:     &PopulationModel<R>,
    tick:      u64,
    map:       &mut ZoneMap,
    residents: &mut [Resident],
) -> PopulationResult<Vec<StateChange>> {
    let loads = PopulationModel::<R>::link_loads(residents, map.link_count());
    let costs = TransportModel::new(LinearCongestion).recompute(Tick(tick), map, &loads);
    model.update_all(Tick(tick), map, residents, &costs)
}

// ── Rule ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rule {
    use cs_core::{ResidentId, Tick};
    use cs_transport::{LinearCongestion, TransportModel};

    use super::*;
    use crate::{Decision, DecisionContext, EmploymentState, ThresholdRule};

    #[test]
    fn unemployed_seeks_cheaper_zones_only() {
        let (map, a, b) = two_zones();
        let costs = TransportModel::new(LinearCongestion).free_flow(&map);
        let ctx = DecisionContext::new(Tick(1), &map, &costs);
        let r = Resident::new(ResidentId(0), a, 10.0);

        match ThresholdRule::new(2.0).decide(&r, &ctx) {
            Decision::Seek(c) => {
                assert_eq!(c.len(), 1);
                assert_eq!(c[0].zone, b);
                assert_eq!(c[0].route.total_cost, 1.0);
            }
            other => panic!("expected Seek, got {other:?}"),
        }
        // Strictly below: cost 1 at threshold 1 is rejected.
        assert_eq!(ThresholdRule::new(1.0).decide(&r, &ctx), Decision::Stay);
    }

    #[test]
    fn home_employed_never_moves() {
        let (map, a, _) = two_zones();
        let costs = TransportModel::new(LinearCongestion).free_flow(&map);
        let ctx = DecisionContext::new(Tick(1), &map, &costs);
        let mut r = Resident::new(ResidentId(0), a, 10.0);
        r.state     = EmploymentState::Employed;
        r.work_zone = Some(a);
        assert_eq!(ThresholdRule::new(100.0).decide(&r, &ctx), Decision::Stay);
    }

    #[test]
    fn candidates_ranked_by_cost_then_zone() {
        let mut b = ZoneMapBuilder::new();
        let home = b.add_zone(10).unwrap();
        let z1 = b.add_zone(5).unwrap();
        let z2 = b.add_zone(5).unwrap();
        let z3 = b.add_zone(5).unwrap();
        b.add_link(home, z3, 1.0).unwrap();
        b.add_link(home, z2, 0.5).unwrap();
        b.add_link(home, z1, 1.0).unwrap();
        let map = b.build();
        let costs = TransportModel::new(LinearCongestion).free_flow(&map);
        let ctx = DecisionContext::new(Tick(1), &map, &costs);

        let r = Resident::new(ResidentId(0), home, 1.0);
        let Decision::Seek(c) = ThresholdRule::new(5.0).decide(&r, &ctx) else {
            panic!("expected Seek");
        };
        let order: Vec<ZoneId> = c.iter().map(|c| c.zone).collect();
        assert_eq!(order, vec![z2, z1, z3]);
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod placement {
    use super::*;
    use crate::EmploymentState;

    #[test]
    fn configured_jobs_set_state() {
        let (mut map, a, b) = two_zones();
        let residents = populate(
            &mut map,
            &[
                ResidentSpec::new(a, 1.0),
                ResidentSpec::new(a, 2.0).working_in(a),
                ResidentSpec::new(a, 3.0).working_in(b),
            ],
        );
        assert_eq!(residents[0].state, EmploymentState::Unemployed);
        assert_eq!(residents[1].state, EmploymentState::Employed);
        assert_eq!(residents[2].state, EmploymentState::Commuting);
        assert_eq!(residents[2].commute_cost, 1.0);
        assert_eq!(map.zone_by_id(a).unwrap().residents(), 3);
        assert_eq!(map.zone_by_id(a).unwrap().workers(), 1);
        assert_eq!(map.zone_by_id(b).unwrap().workers(), 1);
        crate::verify(&map, &residents).unwrap();
    }

    #[test]
    fn errors_name_the_field() {
        let (mut map, a, _) = two_zones();
        let free = TransportModel::new(LinearCongestion).free_flow(&map);

        let err = place_residents(&mut map, &free, &[ResidentSpec::new(a, -1.0)]).unwrap_err();
        assert_eq!(err.field, "residents[0].income");

        let err = place_residents(&mut map, &free, &[ResidentSpec::new(ZoneId(9), 1.0)]).unwrap_err();
        assert_eq!(err.field, "residents[0].home_zone");
    }

    #[test]
    fn unreachable_work_zone_rejected() {
        let (mut map, a, b) = two_zones();
        let free = TransportModel::new(LinearCongestion).free_flow(&map);
        let specs = [ResidentSpec::new(a, 1.0), ResidentSpec::new(b, 1.0).working_in(a)];
        let err = place_residents(&mut map, &free, &specs).unwrap_err();
        assert_eq!(err.field, "residents[1].work_zone");
    }

    #[test]
    fn home_capacity_enforced() {
        let (mut map, _, b) = two_zones();
        let free = TransportModel::new(LinearCongestion).free_flow(&map);
        let specs: Vec<_> = (0..6).map(|_| ResidentSpec::new(b, 1.0)).collect();
        let err = place_residents(&mut map, &free, &specs).unwrap_err();
        assert_eq!(err.field, "residents[5].home_zone");
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod update {
    use cs_core::ResidentId;

    use super::*;
    use crate::{EmploymentState, ThresholdRule};

    fn eight_in_a() -> (ZoneMap, ZoneId, ZoneId, Vec<Resident>) {
        let (mut map, a, b) = two_zones();
        let specs: Vec<_> = (0..8).map(|i| ResidentSpec::new(a, 100.0 + i as f64)).collect();
        let residents = populate(&mut map, &specs);
        (map, a, b, residents)
    }

    #[test]
    fn lowest_ids_fill_the_zone() {
        let (mut map, _, b, mut residents) = eight_in_a();
        let model = PopulationModel::new(ThresholdRule::new(2.0));

        let changes = step(&model, 1, &mut map, &mut residents).unwrap();
        assert_eq!(changes.len(), 5);
        for (i, c) in changes.iter().enumerate() {
            assert_eq!(c.resident, ResidentId(i as u32));
            assert_eq!(c.old_work_zone, None);
            assert_eq!(c.new_work_zone, Some(b));
            assert_eq!(c.state, EmploymentState::Commuting);
        }
        for r in &residents[5..] {
            assert_eq!(r.state, EmploymentState::Unemployed);
        }
        assert_eq!(map.zone_by_id(b).unwrap().workers(), 5);
        assert!(!map.zone_by_id(b).unwrap().has_vacancy());
    }

    #[test]
    fn stable_after_filling() {
        let (mut map, _, b, mut residents) = eight_in_a();
        let model = PopulationModel::new(ThresholdRule::new(2.0));
        step(&model, 1, &mut map, &mut residents).unwrap();

        for t in 2..6 {
            let changes = step(&model, t, &mut map, &mut residents).unwrap();
            assert!(changes.is_empty(), "tick {t} churned: {changes:?}");
        }
        // Five commuters on a capacity-100 link: 1 × 1.05.
        assert!((residents[0].commute_cost - 1.05).abs() < 1e-12);
        assert_eq!(map.zone_by_id(b).unwrap().workers(), 5);
    }

    #[test]
    fn full_candidate_falls_through() {
        let mut bld = ZoneMapBuilder::new();
        let home = bld.add_zone(10).unwrap();
        let near = bld.add_zone(1).unwrap();
        let far  = bld.add_zone(5).unwrap();
        bld.add_link(home, near, 1.0).unwrap();
        bld.add_link(home, far, 1.5).unwrap();
        let mut map = bld.build();
        let mut residents = populate(&mut map, &[
            ResidentSpec::new(home, 1.0),
            ResidentSpec::new(home, 1.0),
            ResidentSpec::new(home, 1.0),
        ]);

        let model = PopulationModel::new(ThresholdRule::new(2.0));
        step(&model, 1, &mut map, &mut residents).unwrap();
        assert_eq!(residents[0].work_zone, Some(near));
        assert_eq!(residents[1].work_zone, Some(far));
        assert_eq!(residents[2].work_zone, Some(far));
        assert_eq!(residents[1].commute_cost, 1.5);
    }

    #[test]
    fn hire_limit_spreads_hiring_over_ticks() {
        let (mut map, _, b, mut residents) = eight_in_a();
        let model = PopulationModel::new(ThresholdRule::new(2.0)).with_hire_limit(2);

        assert_eq!(step(&model, 1, &mut map, &mut residents).unwrap().len(), 2);
        assert_eq!(step(&model, 2, &mut map, &mut residents).unwrap().len(), 2);
        assert_eq!(step(&model, 3, &mut map, &mut residents).unwrap().len(), 1);
        assert_eq!(step(&model, 4, &mut map, &mut residents).unwrap().len(), 0);
        assert_eq!(map.zone_by_id(b).unwrap().workers(), 5);
    }

    #[test]
    fn congested_commuters_quit() {
        let (mut map, _, b, mut residents) = eight_in_a();
        let model = PopulationModel::new(ThresholdRule::new(2.0).with_quit_threshold(1.02));

        step(&model, 1, &mut map, &mut residents).unwrap();
        // Load 5 raises the cost to 1.05, above the quit threshold.
        let changes = step(&model, 2, &mut map, &mut residents).unwrap();
        assert_eq!(changes.len(), 5);
        assert!(changes.iter().all(|c| c.old_work_zone == Some(b) && c.new_work_zone.is_none()));
        assert_eq!(map.zone_by_id(b).unwrap().workers(), 0);
        assert!(residents.iter().all(|r| r.route.is_empty()));
    }

    #[test]
    fn quit_limit_defers_excess_quits() {
        let (mut map, _, b, mut residents) = eight_in_a();
        let model = PopulationModel::new(ThresholdRule::new(2.0).with_quit_threshold(1.02))
            .with_quit_limit(2);

        step(&model, 1, &mut map, &mut residents).unwrap();
        let changes = step(&model, 2, &mut map, &mut residents).unwrap();
        let quitters: Vec<ResidentId> = changes.iter().map(|c| c.resident).collect();
        assert_eq!(quitters, vec![ResidentId(0), ResidentId(1)]);
        assert_eq!(map.zone_by_id(b).unwrap().workers(), 3);
        for r in &residents[2..5] {
            assert_eq!(r.state, EmploymentState::Commuting);
            assert!(!r.route.is_empty());
        }
        crate::verify(&map, &residents).unwrap();
    }

    #[test]
    fn payroll_credits_job_holders_each_tick() {
        let (mut map, _, _, mut residents) = eight_in_a();
        let model = PopulationModel::new(ThresholdRule::new(2.0));

        step(&model, 1, &mut map, &mut residents).unwrap();
        assert_eq!(residents[0].wealth, 100.0);
        assert_eq!(residents[4].wealth, 104.0);
        assert_eq!(residents[5].wealth, 0.0);

        step(&model, 2, &mut map, &mut residents).unwrap();
        assert_eq!(residents[0].wealth, 200.0);
        assert_eq!(residents[7].wealth, 0.0);
    }

    #[test]
    fn quitters_are_not_paid() {
        let (mut map, _, _, mut residents) = eight_in_a();
        let model = PopulationModel::new(ThresholdRule::new(2.0).with_quit_threshold(1.02));

        step(&model, 1, &mut map, &mut residents).unwrap();
        step(&model, 2, &mut map, &mut residents).unwrap();
        assert_eq!(residents[0].wealth, 100.0);
    }

    #[test]
    fn unreachable_zone_never_hires() {
        let mut bld = ZoneMapBuilder::new();
        let a = bld.add_zone(10).unwrap();
        let b = bld.add_zone(10).unwrap();
        bld.add_link(b, a, 1.0).unwrap();
        let mut map = bld.build();
        let mut residents = populate(&mut map, &[ResidentSpec::new(a, 1.0)]);

        let model = PopulationModel::new(ThresholdRule::new(f64::MAX));
        assert!(step(&model, 1, &mut map, &mut residents).unwrap().is_empty());
        assert_eq!(residents[0].state, EmploymentState::Unemployed);
    }

    #[test]
    fn verify_detects_counter_drift() {
        let (mut map, _, b, mut residents) = eight_in_a();
        // A job the zone counters never saw.
        residents[0].work_zone = Some(b);
        residents[0].state     = EmploymentState::Commuting;
        let err = crate::verify(&map, &residents).unwrap_err();
        assert!(matches!(err, crate::PopulationError::InvariantViolation(_)));

        map.assign_worker(b).unwrap();
        crate::verify(&map, &residents).unwrap();
    }
}
