//! Unit tests for cs-transport.
//!
//! All tests use hand-built zone maps.

#[cfg(test)]
mod helpers {
    use cs_core::ZoneId;
    use cs_zone::{ZoneMap, ZoneMapBuilder};

    /// Five zones:
    ///
    ///   0 → 1 → 2 → 4   (1 + 1 + 1 = 3)
    ///   0 → 3 → 4       (5 + 1     = 6)
    ///
    /// Every link has capacity 10.  Zone 4 has no outgoing link.
    pub fn grid() -> (ZoneMap, [ZoneId; 5]) {
        let mut b = ZoneMapBuilder::new().default_link_capacity(10);
        let z: Vec<ZoneId> = (0..5).map(|_| b.add_zone(10).unwrap()).collect();
        b.add_link(z[0], z[1], 1.0).unwrap(); // L0
        b.add_link(z[1], z[2], 1.0).unwrap(); // L1
        b.add_link(z[2], z[4], 1.0).unwrap(); // L2
        b.add_link(z[0], z[3], 5.0).unwrap(); // L3
        b.add_link(z[3], z[4], 1.0).unwrap(); // L4
        (b.build(), [z[0], z[1], z[2], z[3], z[4]])
    }
}

// ── Congestion curves ─────────────────────────────────────────────────────────

#[cfg(test)]
mod congestion {
    use crate::{BprCongestion, CongestionKind, CongestionModel, LinearCongestion};

    #[test]
    fn linear_matches_formula() {
        let m = LinearCongestion;
        assert_eq!(m.effective_cost(2.0, 0, 10), 2.0);
        assert_eq!(m.effective_cost(2.0, 5, 10), 3.0);
        assert_eq!(m.effective_cost(2.0, 10, 10), 4.0);
    }

    #[test]
    fn curves_are_monotone_in_load() {
        let curves = [
            CongestionKind::Linear(LinearCongestion),
            CongestionKind::Bpr(BprCongestion::default()),
        ];
        for curve in curves {
            let mut last = curve.effective_cost(1.5, 0, 20);
            assert_eq!(last, 1.5, "{curve:?}: zero load is free flow");
            for load in 1..100 {
                let c = curve.effective_cost(1.5, load, 20);
                assert!(c >= last, "{curve:?} decreased at load {load}");
                last = c;
            }
        }
    }

    #[test]
    fn empty_link_costs_base_for_every_curve() {
        let flat = BprCongestion { alpha: 0.15, beta: 0.0 };
        assert_eq!(flat.effective_cost(1.0, 0, 10), 1.0);
        assert!((flat.effective_cost(1.0, 1, 10) - 1.15).abs() < 1e-12);
        assert_eq!(BprCongestion::default().effective_cost(2.5, 0, 10), 2.5);
        assert_eq!(LinearCongestion.effective_cost(2.5, 0, 10), 2.5);
    }

    #[test]
    fn bpr_near_free_flow_below_capacity() {
        let m = BprCongestion::default();
        let half = m.effective_cost(10.0, 5, 10);
        assert!((half - 10.0 * (1.0 + 0.15 * 0.0625)).abs() < 1e-9);
    }
}

// ── Loads ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod load {
    use cs_core::LinkId;

    use crate::LinkLoads;

    #[test]
    fn counts_links_across_routes() {
        let a = [LinkId(0), LinkId(1)];
        let b = [LinkId(1)];
        let c = [LinkId(9)]; // out of range: ignored
        let loads = LinkLoads::from_routes(3, [&a[..], &b[..], &c[..]]);
        assert_eq!(loads.as_slice(), &[1, 2, 0]);
        assert_eq!(loads.total(), 3);
        assert_eq!(loads.get(LinkId(42)), 0);
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use cs_core::{LinkId, Tick, ZoneId};

    use crate::{LinearCongestion, LinkLoads, TransportError, TransportModel};

    #[test]
    fn cheapest_multi_hop_route() {
        let (map, [z0, _, _, _, z4]) = super::helpers::grid();
        let costs = TransportModel::new(LinearCongestion).free_flow(&map);
        let route = costs.cheapest_route(&map, z0, z4).unwrap();
        assert_eq!(route.links, vec![LinkId(0), LinkId(1), LinkId(2)]);
        assert_eq!(route.total_cost, 3.0);
        assert_eq!(costs.travel_cost(z0, z4), 3.0);
    }

    #[test]
    fn same_zone_is_trivial() {
        let (map, [_, z1, _, _, _]) = super::helpers::grid();
        let costs = TransportModel::new(LinearCongestion).free_flow(&map);
        let route = costs.cheapest_route(&map, z1, z1).unwrap();
        assert!(route.is_trivial());
        assert_eq!(costs.travel_cost(z1, z1), 0.0);
    }

    #[test]
    fn unreachable_is_infinite() {
        let (map, [z0, _, _, _, z4]) = super::helpers::grid();
        let costs = TransportModel::new(LinearCongestion).free_flow(&map);
        assert_eq!(costs.travel_cost(z4, z0), f64::INFINITY);
        assert!(!costs.reachable(z4, z0));
        assert_eq!(
            costs.cheapest_route(&map, z4, z0).unwrap_err(),
            TransportError::Unreachable { from: z4, to: z0 }
        );
    }

    #[test]
    fn unknown_zone_reported() {
        let (map, [z0, _, _, _, _]) = super::helpers::grid();
        let costs = TransportModel::new(LinearCongestion).free_flow(&map);
        assert_eq!(
            costs.cheapest_route(&map, z0, ZoneId(77)).unwrap_err(),
            TransportError::ZoneNotFound(ZoneId(77))
        );
        assert_eq!(costs.travel_cost(ZoneId(77), z0), f64::INFINITY);
    }

    #[test]
    fn congestion_diverts_route() {
        let (map, [z0, _, _, _, z4]) = super::helpers::grid();
        let model = TransportModel::new(LinearCongestion);

        // 40 commuters on L1 (capacity 10): 1 × (1 + 4) = 5, so the upper
        // path costs 1 + 5 + 1 = 7 > 6 via zone 3.
        let busy = [LinkId(1)];
        let routes: Vec<&[LinkId]> = std::iter::repeat_n(&busy[..], 40).collect();
        let loads = LinkLoads::from_routes(map.link_count(), routes);
        let costs = model.recompute(Tick(3), &map, &loads);

        assert_eq!(costs.tick(), Tick(3));
        assert_eq!(costs.link_load(LinkId(1)), 40);
        assert_eq!(costs.link_cost(LinkId(1)), 5.0);
        assert_eq!(costs.congestion_pct(LinkId(1)), 400.0);
        let route = costs.cheapest_route(&map, z0, z4).unwrap();
        assert_eq!(route.links, vec![LinkId(3), LinkId(4)]);
        assert_eq!(route.total_cost, 6.0);
    }

    #[test]
    fn equal_cost_paths_resolve_deterministically() {
        use cs_zone::ZoneMapBuilder;

        // Two equal-cost paths 0→1→3 and 0→2→3.
        let mut b = ZoneMapBuilder::new();
        let z: Vec<ZoneId> = (0..4).map(|_| b.add_zone(5).unwrap()).collect();
        b.add_link(z[0], z[2], 1.0).unwrap(); // L0
        b.add_link(z[0], z[1], 1.0).unwrap(); // L1
        b.add_link(z[2], z[3], 1.0).unwrap(); // L2
        b.add_link(z[1], z[3], 1.0).unwrap(); // L3
        let map = b.build();

        let model = TransportModel::new(LinearCongestion);
        let first = model.free_flow(&map).cheapest_route(&map, z[0], z[3]).unwrap();
        for _ in 0..10 {
            let again = model.free_flow(&map).cheapest_route(&map, z[0], z[3]).unwrap();
            assert_eq!(again, first);
        }
        // Zone 1 is settled before zone 2, so its outgoing link reaches
        // zone 3 first.
        assert_eq!(first.links, vec![LinkId(1), LinkId(3)]);
    }

    #[test]
    fn average_congestion() {
        let (map, _) = super::helpers::grid();
        let model = TransportModel::new(LinearCongestion);
        let mut loads = LinkLoads::empty(map.link_count());
        for _ in 0..5 {
            loads.add(LinkId(0));
        }
        let costs = model.recompute(Tick(1), &map, &loads);
        // One link at 50 %, four idle.
        assert!((costs.average_congestion() - 10.0).abs() < 1e-9);
    }
}
