//! Unit tests for cs-zone.

#[cfg(test)]
mod helpers {
    use cs_core::ZoneId;

    use crate::{ZoneMap, ZoneMapBuilder};

    /// Four zones in a diamond:
    ///
    ///   0 → 1 → 3
    ///   0 → 2 → 3
    ///   3 → 0
    pub fn diamond() -> (ZoneMap, [ZoneId; 4]) {
        let mut b = ZoneMapBuilder::new();
        let z0 = b.add_named_zone("north", 10).unwrap();
        let z1 = b.add_named_zone("east", 5).unwrap();
        let z2 = b.add_named_zone("west", 5).unwrap();
        let z3 = b.add_named_zone("south", 8).unwrap();
        b.add_link(z0, z1, 1.0).unwrap();
        b.add_link(z1, z3, 1.0).unwrap();
        b.add_link(z0, z2, 2.0).unwrap();
        b.add_link(z2, z3, 0.5).unwrap();
        b.add_link(z3, z0, 3.0).unwrap();
        (b.build(), [z0, z1, z2, z3])
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cs_core::ZoneId;

    use crate::ZoneMapBuilder;

    #[test]
    fn empty_build() {
        let map = ZoneMapBuilder::new().build();
        assert_eq!(map.zone_count(), 0);
        assert_eq!(map.link_count(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn zone_ids_are_sequential() {
        let mut b = ZoneMapBuilder::new();
        assert_eq!(b.add_zone(1).unwrap(), ZoneId(0));
        assert_eq!(b.add_zone(1).unwrap(), ZoneId(1));
        let map = b.build();
        assert_eq!(map.zone_by_id(ZoneId(1)).unwrap().name, "zone-1");
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut b = ZoneMapBuilder::new();
        b.add_zone(3).unwrap();
        let err = b.add_zone(0).unwrap_err();
        assert_eq!(err.field, "zones[1].capacity");
    }

    #[test]
    fn link_to_missing_zone_rejected() {
        let mut b = ZoneMapBuilder::new();
        let a = b.add_zone(3).unwrap();
        let err = b.add_link(a, ZoneId(7), 1.0).unwrap_err();
        assert_eq!(err.field, "links[0].destination");

        let err = b.add_link(ZoneId(9), a, 1.0).unwrap_err();
        assert_eq!(err.field, "links[0].origin");
    }

    #[test]
    fn bad_cost_rejected() {
        let mut b = ZoneMapBuilder::new();
        let a = b.add_zone(3).unwrap();
        let c = b.add_zone(3).unwrap();
        assert_eq!(b.add_link(a, c, -1.0).unwrap_err().field, "links[0].base_cost");
        assert_eq!(b.add_link(a, c, f64::NAN).unwrap_err().field, "links[0].base_cost");
        assert_eq!(b.add_link(a, c, f64::INFINITY).unwrap_err().field, "links[0].base_cost");
    }

    #[test]
    fn self_loop_and_zero_capacity_link_rejected() {
        let mut b = ZoneMapBuilder::new();
        let a = b.add_zone(3).unwrap();
        let c = b.add_zone(3).unwrap();
        assert!(b.add_link(a, a, 1.0).is_err());
        assert_eq!(
            b.add_link_with_capacity(a, c, 1.0, 0).unwrap_err().field,
            "links[0].capacity"
        );
    }

    #[test]
    fn default_link_capacity_applied() {
        let mut b = ZoneMapBuilder::new().default_link_capacity(7);
        let a = b.add_zone(3).unwrap();
        let c = b.add_zone(3).unwrap();
        let id = b.add_link(a, c, 1.0).unwrap();
        let map = b.build();
        assert_eq!(map.link_by_id(id).unwrap().capacity, 7);
    }

    #[test]
    fn two_way_adds_both_directions() {
        let mut b = ZoneMapBuilder::new();
        let a = b.add_zone(3).unwrap();
        let c = b.add_zone(3).unwrap();
        b.add_two_way(a, c, 2.0).unwrap();
        let map = b.build();
        assert_eq!(map.out_degree(a), 1);
        assert_eq!(map.out_degree(c), 1);
    }
}

// ── Adjacency ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod adjacency {
    use cs_core::{LinkId, ZoneId};

    use crate::ZoneError;

    #[test]
    fn csr_out_links() {
        let (map, [z0, z1, z2, z3]) = super::helpers::diamond();
        assert_eq!(map.out_degree(z0), 2);
        assert_eq!(map.out_degree(z1), 1);
        assert_eq!(map.out_degree(z2), 1);
        assert_eq!(map.out_degree(z3), 1);

        let from_z0: Vec<LinkId> = map.out_links(z0).map(|l| l.id).collect();
        assert_eq!(from_z0, vec![LinkId(0), LinkId(2)], "ascending link id");
        assert!(map.out_links(z0).all(|l| l.origin == z0));
    }

    #[test]
    fn link_ids_follow_insertion_order() {
        let (map, [_, _, z2, z3]) = super::helpers::diamond();
        let link = map.link_by_id(LinkId(3)).unwrap();
        assert_eq!((link.origin, link.destination), (z2, z3));
    }

    #[test]
    fn unknown_zone_has_no_links() {
        let (map, _) = super::helpers::diamond();
        assert_eq!(map.out_links(ZoneId(99)).count(), 0);
        assert_eq!(map.out_degree(ZoneId(99)), 0);
        assert_eq!(map.zone_by_id(ZoneId(99)).unwrap_err(), ZoneError::NotFound(ZoneId(99)));
    }

    #[test]
    fn linked_zone_count_counts_both_directions() {
        let (map, [z0, _, _, z3]) = super::helpers::diamond();
        assert_eq!(map.linked_zone_count(z0), 3); // 0→1, 0→2, 3→0
        assert_eq!(map.linked_zone_count(z3), 3); // 1→3, 2→3, 3→0
    }

    #[test]
    fn lookup_by_name() {
        let (map, [_, _, z2, _]) = super::helpers::diamond();
        assert_eq!(map.zone_by_name("west").map(|z| z.id), Some(z2));
        assert!(map.zone_by_name("nowhere").is_none());
    }
}

// ── Counters ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod counters {
    use crate::ZoneError;

    #[test]
    fn worker_capacity_enforced() {
        let (mut map, [_, z1, _, _]) = super::helpers::diamond();
        for _ in 0..5 {
            map.assign_worker(z1).unwrap();
        }
        assert_eq!(map.zone_by_id(z1).unwrap().workers(), 5);
        assert!(!map.zone_by_id(z1).unwrap().has_vacancy());

        let err = map.assign_worker(z1).unwrap_err();
        assert!(matches!(err, ZoneError::CapacityExceeded { capacity: 5, .. }));
        assert_eq!(map.zone_by_id(z1).unwrap().workers(), 5, "rejected write leaves counter alone");
    }

    #[test]
    fn release_frees_slot() {
        let (mut map, [_, z1, _, _]) = super::helpers::diamond();
        map.assign_worker(z1).unwrap();
        map.release_worker(z1).unwrap();
        assert_eq!(map.zone_by_id(z1).unwrap().vacancy(), 5);
    }

    #[test]
    fn underflow_rejected() {
        let (mut map, [z0, _, _, _]) = super::helpers::diamond();
        assert!(matches!(
            map.release_worker(z0),
            Err(ZoneError::CounterUnderflow { counter: "workers", .. })
        ));
    }

    #[test]
    fn resident_capacity_enforced() {
        let (mut map, [_, _, z2, _]) = super::helpers::diamond();
        for _ in 0..5 {
            map.assign_resident(z2).unwrap();
        }
        assert!(map.assign_resident(z2).is_err());
        assert_eq!(map.zone_by_id(z2).unwrap().residents(), 5);
        assert_eq!(map.zone_by_id(z2).unwrap().workers(), 0, "counters are independent");
    }

    #[test]
    fn occupation_pct() {
        let (mut map, [z0, _, _, _]) = super::helpers::diamond();
        map.assign_worker(z0).unwrap();
        map.assign_worker(z0).unwrap();
        assert!((map.zone_by_id(z0).unwrap().occupation_pct() - 20.0).abs() < 1e-9);
    }
}
