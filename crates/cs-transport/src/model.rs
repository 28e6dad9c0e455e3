//! `TransportModel` and the per-tick cost table it produces.

use cs_core::{LinkId, Tick, ZoneId};
use cs_zone::ZoneMap;

use crate::router::{dijkstra, PathTree};
use crate::{CongestionModel, LinkLoads, Route, TransportError, TransportResult};

// ── TransportModel ────────────────────────────────────────────────────────────

/// Turns link loads into congested costs and shortest routes.
///
/// The model itself is stateless apart from its congestion curve; each call
/// to [`recompute`](Self::recompute) yields a fresh [`TickCosts`].
#[derive(Clone, Debug, Default)]
pub struct TransportModel<C: CongestionModel> {
    pub congestion: C,
}

impl<C: CongestionModel> TransportModel<C> {
    pub fn new(congestion: C) -> Self {
        Self { congestion }
    }

    /// Compute every link's effective cost from `loads`, then grow one
    /// shortest-path tree per origin zone.
    pub fn recompute(&self, tick: Tick, map: &ZoneMap, loads: &LinkLoads) -> TickCosts {
        let mut link_costs     = Vec::with_capacity(map.link_count());
        let mut link_loads     = Vec::with_capacity(map.link_count());
        let mut congestion_pct = Vec::with_capacity(map.link_count());

        for link in map.links() {
            let load = loads.get(link.id);
            link_costs.push(self.congestion.effective_cost(link.base_cost, load, link.capacity));
            link_loads.push(load);
            congestion_pct.push(load as f64 * 100.0 / link.capacity as f64);
        }

        let trees = (0..map.zone_count())
            .map(|z| dijkstra(map, &link_costs, ZoneId(z as u32)))
            .collect();

        TickCosts { tick, link_costs, link_loads, congestion_pct, trees }
    }

    /// Costs for a network with no traffic.  Used for the configured state
    /// before the first tick runs.
    pub fn free_flow(&self, map: &ZoneMap) -> TickCosts {
        self.recompute(Tick::ZERO, map, &LinkLoads::empty(map.link_count()))
    }
}

// ── TickCosts ─────────────────────────────────────────────────────────────────

/// Immutable cost table for one tick.
///
/// Cheap queries only: all searching happened in
/// [`TransportModel::recompute`].  Queries take the `ZoneMap` the table was
/// built from so that routes can be reconstructed without copying topology.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickCosts {
    tick:           Tick,
    link_costs:     Vec<f64>,
    link_loads:     Vec<u32>,
    congestion_pct: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    trees:          Vec<PathTree>,
}

impl TickCosts {
    /// The tick these costs belong to.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Effective (congested) cost of `link`; infinite for unknown links.
    pub fn link_cost(&self, link: LinkId) -> f64 {
        self.link_costs.get(link.index()).copied().unwrap_or(f64::INFINITY)
    }

    pub fn link_load(&self, link: LinkId) -> u32 {
        self.link_loads.get(link.index()).copied().unwrap_or(0)
    }

    /// Load as a percentage of link capacity.
    pub fn congestion_pct(&self, link: LinkId) -> f64 {
        self.congestion_pct.get(link.index()).copied().unwrap_or(0.0)
    }

    /// Mean congestion percentage over all links; 0 for a network without
    /// links.
    pub fn average_congestion(&self) -> f64 {
        if self.congestion_pct.is_empty() {
            return 0.0;
        }
        self.congestion_pct.iter().sum::<f64>() / self.congestion_pct.len() as f64
    }

    /// Cost of the cheapest route, `0` from a zone to itself and
    /// `f64::INFINITY` when no route exists.
    pub fn travel_cost(&self, origin: ZoneId, destination: ZoneId) -> f64 {
        self.trees
            .get(origin.index())
            .and_then(|t| t.dist.get(destination.index()).copied())
            .unwrap_or(f64::INFINITY)
    }

    /// `true` when some route leads from `origin` to `destination`.
    pub fn reachable(&self, origin: ZoneId, destination: ZoneId) -> bool {
        self.travel_cost(origin, destination).is_finite()
    }

    /// The cheapest route from `origin` to `destination`.
    pub fn cheapest_route(
        &self,
        map:         &ZoneMap,
        origin:      ZoneId,
        destination: ZoneId,
    ) -> TransportResult<Route> {
        if !map.contains(origin) {
            return Err(TransportError::ZoneNotFound(origin));
        }
        if !map.contains(destination) {
            return Err(TransportError::ZoneNotFound(destination));
        }
        self.trees
            .get(origin.index())
            .and_then(|t| t.route_to(map, destination))
            .ok_or(TransportError::Unreachable { from: origin, to: destination })
    }
}
