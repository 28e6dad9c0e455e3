//! Dijkstra shortest-path trees over per-tick link costs.
//!
//! One tree is grown per origin zone when a tick's costs are recomputed, so
//! every later `travel_cost` / `cheapest_route` query is a table lookup plus
//! a walk back along `prev_link`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use cs_core::{LinkId, ZoneId};
use cs_zone::ZoneMap;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: links in travel order and their summed
/// effective cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub links:      Vec<LinkId>,
    pub total_cost: f64,
}

impl Route {
    /// The empty route from a zone to itself.
    pub fn trivial() -> Self {
        Route { links: Vec::new(), total_cost: 0.0 }
    }

    /// `true` if origin and destination are the same zone.
    pub fn is_trivial(&self) -> bool {
        self.links.is_empty()
    }
}

// ── Shortest-path tree ────────────────────────────────────────────────────────

/// Single-source result: best known cost to every zone and the link that
/// reached it.
#[derive(Debug, Clone)]
pub(crate) struct PathTree {
    pub(crate) dist:      Vec<f64>,
    pub(crate) prev_link: Vec<Option<LinkId>>,
}

impl PathTree {
    /// Walk `prev_link` back from `to`.  `None` if `to` was never reached.
    pub(crate) fn route_to(&self, map: &ZoneMap, to: ZoneId) -> Option<Route> {
        let total_cost = *self.dist.get(to.index())?;
        if !total_cost.is_finite() {
            return None;
        }
        let mut links = Vec::new();
        let mut cur = to;
        while let Some(link) = self.prev_link[cur.index()] {
            links.push(link);
            cur = map.links()[link.index()].origin;
        }
        links.reverse();
        Some(Route { links, total_cost })
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the lowest cost first, then
/// the lowest zone id.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Frontier {
    cost: f64,
    zone: ZoneId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.zone.cmp(&self.zone))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Grow a shortest-path tree from `from` using `link_costs[link.index()]`.
///
/// Costs must be non-negative.  Among equal-cost paths the first one settled
/// wins; since both the heap and the adjacency order are deterministic, so is
/// the chosen path.
pub(crate) fn dijkstra(map: &ZoneMap, link_costs: &[f64], from: ZoneId) -> PathTree {
    let n = map.zone_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_link = vec![None; n];

    if from.index() >= n {
        return PathTree { dist, prev_link };
    }
    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { cost: 0.0, zone: from });

    while let Some(Frontier { cost, zone }) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[zone.index()] {
            continue;
        }

        for link in map.out_links(zone) {
            let next = link.destination;
            let new_cost = cost + link_costs[link.id.index()];
            if new_cost < dist[next.index()] {
                dist[next.index()] = new_cost;
                prev_link[next.index()] = Some(link.id);
                heap.push(Frontier { cost: new_cost, zone: next });
            }
        }
    }

    PathTree { dist, prev_link }
}
