//! Zone map representation and builder.
//!
//! # Data layout
//!
//! Zones and links live in flat `Vec`s indexed by `ZoneId` / `LinkId`, in the
//! order they were added.  Outgoing adjacency uses **Compressed Sparse Row**
//! format over a separate index array, so link IDs stay stable (they match
//! the configuration order) while iteration over a zone's outgoing links is
//! still a contiguous scan:
//!
//! ```text
//! out_links[ out_start[z] .. out_start[z+1] ]   // LinkIds leaving zone z
//! ```
//!
//! Within one zone, outgoing links are ordered by `LinkId`, which keeps
//! shortest-path searches deterministic.

use cs_core::{ConfigError, ConfigResult, LinkId, ZoneId};

use crate::{TransportLink, Zone, ZoneError, ZoneResult};

// ── ZoneMap ───────────────────────────────────────────────────────────────────

/// Frozen city topology plus per-zone occupancy counters.
///
/// Do not construct directly; use [`ZoneMapBuilder`].  With the `serde`
/// feature a map can be serialized but not deserialized, since only the
/// builder checks the topology:
///
/// ```compile_fail
/// fn from_json<T: serde::de::DeserializeOwned>() {}
/// from_json::<cs_zone::ZoneMap>();
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZoneMap {
    zones: Vec<Zone>,
    links: Vec<TransportLink>,
    /// CSR row pointer.  Length = `zone_count + 1`.
    out_start: Vec<u32>,
    /// Link IDs sorted by (origin, id).
    out_links: Vec<LinkId>,
}

impl ZoneMap {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn links(&self) -> &[TransportLink] {
        &self.links
    }

    #[inline]
    pub fn contains(&self, zone: ZoneId) -> bool {
        zone.index() < self.zones.len()
    }

    pub fn zone_by_id(&self, id: ZoneId) -> ZoneResult<&Zone> {
        self.zones.get(id.index()).ok_or(ZoneError::NotFound(id))
    }

    pub fn link_by_id(&self, id: LinkId) -> ZoneResult<&TransportLink> {
        self.links.get(id.index()).ok_or(ZoneError::LinkNotFound(id))
    }

    /// First zone whose display name equals `name`.
    pub fn zone_by_name(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Outgoing links of `zone` in ascending `LinkId` order.
    ///
    /// Empty for unknown zones.
    #[inline]
    pub fn out_links(&self, zone: ZoneId) -> impl Iterator<Item = &TransportLink> + '_ {
        let range = if self.contains(zone) {
            self.out_start[zone.index()] as usize..self.out_start[zone.index() + 1] as usize
        } else {
            0..0
        };
        self.out_links[range].iter().map(|id| &self.links[id.index()])
    }

    #[inline]
    pub fn out_degree(&self, zone: ZoneId) -> usize {
        if !self.contains(zone) {
            return 0;
        }
        (self.out_start[zone.index() + 1] - self.out_start[zone.index()]) as usize
    }

    /// Number of links touching `zone` in either direction.
    pub fn linked_zone_count(&self, zone: ZoneId) -> usize {
        self.links.iter().filter(|l| l.touches(zone)).count()
    }

    // ── Controlled counter access ─────────────────────────────────────────

    /// Record a new resident living in `zone`.
    pub fn assign_resident(&mut self, zone: ZoneId) -> ZoneResult<()> {
        let z = self.zone_mut(zone)?;
        let capacity = z.capacity;
        let count = z.residents_mut();
        if *count >= capacity {
            return Err(ZoneError::CapacityExceeded { zone, capacity, counter: "residents" });
        }
        *count += 1;
        Ok(())
    }

    /// Take one worker slot in `zone`.
    pub fn assign_worker(&mut self, zone: ZoneId) -> ZoneResult<()> {
        let z = self.zone_mut(zone)?;
        let capacity = z.capacity;
        let count = z.workers_mut();
        if *count >= capacity {
            return Err(ZoneError::CapacityExceeded { zone, capacity, counter: "workers" });
        }
        *count += 1;
        Ok(())
    }

    /// Free one worker slot in `zone`.
    pub fn release_worker(&mut self, zone: ZoneId) -> ZoneResult<()> {
        let count = self.zone_mut(zone)?.workers_mut();
        if *count == 0 {
            return Err(ZoneError::CounterUnderflow { zone, counter: "workers" });
        }
        *count -= 1;
        Ok(())
    }

    fn zone_mut(&mut self, id: ZoneId) -> ZoneResult<&mut Zone> {
        self.zones.get_mut(id.index()).ok_or(ZoneError::NotFound(id))
    }
}

// ── ZoneMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`ZoneMap`] incrementally, then call [`build`](Self::build).
///
/// Every `add_*` call validates its input immediately and reports the
/// offending field using the configuration's path syntax (`zones[i]`,
/// `links[i]`), where `i` is the position the entry would take.
///
/// # Example
///
/// ```
/// use cs_zone::ZoneMapBuilder;
///
/// let mut b = ZoneMapBuilder::new();
/// let a = b.add_zone(10).unwrap();
/// let c = b.add_zone(5).unwrap();
/// b.add_link(a, c, 1.0).unwrap();
/// let map = b.build();
/// assert_eq!(map.zone_count(), 2);
/// assert_eq!(map.out_degree(a), 1);
/// ```
pub struct ZoneMapBuilder {
    zones:                 Vec<Zone>,
    links:                 Vec<TransportLink>,
    default_link_capacity: u32,
}

impl ZoneMapBuilder {
    pub const DEFAULT_LINK_CAPACITY: u32 = 100;

    pub fn new() -> Self {
        Self {
            zones:                 Vec::new(),
            links:                 Vec::new(),
            default_link_capacity: Self::DEFAULT_LINK_CAPACITY,
        }
    }

    /// Capacity used by [`add_link`](Self::add_link).  Zero is clamped to 1.
    pub fn default_link_capacity(mut self, capacity: u32) -> Self {
        self.default_link_capacity = capacity.max(1);
        self
    }

    /// Add an unnamed zone; its name defaults to `zone-<id>`.
    pub fn add_zone(&mut self, capacity: u32) -> ConfigResult<ZoneId> {
        let name = format!("zone-{}", self.zones.len());
        self.add_named_zone(name, capacity)
    }

    pub fn add_named_zone(&mut self, name: impl Into<String>, capacity: u32) -> ConfigResult<ZoneId> {
        let index = self.zones.len();
        if capacity == 0 {
            return Err(ConfigError::new(
                format!("zones[{index}].capacity"),
                "capacity must be positive",
            ));
        }
        let id = ZoneId::try_from(index)
            .map_err(|_| ConfigError::new(format!("zones[{index}]"), "too many zones"))?;
        self.zones.push(Zone::new(id, name.into(), capacity));
        Ok(id)
    }

    /// Add a directed link with the builder's default capacity.
    pub fn add_link(&mut self, origin: ZoneId, destination: ZoneId, base_cost: f64) -> ConfigResult<LinkId> {
        let capacity = self.default_link_capacity;
        self.add_link_with_capacity(origin, destination, base_cost, capacity)
    }

    pub fn add_link_with_capacity(
        &mut self,
        origin:      ZoneId,
        destination: ZoneId,
        base_cost:   f64,
        capacity:    u32,
    ) -> ConfigResult<LinkId> {
        let index = self.links.len();
        let field = |name: &str| format!("links[{index}].{name}");

        if origin.index() >= self.zones.len() {
            return Err(ConfigError::new(field("origin"), format!("zone {} does not exist", origin.0)));
        }
        if destination.index() >= self.zones.len() {
            return Err(ConfigError::new(
                field("destination"),
                format!("zone {} does not exist", destination.0),
            ));
        }
        if origin == destination {
            return Err(ConfigError::new(field("destination"), "link must join two different zones"));
        }
        if !base_cost.is_finite() || base_cost < 0.0 {
            return Err(ConfigError::new(field("base_cost"), "must be a finite, non-negative number"));
        }
        if capacity == 0 {
            return Err(ConfigError::new(field("capacity"), "capacity must be positive"));
        }

        let id = LinkId::try_from(index)
            .map_err(|_| ConfigError::new(format!("links[{index}]"), "too many links"))?;
        self.links.push(TransportLink { id, origin, destination, base_cost, capacity });
        Ok(id)
    }

    /// Convenience: add links in **both directions**.
    pub fn add_two_way(&mut self, a: ZoneId, b: ZoneId, base_cost: f64) -> ConfigResult<(LinkId, LinkId)> {
        Ok((self.add_link(a, b, base_cost)?, self.add_link(b, a, base_cost)?))
    }

    pub fn zone_count(&self) -> usize { self.zones.len() }
    pub fn link_count(&self) -> usize { self.links.len() }

    /// Consume the builder and produce a [`ZoneMap`].
    ///
    /// Time complexity: O(L log L) for the adjacency sort.
    pub fn build(self) -> ZoneMap {
        let zone_count = self.zones.len();

        let mut out_links: Vec<LinkId> = self.links.iter().map(|l| l.id).collect();
        out_links.sort_unstable_by_key(|id| (self.links[id.index()].origin, *id));

        let mut out_start = vec![0u32; zone_count + 1];
        for link in &self.links {
            out_start[link.origin.index() + 1] += 1;
        }
        for i in 1..=zone_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[zone_count] as usize, self.links.len());

        ZoneMap {
            zones: self.zones,
            links: self.links,
            out_start,
            out_links,
        }
    }
}

impl Default for ZoneMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
