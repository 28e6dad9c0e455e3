//! Directed transport links.

use cs_core::{LinkId, ZoneId};

/// A directed link `origin → destination`.
///
/// `base_cost` is the free-flow travel cost.  `capacity` is the number of
/// commuters the link carries before congestion doubles its linear cost; the
/// congestion factor itself is tick-local and lives in `cs-transport`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransportLink {
    pub id:          LinkId,
    pub origin:      ZoneId,
    pub destination: ZoneId,
    pub base_cost:   f64,
    pub capacity:    u32,
}

impl TransportLink {
    /// `true` if the link touches `zone` at either end.
    #[inline]
    pub fn touches(&self, zone: ZoneId) -> bool {
        self.origin == zone || self.destination == zone
    }
}
