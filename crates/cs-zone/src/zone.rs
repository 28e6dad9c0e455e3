//! A single zone and its occupancy counters.

use cs_core::ZoneId;

/// A city zone.
///
/// `capacity` bounds residents and workers independently: a zone of
/// capacity 10 can house 10 residents and employ 10 workers.  The counters
/// are private; `ZoneMap` is the only writer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Zone {
    pub id:       ZoneId,
    pub name:     String,
    pub capacity: u32,
    residents:    u32,
    workers:      u32,
}

impl Zone {
    pub(crate) fn new(id: ZoneId, name: String, capacity: u32) -> Self {
        Self { id, name, capacity, residents: 0, workers: 0 }
    }

    /// Residents whose home is this zone.
    #[inline]
    pub fn residents(&self) -> u32 {
        self.residents
    }

    /// Residents whose work zone is this zone.
    #[inline]
    pub fn workers(&self) -> u32 {
        self.workers
    }

    /// Free worker slots.
    #[inline]
    pub fn vacancy(&self) -> u32 {
        self.capacity - self.workers
    }

    #[inline]
    pub fn has_vacancy(&self) -> bool {
        self.workers < self.capacity
    }

    /// Share of worker slots in use, in percent.
    pub fn occupation_pct(&self) -> f64 {
        self.workers as f64 * 100.0 / self.capacity as f64
    }

    pub(crate) fn residents_mut(&mut self) -> &mut u32 {
        &mut self.residents
    }

    pub(crate) fn workers_mut(&mut self) -> &mut u32 {
        &mut self.workers
    }
}
