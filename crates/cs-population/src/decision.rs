//! Decisions: what a resident wants to happen this tick.

use cs_core::ZoneId;
use cs_transport::Route;

/// A work zone a resident is willing to take, with the route that gets it
/// there at this tick's costs.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub zone:  ZoneId,
    pub route: Route,
}

/// Produced by [`EmploymentRule::decide`][crate::EmploymentRule::decide] and
/// consumed by the apply phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Decision {
    /// Keep everything as is.
    #[default]
    Stay,

    /// Keep the job, travel by a different route or at a different cost.
    Reroute(Route),

    /// Take the first candidate whose zone still has a free worker slot.
    /// Candidates are in preference order.
    Seek(Vec<Candidate>),

    /// Leave the current job.
    Quit,
}
