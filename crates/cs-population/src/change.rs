use cs_core::{ResidentId, ZoneId};

use crate::EmploymentState;

/// One resident's work-zone transition during a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    pub resident:      ResidentId,
    pub old_work_zone: Option<ZoneId>,
    pub new_work_zone: Option<ZoneId>,
    /// State after the transition.
    pub state:         EmploymentState,
}
