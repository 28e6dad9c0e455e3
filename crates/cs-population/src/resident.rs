//! Resident entity.

use std::fmt;

use cs_core::{LinkId, ResidentId, ZoneId};

/// Where a resident stands with respect to work.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmploymentState {
    /// Works in the home zone; no travel.
    Employed,
    /// No work zone.
    #[default]
    Unemployed,
    /// Works outside the home zone and travels there every tick.
    Commuting,
}

impl EmploymentState {
    /// `true` for any state that holds a job.
    #[inline]
    pub fn has_job(self) -> bool {
        !matches!(self, EmploymentState::Unemployed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentState::Employed   => "employed",
            EmploymentState::Unemployed => "unemployed",
            EmploymentState::Commuting  => "commuting",
        }
    }
}

impl fmt::Display for EmploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resident.  Zone references are non-owning IDs into the `ZoneMap`.
///
/// `route` and `commute_cost` describe the current tick's trip from home to
/// work and are empty / zero unless the resident is `Commuting`.  `wealth`
/// starts at zero and grows by `income` every tick the resident holds a job.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resident {
    pub id:           ResidentId,
    pub home_zone:    ZoneId,
    pub work_zone:    Option<ZoneId>,
    pub state:        EmploymentState,
    pub income:       f64,
    pub route:        Vec<LinkId>,
    pub commute_cost: f64,
    pub wealth:       f64,
}

impl Resident {
    /// A new unemployed resident.
    pub fn new(id: ResidentId, home_zone: ZoneId, income: f64) -> Self {
        Self {
            id,
            home_zone,
            work_zone:    None,
            state:        EmploymentState::Unemployed,
            income,
            route:        Vec::new(),
            commute_cost: 0.0,
            wealth:       0.0,
        }
    }

    #[inline]
    pub fn is_commuting(&self) -> bool {
        self.state == EmploymentState::Commuting
    }
}
