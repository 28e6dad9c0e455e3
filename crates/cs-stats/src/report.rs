//! End-of-run summary.

use std::fmt;

use cs_core::Tick;

/// Headline figures for one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    pub tick:                 Tick,
    pub total:                u64,
    pub employed:             u64,
    pub commuting:            u64,
    pub unemployed:           u64,
    pub employment_rate:      f64,
    pub average_commute_cost: f64,
    pub average_congestion:   f64,
    pub average_occupation:   f64,
    pub average_wealth:       f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation report at {}", self.tick)?;
        writeln!(f, "==========================")?;
        writeln!(f, "Total residents:      {}", self.total)?;
        writeln!(f, "Working (home zone):  {}", self.employed)?;
        writeln!(f, "Working (commuting):  {}", self.commuting)?;
        writeln!(f, "Unemployed:           {}", self.unemployed)?;
        writeln!(f, "Employment rate:      {:.2}%", self.employment_rate * 100.0)?;
        writeln!(f, "Average commute cost: {:.3}", self.average_commute_cost)?;
        writeln!(f, "Average congestion:   {:.2}%", self.average_congestion)?;
        writeln!(f, "Average occupation:   {:.2}%", self.average_occupation)?;
        write!(f,   "Average wealth:       {:.2}", self.average_wealth)
    }
}
