//! Plain data row types written by output backends.

/// One metric sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub tick:   u64,
    pub metric: String,
    pub value:  f64,
}

/// Per-tick activity, written for every committed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    /// Employment transitions applied during the tick.
    pub transitions: u64,
}
