//! `cs-transport`: travel costs between zones.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`congestion`] | `CongestionModel` trait, `LinearCongestion`, `BprCongestion`, `CongestionKind` |
//! | [`load`]       | `LinkLoads`: commuters per link for one tick             |
//! | [`router`]     | `Route`, Dijkstra shortest-path trees                    |
//! | [`model`]      | `TransportModel<C>` and its per-tick result `TickCosts`  |
//! | [`error`]      | `TransportError`, `TransportResult<T>`                   |
//!
//! # Tick-local costs
//!
//! Nothing here survives a tick.  Every tick the simulation counts link
//! loads from the residents' current routes, calls
//! [`TransportModel::recompute`], and gets a fresh immutable [`TickCosts`]
//! holding the congested cost of every link plus one shortest-path tree per
//! origin zone.  Population decisions read only that value, so they can run
//! in parallel.

pub mod congestion;
pub mod error;
pub mod load;
pub mod model;
pub mod router;

#[cfg(test)]
mod tests;

pub use congestion::{BprCongestion, CongestionKind, CongestionModel, LinearCongestion};
pub use error::{TransportError, TransportResult};
pub use load::LinkLoads;
pub use model::{TickCosts, TransportModel};
pub use router::Route;
