//! `cs-zone`: the city's static topology.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                 |
//! |-----------|----------------------------------------------------------|
//! | [`zone`]  | `Zone`: capacity plus resident/worker counters           |
//! | [`link`]  | `TransportLink`: directed link with base cost            |
//! | [`map`]   | `ZoneMap` (CSR adjacency), `ZoneMapBuilder`              |
//! | [`error`] | `ZoneError`, `ZoneResult<T>`                             |
//!
//! After [`ZoneMapBuilder::build`] the topology is frozen.  The only mutable
//! parts are each zone's occupancy counters, and those change exclusively
//! through [`ZoneMap::assign_resident`], [`ZoneMap::assign_worker`] and
//! [`ZoneMap::release_worker`], which enforce `0 ≤ count ≤ capacity`.

pub mod error;
pub mod link;
pub mod map;
pub mod zone;

#[cfg(test)]
mod tests;

pub use error::{ZoneError, ZoneResult};
pub use link::TransportLink;
pub use map::{ZoneMap, ZoneMapBuilder};
pub use zone::Zone;
