//! Per-tick link load accounting.

use cs_core::LinkId;

/// Number of commuters traversing each link this tick, indexed by `LinkId`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkLoads(Vec<u32>);

impl LinkLoads {
    /// All-zero loads for `link_count` links.
    pub fn empty(link_count: usize) -> Self {
        LinkLoads(vec![0; link_count])
    }

    /// Count every link occurrence across `routes`.
    ///
    /// Link IDs outside `0..link_count` are ignored.
    pub fn from_routes<'a, I>(link_count: usize, routes: I) -> Self
    where
        I: IntoIterator<Item = &'a [LinkId]>,
    {
        let mut loads = Self::empty(link_count);
        for route in routes {
            for &link in route {
                loads.add(link);
            }
        }
        loads
    }

    #[inline]
    pub fn add(&mut self, link: LinkId) {
        if let Some(n) = self.0.get_mut(link.index()) {
            *n += 1;
        }
    }

    #[inline]
    pub fn get(&self, link: LinkId) -> u32 {
        self.0.get(link.index()).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&n| n as u64).sum()
    }
}
