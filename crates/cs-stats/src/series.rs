//! `Series`: a frozen, read-only view of one metric's samples.
//!
//! The collector stores each metric as a list of full, immutable chunks plus
//! a short mutable tail.  Taking a `Series` shares the chunks (an `Arc` bump
//! each) and copies the tail, so a series never changes after it is taken
//! and reading it needs no lock.

use std::sync::Arc;

use cs_core::Tick;

/// Samples per frozen chunk.
const CHUNK: usize = 256;

type Sample = (Tick, f64);

// ── SampleBuf ─────────────────────────────────────────────────────────────────

/// Append-only sample storage owned by the collector.
#[derive(Debug, Default)]
pub(crate) struct SampleBuf {
    chunks: Vec<Arc<[Sample]>>,
    tail:   Vec<Sample>,
}

impl SampleBuf {
    pub(crate) fn push(&mut self, sample: Sample) {
        self.tail.push(sample);
        if self.tail.len() == CHUNK {
            let full = std::mem::replace(&mut self.tail, Vec::with_capacity(CHUNK));
            self.chunks.push(full.into());
        }
    }

    pub(crate) fn last(&self) -> Option<Sample> {
        self.tail
            .last()
            .or_else(|| self.chunks.last().and_then(|c| c.last()))
            .copied()
    }

    /// Freeze the samples pushed so far.
    pub(crate) fn series(&self) -> Series {
        Series {
            inner: Arc::new(Frozen {
                chunks: self.chunks.clone(),
                tail:   self.tail.as_slice().into(),
            }),
        }
    }
}

// ── Series ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Frozen {
    chunks: Vec<Arc<[Sample]>>,
    tail:   Arc<[Sample]>,
}

/// The samples of one metric up to the moment the series was taken.
///
/// Cloning is an `Arc` bump.  Iteration is lazy and can be restarted any
/// number of times.
#[derive(Clone, Debug)]
pub struct Series {
    inner: Arc<Frozen>,
}

impl Series {
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.chunks.len() * CHUNK + self.inner.tail.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        let chunk = index / CHUNK;
        match self.inner.chunks.get(chunk) {
            Some(c) => c.get(index % CHUNK).copied(),
            None    => self.inner.tail.get(index - self.inner.chunks.len() * CHUNK).copied(),
        }
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate from the first sample.  Each call starts over.
    pub fn iter(&self) -> SeriesIter<'_> {
        SeriesIter { series: self, pos: 0 }
    }

    /// Copy the samples out.
    pub fn to_vec(&self) -> Vec<Sample> {
        self.iter().collect()
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item     = Sample;
    type IntoIter = SeriesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Series`].
pub struct SeriesIter<'a> {
    series: &'a Series,
    pos:    usize,
}

impl Iterator for SeriesIter<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.series.get(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.series.len().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for SeriesIter<'_> {}

#[cfg(feature = "serde")]
impl serde::Serialize for Series {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for sample in self.iter() {
            seq.serialize_element(&sample)?;
        }
        seq.end()
    }
}
