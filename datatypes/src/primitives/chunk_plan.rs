use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A partition of the 1-indexed rows `[1, n]` into contiguous batches of at most `m` rows.
///
/// `start` and `end` always have the same length. Every batch but the last one
/// is exactly `m` rows wide; the last one ends at `n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPlan {
    start: Vec<usize>,
    end: Vec<usize>,
}

impl ChunkPlan {
    /// Plans `ceil(n / m)` batches. An empty plan is returned for `n == 0`.
    pub fn new(n: usize, m: usize) -> Result<Self> {
        if m == 0 {
            return Err(Error::InvalidChunkSize);
        }

        let n_chunks = n.div_ceil(m);

        // `i * m < n` for every start, but the last end may exceed `usize::MAX` before clamping
        let start = (0..n_chunks).map(|i| 1 + i * m).collect();
        let end = (1..=n_chunks).map(|i| i.saturating_mul(m).min(n)).collect();

        Ok(Self { start, end })
    }

    pub fn start(&self) -> &[usize] {
        &self.start
    }

    pub fn end(&self) -> &[usize] {
        &self.end
    }

    pub fn len(&self) -> usize {
        self.start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    /// The batches as inclusive, 1-indexed row ranges.
    pub fn ranges(&self) -> impl Iterator<Item = RangeInclusive<usize>> + '_ {
        self.start
            .iter()
            .zip(&self.end)
            .map(|(&start, &end)| start..=end)
    }

    /// Slices `items` into the planned batches.
    ///
    /// # Panics
    /// If `items` is shorter than the number of rows the plan covers.
    pub fn split<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        self.ranges()
            .map(|range| &items[range.start() - 1..*range.end()])
            .collect()
    }
}

/// Computes the row ranges for sending `n` rows in batches of `m`.
pub fn chunk_indices(n: usize, m: usize) -> Result<ChunkPlan> {
    ChunkPlan::new(n, m)
}
