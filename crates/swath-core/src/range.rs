// SPDX-License-Identifier: Apache-2.0
//! Static partitioning by precomputed contiguous ranges.
//!
//! The assignment is fixed entirely at split time by a [`RangePlan`]; cursors
//! share nothing but the immutable buffer, so draining them needs no
//! coordination at all. The trade-off is load balance: a partition that
//! drains slowly cannot hand leftover work to its siblings.

use std::sync::Arc;

use crate::error::SplitError;
use crate::plan::RangePlan;

/// Static partitioner over a materialized source.
///
/// Splitting hands out [`RangeCursor`]s, one per contiguous range of the
/// plan. The buffer is shared by reference count, never copied, and repeated
/// splits of the same partitioner are independent and identical.
#[derive(Debug, Clone)]
pub struct RangePartitioner<T> {
    buf: Arc<[T]>,
}

impl<T> RangePartitioner<T> {
    /// Wraps a materialized source.
    pub fn new(source: impl Into<Arc<[T]>>) -> Self {
        Self { buf: source.into() }
    }

    /// Returns the number of elements in the source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the source holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Splits the source into exactly `parts` cursors over contiguous,
    /// as-even-as-possible ranges.
    ///
    /// Cursor `i` yields the elements of plan range `i` in source order.
    /// When `parts` exceeds the source length the trailing cursors are
    /// exhausted from the start, which keeps a worker-per-cursor drain loop
    /// uniform.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ZeroPartitions`] when `parts` is zero.
    pub fn split(&self, parts: usize) -> Result<Vec<RangeCursor<T>>, SplitError> {
        let plan = RangePlan::build(self.buf.len(), parts)?;
        Ok(plan
            .iter()
            .map(|range| RangeCursor {
                buf: Arc::clone(&self.buf),
                index: range.start,
                end: range.end,
            })
            .collect())
    }
}

impl<T> From<Vec<T>> for RangePartitioner<T> {
    fn from(source: Vec<T>) -> Self {
        Self::new(source)
    }
}

/// Cursor over one contiguous range of a statically partitioned source.
///
/// Yields its range in source order and reports an exact length, so a
/// consumer can preallocate.
#[derive(Debug)]
pub struct RangeCursor<T> {
    buf: Arc<[T]>,
    index: usize,
    end: usize,
}

impl<T: Clone> Iterator for RangeCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.end {
            return None;
        }
        let value = self.buf[self.index].clone();
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for RangeCursor<T> {}
