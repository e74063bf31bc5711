// SPDX-License-Identifier: Apache-2.0
//! Contiguous range plans for static partitioning.
//!
//! A [`RangePlan`] fixes the index-to-partition assignment before any cursor
//! exists: partition `i` owns the `i`-th contiguous range of the source.
//! Ranges are as even as possible; when the length does not divide evenly,
//! the first `len % parts` partitions each take one extra element. Building a
//! plan is pure arithmetic, so identical `(len, parts)` inputs always yield
//! identical plans.

use crate::error::SplitError;

/// One half-open slice `[start, end)` of source indices, owned by a single
/// partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRange {
    /// First source index owned by the partition.
    pub start: usize,
    /// One past the last source index owned by the partition.
    pub end: usize,
}

impl PlanRange {
    /// Returns the number of indices in this range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the partition was assigned no indices.
    ///
    /// Empty ranges occur whenever more partitions than elements were
    /// requested; they are valid assignments, not errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Precomputed contiguous-range assignment over a source of known length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangePlan {
    len: usize,
    ranges: Vec<PlanRange>,
}

impl RangePlan {
    /// Splits `[0, len)` into exactly `parts` contiguous ranges.
    ///
    /// Range sizes never differ by more than one: each range holds
    /// `len / parts` indices, and the first `len % parts` ranges hold one
    /// more. Trailing ranges are empty when `parts > len`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ZeroPartitions`] when `parts` is zero, including
    /// for an empty source.
    pub fn build(len: usize, parts: usize) -> Result<Self, SplitError> {
        if parts == 0 {
            return Err(SplitError::ZeroPartitions);
        }

        let base = len / parts;
        let extra = len % parts;
        let mut ranges = Vec::with_capacity(parts);
        let mut start = 0;
        for index in 0..parts {
            let end = start + base + usize::from(index < extra);
            ranges.push(PlanRange { start, end });
            start = end;
        }

        Ok(Self { len, ranges })
    }

    /// Returns the source length this plan covers.
    #[must_use]
    pub fn source_len(&self) -> usize {
        self.len
    }

    /// Returns the number of partitions, which is always the `parts` the plan
    /// was built with.
    #[must_use]
    pub fn partitions(&self) -> usize {
        self.ranges.len()
    }

    /// Returns the range owned by partition `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<PlanRange> {
        self.ranges.get(index).copied()
    }

    /// Iterates the ranges in partition order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = PlanRange> + '_ {
        self.ranges.iter().copied()
    }

    /// Checks that every index in `[0, len)` is owned by exactly one range.
    #[cfg(test)]
    fn covers_exactly_once(&self) -> bool {
        let mut seen = vec![false; self.len];
        for range in &self.ranges {
            for index in range.start..range.end {
                if index >= self.len || seen[index] {
                    return false;
                }
                seen[index] = true;
            }
        }
        seen.iter().all(|&hit| hit)
    }
}

impl<'a> IntoIterator for &'a RangePlan {
    type Item = PlanRange;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, PlanRange>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn even_split_has_equal_ranges() {
        let plan = RangePlan::build(12, 4).unwrap();
        let sizes: Vec<usize> = plan.iter().map(|range| range.len()).collect();
        assert_eq!(sizes, vec![3, 3, 3, 3]);
        assert!(plan.covers_exactly_once());

        let mut total = 0;
        for range in &plan {
            total += range.len();
        }
        assert_eq!(total, 12);
    }

    #[test]
    fn remainder_goes_to_leading_ranges() {
        let plan = RangePlan::build(10, 3).unwrap();
        let ranges: Vec<PlanRange> = plan.iter().collect();
        assert_eq!(
            ranges,
            vec![
                PlanRange { start: 0, end: 4 },
                PlanRange { start: 4, end: 7 },
                PlanRange { start: 7, end: 10 },
            ]
        );
        assert!(plan.covers_exactly_once());
    }

    #[test]
    fn more_partitions_than_elements_yields_trailing_empties() {
        let plan = RangePlan::build(3, 5).unwrap();
        let sizes: Vec<usize> = plan.iter().map(|range| range.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1, 0, 0]);
        assert!(plan.get(3).unwrap().is_empty());
        assert!(plan.covers_exactly_once());
    }

    #[test]
    fn empty_source_yields_all_empty_ranges() {
        let plan = RangePlan::build(0, 4).unwrap();
        assert_eq!(plan.partitions(), 4);
        assert!(plan.iter().all(|range| range.is_empty()));
        assert!(plan.covers_exactly_once());
    }

    #[test]
    fn zero_partitions_is_rejected() {
        assert_eq!(RangePlan::build(10, 0), Err(SplitError::ZeroPartitions));
        assert_eq!(RangePlan::build(0, 0), Err(SplitError::ZeroPartitions));
    }

    #[test]
    fn single_partition_owns_everything() {
        let plan = RangePlan::build(7, 1).unwrap();
        assert_eq!(plan.get(0), Some(PlanRange { start: 0, end: 7 }));
        assert_eq!(plan.partitions(), 1);
    }

    #[test]
    fn identical_inputs_build_identical_plans() {
        for len in [0, 1, 7, 64, 1000] {
            for parts in [1, 2, 3, 8, 13] {
                assert_eq!(
                    RangePlan::build(len, parts).unwrap(),
                    RangePlan::build(len, parts).unwrap(),
                );
            }
        }
    }

    #[test]
    fn coverage_holds_across_a_grid_of_shapes() {
        for len in 0..48 {
            for parts in 1..10 {
                let plan = RangePlan::build(len, parts).unwrap();
                assert_eq!(plan.partitions(), parts);
                assert_eq!(plan.source_len(), len);
                assert!(plan.covers_exactly_once(), "len={len} parts={parts}");
                let max = plan.iter().map(|range| range.len()).max().unwrap();
                let min = plan.iter().map(|range| range.len()).min().unwrap();
                assert!(max - min <= 1, "uneven by >1: len={len} parts={parts}");
            }
        }
    }
}
