// SPDX-License-Identifier: Apache-2.0
//! Recombination check: drained output must reproduce the source exactly.
//!
//! Partition order is deliberately discarded before comparing. A concurrent
//! drain interleaves arbitrarily, so the only meaningful question is whether
//! the drained elements form exactly the source multiset: nothing dropped,
//! nothing duplicated. Both sides are sorted into a canonical order and
//! compared structurally; on mismatch a multiset diff names what went
//! missing and what appeared twice.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Violation found when comparing drained output against its source.
///
/// Any value of this type is a hard failure. Splitting and draining are
/// required to hand out every element exactly once on every run, so a
/// mismatch means a claim-protocol bug, not a transient condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecombineError {
    /// The drained output has a different number of elements than the source.
    #[error("drained {actual} elements, source has {expected}")]
    LengthMismatch {
        /// Element count of the source.
        expected: usize,
        /// Element count of the drained output.
        actual: usize,
    },

    /// Counts match but the sorted sequences diverge.
    #[error(
        "sorted output diverges at index {index}: {dropped} source value(s) missing, {duplicated} drained value(s) in excess"
    )]
    ContentMismatch {
        /// First index where the sorted sequences differ.
        index: usize,
        /// Source values missing from the drained output, by multiplicity.
        dropped: usize,
        /// Drained values exceeding their source multiplicity.
        duplicated: usize,
    },
}

/// Checks that `drained` is exactly the multiset of `source`.
///
/// Sorts copies of both sides, so the inputs are untouched and re-running
/// the check on the same drain yields the same verdict. `Ord` drives the
/// canonical order; `Hash` is only used to build the diagnostic diff on
/// failure.
///
/// # Errors
///
/// Returns [`RecombineError::LengthMismatch`] when the counts differ, and
/// [`RecombineError::ContentMismatch`] when counts match but the multisets
/// do not.
pub fn check_recombines<T>(source: &[T], drained: &[T]) -> Result<(), RecombineError>
where
    T: Ord + Hash + Clone,
{
    if source.len() != drained.len() {
        return Err(RecombineError::LengthMismatch {
            expected: source.len(),
            actual: drained.len(),
        });
    }

    let mut expected = source.to_vec();
    expected.sort_unstable();
    let mut actual = drained.to_vec();
    actual.sort_unstable();
    if expected == actual {
        return Ok(());
    }

    let index = expected
        .iter()
        .zip(actual.iter())
        .position(|(want, got)| want != got)
        .unwrap_or(expected.len());

    // Multiset diff: walk the drain against source multiplicities.
    let mut counts: FxHashMap<&T, usize> = FxHashMap::default();
    for value in source {
        *counts.entry(value).or_default() += 1;
    }
    let mut duplicated = 0usize;
    for value in drained {
        match counts.get_mut(value) {
            Some(balance) if *balance > 0 => *balance -= 1,
            _ => duplicated += 1,
        }
    }
    let dropped: usize = counts.values().sum();

    Err(RecombineError::ContentMismatch {
        index,
        dropped,
        duplicated,
    })
}
