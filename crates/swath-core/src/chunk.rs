// SPDX-License-Identifier: Apache-2.0
//! Claim chunk sizing for the dynamic partitioners.
//!
//! Every claim against shared state hands the claiming cursor a fixed-size
//! chunk of elements (the final chunk may be shorter). Larger chunks mean
//! less claim traffic; smaller chunks mean finer load balancing. The policy
//! here resolves to a concrete size at split time, so cursors never consult
//! it again.

use crate::error::SplitError;

/// Target number of claims each cursor makes under [`ChunkSize::Auto`] when
/// the source length is known.
///
/// Eight claims per cursor keeps enough unclaimed work behind the shared
/// position for fast cursors to absorb a slow sibling's share, without claim
/// traffic dominating the drain.
pub const AUTO_CLAIMS_PER_CURSOR: usize = 8;

/// Upper bound on an auto-sized chunk, so one claim can never walk off with
/// an outsized share of a large source.
pub const AUTO_CHUNK_CEILING: usize = 1024;

/// Chunk used by [`ChunkSize::Auto`] when the source length is unknown.
///
/// Pulling 32 elements per lock acquisition amortizes the mutex without
/// stranding much work in a cursor that stalls mid-drain.
pub const LAZY_AUTO_CHUNK: usize = 32;

/// How many elements a dynamic cursor takes per claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkSize {
    /// Derive the chunk from the source shape: aim for
    /// [`AUTO_CLAIMS_PER_CURSOR`] claims per cursor, clamped to
    /// `1..=`[`AUTO_CHUNK_CEILING`]. Falls back to [`LAZY_AUTO_CHUNK`] when
    /// the length is unknown.
    #[default]
    Auto,
    /// Claim this many elements each time. Must be at least 1. A buffered
    /// split clamps the size to the source length, since a single claim can
    /// at most take the whole buffer.
    Explicit(usize),
}

impl ChunkSize {
    /// Resolves the policy for a materialized source of `len` elements split
    /// into `parts` cursors.
    ///
    /// The result is deterministic for a given `(len, parts)`, at least 1,
    /// and at most `len.max(1)`: one claim can at most take the whole buffer,
    /// so explicit sizes beyond that clamp down. The bound also keeps the
    /// shared claim position from ever wrapping, since every advance of it
    /// (successful and past-the-end claims alike) moves it by at most one
    /// buffer length.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ZeroChunkSize`] for `Explicit(0)`.
    pub fn resolve_buffered(self, len: usize, parts: usize) -> Result<usize, SplitError> {
        match self {
            Self::Auto => {
                let target_claims = parts.saturating_mul(AUTO_CLAIMS_PER_CURSOR).max(1);
                Ok(len.div_ceil(target_claims).clamp(1, AUTO_CHUNK_CEILING))
            }
            Self::Explicit(0) => Err(SplitError::ZeroChunkSize),
            Self::Explicit(size) => Ok(size.min(len.max(1))),
        }
    }

    /// Resolves the policy for a source of unknown length.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ZeroChunkSize`] for `Explicit(0)`.
    pub fn resolve_lazy(self) -> Result<usize, SplitError> {
        match self {
            Self::Auto => Ok(LAZY_AUTO_CHUNK),
            Self::Explicit(0) => Err(SplitError::ZeroChunkSize),
            Self::Explicit(size) => Ok(size),
        }
    }
}
