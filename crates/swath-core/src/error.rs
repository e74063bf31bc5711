// SPDX-License-Identifier: Apache-2.0
//! Split-time validation errors.
use thiserror::Error;

/// Rejected split arguments.
///
/// Both partitioner families validate eagerly: a bad partition count or chunk
/// size fails at split time, before any cursor exists. Cursor exhaustion is
/// not an error; it is the `None` terminal of iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Asked for zero partitions; at least one cursor is required.
    #[error("partition count must be at least 1")]
    ZeroPartitions,

    /// Asked for an explicit claim chunk of zero elements.
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
}
