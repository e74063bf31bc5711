// SPDX-License-Identifier: Apache-2.0
//! swath-core: sequence partitioning into concurrent-safe cursors.
//!
//! A partitioner splits one source sequence into a caller-chosen number of
//! cursors that plain-`Iterator` consumers can drain independently, with the
//! guarantee that every source element is yielded by exactly one cursor:
//!
//! - [`RangePartitioner`] fixes contiguous, as-even-as-possible index ranges
//!   up front; cursors never coordinate.
//! - [`DynamicPartitioner`] lets cursors race for chunks of a materialized
//!   buffer over a single atomic claim counter, so fast consumers absorb the
//!   share of slow ones.
//! - [`LazyPartitioner`] does the same for sources of unknown length by
//!   pulling chunks from a lock-protected iterator feed.
//!
//! [`drain_parallel`] and friends own the worker-per-cursor fan-out, and
//! [`check_recombines`] verifies a drain against its source.
//!
//! # Usage
//!
//! ```rust
//! use swath_core::{check_recombines, drain_parallel, DynamicPartitioner};
//!
//! let source: Vec<u32> = (0..10_000).collect();
//!
//! // Eight cursors race for chunks; the drain order decides who gets what.
//! let cursors = DynamicPartitioner::new(source.clone()).split(8)?;
//! let drained = drain_parallel(cursors);
//!
//! // Nothing dropped, nothing duplicated.
//! check_recombines(&source, &drained)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn
)]

mod chunk;
mod drain;
mod dynamic;
mod error;
mod lazy;
mod plan;
mod range;
mod recombine;
mod telemetry;

// Re-exports for the stable public API
/// Claim chunk sizing policy and its auto-tuning constants.
pub use chunk::{ChunkSize, AUTO_CHUNK_CEILING, AUTO_CLAIMS_PER_CURSOR, LAZY_AUTO_CHUNK};
/// Drain helpers owning the worker-per-cursor fan-out.
pub use drain::{drain_parallel, drain_sequential, for_each_parallel};
/// Dynamic partitioning over a materialized buffer.
pub use dynamic::{ChunkCursor, DynamicPartitioner};
/// Split-time validation errors.
pub use error::SplitError;
/// Dynamic partitioning over a lazily produced source.
pub use lazy::{FeedCursor, LazyPartitioner};
/// Contiguous range plans for static partitioning.
pub use plan::{PlanRange, RangePlan};
/// Static partitioning by precomputed contiguous ranges.
pub use range::{RangeCursor, RangePartitioner};
/// Recombination check comparing a drain against its source.
pub use recombine::{check_recombines, RecombineError};
/// Telemetry sinks receiving split and claim events.
pub use telemetry::{JsonlTelemetrySink, NullTelemetrySink, SharedTelemetry, TelemetrySink};
