// SPDX-License-Identifier: Apache-2.0
//! Dynamic partitioning over a materialized buffer.
//!
//! Cursors share one atomically advanced claim position over an immutable
//! buffer. A cursor with an empty window claims the next unclaimed chunk
//! with a single `fetch_add`, so claims are disjoint by construction and
//! every element lands in exactly one cursor, regardless of how unevenly the
//! cursors are drained. Which cursor ends up with which chunk is decided by
//! drain order at runtime; within a cursor, elements arrive in source order.

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::chunk::ChunkSize;
use crate::error::SplitError;
use crate::telemetry::{null_sink, SharedTelemetry};

/// Shared claim state: the buffer plus the next unclaimed index.
///
/// The buffer is frozen before any cursor exists; the counter is the only
/// state cursors mutate.
struct ClaimState<T> {
    buf: Arc<[T]>,
    next: AtomicUsize,
    chunk: usize,
    telemetry: SharedTelemetry,
}

/// Dynamic partitioner over a materialized source.
///
/// Splitting produces [`ChunkCursor`]s that race for chunks instead of
/// owning fixed ranges, so fast consumers automatically absorb the share of
/// slow ones. Repeated splits of the same partitioner are independent: each
/// split gets a fresh claim counter over the same shared buffer.
pub struct DynamicPartitioner<T> {
    buf: Arc<[T]>,
    chunk: ChunkSize,
    telemetry: SharedTelemetry,
}

impl<T> DynamicPartitioner<T> {
    /// Wraps a materialized source with the default auto chunk policy.
    pub fn new(source: impl Into<Arc<[T]>>) -> Self {
        Self {
            buf: source.into(),
            chunk: ChunkSize::Auto,
            telemetry: null_sink(),
        }
    }

    /// Overrides the chunk sizing policy.
    pub fn with_chunk_size(mut self, chunk: ChunkSize) -> Self {
        self.chunk = chunk;
        self
    }

    /// Injects a telemetry sink. Defaults to the no-op sink.
    pub fn with_telemetry(mut self, sink: SharedTelemetry) -> Self {
        self.telemetry = sink;
        self
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

    /// Splits the source into `parts` chunk-claiming cursors.
    ///
    /// Every cursor sees the whole buffer; none of them owns any of it until
    /// it claims a chunk. A cursor that is never drained simply claims
    /// nothing, and its share flows to its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ZeroPartitions`] when `parts` is zero, or
    /// [`SplitError::ZeroChunkSize`] for an explicit zero chunk.
    pub fn split(&self, parts: usize) -> Result<Vec<ChunkCursor<T>>, SplitError> {
        if parts == 0 {
            return Err(SplitError::ZeroPartitions);
        }
        let chunk = self.chunk.resolve_buffered(self.buf.len(), parts)?;
        self.telemetry.on_split("dynamic", parts, chunk);

        let state = Arc::new(ClaimState {
            buf: Arc::clone(&self.buf),
            next: AtomicUsize::new(0),
            chunk,
            telemetry: Arc::clone(&self.telemetry),
        });
        Ok((0..parts)
            .map(|_| ChunkCursor {
                state: Arc::clone(&state),
                window: 0..0,
                done: false,
            })
            .collect())
    }
}

impl<T> fmt::Debug for DynamicPartitioner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicPartitioner")
            .field("len", &self.buf.len())
            .field("chunk", &self.chunk)
            .finish_non_exhaustive()
    }
}

/// Cursor that claims chunks of a dynamically partitioned source on demand.
///
/// Exhaustion latches: once a cursor has seen the buffer fully claimed it
/// returns `None` forever without touching the shared counter again.
pub struct ChunkCursor<T> {
    state: Arc<ClaimState<T>>,
    window: Range<usize>,
    done: bool,
}

impl<T: Clone> Iterator for ChunkCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(index) = self.window.next() {
                return Some(self.state.buf[index].clone());
            }
            if self.done {
                return None;
            }

            // Relaxed is enough: the counter carries no data, and the buffer
            // it indexes was frozen before the cursors were handed out.
            let len = self.state.buf.len();
            let start = self.state.next.fetch_add(self.state.chunk, Ordering::Relaxed);
            if start >= len {
                self.done = true;
                self.state.telemetry.on_exhausted();
                return None;
            }
            let end = start.saturating_add(self.state.chunk).min(len);
            self.state.telemetry.on_claim(start, end - start);
            self.window = start..end;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.window.len();
        if self.done {
            (buffered, Some(buffered))
        } else {
            // Unclaimed work may still flow here, up to the whole remainder.
            (buffered, None)
        }
    }
}

impl<T> fmt::Debug for ChunkCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkCursor")
            .field("window", &self.window)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
