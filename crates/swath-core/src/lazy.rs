// SPDX-License-Identifier: Apache-2.0
//! Dynamic partitioning over a lazily produced source.
//!
//! When the source is an iterator of unknown length there is no buffer to
//! index, so cursors claim by pulling: each claim locks the shared feed and
//! pulls up to one chunk of elements into a private window. The mutex
//! serializes pulls, which keeps the source iterator's own state safe while
//! still letting any cursor take the next chunk. Elements are moved, never
//! cloned, so item types carry no `Clone` bound.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::chunk::{ChunkSize, LAZY_AUTO_CHUNK};
use crate::error::SplitError;
use crate::telemetry::{null_sink, SharedTelemetry};

/// The shared source iterator plus its exhaustion flag.
struct Feed<I> {
    iter: I,
    handed_out: usize,
    done: bool,
}

struct FeedShared<I> {
    feed: Mutex<Feed<I>>,
    chunk: usize,
    telemetry: SharedTelemetry,
}

/// Dynamic partitioner over a source iterator of unknown length.
///
/// Splitting consumes the partitioner, because the cursors jointly own the
/// one pass over the source. For a materialized source prefer
/// [`DynamicPartitioner`](crate::DynamicPartitioner), whose claims are a
/// single atomic add instead of a lock.
pub struct LazyPartitioner<I> {
    iter: I,
    chunk: ChunkSize,
    telemetry: SharedTelemetry,
}

impl<I: Iterator> LazyPartitioner<I> {
    /// Wraps a source iterator with the default auto chunk policy.
    pub fn new(source: I) -> Self {
        Self {
            iter: source,
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

    /// Splits the source into `parts` pull-claiming cursors.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ZeroPartitions`] when `parts` is zero, or
    /// [`SplitError::ZeroChunkSize`] for an explicit zero chunk.
    pub fn split(self, parts: usize) -> Result<Vec<FeedCursor<I>>, SplitError> {
        if parts == 0 {
            return Err(SplitError::ZeroPartitions);
        }
        let chunk = self.chunk.resolve_lazy()?;
        self.telemetry.on_split("lazy", parts, chunk);

        let shared = Arc::new(FeedShared {
            feed: Mutex::new(Feed {
                iter: self.iter,
                handed_out: 0,
                done: false,
            }),
            chunk,
            telemetry: self.telemetry,
        });
        Ok((0..parts)
            .map(|_| FeedCursor {
                shared: Arc::clone(&shared),
                window: Vec::new().into_iter(),
                done: false,
            })
            .collect())
    }
}

impl<I> fmt::Debug for LazyPartitioner<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyPartitioner")
            .field("chunk", &self.chunk)
            .finish_non_exhaustive()
    }
}

/// Cursor that pulls chunks from a shared lazy source on demand.
///
/// Exhaustion latches exactly as for the buffered cursors: after one empty
/// pull the cursor never takes the feed lock again.
pub struct FeedCursor<I: Iterator> {
    shared: Arc<FeedShared<I>>,
    window: std::vec::IntoIter<I::Item>,
    done: bool,
}

impl<I: Iterator> FeedCursor<I> {
    /// Pulls up to one chunk from the feed. An empty result means the source
    /// is exhausted.
    fn claim(&self) -> Vec<I::Item> {
        // A poisoned feed still holds a coherent iterator; a sibling's panic
        // must not strand the remaining elements.
        let mut feed = self
            .shared
            .feed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if feed.done {
            return Vec::new();
        }

        // The chunk is a pull count, not an allocation size: cap the hint
        // and let an oversized pull grow as it fills.
        let mut pulled = Vec::with_capacity(self.shared.chunk.min(LAZY_AUTO_CHUNK));
        while pulled.len() < self.shared.chunk {
            match feed.iter.next() {
                Some(value) => pulled.push(value),
                None => {
                    feed.done = true;
                    break;
                }
            }
        }
        let start = feed.handed_out;
        feed.handed_out += pulled.len();
        drop(feed);

        if !pulled.is_empty() {
            self.shared.telemetry.on_claim(start, pulled.len());
        }
        pulled
    }
}

impl<I: Iterator> Iterator for FeedCursor<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            if let Some(value) = self.window.next() {
                return Some(value);
            }
            if self.done {
                return None;
            }

            let claimed = self.claim();
            if claimed.is_empty() {
                self.done = true;
                self.shared.telemetry.on_exhausted();
                return None;
            }
            self.window = claimed.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.window.len();
        if self.done {
            (buffered, Some(buffered))
        } else {
            (buffered, None)
        }
    }
}

impl<I: Iterator> fmt::Debug for FeedCursor<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedCursor")
            .field("buffered", &self.window.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
