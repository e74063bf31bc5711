// SPDX-License-Identifier: Apache-2.0
//! Draining partition cursors, sequentially or one worker per cursor.
//!
//! These helpers own the thread fan-out so callers and tests exercise the
//! same drain loop. Workers are scoped: they may borrow from the caller's
//! stack and are always joined before the helper returns.

use std::panic;
use std::thread;

/// Fully drains every cursor on the calling thread, in cursor order.
///
/// Against a dynamic partitioner this degenerates into the first cursor
/// claiming the entire source, which is valid load balancing, just not
/// parallel.
pub fn drain_sequential<C, T>(cursors: Vec<C>) -> Vec<T>
where
    C: Iterator<Item = T>,
{
    let mut out = Vec::new();
    for cursor in cursors {
        out.extend(cursor);
    }
    out
}

/// Drains every cursor on its own scoped worker and concatenates the
/// results in cursor order.
///
/// Cursor order in the output says nothing about claim order: against a
/// dynamic partitioner the split of elements between segments is decided by
/// the race. Within one cursor's segment, elements keep the order the
/// cursor yielded them.
///
/// # Panics
///
/// Re-raises the first worker panic after all workers have been joined.
pub fn drain_parallel<C, T>(cursors: Vec<C>) -> Vec<T>
where
    C: Iterator<Item = T> + Send,
    T: Send,
{
    let parts = thread::scope(|scope| {
        let handles: Vec<_> = cursors
            .into_iter()
            .map(|cursor| scope.spawn(move || cursor.collect::<Vec<T>>()))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(part) => part,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect::<Vec<Vec<T>>>()
    });

    let total = parts.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    for mut part in parts {
        out.append(&mut part);
    }
    out
}

/// Applies `action` to every element of every cursor, one scoped worker per
/// cursor.
///
/// The action runs concurrently on all workers and must therefore be
/// [`Sync`]; elements never cross threads, so the item type needs no bound.
///
/// # Panics
///
/// Re-raises the first worker panic after all workers have been joined.
pub fn for_each_parallel<C, T, F>(cursors: Vec<C>, action: F)
where
    C: Iterator<Item = T> + Send,
    F: Fn(T) + Sync,
{
    thread::scope(|scope| {
        let action = &action;
        let handles: Vec<_> = cursors
            .into_iter()
            .map(|cursor| {
                scope.spawn(move || {
                    for value in cursor {
                        action(value);
                    }
                })
            })
            .collect();

        for handle in handles {
            if let Err(payload) = handle.join() {
                panic::resume_unwind(payload);
            }
        }
    });
}
