// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use swath_core::TelemetrySink;

/// Tiny deterministic RNG (splitmix64) so tests don't need `rand`.
///
/// Any seed is fine, zero included: the state increments before mixing.
#[derive(Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in the splitmix64 sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut mixed = self.state;
        mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        mixed ^ (mixed >> 31)
    }

    /// Uniform-ish value in `[0, upper)`; modulo bias is irrelevant at test
    /// sizes.
    pub fn below(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }
}

/// In-place Fisher-Yates shuffle driven by the seeded RNG.
pub fn shuffle<T>(rng: &mut SplitMix64, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// Distinct values `0..len` in a seed-determined order.
///
/// Distinctness makes recombination failures maximally visible: any dropped
/// or duplicated element changes the multiset.
pub fn shuffled_values(seed: u64, len: usize) -> Vec<u64> {
    let mut values: Vec<u64> = (0..len as u64).collect();
    let mut rng = SplitMix64::new(seed);
    shuffle(&mut rng, &mut values);
    values
}

/// Useful seed set for determinism drills.
pub const SEEDS: &[u64] = &[
    0x0000_0000_0000_0001,
    0x1234_5678_9ABC_DEF0,
    0xDEAD_BEEF_CAFE_BABE,
    0xFEED_FACE_0123_4567,
    0x0F0F_0F0F_F0F0_F0F0,
];

/// Partition counts to prove behavior doesn't depend on num_cpus.
pub const PARTITION_COUNTS: &[usize] = &[1, 2, 4, 8, 16, 32];

/// Telemetry sink that records every event for post-drain auditing.
#[derive(Default)]
pub struct RecordingSink {
    /// `(parts, chunk)` per split event.
    pub splits: Mutex<Vec<(usize, usize)>>,
    /// `(start, len)` per claim event, in emission order.
    pub claims: Mutex<Vec<(usize, usize)>>,
    /// Number of cursor exhaustion events observed.
    pub exhausted: AtomicUsize,
}

impl TelemetrySink for RecordingSink {
    fn on_split(&self, _strategy: &'static str, parts: usize, chunk: usize) {
        self.splits.lock().unwrap().push((parts, chunk));
    }

    fn on_claim(&self, start: usize, len: usize) {
        self.claims.lock().unwrap().push((start, len));
    }

    fn on_exhausted(&self) {
        self.exhausted.fetch_add(1, Ordering::Relaxed);
    }
}

impl RecordingSink {
    /// Returns the recorded claims sorted by start position.
    pub fn claims_by_start(&self) -> Vec<(usize, usize)> {
        let mut claims = self.claims.lock().unwrap().clone();
        claims.sort_unstable();
        claims
    }
}

/// Asserts that the recorded claims tile `[0, len)` with no gap or overlap.
///
/// Claim emission order is racy; only the claimed intervals themselves are
/// deterministic, so the check runs on start-sorted claims.
pub fn assert_claims_tile(sink: &RecordingSink, len: usize) {
    let claims = sink.claims_by_start();
    let mut cursor = 0usize;
    for (start, claim_len) in claims {
        assert_eq!(
            start, cursor,
            "claim starts at {start}, expected {cursor} (gap or overlap)"
        );
        assert!(claim_len > 0, "empty claim at {start}");
        cursor += claim_len;
    }
    assert_eq!(cursor, len, "claims cover {cursor} of {len} elements");
}
