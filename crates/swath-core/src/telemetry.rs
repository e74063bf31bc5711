// SPDX-License-Identifier: Apache-2.0
//! Claim telemetry sinks.
//!
//! The dynamic partitioners report splits and claims to an injected
//! [`TelemetrySink`]. The default [`NullTelemetrySink`] keeps the claim path
//! free of observation cost; [`JsonlTelemetrySink`] emits one JSON line per
//! event on stdout for ad-hoc inspection of claim behavior. Event lines are
//! formatted by hand so the sink stays dependency-free.

use std::io::Write as _;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Shared handle to a telemetry sink.
pub type SharedTelemetry = Arc<dyn TelemetrySink>;

/// Receives partitioner lifecycle events.
///
/// `on_claim` runs on the claim path of every cursor, so implementations
/// should be cheap and must never block on the caller's own progress.
pub trait TelemetrySink: Send + Sync {
    /// A split produced `parts` cursors claiming `chunk` elements at a time.
    fn on_split(&self, strategy: &'static str, parts: usize, chunk: usize);

    /// A cursor claimed `len` elements starting at source position `start`.
    ///
    /// For the lazy strategy, `start` is the running count of elements handed
    /// out before this claim rather than a buffer index.
    fn on_claim(&self, start: usize, len: usize);

    /// A cursor observed the source fully claimed and latched itself done.
    fn on_exhausted(&self);
}

/// Sink that drops every event. This is the default for every partitioner.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTelemetrySink;

impl TelemetrySink for NullTelemetrySink {
    fn on_split(&self, _strategy: &'static str, _parts: usize, _chunk: usize) {}

    fn on_claim(&self, _start: usize, _len: usize) {}

    fn on_exhausted(&self) {}
}

/// Sink that writes one JSON line per event to stdout.
///
/// Output is best-effort: write failures are swallowed and the timestamp
/// falls back to zero if the clock reads before the epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonlTelemetrySink;

fn ts_micros() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros()
}

impl TelemetrySink for JsonlTelemetrySink {
    fn on_split(&self, strategy: &'static str, parts: usize, chunk: usize) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "{{\"timestamp_micros\":{},\"event\":\"split\",\"strategy\":\"{strategy}\",\"parts\":{parts},\"chunk\":{chunk}}}",
            ts_micros(),
        );
    }

    fn on_claim(&self, start: usize, len: usize) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "{{\"timestamp_micros\":{},\"event\":\"claim\",\"start\":{start},\"len\":{len}}}",
            ts_micros(),
        );
    }

    fn on_exhausted(&self) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "{{\"timestamp_micros\":{},\"event\":\"exhausted\"}}",
            ts_micros(),
        );
    }
}

/// Returns the shared no-op sink used when no sink is injected.
pub(crate) fn null_sink() -> SharedTelemetry {
    Arc::new(NullTelemetrySink)
}
