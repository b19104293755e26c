//! Process-wide counters for fetches, errors and rendered output
//!
//! Counters are plain atomics updated with relaxed ordering. Each one only
//! ever grows; there is no atomicity across fields, so a snapshot taken while
//! a cycle is running may mix values from before and after a step.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running totals shared by the fetch client, orchestrator and renderers
#[derive(Debug, Default)]
pub struct Metrics {
    fetch_attempts: AtomicU64,
    errors: AtomicU64,
    rendered_bytes: AtomicU64,
    aborted_cycles: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    /// Cycles that were started (one per trigger, not one per endpoint)
    pub fetch_attempts: u64,
    /// Failed fetches
    pub errors: u64,
    /// Sum of the serialized JSON size of every payload handed to a renderer.
    /// This is the whole body, including starships past the first three and
    /// planets the filter drops, not the size of the printed lines.
    pub rendered_bytes: u64,
    /// Cycles that stopped early because a step failed
    pub aborted_cycles: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetch_attempt(&self) {
        self.fetch_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rendered(&self, bytes: u64) {
        self.rendered_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_aborted_cycle(&self) {
        self.aborted_cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            fetch_attempts: self.fetch_attempts.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            rendered_bytes: self.rendered_bytes.load(Ordering::Relaxed),
            aborted_cycles: self.aborted_cycles.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_start_at_zero() {
        let snap = Metrics::new().snapshot();
        assert_eq!(snap.fetch_attempts, 0);
        assert_eq!(snap.errors, 0);
        assert_eq!(snap.rendered_bytes, 0);
        assert_eq!(snap.aborted_cycles, 0);
    }

    #[test]
    fn test_counters_accumulate_independently() {
        let metrics = Metrics::new();
        metrics.record_fetch_attempt();
        metrics.record_fetch_attempt();
        metrics.record_error();
        metrics.record_rendered(120);
        metrics.record_rendered(30);
        metrics.record_aborted_cycle();

        let snap = metrics.snapshot();
        assert_eq!(snap.fetch_attempts, 2);
        assert_eq!(snap.errors, 1);
        assert_eq!(snap.rendered_bytes, 150);
        assert_eq!(snap.aborted_cycles, 1);
        assert_eq!(metrics.errors(), 1);
    }

    #[test]
    fn test_snapshot_serializes_field_names() {
        let metrics = Metrics::new();
        metrics.record_error();

        let json = serde_json::to_value(metrics.snapshot()).expect("snapshot should serialize");
        assert_eq!(json["errors"], 1);
        assert_eq!(json["fetch_attempts"], 0);
    }
}
