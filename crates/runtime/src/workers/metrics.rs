//! Invocation and regeneration counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by the pipeline and the workers.
///
/// Uses atomics for lock-free access across tasks.
#[derive(Debug, Default)]
pub struct RealmMetrics {
    /// Invocations that paid their cost
    invocations: AtomicU64,
    /// Invocations rejected during validation or payment
    rejected: AtomicU64,
    targets_attempted: AtomicU64,
    /// Per-target application failures (target died or left)
    hit_failures: AtomicU64,
    kills: AtomicU64,
    regeneration_ticks: AtomicU64,
    /// Current pools written by regeneration
    regeneration_writes: AtomicU64,
}

impl RealmMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_invocation(&self, targets_attempted: usize, hit_failures: usize, kills: usize) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        self.targets_attempted
            .fetch_add(targets_attempted as u64, Ordering::Relaxed);
        self.hit_failures
            .fetch_add(hit_failures as u64, Ordering::Relaxed);
        self.kills.fetch_add(kills as u64, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_regeneration_tick(&self, writes: usize) {
        self.regeneration_ticks.fetch_add(1, Ordering::Relaxed);
        self.regeneration_writes
            .fetch_add(writes as u64, Ordering::Relaxed);
    }

    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    pub fn regeneration_ticks(&self) -> u64 {
        self.regeneration_ticks.load(Ordering::Relaxed)
    }

    /// Share of invocations that were carried through, as a percentage (0-100).
    pub fn acceptance_rate(&self) -> f64 {
        let accepted = self.invocations();
        let total = accepted + self.rejected();
        if total == 0 {
            100.0
        } else {
            (accepted as f64 / total as f64) * 100.0
        }
    }

    /// Creates a snapshot of all counters for display/logging.
    ///
    /// Individual fields are read atomically but the snapshot as a whole may
    /// be inconsistent while tasks are updating it.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            invocations: self.invocations(),
            rejected: self.rejected(),
            targets_attempted: self.targets_attempted.load(Ordering::Relaxed),
            hit_failures: self.hit_failures.load(Ordering::Relaxed),
            kills: self.kills.load(Ordering::Relaxed),
            regeneration_ticks: self.regeneration_ticks(),
            regeneration_writes: self.regeneration_writes.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub invocations: u64,
    pub rejected: u64,
    pub targets_attempted: u64,
    pub hit_failures: u64,
    pub kills: u64,
    pub regeneration_ticks: u64,
    pub regeneration_writes: u64,
}
