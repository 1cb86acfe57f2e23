//! Memory guard for result accumulation
//!
//! The guard compares `current_usage / ceiling` against the warning ratio.
//! It is consulted once per fetch-loop iteration, so a single oversized page
//! can still overshoot before the next check. This is a soft limit.

use super::probe::MemoryProbe;

/// Memory ceiling and warning ratio, read once per pagination run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryThreshold {
    ceiling_bytes: u64,
    warning_ratio: f64,
}

impl MemoryThreshold {
    /// Create a threshold. A ceiling of 0 means unbounded.
    pub fn new(ceiling_bytes: u64, warning_ratio: f64) -> Self {
        Self {
            ceiling_bytes,
            warning_ratio,
        }
    }

    /// A threshold that never trips
    pub fn unbounded() -> Self {
        Self::new(0, 1.0)
    }

    pub fn ceiling_bytes(&self) -> u64 {
        self.ceiling_bytes
    }

    pub fn warning_ratio(&self) -> f64 {
        self.warning_ratio
    }

    pub fn is_unbounded(&self) -> bool {
        self.ceiling_bytes == 0
    }
}

/// Result of a single guard check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuardReading {
    /// No ceiling configured; nothing was sampled
    Unbounded,
    /// Usage is at or below the warning ratio
    WithinLimit { usage_bytes: u64, ratio: f64 },
    /// Usage is above the warning ratio; accumulation must stop
    Exceeded { usage_bytes: u64, ratio: f64 },
}

impl GuardReading {
    pub fn is_exceeded(&self) -> bool {
        matches!(self, GuardReading::Exceeded { .. })
    }
}

/// Samples a probe against a threshold
pub struct MemoryGuard<P: MemoryProbe> {
    probe: P,
    threshold: MemoryThreshold,
}

impl<P: MemoryProbe> MemoryGuard<P> {
    pub fn new(probe: P, threshold: MemoryThreshold) -> Self {
        Self { probe, threshold }
    }

    pub fn threshold(&self) -> MemoryThreshold {
        self.threshold
    }

    /// Sample current usage and compare it with the threshold.
    ///
    /// An unbounded threshold never samples the probe.
    pub fn check(&mut self) -> GuardReading {
        if self.threshold.is_unbounded() {
            return GuardReading::Unbounded;
        }

        let usage_bytes = self.probe.current_usage();
        let ratio = usage_bytes as f64 / self.threshold.ceiling_bytes as f64;

        if ratio > self.threshold.warning_ratio {
            GuardReading::Exceeded { usage_bytes, ratio }
        } else {
            GuardReading::WithinLimit { usage_bytes, ratio }
        }
    }
}
