//! Points edge detection and trigger timing history

use crate::types::EdgePolarity;

/// Interval sentinel: large enough that the initial RPM estimate reads
/// as near-zero until the first two edges have been seen
pub const INTERVAL_SENTINEL_US: u32 = u32::MAX;

/// Level-compare edge detector for the points sensor
///
/// No debounce is applied; the signal is trusted to be clean.
pub struct EdgeDetector {
    polarity: EdgePolarity,
    last_level: bool,
}

impl EdgeDetector {
    /// Create a detector with the given polarity and idle line level
    pub const fn new(polarity: EdgePolarity, idle_level: bool) -> Self {
        Self {
            polarity,
            last_level: idle_level,
        }
    }

    /// Feed one sample of the points level
    ///
    /// Returns true exactly on the configured transition. The stored
    /// previous level is always updated, trigger or not.
    pub fn update(&mut self, level: bool) -> bool {
        let triggered = self.polarity.matches(self.last_level, level);
        self.last_level = level;
        triggered
    }

    /// Last observed line level
    pub const fn last_level(&self) -> bool {
        self.last_level
    }
}

/// Timing of the most recent points edges
///
/// Only `record` mutates this; both fields refer to the free-running
/// microsecond counter and wrap with it.
#[derive(Copy, Clone, Debug)]
pub struct TriggerHistory {
    last_trigger_us: u32,
    interval_us: u32,
}

impl TriggerHistory {
    /// "Never triggered" baseline
    pub const fn new() -> Self {
        Self {
            last_trigger_us: 0,
            interval_us: INTERVAL_SENTINEL_US,
        }
    }

    /// Record a trigger edge at `now_us`
    pub fn record(&mut self, now_us: u32) {
        self.interval_us = now_us.wrapping_sub(self.last_trigger_us);
        self.last_trigger_us = now_us;
    }

    /// Timestamp of the last recorded trigger
    pub const fn last_trigger_us(&self) -> u32 {
        self.last_trigger_us
    }

    /// Last measured inter-trigger interval
    pub const fn interval_us(&self) -> u32 {
        self.interval_us
    }

    /// Microseconds elapsed since the last trigger
    pub fn elapsed_us(&self, now_us: u32) -> u32 {
        now_us.wrapping_sub(self.last_trigger_us)
    }
}

impl Default for TriggerHistory {
    fn default() -> Self {
        Self::new()
    }
}
