//! Coil drive state machine: fire gate and fixed-dwell turn-off

use crate::schedule::SparkSchedule;
use crate::types::IgnitionConfig;

/// Physical coil drive state
///
/// The on interval is always exactly `coil_dwell_us` regardless of
/// engine speed; only the off interval between fires varies (off-time
/// modulation). The rev limiter is evaluated once, at the moment of
/// intended turn-on, and never interrupts a coil that is already
/// energized.
pub struct CoilDriver {
    energized: bool,
    energized_at_us: u32,
    limiting: bool,
}

impl CoilDriver {
    /// Coil released, limiter clear
    pub const fn new() -> Self {
        Self {
            energized: false,
            energized_at_us: 0,
            limiting: false,
        }
    }

    /// Advance the coil state at `now_us`
    ///
    /// Consumes an expired spark from the schedule and applies the
    /// rev-limiter gate, then handles dwell expiry. The off transition
    /// is the actual spark event.
    pub fn tick(
        &mut self,
        now_us: u32,
        rpm: f32,
        schedule: &mut SparkSchedule,
        config: &IgnitionConfig,
    ) {
        if schedule.take_expired(now_us) {
            if rpm < config.rev_limit_rpm {
                self.energized = true;
                self.energized_at_us = now_us;
                self.limiting = false;
            } else {
                self.limiting = true;
            }
        }

        if self.energized && now_us.wrapping_sub(self.energized_at_us) > config.coil_dwell_us {
            self.energized = false;
        }
    }

    /// True while the coil is charging
    pub const fn is_energized(&self) -> bool {
        self.energized
    }

    /// True while the rev limiter is suppressing sparks
    pub const fn is_limiting(&self) -> bool {
        self.limiting
    }
}

impl Default for CoilDriver {
    fn default() -> Self {
        Self::new()
    }
}
