//! Engine-running classification and status indicator drive

use crate::types::{EngineState, IgnitionConfig};

/// Stall classifier and status lamp state
///
/// Steady-on while running, blinking at `blink_ms` while stalled. No
/// hysteresis is applied around the threshold; an RPM oscillating near
/// `stall_rpm` flaps the state each iteration (kept from the original
/// design intent, see the host tests).
pub struct StallMonitor {
    stalled: bool,
    indicator_on: bool,
    last_blink_ms: u32,
}

impl StallMonitor {
    /// Start stalled with the indicator off
    pub const fn new() -> Self {
        Self {
            stalled: true,
            indicator_on: false,
            last_blink_ms: 0,
        }
    }

    /// Reclassify at `now_ms` from the current speed estimate
    pub fn tick(&mut self, now_ms: u32, rpm: f32, config: &IgnitionConfig) {
        self.stalled = rpm < config.stall_rpm;

        if !self.stalled {
            self.indicator_on = true;
        } else if now_ms.wrapping_sub(self.last_blink_ms) > config.blink_ms {
            self.indicator_on = !self.indicator_on;
            self.last_blink_ms = now_ms;
        }
    }

    /// Current classification
    pub const fn state(&self) -> EngineState {
        if self.stalled {
            EngineState::Stalled
        } else {
            EngineState::Running
        }
    }

    /// Status indicator level
    pub const fn indicator_on(&self) -> bool {
        self.indicator_on
    }
}

impl Default for StallMonitor {
    fn default() -> Self {
        Self::new()
    }
}
