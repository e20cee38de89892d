//! Spark timing computation and the single pending schedule

use crate::types::IgnitionConfig;

/// Degrees of crankshaft rotation per microsecond per RPM:
/// `360 / (60 * 1_000_000)`
const DEG_PER_US_PER_RPM: f32 = 6.0e-6;

/// Below this speed the angle-to-delay conversion is numerically
/// unstable; the schedule degrades to "never fires until RPM rises"
const MIN_SCHEDULABLE_RPM: f32 = 10.0;

/// Finite stand-in for "never": far beyond any cranking period
pub const DELAY_NEVER_US: u32 = u32::MAX;

/// Compute the trigger-to-coil-on delay in microseconds for the
/// current engine speed
///
/// Starting from the base advance angle, the fixed coil-charge and
/// processing-latency time is converted to degrees at the current
/// speed and subtracted, along with the speed-proportional centrifugal
/// advance term. The result is clamped at zero (a spark can never be
/// scheduled before the trigger) and converted back to a delay.
pub fn compute_fire_delay(rpm: f32, config: &IgnitionConfig) -> u32 {
    if !(rpm >= MIN_SCHEDULABLE_RPM) {
        return DELAY_NEVER_US;
    }

    let deg_per_us = rpm * DEG_PER_US_PER_RPM;
    let charge_deg = config.charge_compensation_us() as f32 * deg_per_us;
    let centrifugal_deg = config.advance_per_rpm * rpm;

    let mut angle = config.base_timing_deg - charge_deg - centrifugal_deg;
    if angle < 0.0 {
        angle = 0.0;
    }

    (angle / deg_per_us) as u32
}

/// One pending ignition event
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingSpark {
    /// Trigger timestamp the delay is measured from
    pub armed_at_us: u32,
    /// Computed coil-on delay
    pub delay_us: u32,
}

/// At most one spark is ever scheduled; re-arming before expiry
/// silently replaces the pending event
#[derive(Default, Debug)]
pub struct SparkSchedule {
    pending: Option<PendingSpark>,
}

impl SparkSchedule {
    /// Idle schedule with nothing pending
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Arm a spark `delay_us` after `now_us`, replacing any pending one
    pub fn arm(&mut self, now_us: u32, delay_us: u32) {
        self.pending = Some(PendingSpark {
            armed_at_us: now_us,
            delay_us,
        });
    }

    /// Consume the pending spark if its delay has expired at `now_us`
    pub fn take_expired(&mut self, now_us: u32) -> bool {
        if let Some(spark) = self.pending {
            if now_us.wrapping_sub(spark.armed_at_us) > spark.delay_us {
                self.pending = None;
                return true;
            }
        }
        false
    }

    /// Returns true while a spark is waiting to fire
    pub const fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Currently pending spark, if any
    pub const fn pending(&self) -> Option<PendingSpark> {
        self.pending
    }
}
