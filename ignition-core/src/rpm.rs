//! Engine speed estimation from points-edge intervals

use crate::trigger::TriggerHistory;
use crate::types::IgnitionConfig;

/// Defensive clamp for degenerate (zero) intervals; keeps the estimate
/// finite instead of propagating infinity or NaN
pub const RPM_CEILING: f32 = 60_000.0;

/// Estimate engine speed from the trigger history at `now_us`
///
/// While less time has elapsed since the last edge than the last
/// measured interval, the engine is trusted to still be turning at the
/// confirmed rate and the recorded interval is used. Once the elapsed
/// time exceeds that interval the elapsed time itself becomes the
/// divisor, so the estimate decays toward zero as the engine coasts
/// down or stalls instead of freezing at the last known speed.
pub fn estimate_rpm(history: &TriggerHistory, now_us: u32, config: &IgnitionConfig) -> f32 {
    let elapsed = history.elapsed_us(now_us);
    let interval = if elapsed < history.interval_us() {
        history.interval_us()
    } else {
        elapsed
    };

    if interval == 0 {
        return RPM_CEILING;
    }

    let rpm = (1_000_000.0 / interval as f32) / config.pulses_per_rev as f32 * 60.0;
    rpm.min(RPM_CEILING)
}
