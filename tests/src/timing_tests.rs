//! Numeric properties of the RPM estimator and timing scheduler

use ignition_core::{
    compute_fire_delay, default_config, estimate_rpm, TriggerHistory, DELAY_NEVER_US,
};
use proptest::prelude::*;
use rstest::rstest;

fn confirmed_history(last_us: u32, interval_us: u32) -> TriggerHistory {
    let mut history = TriggerHistory::new();
    history.record(last_us.wrapping_sub(interval_us));
    history.record(last_us);
    history
}

#[rstest]
#[case(50_000, 1_200.0)] // reference scenario
#[case(75_000, 800.0)]
#[case(30_000, 2_000.0)]
#[case(200_000, 300.0)]
fn rpm_from_confirmed_interval(#[case] interval_us: u32, #[case] expected_rpm: f32) {
    let config = default_config();
    let history = confirmed_history(1_000_000, interval_us);

    // Sampled before another full period has elapsed
    let rpm = estimate_rpm(&history, 1_000_000 + interval_us / 2, &config);
    assert!(
        (rpm - expected_rpm).abs() < 0.5,
        "interval {interval_us} gave {rpm}, expected {expected_rpm}"
    );
}

#[rstest]
#[case(1_200.0, 0)] // charge compensation swamps the base angle
#[case(800.0, 466)] // 8 - 5.76 = 2.24 deg -> 466.7 us
fn fire_delay_reference_scenarios(#[case] rpm: f32, #[case] expected_us: u32) {
    let config = default_config();
    let delay = compute_fire_delay(rpm, &config);
    assert!(
        delay.abs_diff(expected_us) <= 1,
        "rpm {rpm} gave {delay} us, expected {expected_us} us"
    );
}

proptest! {
    /// Elapsed time shorter than the confirmed interval: the estimate
    /// comes from the interval alone
    #[test]
    fn rpm_matches_interval_formula(interval_us in 5_000u32..2_000_000, frac in 0.0f32..0.99) {
        let config = default_config();
        let history = confirmed_history(10_000_000, interval_us);
        let now = 10_000_000 + (interval_us as f32 * frac) as u32;

        let rpm = estimate_rpm(&history, now, &config);
        let expected = 60_000_000.0 / interval_us as f32 / config.pulses_per_rev as f32;
        prop_assert!((rpm - expected).abs() < expected * 1e-4);
    }

    /// Once the points go quiet the estimate decays strictly with
    /// elapsed time (coasting to a stop)
    #[test]
    fn rpm_decays_after_interval(interval_us in 5_000u32..500_000, extra in 1_000u32..2_000_000) {
        let config = default_config();
        let history = confirmed_history(10_000_000, interval_us);

        let e1 = interval_us + extra;
        let e2 = e1 + 10_000;
        let rpm1 = estimate_rpm(&history, 10_000_000 + e1, &config);
        let rpm2 = estimate_rpm(&history, 10_000_000 + e2, &config);

        let expected = 60_000_000.0 / e1 as f32;
        prop_assert!((rpm1 - expected).abs() < expected * 1e-4);
        prop_assert!(rpm2 < rpm1);
    }

    /// The computed delay is finite for any plausible running speed
    #[test]
    fn fire_delay_bounded(rpm in 50.0f32..20_000.0) {
        let config = default_config();
        let delay = compute_fire_delay(rpm, &config);
        prop_assert!(delay < DELAY_NEVER_US);
        // Never longer than one revolution once the engine truly turns
        if rpm >= 100.0 {
            let revolution_us = (60_000_000.0 / rpm) as u32;
            prop_assert!(delay <= revolution_us);
        }
    }

    /// Angle -> delay -> angle round-trips on the unclamped path
    #[test]
    fn angle_delay_round_trip(rpm in 200.0f32..3_000.0) {
        // A 45 deg base keeps the angle positive across this range, so
        // no clamping interferes with the inversion
        let mut config = default_config();
        config.base_timing_deg = 45.0;

        let deg_per_us = rpm * 6.0e-6;
        let expected_angle =
            config.base_timing_deg - config.charge_compensation_us() as f32 * deg_per_us;
        prop_assert!(expected_angle > 0.0);

        let delay = compute_fire_delay(rpm, &config);
        let recovered_angle = delay as f32 * deg_per_us;
        prop_assert!(
            (recovered_angle - expected_angle).abs() < 0.1,
            "rpm {} expected {} recovered {}",
            rpm,
            expected_angle,
            recovered_angle
        );
    }
}
