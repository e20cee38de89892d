// Smoke runner: drives the full controller through a simulated crank
// session and prints what a bench test would measure.

use ignition_core::test_utils::capture::SparkCapture;
use ignition_core::test_utils::crank::{run_steps, CrankSimulator};
use ignition_core::{default_config, EdgePolarity, EngineState, IgnitionController};

const POLL_US: u32 = 50;

fn main() {
    println!("ignition controller smoke run");
    println!("calibration: {:?}", default_config());
    println!();

    run_steady_state(1_200);
    run_steady_state(800);
    run_stall();

    println!("all smoke checks passed");
}

fn run_steady_state(rpm: u32) {
    let config = default_config();
    let mut controller = IgnitionController::new(config, true);
    let crank = CrankSimulator::from_rpm(rpm, 500, EdgePolarity::Falling);
    let interval = crank.interval_us();

    // Two revolutions of warm-up, ten of measurement
    run_steps(&mut controller, &crank, 0, 2 * interval, POLL_US, |_, _| {});

    let mut capture = SparkCapture::new();
    run_steps(
        &mut controller,
        &crank,
        2 * interval,
        10 * interval,
        POLL_US,
        |now, out| capture.update(now, out.coil),
    );

    let sparks = capture.events().len();
    let dwell_err = capture.max_dwell_error_us(config.coil_dwell_us);
    let fire_offset = capture
        .events()
        .first()
        .map(|e| e.on_at_us % interval)
        .unwrap_or(0);

    println!("steady {rpm} rpm:");
    println!("  estimated rpm     {:.1}", controller.rpm());
    println!("  sparks captured   {sparks}");
    println!("  fire offset       {fire_offset} us after trigger");
    println!("  max dwell error   {dwell_err} us");

    assert!(sparks >= 9, "missing sparks at {rpm} rpm");
    assert!(dwell_err <= 2 * POLL_US, "dwell out of tolerance");
    assert!((controller.rpm() - rpm as f32).abs() < 1.0);
}

fn run_stall() {
    let config = default_config();
    let mut controller = IgnitionController::new(config, true);
    let crank = CrankSimulator::from_rpm(1_200, 500, EdgePolarity::Falling);

    run_steps(&mut controller, &crank, 0, 200_000, POLL_US, |_, _| {});
    assert_eq!(controller.engine_state(), EngineState::Running);

    // Kill the points signal and watch the classification decay
    let mut now = 200_000_u32;
    let mut stalled_at = None;
    while now < 1_000_000 {
        controller.step(true, now, now / 1_000);
        if stalled_at.is_none() && controller.engine_state() == EngineState::Stalled {
            stalled_at = Some(now);
        }
        now += POLL_US;
    }

    let stalled_at = stalled_at.expect("stall never detected");
    println!("stall detection:");
    println!(
        "  detected {} ms after the last trigger edge",
        (stalled_at - 150_000) / 1_000
    );
    assert!(controller.engine_state() == EngineState::Stalled);
}
