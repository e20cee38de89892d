//! Loop orchestration: one controller owns all timing state

use crate::coil::CoilDriver;
use crate::rpm::estimate_rpm;
use crate::schedule::{compute_fire_delay, SparkSchedule};
use crate::stall::StallMonitor;
use crate::trigger::{EdgeDetector, TriggerHistory};
use crate::types::{EngineState, IgnitionConfig};

/// Output levels produced by one controller step
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutputs {
    /// A trigger edge was detected this iteration
    pub triggered: bool,
    /// Current speed estimate
    pub rpm: f32,
    /// Coil drive level (true = charging)
    pub coil: bool,
    /// Rev-limiter indicator level
    pub limiter: bool,
    /// Status indicator level
    pub status: bool,
}

/// The ignition controller
///
/// Owns the edge detector, trigger history, spark schedule, coil
/// driver and stall monitor; stepped once per iteration of the
/// unbounded control loop. Everything is recomputed fresh each step,
/// so a transient bad reading self-corrects on the next edge.
pub struct IgnitionController {
    config: IgnitionConfig,
    detector: EdgeDetector,
    history: TriggerHistory,
    schedule: SparkSchedule,
    coil: CoilDriver,
    stall: StallMonitor,
    rpm: f32,
}

impl IgnitionController {
    /// Create a controller in the "never triggered" baseline
    ///
    /// `idle_level` is the points line level at rest, used to seed the
    /// edge detector so power-up does not produce a phantom trigger.
    pub const fn new(config: IgnitionConfig, idle_level: bool) -> Self {
        Self {
            detector: EdgeDetector::new(config.polarity, idle_level),
            history: TriggerHistory::new(),
            schedule: SparkSchedule::new(),
            coil: CoilDriver::new(),
            stall: StallMonitor::new(),
            rpm: 0.0,
            config,
        }
    }

    /// Run one control-loop iteration
    ///
    /// Fixed order: detect -> record -> estimate -> arm -> fire-check
    /// -> dwell-check -> stall-check. A trigger edge silently replaces
    /// any still-pending spark.
    pub fn step(&mut self, level: bool, now_us: u32, now_ms: u32) -> StepOutputs {
        let triggered = self.detector.update(level);
        if triggered {
            self.history.record(now_us);
        }

        self.rpm = estimate_rpm(&self.history, now_us, &self.config);

        if triggered {
            let delay = compute_fire_delay(self.rpm, &self.config);
            self.schedule.arm(now_us, delay);
        }

        self.coil
            .tick(now_us, self.rpm, &mut self.schedule, &self.config);
        self.stall.tick(now_ms, self.rpm, &self.config);

        StepOutputs {
            triggered,
            rpm: self.rpm,
            coil: self.coil.is_energized(),
            limiter: self.coil.is_limiting(),
            status: self.stall.indicator_on(),
        }
    }

    /// Latest speed estimate
    pub const fn rpm(&self) -> f32 {
        self.rpm
    }

    /// Current running classification
    pub const fn engine_state(&self) -> EngineState {
        self.stall.state()
    }

    /// Current configuration
    pub const fn config(&self) -> &IgnitionConfig {
        &self.config
    }
}

/// Async task running the polling control loop over an [`IgnitionHal`]
///
/// Never returns. A failed trigger read skips the iteration (the state
/// self-corrects on the next edge); output write failures are ignored
/// so the loop can never terminate.
#[cfg(feature = "embassy-time")]
pub async fn control_task<H: crate::hal::IgnitionHal>(hal: &mut H, config: IgnitionConfig) -> ! {
    use crate::hal::{Clock, CoilOutput, IndicatorOutput, TriggerInput};
    use embassy_time::{Duration, Timer};

    // One timer tick between polls; effective scheduling resolution is
    // one loop iteration, compensated by `program_delay_us`
    const POLL: Duration = Duration::from_ticks(1);

    let idle_level = hal.trigger().level().unwrap_or(true);
    let mut controller = IgnitionController::new(config, idle_level);

    loop {
        let (now_us, now_ms) = {
            let clock = hal.clock();
            (clock.now_us(), clock.now_ms())
        };

        if let Ok(level) = hal.trigger().level() {
            let outputs = controller.step(level, now_us, now_ms);

            hal.coil().set_energized(outputs.coil).ok();
            hal.limiter_indicator().set_on(outputs.limiter).ok();
            hal.status_indicator().set_on(outputs.status).ok();

            #[cfg(feature = "defmt")]
            if outputs.triggered {
                defmt::trace!("trigger: rpm {}", outputs.rpm);
            }
        }

        Timer::after(POLL).await;
    }
}
