//! Test utilities: crank simulation and spark capture

pub mod crank {
    //! Simulated crankshaft driving the controller through time

    use crate::controller::{IgnitionController, StepOutputs};
    use crate::types::EdgePolarity;

    /// Simulated points line for a crank turning at a fixed period
    ///
    /// The line idles at the non-trigger level and dips to the trigger
    /// level for `pulse_width_us` once per `interval_us`.
    pub struct CrankSimulator {
        interval_us: u32,
        pulse_width_us: u32,
        polarity: EdgePolarity,
    }

    impl CrankSimulator {
        pub fn new(interval_us: u32, pulse_width_us: u32, polarity: EdgePolarity) -> Self {
            Self {
                interval_us,
                pulse_width_us,
                polarity,
            }
        }

        /// Crank period for a target RPM at one pulse per revolution
        pub fn from_rpm(rpm: u32, pulse_width_us: u32, polarity: EdgePolarity) -> Self {
            Self::new(60_000_000 / rpm, pulse_width_us, polarity)
        }

        /// Points level at an absolute microsecond timestamp
        pub fn level_at(&self, now_us: u32) -> bool {
            let in_pulse = now_us % self.interval_us < self.pulse_width_us;
            match self.polarity {
                // Falling polarity: line idles high, pulses low
                EdgePolarity::Falling => !in_pulse,
                EdgePolarity::Rising => in_pulse,
            }
        }

        pub fn interval_us(&self) -> u32 {
            self.interval_us
        }
    }

    /// Drive `controller` from `start_us` for `duration_us` at a fixed
    /// poll interval, invoking `observe` with each step's outputs
    pub fn run_steps<F>(
        controller: &mut IgnitionController,
        crank: &CrankSimulator,
        start_us: u32,
        duration_us: u32,
        poll_us: u32,
        mut observe: F,
    ) where
        F: FnMut(u32, &StepOutputs),
    {
        let mut now = start_us;
        while now.wrapping_sub(start_us) < duration_us {
            let level = crank.level_at(now);
            let outputs = controller.step(level, now, now / 1_000);
            observe(now, &outputs);
            now = now.wrapping_add(poll_us);
        }
    }
}

pub mod capture {
    //! Coil transition capture and timing analysis

    use heapless::Vec;

    /// One completed coil charge cycle; the off transition is the spark
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct SparkEvent {
        pub on_at_us: u32,
        pub off_at_us: u32,
    }

    impl SparkEvent {
        /// Measured coil-on duration
        pub fn dwell_us(&self) -> u32 {
            self.off_at_us.wrapping_sub(self.on_at_us)
        }
    }

    /// Records coil level transitions as the loop runs
    #[derive(Default)]
    pub struct SparkCapture {
        events: Vec<SparkEvent, 64>,
        current_on_at: Option<u32>,
        last_level: bool,
    }

    impl SparkCapture {
        pub fn new() -> Self {
            Self::default()
        }

        /// Feed the coil level observed at `now_us`
        pub fn update(&mut self, now_us: u32, coil_on: bool) {
            if coil_on && !self.last_level {
                self.current_on_at = Some(now_us);
            } else if !coil_on && self.last_level {
                if let Some(on_at) = self.current_on_at.take() {
                    self.events
                        .push(SparkEvent {
                            on_at_us: on_at,
                            off_at_us: now_us,
                        })
                        .ok();
                }
            }
            self.last_level = coil_on;
        }

        /// Completed charge cycles seen so far
        pub fn events(&self) -> &[SparkEvent] {
            &self.events
        }

        /// Spark timestamps (coil-off transitions)
        pub fn spark_times(&self) -> Vec<u32, 64> {
            let mut times = Vec::new();
            for event in &self.events {
                times.push(event.off_at_us).ok();
            }
            times
        }

        /// Largest deviation of any measured dwell from `expected_us`
        pub fn max_dwell_error_us(&self, expected_us: u32) -> u32 {
            self.events
                .iter()
                .map(|e| e.dwell_us().abs_diff(expected_us))
                .max()
                .unwrap_or(0)
        }

        pub fn clear(&mut self) {
            self.events.clear();
            self.current_on_at = None;
            self.last_level = false;
        }
    }
}
