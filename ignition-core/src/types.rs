//! Core data types for the ignition controller

/// Points-sensor transition that counts as a trigger
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EdgePolarity {
    /// Trigger on low-to-high transition
    Rising,
    /// Trigger on high-to-low transition (points opening, reference setup)
    Falling,
}

impl EdgePolarity {
    /// Returns true if going from `previous` to `current` is the
    /// configured transition
    pub const fn matches(&self, previous: bool, current: bool) -> bool {
        match self {
            EdgePolarity::Rising => !previous && current,
            EdgePolarity::Falling => previous && !current,
        }
    }
}

/// Engine running classification
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EngineState {
    /// RPM at or above the stall threshold
    Running,
    /// RPM below the stall threshold
    Stalled,
}

impl EngineState {
    /// Returns true if the engine is considered turning
    pub const fn is_running(&self) -> bool {
        matches!(self, EngineState::Running)
    }
}

/// Ignition calibration parameters
#[derive(Copy, Clone, Debug)]
pub struct IgnitionConfig {
    /// Points edge that marks a revolution reference
    pub polarity: EdgePolarity,
    /// Points pulses per crankshaft revolution
    pub pulses_per_rev: u8,
    /// Coil charge time in microseconds
    pub coil_dwell_us: u32,
    /// Fixed compensation for loop processing latency in microseconds
    pub program_delay_us: u32,
    /// Base advance angle in degrees before top dead center
    pub base_timing_deg: f32,
    /// Centrifugal advance in degrees per RPM (0.0 disables)
    pub advance_per_rpm: f32,
    /// Rev limiter threshold in RPM
    pub rev_limit_rpm: f32,
    /// Below this RPM the engine is considered stalled
    pub stall_rpm: f32,
    /// Status indicator blink period while stalled, in milliseconds
    pub blink_ms: u32,
}

impl Default for IgnitionConfig {
    fn default() -> Self {
        crate::default_config()
    }
}

impl IgnitionConfig {
    /// Create a new configuration with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        polarity: EdgePolarity,
        pulses_per_rev: u8,
        coil_dwell_us: u32,
        program_delay_us: u32,
        base_timing_deg: f32,
        advance_per_rpm: f32,
        rev_limit_rpm: f32,
        stall_rpm: f32,
        blink_ms: u32,
    ) -> Result<Self, &'static str> {
        if pulses_per_rev == 0 || pulses_per_rev > 8 {
            return Err("Pulses per revolution must be between 1 and 8");
        }
        if coil_dwell_us < 100 || coil_dwell_us > 20_000 {
            return Err("Coil dwell must be between 100us and 20ms");
        }
        if program_delay_us > 5_000 {
            return Err("Program delay must be <= 5ms");
        }
        if !(0.0..=60.0).contains(&base_timing_deg) {
            return Err("Base timing must be between 0 and 60 degrees");
        }
        if !(0.0..=0.1).contains(&advance_per_rpm) {
            return Err("Advance per RPM must be between 0 and 0.1 degrees");
        }
        if rev_limit_rpm <= stall_rpm {
            return Err("Rev limit must be above the stall threshold");
        }
        if blink_ms == 0 || blink_ms > 5_000 {
            return Err("Blink period must be between 1ms and 5s");
        }

        Ok(Self {
            polarity,
            pulses_per_rev,
            coil_dwell_us,
            program_delay_us,
            base_timing_deg,
            advance_per_rpm,
            rev_limit_rpm,
            stall_rpm,
            blink_ms,
        })
    }

    /// Total fixed time to compensate ahead of the spark: coil charge
    /// plus processing latency
    pub const fn charge_compensation_us(&self) -> u32 {
        self.coil_dwell_us + self.program_delay_us
    }
}
