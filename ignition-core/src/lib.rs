#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Ignition Core
//!
//! Spark-ignition timing logic for points-triggered single-cylinder
//! engines. Replaces a distributor's mechanical advance curve with a
//! computed, dwell-compensated, rev-limited schedule driven from one
//! points edge per revolution.

pub mod types;
pub mod trigger;
pub mod rpm;
pub mod schedule;
pub mod coil;
pub mod stall;
pub mod controller;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use trigger::*;
pub use rpm::*;
pub use schedule::*;
pub use coil::*;
pub use stall::*;
pub use controller::*;
pub use hal::*;

/// Ignition library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference calibration for a single-cylinder points engine
pub fn default_config() -> IgnitionConfig {
    IgnitionConfig {
        polarity: EdgePolarity::Falling,
        pulses_per_rev: 1,
        coil_dwell_us: 1_000,
        program_delay_us: 200,
        base_timing_deg: 8.0,
        advance_per_rpm: 0.0,
        rev_limit_rpm: 8_000.0,
        stall_rpm: 300.0,
        blink_ms: 500,
    }
}
