#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// RISC-V runtime
use riscv_rt as _;

// Panic handler
use panic_halt as _;

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use ignition_core::*;
use ignition_firmware::*;

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("ignition firmware v{} starting", VERSION);

    // Initialize CH32V203 hardware
    let hal = init_global_hal();
    if hal.initialize().is_err() {
        // Without working GPIO there is nothing safe to do; the coil
        // stays released and only the supervision loop runs
        #[cfg(feature = "defmt")]
        defmt::error!("hardware initialization failed");
    } else {
        #[cfg(feature = "defmt")]
        defmt::info!("hardware initialized");

        // Reference calibration: single cylinder, one pulse per rev
        let config = default_config();
        #[cfg(feature = "defmt")]
        defmt::info!(
            "calibration: base {} deg, dwell {} us, limiter {} rpm",
            config.base_timing_deg,
            config.coil_dwell_us,
            config.rev_limit_rpm
        );

        spawner.must_spawn(ignition_task(hal, config));

        #[cfg(feature = "defmt")]
        defmt::info!("ignition controller running");
    }

    // Main supervision loop
    loop {
        Timer::after(Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("heartbeat");
    }
}
