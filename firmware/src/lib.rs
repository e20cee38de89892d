#![no_std]

//! Firmware library exposing the CH32V203 hardware binding, a mock
//! hardware set for bench testing, and the embassy task wrappers

pub use embassy_executor::Spawner;
pub use static_cell::StaticCell;

pub use ignition_core::*;

pub use crate::ch32v203_hardware::*;
pub use crate::mock_hardware::*;
pub use crate::tasks::*;

// Mock hardware module
pub mod mock_hardware {
    use ignition_core::hal::{
        Clock, CoilOutput, HalError, IgnitionHal, IndicatorOutput, TriggerInput,
    };

    /// Mock points sensor line
    #[derive(Debug, Default)]
    pub struct MockTriggerLine {
        level: bool,
    }

    impl MockTriggerLine {
        pub fn new() -> Self {
            Self { level: true }
        }

        /// Set line level for testing
        pub fn set_level(&mut self, level: bool) {
            self.level = level;
        }
    }

    impl TriggerInput for MockTriggerLine {
        type Error = HalError;

        fn level(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level)
        }
    }

    /// Mock coil driver output
    #[derive(Debug, Default)]
    pub struct MockCoilPin {
        energized: bool,
    }

    impl MockCoilPin {
        pub fn new() -> Self {
            Self::default()
        }

        /// Get current drive state for testing
        pub fn is_active(&self) -> bool {
            self.energized
        }
    }

    impl CoilOutput for MockCoilPin {
        type Error = HalError;

        fn set_energized(&mut self, energized: bool) -> Result<(), Self::Error> {
            #[cfg(feature = "defmt")]
            if energized != self.energized {
                defmt::debug!("coil: {}", if energized { "CHARGE" } else { "SPARK" });
            }
            self.energized = energized;
            Ok(())
        }

        fn is_energized(&self) -> Result<bool, Self::Error> {
            Ok(self.energized)
        }
    }

    /// Mock indicator lamp
    #[derive(Debug, Default)]
    pub struct MockLampPin {
        on: bool,
    }

    impl MockLampPin {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_on(&self) -> bool {
            self.on
        }
    }

    impl IndicatorOutput for MockLampPin {
        type Error = HalError;

        fn set_on(&mut self, on: bool) -> Result<(), Self::Error> {
            self.on = on;
            Ok(())
        }
    }

    /// Embassy-backed monotonic counters
    #[derive(Debug, Default)]
    pub struct EmbassyClock;

    impl Clock for EmbassyClock {
        fn now_us(&self) -> u32 {
            embassy_time::Instant::now().as_micros() as u32
        }

        fn now_ms(&self) -> u32 {
            embassy_time::Instant::now().as_millis() as u32
        }
    }

    /// Mock hardware collection
    #[derive(Debug, Default)]
    pub struct MockIgnitionHal {
        pub trigger: MockTriggerLine,
        pub coil: MockCoilPin,
        pub limiter_lamp: MockLampPin,
        pub status_lamp: MockLampPin,
        pub clock: EmbassyClock,
    }

    impl MockIgnitionHal {
        pub fn new() -> Self {
            #[cfg(feature = "defmt")]
            defmt::info!("using mock hardware (for bench testing)");
            Self {
                trigger: MockTriggerLine::new(),
                coil: MockCoilPin::new(),
                limiter_lamp: MockLampPin::new(),
                status_lamp: MockLampPin::new(),
                clock: EmbassyClock,
            }
        }
    }

    impl IgnitionHal for MockIgnitionHal {
        type Trigger = MockTriggerLine;
        type Coil = MockCoilPin;
        type LimiterIndicator = MockLampPin;
        type StatusIndicator = MockLampPin;
        type Clock = EmbassyClock;
        type Error = HalError;

        fn initialize(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn trigger(&mut self) -> &mut Self::Trigger {
            &mut self.trigger
        }

        fn coil(&mut self) -> &mut Self::Coil {
            &mut self.coil
        }

        fn limiter_indicator(&mut self) -> &mut Self::LimiterIndicator {
            &mut self.limiter_lamp
        }

        fn status_indicator(&mut self) -> &mut Self::StatusIndicator {
            &mut self.status_lamp
        }

        fn clock(&self) -> &Self::Clock {
            &self.clock
        }

        fn shutdown(&mut self) -> Result<(), Self::Error> {
            self.coil.set_energized(false)
        }
    }
}

// Embassy tasks module
pub mod tasks {
    use super::*;

    /// Control loop over the CH32V203 hardware
    #[embassy_executor::task]
    pub async fn ignition_task(
        hal: &'static mut Ch32v203IgnitionHal,
        config: IgnitionConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("ignition control task started");
        ignition_core::controller::control_task(hal, config).await
    }

    /// Control loop over mock hardware, for bench bring-up
    #[embassy_executor::task]
    pub async fn ignition_task_with_mock(
        hal: &'static mut mock_hardware::MockIgnitionHal,
        config: IgnitionConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("ignition control task started (mock)");
        ignition_core::controller::control_task(hal, config).await
    }
}

// CH32V203 hardware module
pub mod ch32v203_hardware;

// Time driver for embassy
mod time_driver;
