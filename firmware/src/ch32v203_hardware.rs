//! CH32V203 Hardware Implementation
//!
//! 64KB Flash / 20KB RAM - polled GPIO binding for the ignition loop

use core::sync::atomic::{AtomicBool, Ordering};
use static_cell::StaticCell;

use ignition_core::hal::{Clock, CoilOutput, HalError, IgnitionHal, IndicatorOutput, TriggerInput};

use crate::mock_hardware::EmbassyClock;

/// CH32V203 hardware abstraction layer implementation
pub struct Ch32v203IgnitionHal {
    points_pin: PointsInputPin,
    coil_pin: CoilOutputPin,
    limiter_pin: LimiterLampPin,
    status_pin: StatusLampPin,
    clock: EmbassyClock,
}

impl Ch32v203IgnitionHal {
    pub fn new() -> Self {
        Self {
            points_pin: PointsInputPin::new(),
            coil_pin: CoilOutputPin::new(),
            limiter_pin: LimiterLampPin::new(),
            status_pin: StatusLampPin::new(),
            clock: EmbassyClock,
        }
    }
}

impl Default for Ch32v203IgnitionHal {
    fn default() -> Self {
        Self::new()
    }
}

impl IgnitionHal for Ch32v203IgnitionHal {
    type Trigger = PointsInputPin;
    type Coil = CoilOutputPin;
    type LimiterIndicator = LimiterLampPin;
    type StatusIndicator = StatusLampPin;
    type Clock = EmbassyClock;
    type Error = HalError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.points_pin.init().map_err(|_| HalError::GpioError)?;
        self.coil_pin.init().map_err(|_| HalError::GpioError)?;
        self.limiter_pin.init().map_err(|_| HalError::GpioError)?;
        self.status_pin.init().map_err(|_| HalError::GpioError)?;

        // The coil must never power up charging
        self.coil_pin.set_energized(false)?;

        #[cfg(feature = "defmt")]
        defmt::info!("CH32V203 HAL initialized");

        Ok(())
    }

    fn trigger(&mut self) -> &mut Self::Trigger {
        &mut self.points_pin
    }

    fn coil(&mut self) -> &mut Self::Coil {
        &mut self.coil_pin
    }

    fn limiter_indicator(&mut self) -> &mut Self::LimiterIndicator {
        &mut self.limiter_pin
    }

    fn status_indicator(&mut self) -> &mut Self::StatusIndicator {
        &mut self.status_pin
    }

    fn clock(&self) -> &Self::Clock {
        &self.clock
    }

    fn shutdown(&mut self) -> Result<(), Self::Error> {
        self.coil_pin.set_energized(false)?;
        #[cfg(feature = "defmt")]
        defmt::info!("CH32V203 HAL shutdown");
        Ok(())
    }
}

/// Points sensor input pin (PA0)
pub struct PointsInputPin {
    level: AtomicBool,
}

impl PointsInputPin {
    fn new() -> Self {
        Self {
            // Points closed at rest pull the line high through R1
            level: AtomicBool::new(true),
        }
    }

    fn init(&self) -> Result<(), ()> {
        // Configure PA0 as input with pull-up
        // Implementation would configure:
        // 1. RCC clock enable for GPIOA
        // 2. GPIOA CFGLR: PA0 input with pull-up/pull-down, PA0 ODR=1
        Ok(())
    }

    /// Refresh the cached level from GPIOA IDR bit 0
    pub fn sample(&self) {
        // let level = read_gpio_pa0();
        // self.level.store(level, Ordering::Relaxed);
    }
}

impl TriggerInput for PointsInputPin {
    type Error = HalError;

    fn level(&mut self) -> Result<bool, Self::Error> {
        self.sample();
        Ok(self.level.load(Ordering::Relaxed))
    }
}

/// Ignition coil drive pin (PA2)
pub struct CoilOutputPin {
    energized: AtomicBool,
}

impl CoilOutputPin {
    fn new() -> Self {
        Self {
            energized: AtomicBool::new(false),
        }
    }

    fn init(&self) -> Result<(), ()> {
        // Configure PA2 as push-pull output, low (coil released)
        Ok(())
    }
}

impl CoilOutput for CoilOutputPin {
    type Error = HalError;

    fn set_energized(&mut self, energized: bool) -> Result<(), Self::Error> {
        self.energized.store(energized, Ordering::Relaxed);
        // Write GPIOA BSHR bit 2 / BR bit 2
        Ok(())
    }

    fn is_energized(&self) -> Result<bool, Self::Error> {
        Ok(self.energized.load(Ordering::Relaxed))
    }
}

/// Rev-limiter indicator pin (PA3)
pub struct LimiterLampPin {
    on: AtomicBool,
}

impl LimiterLampPin {
    fn new() -> Self {
        Self {
            on: AtomicBool::new(false),
        }
    }

    fn init(&self) -> Result<(), ()> {
        // Configure PA3 as push-pull output, low
        Ok(())
    }
}

impl IndicatorOutput for LimiterLampPin {
    type Error = HalError;

    fn set_on(&mut self, on: bool) -> Result<(), Self::Error> {
        self.on.store(on, Ordering::Relaxed);
        // Write GPIOA BSHR bit 3 / BR bit 3
        Ok(())
    }
}

/// Status indicator pin (PA4)
pub struct StatusLampPin {
    on: AtomicBool,
}

impl StatusLampPin {
    fn new() -> Self {
        Self {
            on: AtomicBool::new(false),
        }
    }

    fn init(&self) -> Result<(), ()> {
        // Configure PA4 as push-pull output, low
        Ok(())
    }
}

impl IndicatorOutput for StatusLampPin {
    type Error = HalError;

    fn set_on(&mut self, on: bool) -> Result<(), Self::Error> {
        self.on.store(on, Ordering::Relaxed);
        // Write GPIOA BSHR bit 4 / BR bit 4
        Ok(())
    }
}

/// Global hardware instance for the control task
static CH32V203_HAL: StaticCell<Ch32v203IgnitionHal> = StaticCell::new();

/// Initialize global hardware instance
pub fn init_global_hal() -> &'static mut Ch32v203IgnitionHal {
    CH32V203_HAL.init(Ch32v203IgnitionHal::new())
}

/// CH32V203 pin configuration constants
pub mod pins {
    /// Points sensor input pin
    pub const POINTS_PIN: u8 = 0; // PA0

    /// Ignition coil drive pin
    pub const COIL_PIN: u8 = 2; // PA2

    /// Rev-limiter indicator pin
    pub const LIMITER_LAMP_PIN: u8 = 3; // PA3

    /// Status indicator pin
    pub const STATUS_LAMP_PIN: u8 = 4; // PA4
}
