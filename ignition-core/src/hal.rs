//! Hardware Abstraction Layer for the ignition controller
//!
//! The core consumes four capabilities from the environment: a points
//! level input, the coil drive output, two indicator outputs and a pair
//! of free-running monotonic counters. All of them are polled; the
//! traits here let an interrupt-driven implementation satisfy the same
//! contract later.

use embedded_hal::digital::{InputPin, OutputPin};

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Timing operation failed
    TimingError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::TimingError => write!(f, "Timing operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for the points sensor input
pub trait TriggerInput {
    type Error: From<HalError>;

    /// Read the current points level (true = high)
    fn level(&mut self) -> Result<bool, Self::Error>;
}

/// Trait for the ignition coil drive output
pub trait CoilOutput {
    type Error: From<HalError>;

    /// Energize or release the coil (true = charging)
    fn set_energized(&mut self, energized: bool) -> Result<(), Self::Error>;

    /// Get current coil drive state
    fn is_energized(&self) -> Result<bool, Self::Error>;
}

/// Trait for an indicator output (status or rev-limiter lamp)
pub trait IndicatorOutput {
    type Error: From<HalError>;

    /// Set indicator state (true = asserted)
    fn set_on(&mut self, on: bool) -> Result<(), Self::Error>;
}

/// Free-running monotonic counters
///
/// Both counters may wrap; consumers compare timestamps with
/// `wrapping_sub` only.
pub trait Clock {
    /// Microseconds since an arbitrary epoch
    fn now_us(&self) -> u32;

    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}

/// Complete ignition HAL interface
pub trait IgnitionHal {
    type Trigger: TriggerInput;
    type Coil: CoilOutput;
    type LimiterIndicator: IndicatorOutput;
    type StatusIndicator: IndicatorOutput;
    type Clock: Clock;
    type Error: From<HalError>;

    /// Initialize hardware (pin directions, safe output levels)
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Access to the points sensor input
    fn trigger(&mut self) -> &mut Self::Trigger;

    /// Access to the coil drive output
    fn coil(&mut self) -> &mut Self::Coil;

    /// Access to the rev-limiter indicator
    fn limiter_indicator(&mut self) -> &mut Self::LimiterIndicator;

    /// Access to the status indicator
    fn status_indicator(&mut self) -> &mut Self::StatusIndicator;

    /// Access to the monotonic counters
    fn clock(&self) -> &Self::Clock;

    /// Shutdown hardware (coil must end up de-energized)
    fn shutdown(&mut self) -> Result<(), Self::Error>;
}

/// Generic implementation for embedded-hal compatible input pins
pub struct EhTriggerInput<P> {
    pin: P,
}

impl<P> EhTriggerInput<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> TriggerInput for EhTriggerInput<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn level(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high().map_err(|_| HalError::GpioError)
    }
}

/// Generic implementation for embedded-hal compatible coil drivers
pub struct EhCoilOutput<P> {
    pin: P,
    inverted: bool,
    energized: bool,
}

impl<P> EhCoilOutput<P>
where
    P: OutputPin,
{
    /// `inverted` selects drivers where a low pin level charges the coil
    pub fn new(pin: P, inverted: bool) -> Self {
        Self {
            pin,
            inverted,
            energized: false,
        }
    }
}

impl<P> CoilOutput for EhCoilOutput<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_energized(&mut self, energized: bool) -> Result<(), Self::Error> {
        let level = if self.inverted { !energized } else { energized };
        let result = if level {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| HalError::GpioError)?;
        self.energized = energized;
        Ok(())
    }

    fn is_energized(&self) -> Result<bool, Self::Error> {
        Ok(self.energized)
    }
}

/// Generic implementation for embedded-hal compatible indicator pins
pub struct EhIndicatorOutput<P> {
    pin: P,
}

impl<P> EhIndicatorOutput<P>
where
    P: OutputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> IndicatorOutput for EhIndicatorOutput<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_on(&mut self, on: bool) -> Result<(), Self::Error> {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| HalError::GpioError)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::Cell;

    /// Mock points sensor line
    #[derive(Default)]
    pub struct MockTrigger {
        level: Cell<bool>,
    }

    impl MockTrigger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_level(&self, level: bool) {
            self.level.set(level);
        }
    }

    impl TriggerInput for MockTrigger {
        type Error = HalError;

        fn level(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level.get())
        }
    }

    /// Mock coil drive output
    #[derive(Default)]
    pub struct MockCoil {
        energized: Cell<bool>,
    }

    impl MockCoil {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn energized(&self) -> bool {
            self.energized.get()
        }
    }

    impl CoilOutput for MockCoil {
        type Error = HalError;

        fn set_energized(&mut self, energized: bool) -> Result<(), Self::Error> {
            self.energized.set(energized);
            Ok(())
        }

        fn is_energized(&self) -> Result<bool, Self::Error> {
            Ok(self.energized.get())
        }
    }

    /// Mock indicator lamp
    #[derive(Default)]
    pub struct MockIndicator {
        on: Cell<bool>,
    }

    impl MockIndicator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_on(&self) -> bool {
            self.on.get()
        }
    }

    impl IndicatorOutput for MockIndicator {
        type Error = HalError;

        fn set_on(&mut self, on: bool) -> Result<(), Self::Error> {
            self.on.set(on);
            Ok(())
        }
    }

    /// Mock monotonic counters, advanced manually by tests
    #[derive(Default)]
    pub struct MockClock {
        micros: Cell<u32>,
    }

    impl MockClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_micros(&self, us: u32) {
            self.micros.set(us);
        }

        pub fn advance_micros(&self, us: u32) {
            self.micros.set(self.micros.get().wrapping_add(us));
        }
    }

    impl Clock for MockClock {
        fn now_us(&self) -> u32 {
            self.micros.get()
        }

        fn now_ms(&self) -> u32 {
            self.micros.get() / 1_000
        }
    }

    /// Mock hardware collection
    #[derive(Default)]
    pub struct MockIgnitionHal {
        pub trigger: MockTrigger,
        pub coil: MockCoil,
        pub limiter: MockIndicator,
        pub status: MockIndicator,
        pub clock: MockClock,
    }

    impl MockIgnitionHal {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl IgnitionHal for MockIgnitionHal {
        type Trigger = MockTrigger;
        type Coil = MockCoil;
        type LimiterIndicator = MockIndicator;
        type StatusIndicator = MockIndicator;
        type Clock = MockClock;
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
            &mut self.limiter
        }

        fn status_indicator(&mut self) -> &mut Self::StatusIndicator {
            &mut self.status
        }

        fn clock(&self) -> &Self::Clock {
            &self.clock
        }

        fn shutdown(&mut self) -> Result<(), Self::Error> {
            self.coil.set_energized(false)
        }
    }
}
