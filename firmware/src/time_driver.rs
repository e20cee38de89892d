//! Minimal embassy time driver for the CH32V203 SysTick counter

use embassy_time_driver::{AlarmHandle, Driver};
use portable_atomic::{AtomicU32, Ordering};

/// Free-running tick counter driver
///
/// The counter wraps; the core compares timestamps with wrapping
/// subtraction only, so no extension to 64 bits is needed here.
pub struct IgnitionTimeDriver {
    tick_count: AtomicU32,
}

impl IgnitionTimeDriver {
    const fn new() -> Self {
        Self {
            tick_count: AtomicU32::new(0),
        }
    }

    /// Increment tick count (called from the SysTick interrupt)
    pub fn tick(&self) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
    }
}

impl Driver for IgnitionTimeDriver {
    fn now(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed) as u64
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        // Alarms are unused: the generic queue polls `now`
        None
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, _callback: fn(*mut ()), _ctx: *mut ()) {
        // Not implemented
    }

    fn set_alarm(&self, _alarm: AlarmHandle, _timestamp: u64) -> bool {
        // Not implemented
        false
    }
}

// Export the driver
embassy_time_driver::time_driver_impl!(static DRIVER: IgnitionTimeDriver = IgnitionTimeDriver::new());

// Critical section implementation for single-core RISC-V
critical_section::set_impl!(RiscvCriticalSection);

struct RiscvCriticalSection;

#[cfg(target_arch = "riscv32")]
unsafe impl critical_section::Impl for RiscvCriticalSection {
    unsafe fn acquire() -> u8 {
        let mut mstatus: usize;
        core::arch::asm!("csrrci {}, mstatus, 8", out(reg) mstatus);
        (mstatus & 8) as u8
    }

    unsafe fn release(was_active: u8) {
        if was_active != 0 {
            core::arch::asm!("csrsi mstatus, 8");
        }
    }
}

// Host builds of this crate are syntax checks only; there is no
// concurrency to guard against.
#[cfg(not(target_arch = "riscv32"))]
unsafe impl critical_section::Impl for RiscvCriticalSection {
    unsafe fn acquire() -> u8 {
        0
    }

    unsafe fn release(_was_active: u8) {}
}
