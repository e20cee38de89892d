//! embedded-hal pin adapter tests

use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use ignition_core::{
    CoilOutput, EhCoilOutput, EhIndicatorOutput, EhTriggerInput, IndicatorOutput, TriggerInput,
};

#[test]
fn trigger_adapter_reads_levels() {
    let expectations = [
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut trigger = EhTriggerInput::new(pin.clone());
    assert!(trigger.level().unwrap());
    assert!(!trigger.level().unwrap());

    pin.done();
}

#[test]
fn coil_adapter_drives_pin() {
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut coil = EhCoilOutput::new(pin.clone(), false);
    coil.set_energized(true).unwrap();
    assert!(coil.is_energized().unwrap());
    coil.set_energized(false).unwrap();
    assert!(!coil.is_energized().unwrap());

    pin.done();
}

#[test]
fn coil_adapter_inverted_drive() {
    // Low-side drivers charge the coil with a low pin level
    let expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut coil = EhCoilOutput::new(pin.clone(), true);
    coil.set_energized(true).unwrap();
    assert!(coil.is_energized().unwrap());
    coil.set_energized(false).unwrap();

    pin.done();
}

#[test]
fn indicator_adapter_drives_pin() {
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut lamp = EhIndicatorOutput::new(pin.clone());
    lamp.set_on(true).unwrap();
    lamp.set_on(false).unwrap();

    pin.done();
}
