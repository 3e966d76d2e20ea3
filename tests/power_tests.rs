//! Power Supervision Tests
//!
//! Tests for supply-voltage conversion and the startup gate.
//! Run with: cargo test --test power_tests

use fm_firmware::config::{LOW_BATTERY_MILLIVOLTS, PROGRAMMER_MIN_MILLIVOLTS};
use fm_firmware::power::{startup_gate, StartupGate, SupplyVoltage};

// =============================================================================
// VREFINT Conversion Tests
// =============================================================================

#[test]
fn vrefint_at_calibration_point_reads_3v() {
    // Reading equals the calibration word when the rail is at 3.0 V
    let v = SupplyVoltage::from_vrefint(1668, 1668);
    assert_eq!(v.millivolts(), 3000);
}

#[test]
fn vrefint_scales_inversely_with_reading() {
    // Lower rail makes the fixed bandgap a larger fraction of full scale
    let low = SupplyVoltage::from_vrefint(1668, 2300);
    assert!(low.millivolts() < 2300);
    let high = SupplyVoltage::from_vrefint(1668, 1400);
    assert!(high.millivolts() > 3500);
}

#[test]
fn vrefint_zero_reading_is_zero_volts() {
    // Guard against a stuck ADC dividing by zero
    let v = SupplyVoltage::from_vrefint(1668, 0);
    assert_eq!(v.millivolts(), 0);
}

// =============================================================================
// Startup Gate Tests
// =============================================================================

#[test]
fn depleted_battery_locks_out() {
    let v = SupplyVoltage::from_millivolts(LOW_BATTERY_MILLIVOLTS - 1);
    assert_eq!(startup_gate(v), StartupGate::LowBattery);
    assert_eq!(
        startup_gate(SupplyVoltage::from_millivolts(0)),
        StartupGate::LowBattery
    );
}

#[test]
fn battery_window_runs_normally() {
    for mv in [
        LOW_BATTERY_MILLIVOLTS,
        2_500,
        3_200,
        PROGRAMMER_MIN_MILLIVOLTS - 1,
    ] {
        let v = SupplyVoltage::from_millivolts(mv);
        assert_eq!(startup_gate(v), StartupGate::Normal, "{mv} mV");
    }
}

#[test]
fn fixture_voltage_enters_programming() {
    let v = SupplyVoltage::from_millivolts(PROGRAMMER_MIN_MILLIVOLTS);
    assert_eq!(startup_gate(v), StartupGate::Programming);
    assert_eq!(
        startup_gate(SupplyVoltage::from_millivolts(5_000)),
        StartupGate::Programming
    );
}
