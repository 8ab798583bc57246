//! Configuration constants for the furnace controller firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 1_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Setpoint limits in whole degrees, inclusive
pub const SETPOINT_MIN: u8 = 10;
pub const SETPOINT_MAX: u8 = 35;
/// Setpoint at power-on
pub const SETPOINT_DEFAULT: u8 = 23;

/// Half-width of the hysteresis window around the setpoint, degrees
pub const DEAD_BAND: f32 = 0.5;

/// ADC resolution (10-bit)
pub const ADC_STEPS: f32 = 1024.0;
/// AVCC reference used by the external sensor channel
pub const EXTERNAL_VREF: f32 = 5.0;
/// Internal bandgap reference used by the die sensor channel
pub const INTERNAL_VREF: f32 = 1.1;
/// Sensor output slope (LM35: 10 mV per degree)
pub const VOLTS_PER_DEGREE: f32 = 0.01;

/// Linear fit of the die sensor against the external LM35
pub const INTERNAL_OFFSET: f32 = 34.6054;
pub const INTERNAL_SLOPE: f32 = 0.074;

/// Reference settling time before an internal conversion
pub const SETTLING_DELAY_MS: u16 = 5;

/// Control loop period
pub const REFRESH_INTERVAL_MS: u16 = 500;

/// Conversion-complete polls before the ADC is declared stuck
pub const CONVERSION_POLL_LIMIT: u16 = 10_000;

/// Button release polls (one per interval) before a button is declared stuck
pub const RELEASE_POLL_LIMIT: u16 = 30_000;
pub const RELEASE_POLL_INTERVAL_MS: u16 = 1;

/// Calibration of both temperature channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorCalibration {
    pub adc_steps: f32,
    pub volts_per_degree: f32,
    pub external_vref: f32,
    pub internal_vref: f32,
    /// `calibrated = (uncalibrated - internal_offset) / internal_slope`
    pub internal_offset: f32,
    pub internal_slope: f32,
    pub settling_delay_ms: u16,
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self {
            adc_steps: ADC_STEPS,
            volts_per_degree: VOLTS_PER_DEGREE,
            external_vref: EXTERNAL_VREF,
            internal_vref: INTERNAL_VREF,
            internal_offset: INTERNAL_OFFSET,
            internal_slope: INTERNAL_SLOPE,
            settling_delay_ms: SETTLING_DELAY_MS,
        }
    }
}

/// Bounds for the blocking hardware handshakes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitLimits {
    pub conversion_polls: u16,
    pub release_polls: u16,
    pub release_poll_interval_ms: u16,
}

impl Default for WaitLimits {
    fn default() -> Self {
        Self {
            conversion_polls: CONVERSION_POLL_LIMIT,
            release_polls: RELEASE_POLL_LIMIT,
            release_poll_interval_ms: RELEASE_POLL_INTERVAL_MS,
        }
    }
}

/// Runtime parameters of the control loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub calibration: SensorCalibration,
    pub setpoint: crate::control::setpoint::SetpointRange,
    pub dead_band: f32,
    pub refresh_interval_ms: u16,
    pub limits: WaitLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calibration: SensorCalibration::default(),
            setpoint: crate::control::setpoint::SetpointRange::default(),
            dead_band: DEAD_BAND,
            refresh_interval_ms: REFRESH_INTERVAL_MS,
            limits: WaitLimits::default(),
        }
    }
}
