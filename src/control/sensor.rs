//! Temperature channels and their calibration

use embedded_hal::blocking::delay::DelayMs;

use crate::config::SensorCalibration;
use crate::control::sampler::{AnalogSampler, Channel, ConversionPort};
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sensor {
    /// LM35 on an analog pin
    External,
    /// ATmega328P on-die sensor
    Internal,
}

impl Sensor {
    pub fn name(self) -> &'static str {
        match self {
            Sensor::External => "external",
            Sensor::Internal => "internal",
        }
    }
}

/// A calibrated temperature plus its `integer.tenths` display split.
///
/// Both parts truncate toward zero, so below zero the tenths digit carries
/// the sign as well (-3.4 splits into -3 and -4).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TemperatureReading {
    pub celsius: f32,
    pub integer: i16,
    pub tenths: i8,
}

impl TemperatureReading {
    pub fn from_celsius(celsius: f32) -> Self {
        let integer = celsius as i16;
        let tenths = ((celsius - integer as f32) * 10.0) as i8;
        Self {
            celsius,
            integer,
            tenths,
        }
    }
}

pub struct ExternalSensor {
    channel: Channel,
    vref: f32,
    scale: f32,
}

impl ExternalSensor {
    pub fn new(calibration: &SensorCalibration) -> Self {
        Self {
            channel: Channel::EXTERNAL,
            vref: calibration.external_vref,
            scale: calibration.adc_steps * calibration.volts_per_degree,
        }
    }

    pub fn celsius(&self, raw: u16) -> f32 {
        (raw as f32 * self.vref) / self.scale
    }

    pub fn read<P, D>(&self, sampler: &mut AnalogSampler<P>, delay: &mut D) -> Result<TemperatureReading, Error>
    where
        P: ConversionPort,
        D: DelayMs<u16>,
    {
        let raw = sampler.sample(self.channel, 0, delay)?;
        Ok(TemperatureReading::from_celsius(self.celsius(raw)))
    }
}

/// Die temperature, fitted linearly against the external sensor.
pub struct InternalSensor {
    channel: Channel,
    vref: f32,
    scale: f32,
    offset: f32,
    slope: f32,
    settling_ms: u16,
}

impl InternalSensor {
    pub fn new(calibration: &SensorCalibration) -> Self {
        Self {
            channel: Channel::INTERNAL,
            vref: calibration.internal_vref,
            scale: calibration.adc_steps * calibration.volts_per_degree,
            offset: calibration.internal_offset,
            slope: calibration.internal_slope,
            settling_ms: calibration.settling_delay_ms,
        }
    }

    pub fn uncalibrated(&self, raw: u16) -> f32 {
        (self.vref * raw as f32) / self.scale
    }

    pub fn celsius(&self, raw: u16) -> f32 {
        (self.uncalibrated(raw) - self.offset) / self.slope
    }

    /// The reference needs the settling delay after the channel switch
    /// before the conversion is trustworthy.
    pub fn read<P, D>(&self, sampler: &mut AnalogSampler<P>, delay: &mut D) -> Result<TemperatureReading, Error>
    where
        P: ConversionPort,
        D: DelayMs<u16>,
    {
        let raw = sampler.sample(self.channel, self.settling_ms, delay)?;
        Ok(TemperatureReading::from_celsius(self.celsius(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaitLimits;
    use crate::testing::{Event, RecordingDelay, ScriptedAdc};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn external_follows_lm35_scale() {
        let sensor = ExternalSensor::new(&SensorCalibration::default());
        for raw in 0..=1023u16 {
            let expected = raw as f32 * 5.0 / 10.24;
            assert!(close(sensor.celsius(raw), expected), "raw {}", raw);
        }
    }

    #[test]
    fn internal_applies_linear_fit() {
        let sensor = InternalSensor::new(&SensorCalibration::default());
        for raw in 0..=1023u16 {
            let uncalibrated = raw as f32 * 1.1 / 10.24;
            assert!(close(sensor.uncalibrated(raw), uncalibrated), "raw {}", raw);
            let calibrated = (uncalibrated - 34.6054) / 0.074;
            assert!((sensor.celsius(raw) - calibrated).abs() < 1e-2, "raw {}", raw);
        }
    }

    #[test]
    fn synthetic_calibration_is_honoured() {
        let calibration = SensorCalibration {
            internal_offset: 0.0,
            internal_slope: 1.0,
            ..SensorCalibration::default()
        };
        let sensor = InternalSensor::new(&calibration);
        assert!(close(sensor.celsius(512), 512.0 * 1.1 / 10.24));
    }

    #[test]
    fn split_truncates_tenths() {
        let reading = TemperatureReading::from_celsius(22.4609375);
        assert_eq!((reading.integer, reading.tenths), (22, 4));

        let reading = TemperatureReading::from_celsius(0.99);
        assert_eq!((reading.integer, reading.tenths), (0, 9));

        let reading = TemperatureReading::from_celsius(35.0);
        assert_eq!((reading.integer, reading.tenths), (35, 0));
    }

    #[test]
    fn split_stays_within_a_tenth() {
        for step in 0..=4000u16 {
            let celsius = step as f32 * 0.0137;
            let reading = TemperatureReading::from_celsius(celsius);
            let approx = reading.integer as f32 + reading.tenths as f32 / 10.0;
            assert!((0..=9).contains(&reading.tenths));
            assert!((celsius - approx).abs() < 0.1 + 1e-3, "{} -> {}", celsius, approx);
        }
    }

    #[test]
    fn external_read_needs_no_settling() {
        let adc = ScriptedAdc::new(&[46], 0);
        let mut delay = RecordingDelay::sharing(&adc);
        let mut sampler = AnalogSampler::new(adc, &WaitLimits::default());
        let sensor = ExternalSensor::new(&SensorCalibration::default());

        let reading = sensor.read(&mut sampler, &mut delay).unwrap();
        assert_eq!((reading.integer, reading.tenths), (22, 4));
        assert!(!sampler.port().events().iter().any(|e| matches!(e, Event::Delay(_))));
    }

    #[test]
    fn internal_read_settles_first() {
        let adc = ScriptedAdc::new(&[360], 0);
        let mut delay = RecordingDelay::sharing(&adc);
        let mut sampler = AnalogSampler::new(adc, &WaitLimits::default());
        let sensor = InternalSensor::new(&SensorCalibration::default());

        let reading = sensor.read(&mut sampler, &mut delay).unwrap();
        // 360 * 1.1 / 10.24 = 38.671875 -> (38.671875 - 34.6054) / 0.074 = 54.95...
        assert_eq!((reading.integer, reading.tenths), (54, 9));
        assert_eq!(sampler.port().events()[1], Event::Delay(5));
    }
}
