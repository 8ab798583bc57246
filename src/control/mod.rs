//! The furnace control core: sampling, calibration, user input, hysteresis
//! and the status layout.

pub mod display;
pub mod furnace;
pub mod mode;
pub mod sampler;
pub mod sensor;
pub mod setpoint;

use furnace::FurnaceState;
use mode::Mode;
use sensor::{Sensor, TemperatureReading};

/// All mutable loop state, owned by the application and handed to each
/// component explicitly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerState {
    pub external: TemperatureReading,
    pub internal: TemperatureReading,
    pub setpoint: u8,
    pub mode_presses: u16,
    pub furnace: FurnaceState,
    /// Reading of the selected sensor, resolved once per cycle
    pub active_celsius: f32,
}

impl ControllerState {
    pub fn new(setpoint: u8) -> Self {
        Self {
            external: TemperatureReading::default(),
            internal: TemperatureReading::default(),
            setpoint,
            mode_presses: 0,
            furnace: FurnaceState::Off,
            active_celsius: 0.0,
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::from_presses(self.mode_presses)
    }

    pub fn reading(&self, sensor: Sensor) -> &TemperatureReading {
        match sensor {
            Sensor::External => &self.external,
            Sensor::Internal => &self.internal,
        }
    }
}
