//! Sensor selection

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::InputPin;
use ufmt::uWrite;

use crate::control::display;
use crate::control::sensor::Sensor;
use crate::control::ControllerState;
use crate::drivers::button_handler::{Button, ButtonHandler};
use crate::Error;

/// Which reading drives the furnace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    External,
    Internal,
}

impl Mode {
    /// Even press counts select the external sensor.
    pub fn from_presses(presses: u16) -> Self {
        if presses % 2 == 0 {
            Mode::External
        } else {
            Mode::Internal
        }
    }

    pub fn sensor(self) -> Sensor {
        match self {
            Mode::External => Sensor::External,
            Mode::Internal => Sensor::Internal,
        }
    }
}

/// Count a mode press, resolve the active comparison temperature and
/// render the full status. A press is only counted once: the call blocks
/// until the mode button reads released, whether or not rendering worked.
///
/// Returns whether the mode toggled.
pub fn update<UP, DOWN, MODE, D, W>(
    state: &mut ControllerState,
    buttons: &ButtonHandler<UP, DOWN, MODE>,
    delay: &mut D,
    display: &mut W,
) -> Result<bool, Error>
where
    UP: InputPin,
    DOWN: InputPin,
    MODE: InputPin,
    D: DelayMs<u16>,
    W: uWrite + ?Sized,
{
    let toggled = buttons.is_pressed(Button::Mode)?;
    if toggled {
        // Wrapping keeps parity
        state.mode_presses = state.mode_presses.wrapping_add(1);
    }

    let mode = state.mode();
    state.active_celsius = state.reading(mode.sensor()).celsius;

    let shown = display::render(display, mode, &state.internal, &state.external, state.setpoint);
    buttons.wait_release(Button::Mode, delay)?;
    shown?;

    Ok(toggled)
}
