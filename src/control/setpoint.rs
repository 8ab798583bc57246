//! User-adjustable target temperature

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::InputPin;
use ufmt::uWrite;

use crate::config::{SETPOINT_DEFAULT, SETPOINT_MAX, SETPOINT_MIN};
use crate::control::display;
use crate::drivers::button_handler::{Button, ButtonHandler};
use crate::Error;

/// Inclusive range the setpoint cycles through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetpointRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl Default for SetpointRange {
    fn default() -> Self {
        Self {
            min: SETPOINT_MIN,
            max: SETPOINT_MAX,
            default: SETPOINT_DEFAULT,
        }
    }
}

impl SetpointRange {
    /// One step up; `max` wraps to `min`.
    pub fn increment(&self, setpoint: u8) -> u8 {
        let base = if setpoint == self.max {
            self.min.wrapping_sub(1)
        } else {
            setpoint
        };
        base.wrapping_add(1)
    }

    /// One step down; `min` wraps to `max`.
    pub fn decrement(&self, setpoint: u8) -> u8 {
        let base = if setpoint == self.min {
            self.max.wrapping_add(1)
        } else {
            setpoint
        };
        base.wrapping_sub(1)
    }
}

pub struct SetpointController {
    range: SetpointRange,
}

impl SetpointController {
    pub fn new(range: SetpointRange) -> Self {
        Self { range }
    }

    /// Apply at most one step per button. Increase is checked first. Each
    /// step shows the new value immediately, then blocks until that button
    /// is released so a held button counts once. The release wait runs
    /// even when the display write fails.
    ///
    /// Returns whether a button was acted on.
    pub fn update<UP, DOWN, MODE, D, W>(
        &self,
        setpoint: &mut u8,
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
        let mut changed = false;

        if buttons.is_pressed(Button::Increase)? {
            *setpoint = self.range.increment(*setpoint);
            changed = true;
            let shown = display::render_setpoint(display, *setpoint);
            buttons.wait_release(Button::Increase, delay)?;
            shown?;
        }

        if buttons.is_pressed(Button::Decrease)? {
            *setpoint = self.range.decrement(*setpoint);
            changed = true;
            let shown = display::render_setpoint(display, *setpoint);
            buttons.wait_release(Button::Decrease, delay)?;
            shown?;
        }

        Ok(changed)
    }
}
