use core::cell::Cell;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::InputPin;

use crate::config::WaitLimits;
use crate::wait;
use crate::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Increase,
    Decrease,
    Mode,
}

impl Button {
    fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::Increase => "increase",
            Button::Decrease => "decrease",
            Button::Mode => "mode",
        }
    }
}

/// The three front-panel buttons. All are active low with pull-ups.
///
/// Debouncing is by blocking: a press is acted on once, then
/// [`wait_release`](Self::wait_release) holds the loop until the contact
/// opens again. A button reported stuck stays ignored until it has been
/// seen released, so a contact that never opens is not counted every cycle.
pub struct ButtonHandler<UP, DOWN, MODE> {
    increase: UP,
    decrease: DOWN,
    mode: MODE,
    release_polls: u16,
    poll_interval_ms: u16,
    stuck: Cell<u8>,
}

impl<UP, DOWN, MODE> ButtonHandler<UP, DOWN, MODE>
where
    UP: InputPin,
    DOWN: InputPin,
    MODE: InputPin,
{
    pub fn new(increase: UP, decrease: DOWN, mode: MODE, limits: &WaitLimits) -> Self {
        Self {
            increase,
            decrease,
            mode,
            release_polls: limits.release_polls,
            poll_interval_ms: limits.release_poll_interval_ms,
            stuck: Cell::new(0),
        }
    }

    pub fn is_pressed(&self, button: Button) -> Result<bool, Error> {
        // Buttons are active low
        let low = match button {
            Button::Increase => self.increase.is_low().map_err(|_| Error::PinFault)?,
            Button::Decrease => self.decrease.is_low().map_err(|_| Error::PinFault)?,
            Button::Mode => self.mode.is_low().map_err(|_| Error::PinFault)?,
        };
        if !low {
            self.stuck.set(self.stuck.get() & !button.bit());
        }
        Ok(low && !self.is_stuck(button))
    }

    pub fn is_stuck(&self, button: Button) -> bool {
        self.stuck.get() & button.bit() != 0
    }

    /// Block until `button` reads released. Returns immediately if it
    /// already is, or if it was reported stuck before.
    pub fn wait_release<D: DelayMs<u16>>(&self, button: Button, delay: &mut D) -> Result<(), Error> {
        let interval = self.poll_interval_ms;
        wait::retry(
            self.release_polls,
            || match self.is_pressed(button) {
                Ok(true) => Err(nb::Error::WouldBlock),
                Ok(false) => Ok(()),
                Err(e) => Err(nb::Error::Other(e)),
            },
            || delay.delay_ms(interval),
        )
        .map_err(|e| match e {
            nb::Error::WouldBlock => {
                self.stuck.set(self.stuck.get() | button.bit());
                Error::InputStuck(button)
            }
            nb::Error::Other(e) => e,
        })
    }
}
