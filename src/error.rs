//! Failure taxonomy of the control loop

use ufmt::{uDisplay, uWrite, Formatter};

use crate::control::sensor::Sensor;
use crate::drivers::button_handler::Button;

/// Hardware faults surfaced by one polling cycle.
///
/// None of these are retried beyond their bounded wait; the application
/// logs them and forces the furnace off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The conversion-complete flag never set within the poll limit
    ConversionTimeout(Sensor),
    /// A pressed button was never observed released within the poll limit
    InputStuck(Button),
    /// The display rejected a write
    DisplayUnavailable,
    /// A digital pin operation failed
    PinFault,
}

impl uDisplay for Error {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Error::ConversionTimeout(sensor) => {
                f.write_str("conversion timeout on ")?;
                f.write_str(sensor.name())
            }
            Error::InputStuck(button) => {
                f.write_str("button stuck: ")?;
                f.write_str(button.name())
            }
            Error::DisplayUnavailable => f.write_str("display unavailable"),
            Error::PinFault => f.write_str("pin fault"),
        }
    }
}
