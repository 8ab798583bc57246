//! Two-line status layout

use ufmt::uWrite;

use crate::control::furnace::FurnaceState;
use crate::control::mode::Mode;
use crate::control::sensor::TemperatureReading;
use crate::Error;

/// Degree sign in the HD44780 A00 character ROM
pub const DEGREE: &str = "\u{df}";
/// ESC followed by "set DDRAM address 0x40": row 2, column 0
pub const SECOND_LINE: &str = "\u{1b}\u{c0}";

/// A character display. Text is single-byte codes; `ESC` introduces a raw
/// controller command.
pub trait Display: uWrite {
    /// Reinitialise the controller and blank the screen.
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// `ii.f°C -> ee.f°C ` on the first line and the setpoint on the second.
/// The arrow points at the sensor that feeds the furnace decision.
pub fn render<W: uWrite + ?Sized>(
    display: &mut W,
    mode: Mode,
    internal: &TemperatureReading,
    external: &TemperatureReading,
    setpoint: u8,
) -> Result<(), Error> {
    let arrow = match mode {
        Mode::External => "->",
        Mode::Internal => "<-",
    };
    ufmt::uwrite!(
        display,
        "{}.{}{}C {} {}.{}{}C ",
        internal.integer,
        internal.tenths,
        DEGREE,
        arrow,
        external.integer,
        external.tenths,
        DEGREE
    )
    .map_err(|_| Error::DisplayUnavailable)?;
    render_setpoint(display, setpoint)
}

pub fn render_setpoint<W: uWrite + ?Sized>(display: &mut W, setpoint: u8) -> Result<(), Error> {
    ufmt::uwrite!(display, "{}      {}{}C", SECOND_LINE, setpoint, DEGREE).map_err(|_| Error::DisplayUnavailable)
}

pub fn render_furnace<W: uWrite + ?Sized>(display: &mut W, state: FurnaceState) -> Result<(), Error> {
    display.write_str(state.label()).map_err(|_| Error::DisplayUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingSink, TextSink};

    fn readings() -> (TemperatureReading, TemperatureReading) {
        (
            TemperatureReading::from_celsius(21.75),
            TemperatureReading::from_celsius(22.4609375),
        )
    }

    #[test]
    fn external_layout_points_right() {
        let (internal, external) = readings();
        let mut sink = TextSink::default();
        render(&mut sink, Mode::External, &internal, &external, 23).unwrap();
        assert_eq!(sink.text(), "21.7\u{df}C -> 22.4\u{df}C \u{1b}\u{c0}      23\u{df}C");
    }

    #[test]
    fn internal_layout_points_left() {
        let (internal, external) = readings();
        let mut sink = TextSink::default();
        render(&mut sink, Mode::Internal, &internal, &external, 10).unwrap();
        assert_eq!(sink.text(), "21.7\u{df}C <- 22.4\u{df}C \u{1b}\u{c0}      10\u{df}C");
    }

    #[test]
    fn furnace_annotation() {
        let mut sink = TextSink::default();
        render_furnace(&mut sink, FurnaceState::On).unwrap();
        render_furnace(&mut sink, FurnaceState::Off).unwrap();
        assert_eq!(sink.text(), " ON OFF");
    }

    #[test]
    fn write_failure_is_display_unavailable() {
        let (internal, external) = readings();
        assert_eq!(
            render(&mut FailingSink, Mode::External, &internal, &external, 23),
            Err(Error::DisplayUnavailable)
        );
        assert_eq!(render_setpoint(&mut FailingSink, 23), Err(Error::DisplayUnavailable));
    }
}
