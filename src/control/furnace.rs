//! Dead-band furnace control

use embedded_hal::digital::v2::OutputPin;
use ufmt::uWrite;

use crate::control::display;
use crate::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FurnaceState {
    On,
    #[default]
    Off,
}

impl FurnaceState {
    pub fn label(self) -> &'static str {
        match self {
            FurnaceState::On => " ON",
            FurnaceState::Off => " OFF",
        }
    }
}

/// Owns the furnace output (high = energised).
pub struct FurnaceController<O> {
    output: O,
    dead_band: f32,
}

impl<O: OutputPin> FurnaceController<O> {
    pub fn new(output: O, dead_band: f32) -> Self {
        Self { output, dead_band }
    }

    /// Switch on below `setpoint - dead_band`, off above
    /// `setpoint + dead_band`, hold inside the band.
    ///
    /// The two thresholds are independent checks, on first, and the output
    /// is driven after each.
    pub fn evaluate<W: uWrite + ?Sized>(
        &mut self,
        celsius: f32,
        setpoint: u8,
        current: FurnaceState,
        display: &mut W,
    ) -> Result<FurnaceState, Error> {
        let setpoint = setpoint as f32;
        let mut state = current;

        if celsius < setpoint - self.dead_band {
            state = FurnaceState::On;
        }
        self.drive(state)?;

        if celsius > setpoint + self.dead_band {
            state = FurnaceState::Off;
        }
        self.drive(state)?;

        display::render_furnace(display, state)?;
        Ok(state)
    }

    pub fn force_off(&mut self) -> Result<(), Error> {
        self.drive(FurnaceState::Off)
    }

    fn drive(&mut self, state: FurnaceState) -> Result<(), Error> {
        let result = match state {
            FurnaceState::On => self.output.set_high(),
            FurnaceState::Off => self.output.set_low(),
        };
        result.map_err(|_| Error::PinFault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEAD_BAND;
    use crate::testing::TextSink;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    fn driven(state: State) -> [Transaction; 2] {
        [Transaction::set(state.clone()), Transaction::set(state)]
    }

    #[test]
    fn cold_turns_on() {
        let pin = PinMock::new(&driven(State::High));
        let mut furnace = FurnaceController::new(pin.clone(), DEAD_BAND);
        let mut display = TextSink::default();

        let state = furnace.evaluate(22.0, 23, FurnaceState::Off, &mut display).unwrap();

        assert_eq!(state, FurnaceState::On);
        assert_eq!(display.text(), " ON");
        pin.clone().done();
    }

    #[test]
    fn dead_band_holds_on() {
        let pin = PinMock::new(&driven(State::High));
        let mut furnace = FurnaceController::new(pin.clone(), DEAD_BAND);

        let state = furnace
            .evaluate(23.4, 23, FurnaceState::On, &mut TextSink::default())
            .unwrap();

        assert_eq!(state, FurnaceState::On);
        pin.clone().done();
    }

    #[test]
    fn dead_band_holds_off() {
        let pin = PinMock::new(&driven(State::Low));
        let mut furnace = FurnaceController::new(pin.clone(), DEAD_BAND);

        let state = furnace
            .evaluate(22.6, 23, FurnaceState::Off, &mut TextSink::default())
            .unwrap();

        assert_eq!(state, FurnaceState::Off);
        pin.clone().done();
    }

    #[test]
    fn warm_turns_off() {
        let pin = PinMock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]);
        let mut furnace = FurnaceController::new(pin.clone(), DEAD_BAND);
        let mut display = TextSink::default();

        let state = furnace.evaluate(23.6, 23, FurnaceState::On, &mut display).unwrap();

        assert_eq!(state, FurnaceState::Off);
        assert_eq!(display.text(), " OFF");
        pin.clone().done();
    }

    #[test]
    fn band_edges_do_not_switch() {
        let pin = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::High),
        ]);
        let mut furnace = FurnaceController::new(pin.clone(), DEAD_BAND);
        let mut display = TextSink::default();

        assert_eq!(furnace.evaluate(22.5, 23, FurnaceState::Off, &mut display), Ok(FurnaceState::Off));
        assert_eq!(furnace.evaluate(23.5, 23, FurnaceState::On, &mut display), Ok(FurnaceState::On));
        pin.clone().done();
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let pin = PinMock::new(&[
            Transaction::set(State::High),
            Transaction::set(State::High),
            Transaction::set(State::High),
            Transaction::set(State::High),
        ]);
        let mut furnace = FurnaceController::new(pin.clone(), DEAD_BAND);
        let mut display = TextSink::default();

        let first = furnace.evaluate(22.0, 23, FurnaceState::Off, &mut display).unwrap();
        let second = furnace.evaluate(22.0, 23, first, &mut display).unwrap();

        assert_eq!(first, second);
        pin.clone().done();
    }

    #[test]
    fn force_off_drives_low() {
        let pin = PinMock::new(&[Transaction::set(State::Low)]);
        let mut furnace = FurnaceController::new(pin.clone(), DEAD_BAND);

        assert_eq!(furnace.force_off(), Ok(()));
        pin.clone().done();
    }
}
