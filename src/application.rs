//! Application layer: one polling cycle of the furnace controller and the
//! fail-safe around it

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use ufmt::uWrite;

use crate::config::Config;
use crate::control::display::Display;
use crate::control::furnace::{FurnaceController, FurnaceState};
use crate::control::mode::{self, Mode};
use crate::control::sampler::{AnalogSampler, ConversionPort};
use crate::control::sensor::{ExternalSensor, InternalSensor};
use crate::control::setpoint::SetpointController;
use crate::control::ControllerState;
use crate::drivers::{ButtonHandler, SerialConsole};
use crate::Error;

/// Main application state and logic
pub struct Application<P, UP, DOWN, MODE, OUT, LCD, D, LOG> {
    sampler: AnalogSampler<P>,
    buttons: ButtonHandler<UP, DOWN, MODE>,
    furnace: FurnaceController<OUT>,
    display: LCD,
    delay: D,
    console: SerialConsole<LOG>,
    external: ExternalSensor,
    internal: InternalSensor,
    setpoint: SetpointController,
    refresh_interval_ms: u16,
    state: ControllerState,
}

impl<P, UP, DOWN, MODE, OUT, LCD, D, LOG> Application<P, UP, DOWN, MODE, OUT, LCD, D, LOG>
where
    P: ConversionPort,
    UP: InputPin,
    DOWN: InputPin,
    MODE: InputPin,
    OUT: OutputPin,
    LCD: Display,
    D: DelayMs<u16>,
    LOG: uWrite,
{
    pub fn new(
        config: &Config,
        adc: P,
        buttons: ButtonHandler<UP, DOWN, MODE>,
        furnace: OUT,
        display: LCD,
        delay: D,
        console: SerialConsole<LOG>,
    ) -> Self {
        Self {
            sampler: AnalogSampler::new(adc, &config.limits),
            buttons,
            furnace: FurnaceController::new(furnace, config.dead_band),
            display,
            delay,
            console,
            external: ExternalSensor::new(&config.calibration),
            internal: InternalSensor::new(&config.calibration),
            setpoint: SetpointController::new(config.setpoint),
            refresh_interval_ms: config.refresh_interval_ms,
            state: ControllerState::new(config.setpoint.default),
        }
    }

    /// Put the output in its safe state and announce the configuration.
    pub fn start(&mut self) {
        self.console.info("Furnace controller v0.1.0");
        self.state.furnace = FurnaceState::Off;
        if let Err(err) = self.furnace.force_off() {
            self.console.error(&err);
        }
        self.console.info_value("setpoint", self.state.setpoint);
    }

    /// Run forever; the loop has no terminal state.
    pub fn run(mut self) -> ! {
        self.start();
        loop {
            self.step();
        }
    }

    /// One cycle followed by the refresh delay. A failed cycle forces the
    /// furnace off; the next cycle runs normally.
    pub fn step(&mut self) {
        if let Err(err) = self.run_cycle() {
            self.fail_safe(err);
        }
        self.delay.delay_ms(self.refresh_interval_ms);
    }

    /// Sample both sensors, apply the setpoint buttons, resolve the mode
    /// and render, then decide the furnace output.
    pub fn run_cycle(&mut self) -> Result<(), Error> {
        self.state.external = self.external.read(&mut self.sampler, &mut self.delay)?;
        self.state.internal = self.internal.read(&mut self.sampler, &mut self.delay)?;

        #[cfg(feature = "debug")]
        self.console.debug_readings(&self.state.internal, &self.state.external);

        let changed = self.setpoint.update(
            &mut self.state.setpoint,
            &self.buttons,
            &mut self.delay,
            &mut self.display,
        )?;
        if changed {
            self.console.info_value("setpoint", self.state.setpoint);
        }

        self.display.clear().map_err(|_| Error::DisplayUnavailable)?;

        if mode::update(&mut self.state, &self.buttons, &mut self.delay, &mut self.display)? {
            self.console.info(match self.state.mode() {
                Mode::External => "mode: external",
                Mode::Internal => "mode: internal",
            });
        }

        let next = self.furnace.evaluate(
            self.state.active_celsius,
            self.state.setpoint,
            self.state.furnace,
            &mut self.display,
        )?;
        if next != self.state.furnace {
            self.state.furnace = next;
            let reading = *self.state.reading(self.state.mode().sensor());
            match next {
                FurnaceState::On => self.console.info_reading("furnace ON at", &reading),
                FurnaceState::Off => self.console.info_reading("furnace OFF at", &reading),
            }
        }

        Ok(())
    }

    fn fail_safe(&mut self, err: Error) {
        self.console.error(&err);
        self.state.furnace = FurnaceState::Off;
        if let Err(err) = self.furnace.force_off() {
            self.console.error(&err);
        }
        self.console.warn("furnace forced off");
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn display(&self) -> &LCD {
        &self.display
    }

    pub fn console(&self) -> &SerialConsole<LOG> {
        &self.console
    }
}
