//! Furnace temperature controller for the ATmega328P.
//!
//! Samples an LM35 and the on-die temperature sensor, lets the user move a
//! setpoint with two buttons and pick the controlling sensor with a third,
//! and switches the furnace output with a dead band around the setpoint.
//! Status goes to an HD44780 character display, diagnostics to the UART.
//!
//! The control core is written against embedded-hal traits and builds on
//! the host; register-level code lives in `hal` and is only compiled for
//! AVR.
#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
#[cfg(target_arch = "avr")]
pub mod hal;
pub mod wait;

#[cfg(test)]
mod testing;

pub use application::Application;
pub use config::Config;
pub use error::Error;
