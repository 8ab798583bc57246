//! Host-side stand-ins for the board peripherals

use core::cell::RefCell;
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::blocking::delay::DelayMs;
use ufmt::uWrite;

use crate::control::sampler::{Channel, ConversionPort};

/// Display and console sink collecting everything written to it.
#[derive(Default)]
pub struct TextSink {
    text: String,
}

impl TextSink {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl uWrite for TextSink {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.text.push_str(s);
        Ok(())
    }
}

/// A display whose wiring is broken.
pub struct FailingSink;

impl uWrite for FailingSink {
    type Error = ();

    fn write_str(&mut self, _s: &str) -> Result<(), ()> {
        Err(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Select(u8),
    Delay(u16),
    Start,
    Poll,
    Release,
}

/// Converter returning scripted samples after `busy_polls` incomplete polls
/// each. With no samples left the conversion never completes.
pub struct ScriptedAdc {
    samples: VecDeque<u16>,
    busy_polls: u16,
    remaining: u16,
    events: Rc<RefCell<Vec<Event>>>,
}

impl ScriptedAdc {
    pub fn new(samples: &[u16], busy_polls: u16) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            busy_polls,
            remaining: busy_polls,
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn stuck() -> Self {
        Self::new(&[], 0)
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl ConversionPort for ScriptedAdc {
    fn select(&mut self, channel: Channel) {
        self.events.borrow_mut().push(Event::Select(channel.admux()));
    }

    fn start(&mut self) {
        self.remaining = self.busy_polls;
        self.events.borrow_mut().push(Event::Start);
    }

    fn take_sample(&mut self) -> nb::Result<u16, Infallible> {
        self.events.borrow_mut().push(Event::Poll);
        if self.remaining > 0 {
            self.remaining -= 1;
            return Err(nb::Error::WouldBlock);
        }
        self.samples.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn release(&mut self) {
        self.events.borrow_mut().push(Event::Release);
    }
}

/// Delay that records into a converter's event log.
pub struct RecordingDelay {
    events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingDelay {
    pub fn sharing(adc: &ScriptedAdc) -> Self {
        Self {
            events: adc.events.clone(),
        }
    }
}

impl DelayMs<u16> for RecordingDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.events.borrow_mut().push(Event::Delay(ms));
    }
}
