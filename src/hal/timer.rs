use avr_device::atmega328p::TC0;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::CPU_FREQ_HZ;

// Timer0 clocked at CPU/8
const CS_DIV8: u8 = 0x02;
const TICKS_PER_MS: u8 = (CPU_FREQ_HZ / 8 / 1000) as u8;
const US_PER_TICK: u16 = (8_000_000 / CPU_FREQ_HZ) as u16;

/// Busy-wait delay on Timer/Counter0 in normal mode.
///
/// Several instances may exist; they share the counter but the loop never
/// runs two delays at once.
pub struct Delay {
    _private: (),
}

impl Delay {
    pub fn new() -> Self {
        unsafe {
            let p = TC0::ptr();
            (*p).tccr0a.write(|w| w.bits(0));
            (*p).tccr0b.write(|w| w.bits(CS_DIV8));
        }
        Self { _private: () }
    }

    fn wait_ticks(&mut self, ticks: u8) {
        unsafe {
            let p = TC0::ptr();
            (*p).tcnt0.write(|w| w.bits(0));
            while (*p).tcnt0.read().bits() < ticks {}
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.wait_ticks(TICKS_PER_MS);
        }
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        // Rounded up to whole ticks
        let mut ticks = us.div_ceil(US_PER_TICK);
        while ticks > 0 {
            let chunk = ticks.min(250);
            self.wait_ticks(chunk as u8);
            ticks -= chunk;
        }
    }
}
