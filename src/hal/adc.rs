use avr_device::atmega328p::ADC;
use core::convert::Infallible;

use crate::control::sampler::{Channel, ConversionPort};

// ADCSRA bits
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const ADIF: u8 = 1 << 4;

// ADPS2:0 = /8, 125kHz ADC clock @ 1MHz
const PRESCALER_DIV8: u8 = 0b011;

/// Single-conversion access to the ADC, one channel at a time.
pub struct Adc {
    adc: ADC,
}

impl Adc {
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }
}

impl ConversionPort for Adc {
    fn select(&mut self, channel: Channel) {
        unsafe {
            self.adc.adcsra.write(|w| w.bits(ADEN | PRESCALER_DIV8));
            self.adc.admux.write(|w| w.bits(channel.admux()));
        }
    }

    fn start(&mut self) {
        unsafe {
            self.adc.adcsra.modify(|r, w| w.bits(r.bits() | ADSC));
        }
    }

    fn take_sample(&mut self) -> nb::Result<u16, Infallible> {
        if self.adc.adcsra.read().bits() & ADIF == 0 {
            return Err(nb::Error::WouldBlock);
        }
        // ADIF clears by writing a one
        unsafe {
            self.adc.adcsra.modify(|r, w| w.bits(r.bits() | ADIF));
        }
        Ok(self.adc.adc.read().bits())
    }

    fn release(&mut self) {
        unsafe {
            self.adc.admux.write(|w| w.bits(0x00));
            self.adc.adcsra.write(|w| w.bits(0x00));
        }
    }
}
