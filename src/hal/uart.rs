use avr_device::atmega328p::USART0;
use core::convert::Infallible;
use ufmt::uWrite;

use crate::config::{CPU_FREQ_HZ, UART_BAUD};

// Double speed mode: UBRR = F_CPU / (8 * baud) - 1
const UBRR: u16 = (CPU_FREQ_HZ / (8 * UART_BAUD) - 1) as u16;

// UCSR0A bits
const U2X0: u8 = 1 << 1;
const UDRE0: u8 = 1 << 5;
// UCSR0B bits
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous, 8N1
const UCSZ_8BIT: u8 = 0b11 << 1;

/// Polled transmitter on USART0 (TX on PD1); the diagnostic console.
pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        unsafe {
            usart.ubrr0.write(|w| w.bits(UBRR));
            usart.ucsr0a.write(|w| w.bits(U2X0));
            usart.ucsr0c.write(|w| w.bits(UCSZ_8BIT));
            usart.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { usart }
    }

    pub fn write_byte(&mut self, byte: u8) {
        // Data register empty within one frame time
        while self.usart.ucsr0a.read().bits() & UDRE0 == 0 {}
        unsafe {
            self.usart.udr0.write(|w| w.bits(byte));
        }
    }
}

impl uWrite for Uart {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}
