//! Analog sampling with channel isolation

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;

use crate::config::WaitLimits;
use crate::control::sensor::Sensor;
use crate::wait;
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    /// AVCC with external capacitor at AREF
    Avcc,
    /// Internal 1.1V bandgap with external capacitor at AREF
    Internal1V1,
}

impl Reference {
    /// REFS1:REFS0 bits
    fn refs(self) -> u8 {
        match self {
            Reference::Avcc => 0b01,
            Reference::Internal1V1 => 0b11,
        }
    }
}

/// One analog source: reference plus multiplexer selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Channel {
    pub sensor: Sensor,
    pub reference: Reference,
    pub mux: u8,
}

impl Channel {
    /// LM35 on ADC0
    pub const EXTERNAL: Channel = Channel {
        sensor: Sensor::External,
        reference: Reference::Avcc,
        mux: 0b0000,
    };

    /// On-die temperature sensor
    pub const INTERNAL: Channel = Channel {
        sensor: Sensor::Internal,
        reference: Reference::Internal1V1,
        mux: 0b1000,
    };

    /// ADMUX register value for this channel (right adjusted result).
    pub fn admux(self) -> u8 {
        (self.reference.refs() << 6) | (self.mux & 0x0F)
    }
}

/// The converter handshake the sampler drives.
pub trait ConversionPort {
    /// Enable the converter and program reference and multiplexer.
    fn select(&mut self, channel: Channel);
    /// Trigger a single conversion.
    fn start(&mut self);
    /// `WouldBlock` until the conversion-complete flag is set; then clear
    /// the flag and return the result.
    fn take_sample(&mut self) -> nb::Result<u16, Infallible>;
    /// Return channel and control registers to their cleared state.
    fn release(&mut self);
}

pub struct AnalogSampler<P> {
    port: P,
    poll_limit: u16,
}

impl<P: ConversionPort> AnalogSampler<P> {
    pub fn new(port: P, limits: &WaitLimits) -> Self {
        Self {
            port,
            poll_limit: limits.conversion_polls,
        }
    }

    /// Run one conversion on `channel`, waiting `settling_ms` between
    /// selecting the channel and starting it.
    ///
    /// The converter is released afterwards whatever the outcome, so the
    /// next caller configures from scratch.
    pub fn sample<D: DelayMs<u16>>(
        &mut self,
        channel: Channel,
        settling_ms: u16,
        delay: &mut D,
    ) -> Result<u16, Error> {
        self.port.select(channel);
        if settling_ms > 0 {
            delay.delay_ms(settling_ms);
        }
        self.port.start();

        let port = &mut self.port;
        let result = wait::retry(self.poll_limit, || port.take_sample(), || {});
        self.port.release();

        result.map_err(|_| Error::ConversionTimeout(channel.sensor))
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}
