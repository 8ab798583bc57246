//! HD44780 character LCD in 4-bit mode, write only (R/W tied low)

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;
use ufmt::uWrite;

use crate::control::display::Display;
use crate::Error;

const ESC: u8 = 0x1B;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_OFF: u8 = 0x08;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;

pub struct Lcd<RS, EN, D4, D5, D6, D7, D> {
    rs: RS,
    en: EN,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
    delay: D,
    escape: bool,
}

fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), Error> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| Error::DisplayUnavailable)
}

impl<RS, EN, D4, D5, D6, D7, D> Lcd<RS, EN, D4, D5, D6, D7, D>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    D: DelayMs<u16> + DelayUs<u16>,
{
    pub fn new(rs: RS, en: EN, d4: D4, d5: D5, d6: D6, d7: D7, delay: D) -> Self {
        Self {
            rs,
            en,
            d4,
            d5,
            d6,
            d7,
            delay,
            escape: false,
        }
    }

    /// Power-on initialisation by instruction; also used to reset the
    /// screen before every redraw.
    pub fn init(&mut self) -> Result<(), Error> {
        self.escape = false;
        self.delay.delay_ms(15);
        set(&mut self.rs, false)?;
        set(&mut self.en, false)?;

        // Three times 8-bit mode, then switch to 4-bit
        self.write_nibble(0x3)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x3)?;
        self.delay.delay_us(100);
        self.write_nibble(0x3)?;
        self.delay.delay_us(100);
        self.write_nibble(0x2)?;
        self.delay.delay_us(100);

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_OFF)?;
        self.command(CMD_CLEAR)?;
        self.command(CMD_ENTRY_INCREMENT)?;
        self.command(CMD_DISPLAY_ON)
    }

    pub fn command(&mut self, cmd: u8) -> Result<(), Error> {
        self.send(cmd, false)?;
        // Clear and home take far longer than other instructions
        if cmd <= 0x03 {
            self.delay.delay_ms(2);
        }
        Ok(())
    }

    /// Data bytes go to DDRAM; `ESC` makes the following byte a command.
    pub fn put(&mut self, byte: u8) -> Result<(), Error> {
        if self.escape {
            self.escape = false;
            self.command(byte)
        } else if byte == ESC {
            self.escape = true;
            Ok(())
        } else {
            self.send(byte, true)
        }
    }

    fn send(&mut self, byte: u8, data: bool) -> Result<(), Error> {
        set(&mut self.rs, data)?;
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), Error> {
        set(&mut self.d4, nibble & 0x1 != 0)?;
        set(&mut self.d5, nibble & 0x2 != 0)?;
        set(&mut self.d6, nibble & 0x4 != 0)?;
        set(&mut self.d7, nibble & 0x8 != 0)?;
        // Latched on the falling edge
        set(&mut self.en, true)?;
        self.delay.delay_us(1);
        set(&mut self.en, false)
    }
}

impl<RS, EN, D4, D5, D6, D7, D> uWrite for Lcd<RS, EN, D4, D5, D6, D7, D>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    D: DelayMs<u16> + DelayUs<u16>,
{
    type Error = Error;

    /// Characters up to U+00FF are sent as that byte; anything else as `?`.
    fn write_str(&mut self, s: &str) -> Result<(), Error> {
        for c in s.chars() {
            let byte = u8::try_from(u32::from(c)).unwrap_or(b'?');
            self.put(byte)?;
        }
        Ok(())
    }
}

impl<RS, EN, D4, D5, D6, D7, D> Display for Lcd<RS, EN, D4, D5, D6, D7, D>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    D: DelayMs<u16> + DelayUs<u16>,
{
    fn clear(&mut self) -> Result<(), Error> {
        self.init()
    }
}
