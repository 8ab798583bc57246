use ufmt::{uDisplay, uWrite};

use crate::control::sensor::TemperatureReading;

/// Line-oriented log output over any `uWrite` sink (the UART on target).
///
/// Logging is best effort: a failing sink never interrupts the control loop.
pub struct SerialConsole<W> {
    sink: W,
}

impl<W: uWrite> SerialConsole<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_str(&mut self, s: &str) {
        self.sink.write_str(s).ok();
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn info(&mut self, msg: &str) {
        self.write_str("[INF] ");
        self.write_line(msg);
    }

    pub fn warn(&mut self, msg: &str) {
        self.write_str("[WRN] ");
        self.write_line(msg);
    }

    pub fn error<E: uDisplay>(&mut self, err: &E) {
        self.write_str("[ERR] ");
        ufmt::uwrite!(self.sink, "{}", err).ok();
        self.write_str("\r\n");
    }

    /// `[INF] msg: value`
    pub fn info_value<V: uDisplay>(&mut self, msg: &str, value: V) {
        self.write_str("[INF] ");
        ufmt::uwrite!(self.sink, "{}: {}\r\n", msg, value).ok();
    }

    /// `[INF] msg: ii.f`
    pub fn info_reading(&mut self, msg: &str, reading: &TemperatureReading) {
        self.write_str("[INF] ");
        ufmt::uwrite!(self.sink, "{}: {}.{}\r\n", msg, reading.integer, reading.tenths).ok();
    }

    // Print formatted debug info
    #[cfg(feature = "debug")]
    pub fn debug_readings(&mut self, internal: &TemperatureReading, external: &TemperatureReading) {
        ufmt::uwrite!(
            self.sink,
            "[DBG] int {}.{} ext {}.{}\r\n",
            internal.integer,
            internal.tenths,
            external.integer,
            external.tenths
        )
        .ok();
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }
}
