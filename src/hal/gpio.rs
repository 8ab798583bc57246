use avr_device::atmega328p::{PORTB, PORTC, PORTD};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub struct Input;
pub struct Output;

/// Pin `PIN` of `PORT` in `MODE`. Owning the value is owning the pin.
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Pin<PORT, P, MODE> {
    const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

macro_rules! impl_port {
    ($PORT:ident, $pin:ident, $ddr:ident, $port:ident) => {
        impl<const P: u8, MODE> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                // Set DDRx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin::new()
            }

            pub fn into_pull_up_input(self) -> Pin<$PORT, P, Input> {
                // Clear DDRx bit and enable pull-up
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin::new()
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            #[inline]
            fn set_high(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Ok(())
            }
        }

        impl<const P: u8> InputPin for Pin<$PORT, P, Input> {
            type Error = Infallible;

            #[inline]
            fn is_high(&self) -> Result<bool, Infallible> {
                let bits = unsafe { (*$PORT::ptr()).$pin.read().bits() };
                Ok(bits & (1 << P) != 0)
            }

            #[inline]
            fn is_low(&self) -> Result<bool, Infallible> {
                self.is_high().map(|high| !high)
            }
        }
    };
}

impl_port!(PORTB, pinb, ddrb, portb);
impl_port!(PORTC, pinc, ddrc, portc);
impl_port!(PORTD, pind, ddrd, portd);

/// The pins this board uses, split from their port peripherals.
pub struct Pins {
    pub pb0: Pin<PORTB, 0, Input>,
    pub pb1: Pin<PORTB, 1, Input>,
    pub pb2: Pin<PORTB, 2, Input>,
    pub pc3: Pin<PORTC, 3, Input>,
    pub pc4: Pin<PORTC, 4, Input>,
    pub pc5: Pin<PORTC, 5, Input>,
    pub pd4: Pin<PORTD, 4, Input>,
    pub pd5: Pin<PORTD, 5, Input>,
    pub pd6: Pin<PORTD, 6, Input>,
    pub pd7: Pin<PORTD, 7, Input>,
}

impl Pins {
    pub fn new(_portb: PORTB, _portc: PORTC, _portd: PORTD) -> Self {
        Self {
            pb0: Pin::new(),
            pb1: Pin::new(),
            pb2: Pin::new(),
            pc3: Pin::new(),
            pc4: Pin::new(),
            pc5: Pin::new(),
            pd4: Pin::new(),
            pd5: Pin::new(),
            pd6: Pin::new(),
            pd7: Pin::new(),
        }
    }
}
