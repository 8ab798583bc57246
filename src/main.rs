#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
mod firmware {
    use panic_halt as _;

    use avr_device::atmega328p::Peripherals;
    use furnace_controller::drivers::{ButtonHandler, Lcd, SerialConsole};
    use furnace_controller::hal::{Adc, Delay, Pins, Uart};
    use furnace_controller::{Application, Config};

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();
        let config = Config::default();

        let pins = Pins::new(dp.PORTB, dp.PORTC, dp.PORTD);

        // Buttons use the internal pull-ups; furnace output starts low
        let buttons = ButtonHandler::new(
            pins.pc3.into_pull_up_input(),
            pins.pc4.into_pull_up_input(),
            pins.pc5.into_pull_up_input(),
            &config.limits,
        );
        let furnace = pins.pb0.into_output();

        let lcd = Lcd::new(
            pins.pb1.into_output(),
            pins.pb2.into_output(),
            pins.pd4.into_output(),
            pins.pd5.into_output(),
            pins.pd6.into_output(),
            pins.pd7.into_output(),
            Delay::new(),
        );
        let console = SerialConsole::new(Uart::new(dp.USART0));

        Application::new(&config, Adc::new(dp.ADC), buttons, furnace, lcd, Delay::new(), console).run()
    }
}

// The firmware only exists on AVR; host builds get an empty binary
#[cfg(not(target_arch = "avr"))]
fn main() {}
