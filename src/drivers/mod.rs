pub mod button_handler;
pub mod lcd;
pub mod serial_console;

pub use button_handler::{Button, ButtonHandler};
pub use lcd::Lcd;
pub use serial_console::SerialConsole;
