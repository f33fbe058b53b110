//! Panel wiring
//!
//! The monitor drives one PiOLED-style panel on the board's header bus.
//! Wiring is fixed at build time; the config file does not cover it.

use pistat_display::Size;

/// I2C character device for the Raspberry Pi header
pub const I2C_BUS: &str = "/dev/i2c-1";

/// SSD1306 address on the header bus
pub const DISPLAY_ADDRESS: u8 = 0x3C;

/// Panel geometry in pixels
pub const PANEL_SIZE: Size = Size::new(128, 32);
