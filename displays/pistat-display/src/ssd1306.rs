//! SSD1306 OLED Display Driver
//!
//! Blocking driver for 128x32 and 128x64 SSD1306 panels on I2C, such as the
//! PiOLED bonnet. Frames come from a caller-owned [`Framebuffer`] already
//! laid out in controller pages, so a push is a straight copy.

use embedded_graphics::geometry::Size;
use embedded_hal::i2c::{Error as _, I2c};
use tracing::debug;

use crate::backend::{ensure_frame_size, DisplayBackend, DisplayError};
use crate::framebuffer::{Framebuffer, PAGE_HEIGHT};

/// Default SSD1306 I2C address (0x3D on some modules)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Only panel width the controller supports
const WIDTH: u32 = 128;

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    size: Size,
    initialized: bool,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2c,
{
    /// Create a driver for a panel at `address`
    ///
    /// Nothing is sent to the bus until [`init`](Self::init).
    pub fn new(i2c: I2C, address: u8, size: Size) -> Result<Self, DisplayError> {
        if size.width != WIDTH || !(size.height == 32 || size.height == 64) {
            return Err(DisplayError::UnsupportedSize {
                width: size.width,
                height: size.height,
            });
        }

        Ok(Self {
            i2c,
            address,
            size,
            initialized: false,
        })
    }

    /// Run the controller power-up sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let (com_pins, contrast) = if self.size.height == 32 {
            (0x02, 0x8F)
        } else {
            (0x12, 0xCF)
        };

        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            (self.size.height - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            com_pins,
            cmd::SET_CONTRAST,
            contrast,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_RESUME,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        self.initialized = true;
        debug!(
            address = self.address,
            width = self.size.width,
            height = self.size.height,
            "SSD1306 initialized"
        );
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Send a command byte to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(|e| DisplayError::Communication(e.kind()))
    }

    /// Write page data covering the whole panel
    fn write_pages<'a>(
        &mut self,
        pages: impl Iterator<Item = &'a [u8]>,
    ) -> Result<(), DisplayError> {
        let last_page = (self.size.height / PAGE_HEIGHT - 1) as u8;

        self.command(cmd::SET_COLUMN_ADDR)?;
        self.command(0)?;
        self.command((WIDTH - 1) as u8)?;
        self.command(cmd::SET_PAGE_ADDR)?;
        self.command(0)?;
        self.command(last_page)?;

        let mut data = [0u8; WIDTH as usize + 1];
        data[0] = CONTROL_DATA;
        for page in pages {
            data[1..].copy_from_slice(page);
            self.i2c
                .write(self.address, &data)
                .map_err(|e| DisplayError::Communication(e.kind()))?;
        }

        Ok(())
    }
}

impl<I2C> DisplayBackend for Ssd1306<I2C>
where
    I2C: I2c,
{
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        let blank = [0u8; WIDTH as usize];
        let pages = (self.size.height / PAGE_HEIGHT) as usize;
        self.write_pages(core::iter::repeat(&blank[..]).take(pages))
    }

    fn push_frame(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        ensure_frame_size(frame, self.size)?;
        self.write_pages(frame.pages())
    }
}
