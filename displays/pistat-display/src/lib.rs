//! Display layer for pistat
//!
//! This crate provides:
//! - `DisplayBackend` trait for panels the monitor can push frames to
//! - `Framebuffer`, a 1-bit page-layout bitmap that `embedded-graphics` draws into
//! - `Screen`, the fixed three-row text layout rendered into a framebuffer
//! - `Ssd1306`, a blocking I2C driver for SSD1306 OLED panels
//!
//! # Architecture
//!
//! The monitor owns one `Framebuffer` for the life of the process. Each cycle
//! it clears the buffer, renders a `Screen` into it and hands it to a
//! `DisplayBackend`. The backend never keeps a reference to the buffer; it
//! copies the pages out to hardware during `push_frame`.

#![deny(unsafe_code)]

pub mod backend;
pub mod framebuffer;
pub mod screen;
pub mod ssd1306;

// Re-export key types
pub use backend::{BusErrorKind, DisplayBackend, DisplayError};
pub use framebuffer::Framebuffer;
pub use screen::{Screen, LINE_HEIGHT, SCREEN_COLS, SCREEN_ROWS};
pub use ssd1306::Ssd1306;

pub use embedded_graphics::geometry::Size;
