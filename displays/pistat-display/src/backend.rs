//! Display backend trait
//!
//! Defines the interface between the stats loop and a physical panel.

use embedded_graphics::geometry::Size;
use thiserror::Error;

use crate::framebuffer::Framebuffer;

/// Bus error classification carried by [`DisplayError::Communication`]
pub use embedded_hal::i2c::ErrorKind as BusErrorKind;

/// Display backend errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// Communication error with the display controller
    #[error("display bus communication failed: {0:?}")]
    Communication(BusErrorKind),
    /// The driver does not support this panel geometry
    #[error("unsupported display size {width}x{height}")]
    UnsupportedSize { width: u32, height: u32 },
    /// A frame was pushed whose size differs from the panel
    #[error("frame is {frame_width}x{frame_height} but display is {width}x{height}")]
    FrameSizeMismatch {
        frame_width: u32,
        frame_height: u32,
        width: u32,
        height: u32,
    },
    /// Display not initialized
    #[error("display not initialized")]
    NotInitialized,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for a monochrome panel. The
/// framebuffer is owned by the caller; the backend only reads it.
pub trait DisplayBackend {
    /// Panel dimensions in pixels
    fn size(&self) -> Size;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Copy a full frame out to the panel
    ///
    /// The frame must have exactly the dimensions reported by [`size`](Self::size).
    fn push_frame(&mut self, frame: &Framebuffer) -> Result<(), DisplayError>;
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn push_frame(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        (**self).push_frame(frame)
    }
}

/// Check that a frame matches the panel before writing it
pub fn ensure_frame_size(frame: &Framebuffer, panel: Size) -> Result<(), DisplayError> {
    let frame_size = frame.size();
    if frame_size == panel {
        Ok(())
    } else {
        Err(DisplayError::FrameSizeMismatch {
            frame_width: frame_size.width,
            frame_height: frame_size.height,
            width: panel.width,
            height: panel.height,
        })
    }
}
