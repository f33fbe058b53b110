//! Monochrome framebuffer
//!
//! 1 bit per pixel, stored in the page layout used by SSD1306-style
//! controllers: each byte holds a vertical run of 8 pixels, least significant
//! bit on top, and pages are laid out left to right, top to bottom.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Pixels per page byte
pub const PAGE_HEIGHT: u32 = 8;

/// In-memory bitmap mirrored to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// Page data, `pages * width` bytes
    buffer: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a blank framebuffer of the given size
    pub fn new(size: Size) -> Self {
        let pages = pages_for(size.height);
        Self {
            width: size.width,
            height: size.height,
            buffer: vec![0; (pages * size.width) as usize],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions in pixels
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Number of 8-pixel pages
    pub fn page_count(&self) -> u32 {
        pages_for(self.height)
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set a single pixel; coordinates outside the buffer are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        let mask = 1u8 << (y % PAGE_HEIGHT);
        if on {
            self.buffer[idx] |= mask;
        } else {
            self.buffer[idx] &= !mask;
        }
    }

    /// Read a single pixel; coordinates outside the buffer read as off
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.buffer[self.index(x, y)] & (1 << (y % PAGE_HEIGHT)) != 0
    }

    /// Raw bytes of one page, `width` bytes long
    pub fn page(&self, page: u32) -> Option<&[u8]> {
        if page >= self.page_count() {
            return None;
        }
        let start = (page * self.width) as usize;
        Some(&self.buffer[start..start + self.width as usize])
    }

    /// Iterate over all pages in display order
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks(self.width.max(1) as usize)
    }

    /// True if no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.buffer.iter().all(|&b| b == 0)
    }

    /// True if any pixel in rows `y_start..y_end` is lit
    pub fn any_lit_in_rows(&self, y_start: u32, y_end: u32) -> bool {
        (y_start..y_end.min(self.height))
            .any(|y| (0..self.width).any(|x| self.pixel(x, y)))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y / PAGE_HEIGHT) * self.width + x) as usize
    }
}

fn pages_for(height: u32) -> u32 {
    height.div_ceil(PAGE_HEIGHT)
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Negative coordinates are clipped
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use proptest::prelude::*;

    fn lit_pixels(fb: &Framebuffer) -> u32 {
        fb.pages().flatten().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn test_new_is_blank() {
        let fb = Framebuffer::new(Size::new(128, 32));
        assert!(fb.is_blank());
        assert_eq!(fb.page_count(), 4);
        assert_eq!(fb.pages().flatten().count(), 512);
    }

    #[test]
    fn test_partial_page_height() {
        let fb = Framebuffer::new(Size::new(10, 12));
        assert_eq!(fb.page_count(), 2);
        assert_eq!(fb.pages().flatten().count(), 20);
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut fb = Framebuffer::new(Size::new(128, 32));
        fb.set_pixel(3, 9, true);
        assert!(fb.pixel(3, 9));
        assert!(!fb.pixel(3, 8));

        // Page 1, column 3, bit 1
        assert_eq!(fb.page(1).unwrap()[3], 0b0000_0010);

        fb.set_pixel(3, 9, false);
        assert!(fb.is_blank());
    }

    #[test]
    fn test_out_of_range_is_clipped() {
        let mut fb = Framebuffer::new(Size::new(16, 8));
        fb.set_pixel(16, 0, true);
        fb.set_pixel(0, 8, true);
        assert!(fb.is_blank());
        assert!(!fb.pixel(100, 100));
        assert!(fb.page(1).is_none());
    }

    #[test]
    fn test_draw_target_and_clear() {
        let mut fb = Framebuffer::new(Size::new(128, 32));
        Rectangle::new(Point::new(-2, -2), Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();

        // Only the visible 4x4 corner lands in the buffer
        assert_eq!(lit_pixels(&fb), 16);
        assert!(fb.any_lit_in_rows(0, 4));
        assert!(!fb.any_lit_in_rows(4, 32));

        fb.clear();
        assert!(fb.is_blank());
    }

    #[test]
    fn test_fill_on() {
        let mut fb = Framebuffer::new(Size::new(8, 8));
        DrawTarget::clear(&mut fb, BinaryColor::On).unwrap();
        assert_eq!(lit_pixels(&fb), 64);
    }

    proptest! {
        #[test]
        fn prop_dimensions_match_request(width in 1u32..=256, height in 1u32..=128) {
            let fb = Framebuffer::new(Size::new(width, height));
            prop_assert_eq!(fb.size(), Size::new(width, height));
            prop_assert_eq!(fb.width(), width);
            prop_assert_eq!(fb.height(), height);
            prop_assert_eq!(fb.pages().count() as u32, height.div_ceil(8));
        }
    }
}
