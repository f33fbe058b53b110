//! Text screen layout
//!
//! Three fixed rows of text, drawn with a 6x10 monospace font. Row `n` is
//! placed with its top edge at `n * LINE_HEIGHT` pixels.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

/// Number of text rows
pub const SCREEN_ROWS: usize = 3;

/// Characters per row (128 px panel / 6 px glyphs)
pub const SCREEN_COLS: usize = 21;

/// Vertical distance between rows in pixels
pub const LINE_HEIGHT: i32 = 10;

/// Text content for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
}

impl Screen {
    /// Create an empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every row
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set the content of a row, truncating to the row width
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            for ch in text.chars() {
                if line.push(ch).is_err() {
                    break;
                }
            }
        }
    }

    /// Content of a row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// All rows, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Top edge of a row in pixels
    pub const fn row_offset(row: usize) -> i32 {
        row as i32 * LINE_HEIGHT
    }

    /// Draw all non-empty rows in the "on" color
    ///
    /// The target is not cleared first; callers erase the previous frame.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        for (row, line) in self.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            Text::with_baseline(
                line.as_str(),
                Point::new(0, Self::row_offset(row)),
                style,
                Baseline::Top,
            )
            .draw(target)?;
        }

        Ok(())
    }
}
