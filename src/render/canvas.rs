/// Button-sized RGBA drawing surface with centered monospace text helpers.
use std::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use tiny_skia::{Color, Pixmap};

use crate::error::RenderError;

/// A black square pixmap that mono fonts can be drawn onto.
pub struct ButtonCanvas {
    pixmap: Pixmap,
}

impl ButtonCanvas {
    /// Allocate a canvas filled with the background color.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
        pixmap.fill(Color::BLACK);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Draw a single line horizontally centered within a horizontal band.
    pub fn draw_text_centered(
        &mut self,
        text: &str,
        font: &'static MonoFont<'static>,
        band_top: i32,
        band_height: u32,
    ) {
        self.draw_lines_centered(&[text], font, band_top, band_height);
    }

    /// Draw a stack of lines centered both ways within a horizontal band.
    /// Lines that still overflow the band are clipped by the draw target.
    pub fn draw_lines_centered(
        &mut self,
        lines: &[&str],
        font: &'static MonoFont<'static>,
        band_top: i32,
        band_height: u32,
    ) {
        if lines.is_empty() {
            return;
        }
        let line_height = font.character_size.height as i32;
        let total_height = line_height * lines.len() as i32;
        let start_y = band_top + ((band_height as i32 - total_height) / 2).max(0);
        let style = MonoTextStyle::new(font, Rgb888::WHITE);
        for (row, line) in lines.iter().enumerate() {
            let x = ((self.width() as i32 - text_width(font, line) as i32) / 2).max(0);
            let y = start_y + line_height * row as i32;
            // Infallible target, the result carries no information.
            let _ = Text::with_baseline(line, Point::new(x, y), style, Baseline::Top).draw(self);
        }
    }
}

/// Advance width of `text` in the given mono font.
pub(crate) fn text_width(font: &MonoFont<'_>, text: &str) -> u32 {
    let glyphs = text.chars().count() as u32;
    if glyphs == 0 {
        return 0;
    }
    glyphs * font.character_size.width + (glyphs - 1) * font.character_spacing
}

impl DrawTarget for ButtonCanvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let data = self.pixmap.data_mut();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x >= width || y >= height {
                continue;
            }
            let idx = ((y * width + x) * 4) as usize;
            data[idx] = color.r();
            data[idx + 1] = color.g();
            data[idx + 2] = color.b();
            data[idx + 3] = 255;
        }
        Ok(())
    }
}

impl OriginDimensions for ButtonCanvas {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }
}
