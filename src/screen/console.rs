//! Text console on top of an `embedded-graphics` draw target
//!
//! Works like the Adafruit GFX text API the panel is usually driven with:
//! a pixel cursor, an integer text size that scales a small monospace font,
//! wrapping at the right edge and `println` returning to column 0.

use display_interface::DisplayError;
use embedded_graphics::{
    mono_font::{iso_8859_15::FONT_5X8, MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};

use super::Surface;

/// Terminal-like text output on a color display
pub struct TextConsole<D> {
    target: D,
    font: &'static MonoFont<'static>,
    cursor: Point,
    text_size: u8,
    text_color: Rgb565,
    wrap: bool,
}

impl<D> TextConsole<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            font: &FONT_5X8,
            cursor: Point::zero(),
            text_size: 1,
            text_color: Rgb565::WHITE,
            wrap: true,
        }
    }

    /// Use another monospace font as the size 1 glyphs
    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    /// Keep drawing past the right edge instead of wrapping
    pub fn without_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn text_size(&self) -> u8 {
        self.text_size
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Give the draw target back
    pub fn release(self) -> D {
        self.target
    }

    /// Size of one character cell at the current text size
    pub fn cell_size(&self) -> Size {
        let scale = u32::from(self.text_size);
        Size::new(
            (self.font.character_size.width + self.font.character_spacing) * scale,
            self.font.character_size.height * scale,
        )
    }

    fn newline(&mut self) {
        self.cursor.x = 0;
        self.cursor.y += self.cell_size().height as i32;
    }

    fn draw_char(&mut self, c: char) -> Result<(), DisplayError> {
        let cell = self.cell_size();
        let width = self.target.bounding_box().size.width as i32;
        if self.wrap && self.cursor.x + cell.width as i32 > width {
            self.newline();
        }

        let mut buf = [0u8; 4];
        let style = MonoTextStyle::new(self.font, self.text_color);
        let mut scaled = Scaled {
            target: &mut self.target,
            origin: self.cursor,
            scale: u32::from(self.text_size),
        };
        Text::with_baseline(c.encode_utf8(&mut buf), Point::zero(), style, Baseline::Top)
            .draw(&mut scaled)
            .map_err(|e| {
                log::error!("Failed to draw {:?}: {:?}", c, e);
                DisplayError::BusWriteError
            })?;

        self.cursor.x += cell.width as i32;
        Ok(())
    }
}

impl<D> Surface for TextConsole<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.target.clear(color).map_err(|e| {
            log::error!("Failed to fill screen: {:?}", e);
            DisplayError::BusWriteError
        })
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for c in text.chars() {
            match c {
                '\n' => self.newline(),
                '\r' => {}
                c => self.draw_char(c)?,
            }
        }
        Ok(())
    }
}

/// Draws every pixel as a `scale` x `scale` block starting at `origin`
struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let size = self.target.bounding_box().size;
        Rectangle::new(
            Point::zero(),
            Size::new(size.width / self.scale, size.height / self.scale),
        )
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new(self.scale, self.scale);
        for Pixel(point, color) in pixels {
            let top_left = self.origin + point * self.scale as i32;
            self.target
                .fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}
