//! ILI9341 TFT Display Driver
//!
//! Used on the 2.4"/2.8" 240x320 SPI panels sold for the LOLIN D32 Pro
//! (the TFT connector also carries the XPT2046 touch controller).
//!
//! The panel is written pixel by pixel or through solid fills, there is no
//! frame buffer on the microcontroller side. Draw on it with
//! [`embedded_graphics`] or wrap it in a [`crate::screen::TextConsole`].

pub mod driver;
pub mod interface;

mod cmd;

pub use driver::{DisplayError, Ili9341};

/// Panel width in the native portrait orientation
pub const WIDTH: u16 = 240;

/// Panel height in the native portrait orientation
pub const HEIGHT: u16 = 320;

/// Panel orientation, numbered like the Adafruit GFX `setRotation`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// 0: 240x320, connector at the bottom
    Portrait,
    /// 1: 320x240
    Landscape,
    /// 2: 240x320, upside down
    PortraitFlipped,
    /// 3: 320x240, upside down
    LandscapeFlipped,
}

impl Rotation {
    /// Rotation for a GFX style number, wrapping like `setRotation` does
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::Portrait,
            1 => Rotation::Landscape,
            2 => Rotation::PortraitFlipped,
            _ => Rotation::LandscapeFlipped,
        }
    }
}
