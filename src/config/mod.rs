//! Compile-time configuration
//!
//! There is nothing to read at runtime: the pin map lives in [`Pins`] and
//! everything the application does is tuned through [`Settings`].

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::ili9341::Rotation;
use crate::screen::LogStyle;
use crate::voice::RetryPolicy;

mod pins;
pub use pins::Pins;

/// Optional voice module settings, written once it answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceSettings {
    /// Speaker volume 1-7
    pub volume: Option<u8>,
    pub mute: Option<bool>,
    /// Seconds to stay awake after the wake word
    pub wake_time: Option<u8>,
}

impl VoiceSettings {
    pub fn is_empty(&self) -> bool {
        self.volume.is_none() && self.mute.is_none() && self.wake_time.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Log lines written before the next one starts on a cleared screen
    pub line_capacity: usize,
    /// Printed once after the display comes up
    pub banner: &'static [&'static str],
    pub poll_period_ms: u32,
    pub startup_retry: RetryPolicy,
    pub digit_dwell_ms: u32,
    pub text_size: u8,
    pub digit_size: u8,
    pub foreground: Rgb565,
    pub background: Rgb565,
    pub rotation: Rotation,
    /// Reply played once the voice module answers
    pub greeting_command: Option<u8>,
    pub voice: VoiceSettings,
    /// SPI clock of the TFT in Hz
    pub spi_baudrate: u32,
    /// I2C clock of the voice module in Hz
    pub i2c_baudrate: u32,
}

impl Settings {
    pub fn log_style(&self) -> LogStyle {
        LogStyle {
            background: self.background,
            text_size: self.text_size,
            digit_size: self.digit_size,
            digit_dwell_ms: self.digit_dwell_ms,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            line_capacity: 13,
            banner: &["DFRobot Voice Activation", " "],
            poll_period_ms: 1000,
            startup_retry: RetryPolicy::forever(3000),
            digit_dwell_ms: 2000,
            text_size: 2,
            digit_size: 15,
            foreground: Rgb565::WHITE,
            background: Rgb565::BLACK,
            rotation: Rotation::Landscape,
            greeting_command: Some(23),
            voice: VoiceSettings::default(),
            spi_baudrate: 26_000_000,
            i2c_baudrate: 100_000,
        }
    }
}
