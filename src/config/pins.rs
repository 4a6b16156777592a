//! Pin definitions for the LOLIN D32 Pro with the TFT and voice module attached
//!
//! This module contains all GPIO pin assignments used in the hardware configuration.
//!
//! The DF2301Q is read through its I2C interface on [`Pins::VOICE_SDA`] and
//! [`Pins::VOICE_SCL`]. Boards wired for the module's UART (UART1 on rx 5,
//! tx 18) need the module switched to I2C and moved to these two pins.

/// Pin configuration constants for the TFT panel and peripherals
pub struct Pins;

impl Pins {
    // SPI Display pins (TFT connector)
    /// Chip Select pin for SPI display
    pub const TFT_CS: u8 = 14;
    /// Data/Command control pin (High for data, Low for command)
    pub const TFT_DC: u8 = 27;
    /// Reset pin for display
    pub const TFT_RST: u8 = 33;
    /// SPI Clock pin (VSPI)
    pub const SCK: u8 = 18;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 23;
    /// SPI Master In Slave Out
    pub const MISO: u8 = 19;

    // Touch controller on the same SPI bus, kept deselected
    /// XPT2046 Chip Select
    pub const TS_CS: u8 = 12;

    // Voice module (I2C)
    /// I2C data
    pub const VOICE_SDA: u8 = 21;
    /// I2C clock
    pub const VOICE_SCL: u8 = 22;
}
