//! DF2301Q offline voice recognition module
//!
//! Talks to the module through its I2C register interface: the module
//! latches the id of the last recognised command word in a register that
//! reads back as 0 once consumed.

use embedded_hal::i2c::I2c;

/// Default 7 bit bus address
pub const DEFAULT_ADDRESS: u8 = 0x64;

/// Register map
pub struct Reg;
impl Reg {
    /// Last recognised command id (read)
    pub const CMD_ID: u8 = 0x02;
    /// Play the reply audio of a command id (write)
    pub const PLAY_CMD_ID: u8 = 0x03;
    pub const SET_MUTE: u8 = 0x04;
    pub const SET_VOLUME: u8 = 0x05;
    /// Seconds the module stays awake after the wake word
    pub const WAKE_TIME: u8 = 0x06;
}

/// Valid speaker volume steps
pub const VOLUME_RANGE: core::ops::RangeInclusive<u8> = 1..=7;

#[derive(Debug)]
pub enum Df2301qError<E> {
    /// Bus transfer failed
    I2c(E),
    /// Volume outside [`VOLUME_RANGE`]
    InvalidVolume(u8),
}

impl<E: core::fmt::Debug> std::fmt::Display for Df2301qError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Df2301qError::I2c(e) => write!(f, "I2C transfer failed: {:?}", e),
            Df2301qError::InvalidVolume(v) => write!(
                f,
                "volume {} outside {}..={}",
                v,
                VOLUME_RANGE.start(),
                VOLUME_RANGE.end()
            ),
        }
    }
}

impl<E: core::fmt::Debug> std::error::Error for Df2301qError<E> {}

pub struct Df2301q<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Df2301q<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check the module answers on the bus
    pub fn ping(&mut self) -> Result<(), Df2301qError<I2C::Error>> {
        self.i2c.write(self.address, &[]).map_err(Df2301qError::I2c)
    }

    /// Id of the last recognised command word, 0 when there is none
    pub fn cmd_id(&mut self) -> Result<u8, Df2301qError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[Reg::CMD_ID], &mut buf)
            .map_err(Df2301qError::I2c)?;
        Ok(buf[0])
    }

    /// Play the reply audio the module has for a command id
    pub fn play_by_cmd_id(&mut self, id: u8) -> Result<(), Df2301qError<I2C::Error>> {
        self.write_reg(Reg::PLAY_CMD_ID, id)
    }

    pub fn set_mute(&mut self, mute: bool) -> Result<(), Df2301qError<I2C::Error>> {
        self.write_reg(Reg::SET_MUTE, u8::from(mute))
    }

    pub fn set_volume(&mut self, volume: u8) -> Result<(), Df2301qError<I2C::Error>> {
        if !VOLUME_RANGE.contains(&volume) {
            return Err(Df2301qError::InvalidVolume(volume));
        }
        self.write_reg(Reg::SET_VOLUME, volume)
    }

    /// Seconds to stay awake after the wake word, 0-255
    pub fn set_wake_time(&mut self, seconds: u8) -> Result<(), Df2301qError<I2C::Error>> {
        self.write_reg(Reg::WAKE_TIME, seconds)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Df2301qError<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Df2301qError::I2c)
    }
}
