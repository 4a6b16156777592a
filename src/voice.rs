//! Voice command source and its start-up
//!
//! The poll loop only needs three things from the voice module: a readiness
//! check, the id of the last recognised command and reply playback.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::commands::CommandId;
use crate::config::VoiceSettings;
use crate::df2301q::{Df2301q, Df2301qError};

/// Something that recognises command words
pub trait CommandSource {
    type Error: core::fmt::Debug;

    /// Succeeds once the peripheral answers
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Last recognised command, [`crate::commands::NO_COMMAND`] when there is none
    fn command_id(&mut self) -> Result<CommandId, Self::Error>;

    /// Play the reply audio for a command
    fn play_reply(&mut self, id: CommandId) -> Result<(), Self::Error>;

    /// Write the settings that are set, sources without settings ignore them
    fn apply_settings(&mut self, settings: &VoiceSettings) -> Result<(), Self::Error> {
        let _ = settings;
        Ok(())
    }
}

impl<I2C: I2c> CommandSource for Df2301q<I2C> {
    type Error = Df2301qError<I2C::Error>;

    fn apply_settings(&mut self, settings: &VoiceSettings) -> Result<(), Self::Error> {
        if let Some(mute) = settings.mute {
            self.set_mute(mute)?;
        }
        if let Some(volume) = settings.volume {
            self.set_volume(volume)?;
        }
        if let Some(seconds) = settings.wake_time {
            self.set_wake_time(seconds)?;
        }
        Ok(())
    }

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.ping()
    }

    fn command_id(&mut self) -> Result<CommandId, Self::Error> {
        self.cmd_id()
    }

    fn play_reply(&mut self, id: CommandId) -> Result<(), Self::Error> {
        self.play_by_cmd_id(id)
    }
}

/// How long start-up keeps knocking on the peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay_ms: u32,
    /// `None` retries until the peripheral shows up
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const fn forever(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            max_attempts: None,
        }
    }

    pub const fn attempts(delay_ms: u32, max_attempts: u32) -> Self {
        Self {
            delay_ms,
            max_attempts: Some(max_attempts),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::forever(3000)
    }
}

/// Peripheral answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready {
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupError {
    /// Gave up after this many failed attempts
    Exhausted { attempts: u32 },
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::Exhausted { attempts } => {
                write!(f, "voice module did not answer after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for StartupError {}

/// Call `begin` until it succeeds, waiting `policy.delay_ms` between tries
pub fn begin_with_retry<S, D>(
    source: &mut S,
    delay: &mut D,
    policy: &RetryPolicy,
) -> Result<Ready, StartupError>
where
    S: CommandSource,
    D: DelayNs,
{
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match source.begin() {
            Ok(()) => {
                log::info!("Begin ok!");
                return Ok(Ready { attempts });
            }
            Err(e) => {
                log::error!(
                    "Communication with device failed, please check connection: {:?}",
                    e
                );
                if policy.max_attempts.is_some_and(|max| attempts >= max) {
                    return Err(StartupError::Exhausted { attempts });
                }
                delay.delay_ms(policy.delay_ms);
            }
        }
    }
}
