//! Voice command log for a DF2301Q voice module and an ILI9341 TFT
//!
//! Polls the voice module for recognised command words and writes them to
//! the screen as a scrolling log. A few command words do more: "Clear Screen"
//! wipes the log and "Display Number Zero".."Nine" show a large digit.
//!
//! Everything here is generic over `embedded-hal` and `embedded-graphics`
//! traits, the board bring-up lives in the binary.

pub mod app;
pub mod commands;
pub mod config;
pub mod df2301q;
pub mod ili9341;
pub mod screen;
pub mod voice;

pub use app::{Tick, VoiceLog};
pub use config::{Pins, Settings};
