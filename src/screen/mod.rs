//! Scrolling command log
//!
//! The screen is used like a terminal: every recognised command appends one
//! `"{id}: {label}"` line. Once more lines were written than fit, the next
//! line starts over on a cleared screen.

use core::fmt::Write;

use display_interface::DisplayError;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal::delay::DelayNs;

use crate::commands::{CommandId, DispatchEntry, Effect};

pub mod console;
pub use console::TextConsole;

/// Longest log line: three digit id, separator and a 22 character label
pub const LINE_CAPACITY: usize = 32;

/// Text drawing primitives the log needs from a display
///
/// Cursor, size and color only change the state used by the next print,
/// so they cannot fail.
pub trait Surface {
    /// Fill the whole screen with one color. The cursor is left where it was.
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Move the cursor, in pixels from the top left corner
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Integer scale factor of the font, 1 being the native glyph size
    fn set_text_size(&mut self, size: u8);

    fn set_text_color(&mut self, color: Rgb565);

    /// Draw text at the cursor and advance it
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Draw text at the cursor, then move to the start of the next line
    fn println(&mut self, text: &str) -> Result<(), DisplayError> {
        self.print(text)?;
        self.print("\n")
    }
}

/// How many log lines are on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    line_count: usize,
    capacity: usize,
}

impl ScrollState {
    pub const fn new(capacity: usize) -> Self {
        Self {
            line_count: 0,
            capacity,
        }
    }

    /// State with lines already written, e.g. a banner
    pub const fn with_lines(capacity: usize, line_count: usize) -> Self {
        Self {
            line_count,
            capacity,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The next log line has to start on a cleared screen
    pub fn overflowed(&self) -> bool {
        self.line_count > self.capacity
    }

    fn cleared(self) -> Self {
        Self {
            line_count: 0,
            ..self
        }
    }

    fn advanced(self) -> Self {
        Self {
            line_count: self.line_count + 1,
            ..self
        }
    }
}

/// Look of the log and of the full screen digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogStyle {
    pub background: Rgb565,
    pub text_size: u8,
    pub digit_size: u8,
    pub digit_dwell_ms: u32,
}

/// Format a log line
///
/// Only a label longer than 22 characters can overflow the buffer, which
/// is reported as an invalid format.
pub fn log_line(id: CommandId, label: &str) -> Result<heapless::String<LINE_CAPACITY>, DisplayError> {
    let mut line = heapless::String::new();
    write!(line, "{}: {}", id, label).map_err(|_| DisplayError::InvalidFormatError)?;
    Ok(line)
}

/// Blank the screen and put the cursor back at the origin
pub fn clear_screen<S: Surface>(
    surface: &mut S,
    state: ScrollState,
    style: &LogStyle,
) -> Result<ScrollState, DisplayError> {
    surface.fill_screen(style.background)?;
    surface.set_cursor(0, 0);
    Ok(state.cleared())
}

/// Render one resolved command and return the updated state.
///
/// - `ClearScreen` clears and logs nothing.
/// - `ShowDigit` shows the digit full screen for the dwell time, clears
///   again and logs nothing. The line count is left as it was.
/// - Everything else appends one line, clearing first when the log overflowed.
pub fn render_entry<S, D>(
    state: ScrollState,
    id: CommandId,
    entry: &DispatchEntry,
    surface: &mut S,
    delay: &mut D,
    style: &LogStyle,
) -> Result<ScrollState, DisplayError>
where
    S: Surface,
    D: DelayNs,
{
    match entry.effect {
        Effect::ClearScreen => clear_screen(surface, state, style),
        Effect::ShowDigit(digit) => {
            show_digit(surface, delay, digit, style)?;
            Ok(state)
        }
        Effect::None => {
            let state = if state.overflowed() {
                log::debug!("Log full after {} lines, clearing", state.line_count());
                clear_screen(surface, state, style)?
            } else {
                state
            };
            if entry.label.is_empty() {
                log::debug!("No label for command {}, logging it bare", id);
            }
            surface.println(&log_line(id, entry.label)?)?;
            Ok(state.advanced())
        }
    }
}

fn show_digit<S, D>(
    surface: &mut S,
    delay: &mut D,
    digit: u8,
    style: &LogStyle,
) -> Result<(), DisplayError>
where
    S: Surface,
    D: DelayNs,
{
    let glyph = [b'0' + digit.min(9)];
    let glyph = core::str::from_utf8(&glyph).map_err(|_| DisplayError::InvalidFormatError)?;

    surface.fill_screen(style.background)?;
    surface.set_cursor(0, 0);
    surface.set_text_size(style.digit_size);
    surface.print(glyph)?;
    delay.delay_ms(style.digit_dwell_ms);
    surface.fill_screen(style.background)?;
    surface.set_cursor(0, 0);
    surface.set_text_size(style.text_size);
    Ok(())
}
