//! Types for command dispatch

/// Command word identifier reported by the voice module
pub type CommandId = u8;

/// Identifier the voice module reports when nothing was recognised
pub const NO_COMMAND: CommandId = 0;

/// What a recognised command does to the screen besides being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ClearScreen,
    /// Show a single digit (0-9) full screen for the dwell time
    ShowDigit(u8),
}

/// Display action for one command identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEntry {
    pub label: &'static str,
    pub effect: Effect,
}

impl DispatchEntry {
    /// Entry for identifiers missing from the table
    pub const EMPTY: Self = Self::new("", Effect::None);

    pub const fn new(label: &'static str, effect: Effect) -> Self {
        Self { label, effect }
    }

    /// Entry that only logs its label
    pub const fn text(label: &'static str) -> Self {
        Self::new(label, Effect::None)
    }

    /// Whether rendering this entry appends a line to the on-screen log
    pub fn writes_line(&self) -> bool {
        matches!(self.effect, Effect::None)
    }
}

impl Default for DispatchEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "none"),
            Effect::ClearScreen => write!(f, "clear screen"),
            Effect::ShowDigit(digit) => write!(f, "show digit {}", digit),
        }
    }
}

impl std::fmt::Display for DispatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.effect {
            Effect::None => write!(f, "\"{}\"", self.label),
            effect => write!(f, "\"{}\" ({})", self.label, effect),
        }
    }
}
