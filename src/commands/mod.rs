//! Command dispatch table
//!
//! Maps the command word identifiers of the DF2301Q voice module to what
//! gets shown on screen. Resolution is pure: the returned entry describes
//! the effect, the [`crate::screen`] controller performs it.

pub mod types;
pub use types::*;

/// First identifier of the "Display Number Zero".."Display Number Nine" block
pub const FIRST_DIGIT_COMMAND: CommandId = 52;

/// Identifier of the "Clear Screen" command word
pub const CLEAR_SCREEN_COMMAND: CommandId = 45;

const DIGIT_LABELS: [&str; 10] = [
    "Display Number Zero",
    "Display Number One",
    "Display Number Two",
    "Display Number Three",
    "Display Number Four",
    "Display Number Five",
    "Display Number Six",
    "Display Number Seven",
    "Display Number Eight",
    "Display Number Nine",
];

/// Look up the display action for a command identifier.
///
/// Total over `u8`: identifiers without a command word (0 included) get
/// [`DispatchEntry::EMPTY`], which still ends up as a log line.
pub fn resolve(id: CommandId) -> DispatchEntry {
    match id {
        // Wake words
        1 => DispatchEntry::text(" Custom Wake Word"),
        2 => DispatchEntry::text(" Waiting for Command"),

        // Locomotion
        22 => DispatchEntry::text("Go Forward"),
        23 => DispatchEntry::text("Retreat"),
        24 => DispatchEntry::text("Park The Car"),
        25 => DispatchEntry::text("Turn Left 90-deg"),
        26 => DispatchEntry::text("Turn Left 45-deg"),
        27 => DispatchEntry::text("Turn Left 30-deg"),
        28 => DispatchEntry::text("Turn right 90-deg"),
        29 => DispatchEntry::text("Turn right 45-deg"),
        30 => DispatchEntry::text("Turn right 30-deg"),
        31 => DispatchEntry::text("Shift down a gear"),

        // Modes
        32 => DispatchEntry::text("Line Tracking Mode"),
        33 => DispatchEntry::text("Light Tracking Mode"),
        34 => DispatchEntry::text("Bluetooth Mode"),
        35 => DispatchEntry::text("Obstacle Avoidance"),
        36 => DispatchEntry::text("Face Recognition"),
        37 => DispatchEntry::text("Object Tracking"),
        38 => DispatchEntry::text("Object Recognition"),
        39 => DispatchEntry::text("Line Tracking"),
        40 => DispatchEntry::text("Color Recognition"),
        41 => DispatchEntry::text("Tag Recognition"),
        42 => DispatchEntry::text("Object Sorting"),
        43 => DispatchEntry::text("QR Code Recognition"),
        44 => DispatchEntry::text("General Settings"),
        CLEAR_SCREEN_COMMAND => DispatchEntry::new("Clear Screen", Effect::ClearScreen),

        // Learning
        46 => DispatchEntry::text("Learn once"),
        47 => DispatchEntry::text("Forget"),
        48 => DispatchEntry::text("Load Model"),
        49 => DispatchEntry::text("Save Model"),
        50 => DispatchEntry::text("Take Photo & Save"),
        51 => DispatchEntry::text("Save & Return"),

        52..=61 => {
            let digit = id - FIRST_DIGIT_COMMAND;
            DispatchEntry::new(DIGIT_LABELS[digit as usize], Effect::ShowDigit(digit))
        }

        // Media transport
        92 => DispatchEntry::text("Play Music"),
        93 => DispatchEntry::text("Stop Playing"),
        94 => DispatchEntry::text("The Last Track"),
        95 => DispatchEntry::text("The Next Track"),
        96 => DispatchEntry::text("Repeat This Track"),
        97 => DispatchEntry::text("Volume Up"),
        98 => DispatchEntry::text("Volume Down"),

        _ => DispatchEntry::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ids() -> impl Iterator<Item = CommandId> {
        [1, 2]
            .into_iter()
            .chain(22..=44)
            .chain(46..=51)
            .chain(92..=98)
    }

    #[test]
    fn plain_commands_have_labels_and_no_effect() {
        for id in plain_ids() {
            let entry = resolve(id);
            assert!(!entry.label.is_empty(), "id {} has no label", id);
            assert_eq!(entry.effect, Effect::None, "id {}", id);
            assert!(entry.writes_line());
        }
    }

    #[test]
    fn digit_commands_map_in_order() {
        for id in 52..=61u8 {
            let entry = resolve(id);
            assert_eq!(entry.effect, Effect::ShowDigit(id - 52));
            assert!(entry.label.starts_with("Display Number "));
            assert!(!entry.writes_line());
        }
        assert_eq!(resolve(52).label, "Display Number Zero");
        assert_eq!(resolve(61).label, "Display Number Nine");
    }

    #[test]
    fn clear_screen_command() {
        let entry = resolve(45);
        assert_eq!(entry.label, "Clear Screen");
        assert_eq!(entry.effect, Effect::ClearScreen);
        assert!(!entry.writes_line());
    }

    #[test]
    fn unmapped_ids_fall_back_to_empty_entry() {
        for id in [0u8, 3, 21, 62, 91, 99, 200, 255] {
            assert_eq!(resolve(id), DispatchEntry::EMPTY, "id {}", id);
        }
        assert!(DispatchEntry::EMPTY.writes_line());
    }

    #[test]
    fn labels_fit_the_screen_line() {
        for id in 0..=u8::MAX {
            assert!(resolve(id).label.len() <= 22, "id {}", id);
        }
    }

    #[test]
    fn entry_display() {
        assert_eq!(resolve(22).to_string(), "\"Go Forward\"");
        assert_eq!(
            resolve(55).to_string(),
            "\"Display Number Three\" (show digit 3)"
        );
    }
}
