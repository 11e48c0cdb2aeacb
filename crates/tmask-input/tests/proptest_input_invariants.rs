//! Property-based invariant tests for the headless masked input.
//!
//! For any sequence of editing commands:
//!
//! 1. The cursor stays within the value.
//! 2. The value is empty or exactly as long as the mask.
//! 3. Selected text is always a slice of the value.
//! 4. Unmasked text only contains digits.

use proptest::prelude::*;
use tmask_core::{EngineOptions, Mask, MaskEngine};
use tmask_input::{EditCommand, MaskedInput};

// ── Helpers ─────────────────────────────────────────────────────────────

fn command_strategy() -> impl Strategy<Value = EditCommand> {
    prop_oneof![
        6 => prop::sample::select(vec!['0', '4', '9', 'q', '-', ' ', '\u{0301}'])
            .prop_map(EditCommand::Insert),
        1 => "[0-9a-z()\\- ]{0,12}".prop_map(EditCommand::Paste),
        3 => Just(EditCommand::Backspace),
        2 => Just(EditCommand::Delete),
        2 => any::<bool>().prop_map(|select| EditCommand::Left { select }),
        2 => any::<bool>().prop_map(|select| EditCommand::Right { select }),
        1 => any::<bool>().prop_map(|select| EditCommand::Home { select }),
        1 => any::<bool>().prop_map(|select| EditCommand::End { select }),
        1 => Just(EditCommand::SelectAll),
        1 => Just(EditCommand::Clear),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// Command sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn commands_keep_input_consistent(
        commands in prop::collection::vec(command_strategy(), 1..40),
        show_mask in any::<bool>(),
        keep_char_positions in any::<bool>(),
    ) {
        let engine = MaskEngine::new(
            Mask::from_template("(999) 999-9999").unwrap(),
            EngineOptions::default()
                .with_show_mask(show_mask)
                .with_keep_char_positions(keep_char_positions),
        )
        .unwrap();
        let mut input = MaskedInput::new(engine).unwrap();

        for command in &commands {
            input.apply(command).unwrap();

            let len = input.value().chars().count();
            prop_assert!(input.cursor() <= len, "cursor {} past {:?}", input.cursor(), input.value());
            prop_assert!(len == 0 || len == 14, "unexpected value {:?}", input.value());
            if let Some(selected) = input.selected_text() {
                prop_assert!(input.value().contains(selected));
            }
            let unmasked = input.unmasked().unwrap();
            prop_assert!(unmasked.chars().all(|c| c.is_ascii_digit()), "unmasked {:?}", unmasked);
        }
    }
}
