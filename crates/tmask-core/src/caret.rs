#![forbid(unsafe_code)]

//! Caret placement after conforming.
//!
//! Literals interleaved with editable slots make plain offset arithmetic
//! wrong whenever literals shift, so the caret is re-derived from character
//! identity and slot type:
//!
//! 1. Find the character just left of the caret in the raw value (the
//!    *target*) and which occurrence of it the caret sat after.
//! 2. Locate that same occurrence in the conformed value.
//! 3. Walk forward (addition) or backward (deletion) to the nearest
//!    unfilled slot or caret trap.
//!
//! All indexes are char indexes.

use crate::DEFAULT_PLACEHOLDER_CHAR;

/// Everything the caret adjuster needs to know about one edit.
#[derive(Debug, Clone, Copy)]
pub struct CaretContext<'a> {
    /// Value displayed before the edit.
    pub previous_conformed_value: &'a str,
    /// Placeholder in effect before the edit.
    pub previous_placeholder: &'a str,
    /// Caret position in the raw value, right after the edit.
    pub current_caret_position: usize,
    /// Value produced by conforming (and piping).
    pub conformed_value: &'a str,
    /// Raw value the user produced.
    pub raw_value: &'a str,
    /// Character standing in for an unfilled slot.
    pub placeholder_char: char,
    /// Placeholder of the mask the value was conformed against.
    pub placeholder: &'a str,
    /// Positions in `conformed_value` that a pipe inserted or changed.
    pub piped_char_indexes: &'a [usize],
    /// Caret stops declared by the mask.
    pub caret_trap_indexes: &'a [usize],
}

impl Default for CaretContext<'_> {
    fn default() -> Self {
        Self {
            previous_conformed_value: "",
            previous_placeholder: "",
            current_caret_position: 0,
            conformed_value: "",
            raw_value: "",
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
            placeholder: "",
            piped_char_indexes: &[],
            caret_trap_indexes: &[],
        }
    }
}

/// Compute where the caret belongs in `ctx.conformed_value`.
///
/// The result is always within `0..=conformed_value.chars().count()`.
pub fn adjust_caret(ctx: &CaretContext<'_>) -> usize {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "caret_adjust",
        caret = ctx.current_caret_position,
        raw_len = ctx.raw_value.len(),
        conformed_len = ctx.conformed_value.len()
    )
    .entered();

    let conformed: Vec<char> = ctx.conformed_value.chars().collect();
    let caret = locate(ctx, &conformed).min(conformed.len());

    #[cfg(feature = "tracing")]
    tracing::trace!(caret, "caret adjusted");

    caret
}

/// Lowercase `c` when it maps to exactly one char, so positions stay aligned.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn locate(ctx: &CaretContext<'_>, conformed: &[char]) -> usize {
    let raw: Vec<char> = ctx.raw_value.chars().collect();
    let caret = ctx.current_caret_position.min(raw.len());
    if caret == 0 || raw.is_empty() {
        return 0;
    }

    let pc = ctx.placeholder_char;
    let placeholder: Vec<char> = ctx.placeholder.chars().collect();
    let previous_len = ctx.previous_conformed_value.chars().count();

    let edit_length = raw.len() as isize - previous_len as isize;
    let is_addition = edit_length > 0;
    let is_first_raw_value = previous_len == 0;

    // Multi-char deletions (e.g. a selection removed mid-value) are not
    // resolved positionally; the host's caret is kept.
    if edit_length < -1 && !is_first_raw_value {
        return caret;
    }

    let possibly_has_rejected_char = is_addition
        && (ctx.previous_conformed_value == ctx.conformed_value
            || ctx.conformed_value == ctx.placeholder);

    let mut start = 0usize;
    let mut track_right_char = false;
    let mut target: Option<char> = None;

    if possibly_has_rejected_char {
        // The insertion was refused; stay where it was attempted.
        start = caret.saturating_sub(edit_length as usize);
    } else {
        let norm_conformed: Vec<char> = conformed.iter().copied().map(fold).collect();
        let intersection: Vec<char> = raw
            .iter()
            .take(caret)
            .copied()
            .map(fold)
            .filter(|c| norm_conformed.contains(c))
            .collect();
        let n = intersection.len();
        target = intersection.last().copied();

        let previous_placeholder: Vec<char> = ctx.previous_placeholder.chars().collect();
        let previous_left_mask_chars = previous_placeholder
            .iter()
            .take(n)
            .filter(|&&c| c != pc)
            .count();
        let left_mask_chars = placeholder.iter().take(n).filter(|&&c| c != pc).count();
        let mask_length_changed = left_mask_chars != previous_left_mask_chars;

        let target_is_mask_moving_left = n >= 2
            && match (
                previous_placeholder.get(n - 1),
                placeholder.get(n - 2),
                placeholder.get(n - 1),
            ) {
                (Some(&prev), Some(&shifted), current) => {
                    prev != pc && Some(&prev) != current && prev == shifted
                }
                _ => false,
            };

        if !is_addition
            && (mask_length_changed || target_is_mask_moving_left)
            && previous_left_mask_chars > 0
            && target.is_some_and(|t| placeholder.contains(&t))
            && let Some(&right) = raw.get(caret)
        {
            track_right_char = true;
            target = Some(right);
        }

        let piped = ctx
            .piped_char_indexes
            .iter()
            .filter_map(|&i| norm_conformed.get(i))
            .filter(|&&c| Some(c) == target)
            .count();
        let in_intersection = intersection.iter().filter(|&&c| Some(c) == target).count();
        let literal_prefix = placeholder.iter().position(|&c| c == pc).unwrap_or(0);
        let in_placeholder = placeholder[..literal_prefix]
            .iter()
            .enumerate()
            .filter(|&(i, &c)| Some(c) == target && raw.get(i) != Some(&c))
            .count();

        let required = in_placeholder + in_intersection + piped + usize::from(track_right_char);

        let mut encountered = 0;
        for (i, &c) in norm_conformed.iter().enumerate() {
            start = i + 1;
            if Some(c) == target {
                encountered += 1;
            }
            if encountered >= required {
                break;
            }
        }
    }

    let traps = ctx.caret_trap_indexes;
    let placeholder_len = placeholder.len();

    if is_addition {
        let mut last_empty_slot = start;
        for i in start..=placeholder_len {
            let is_empty_slot = placeholder.get(i) == Some(&pc);
            if is_empty_slot {
                last_empty_slot = i;
            }
            if is_empty_slot || traps.contains(&i) || i == placeholder_len {
                return last_empty_slot;
            }
        }
        start
    } else if track_right_char {
        (0..start)
            .rev()
            .find(|&i| conformed.get(i).copied() == target || traps.contains(&i) || i == 0)
            .unwrap_or(0)
    } else {
        (0..=start)
            .rev()
            .find(|&i| (i > 0 && placeholder.get(i - 1) == Some(&pc)) || traps.contains(&i) || i == 0)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "(___) ___-____";

    fn ctx<'a>(previous: &'a str, raw: &'a str, conformed: &'a str, caret: usize) -> CaretContext<'a> {
        CaretContext {
            previous_conformed_value: previous,
            previous_placeholder: PHONE,
            current_caret_position: caret,
            conformed_value: conformed,
            raw_value: raw,
            placeholder: PHONE,
            ..CaretContext::default()
        }
    }

    #[test]
    fn caret_at_start_or_empty_raw() {
        assert_eq!(adjust_caret(&ctx("(2__) ___-____", "", PHONE, 0)), 0);
        assert_eq!(adjust_caret(&ctx("", "2", "(2__) ___-____", 0)), 0);
    }

    #[test]
    fn first_digit_lands_after_it() {
        assert_eq!(adjust_caret(&ctx("", "2", "(2__) ___-____", 1)), 2);
    }

    #[test]
    fn typing_skips_over_literals() {
        // "(202) ___-____" typing '5' at the caret after "202".
        let c = ctx("(202) ___-____", "(2025) ___-____", "(202) 5__-____", 5);
        assert_eq!(adjust_caret(&c), 7);
    }

    #[test]
    fn full_input_caret_at_end() {
        let c = ctx("", "2025551234", "(202) 555-1234", 10);
        assert_eq!(adjust_caret(&c), 14);
    }

    #[test]
    fn rejected_insertion_keeps_caret() {
        // 'x' typed after "(20": value unchanged.
        let c = ctx("(20_) ___-____", "(20x_) ___-____", "(20_) ___-____", 4);
        assert_eq!(adjust_caret(&c), 3);
    }

    #[test]
    fn backspace_retreats_to_filled_slot() {
        // Backspace over '5' in "(202) 5__-____".
        let c = ctx("(202) 5__-____", "(202) __-____", "(202) ___-____", 6);
        assert_eq!(adjust_caret(&c), 4);
    }

    #[test]
    fn deleting_a_literal_keeps_caret_on_it() {
        let c = ctx("(202) 555-1234", "(202 555-1234", "(202) 555-1234", 4);
        assert_eq!(adjust_caret(&c), 4);
    }

    #[test]
    fn multi_char_deletion_keeps_host_caret() {
        let c = ctx("(202) 555-1234", "(202) -1234", "(202) 123-4___", 6);
        assert_eq!(adjust_caret(&c), 6);
    }

    #[test]
    fn deletion_across_shifted_separator_follows_right_char() {
        // "$1,234,567" loses a digit, so the separators regroup.
        let c = CaretContext {
            previous_conformed_value: "$1,234,567",
            previous_placeholder: "$_,___,___",
            current_caret_position: 3,
            conformed_value: "$134,567",
            raw_value: "$1,34,567",
            placeholder: "$___,___",
            ..CaretContext::default()
        };
        assert_eq!(adjust_caret(&c), 2);

        let c = CaretContext {
            current_caret_position: 7,
            conformed_value: "$123,467",
            raw_value: "$1,234,67",
            ..c
        };
        assert_eq!(adjust_caret(&c), 6);
    }

    #[test]
    fn caret_trap_stops_forward_walk() {
        let mut c = CaretContext {
            previous_conformed_value: "",
            previous_placeholder: "",
            current_caret_position: 1,
            conformed_value: "5.__",
            raw_value: "5",
            placeholder: "_.__",
            ..CaretContext::default()
        };
        assert_eq!(adjust_caret(&c), 2);

        c.caret_trap_indexes = &[1];
        assert_eq!(adjust_caret(&c), 1);
    }

    #[test]
    fn result_never_exceeds_conformed_length() {
        // Guide off: the forward walk would stop at slot 6, past the value.
        let c = CaretContext {
            previous_conformed_value: "(20",
            previous_placeholder: PHONE,
            current_caret_position: 4,
            conformed_value: "(202",
            raw_value: "(202",
            placeholder: PHONE,
            ..CaretContext::default()
        };
        assert!(adjust_caret(&c) <= 4);
    }

    #[test]
    fn case_insensitive_target() {
        let placeholder = "__-__";
        let c = CaretContext {
            previous_conformed_value: "",
            previous_placeholder: placeholder,
            current_caret_position: 1,
            conformed_value: "A_-__",
            raw_value: "a",
            placeholder,
            ..CaretContext::default()
        };
        assert_eq!(adjust_caret(&c), 1);
    }

    #[test]
    fn fold_keeps_multichar_lowercase_unchanged() {
        assert_eq!(fold('A'), 'a');
        assert_eq!(fold('İ'), 'İ');
    }
}
