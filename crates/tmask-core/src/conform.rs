#![forbid(unsafe_code)]

//! Mask conforming: reconcile a raw, freshly edited value with a mask.
//!
//! The conformer works in two phases. First it works out which part of the
//! raw value was just edited and removes every character that the previous
//! conformed value already placed (literals at their expected positions).
//! What remains is a queue of candidates that is then laid out against the
//! placeholder, left to right, slot by slot.
//!
//! Characters outside the edited region are assumed to be valid already and
//! are not re-validated against their slot's predicate beyond the placement
//! pass itself. User characters that fit nowhere are dropped and flagged via
//! [`ConformResult::some_chars_rejected`]; conforming never fails because of
//! what the user typed.
//!
//! ```
//! use tmask_core::{ConformOptions, Mask, conform};
//!
//! let mask = Mask::from_template("(999) 999-9999").unwrap();
//! let result = conform("2025551234", &mask, &ConformOptions::default()).unwrap();
//! assert_eq!(result.conformed_value, "(202) 555-1234");
//! assert!(!result.some_chars_rejected);
//! ```

use std::collections::VecDeque;

use crate::DEFAULT_PLACEHOLDER_CHAR;
use crate::error::MaskError;
use crate::mask::Mask;
use crate::placeholder::placeholder_for_slots;
use crate::slot::Slot;

/// Options controlling a single conform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformOptions {
    /// Show unfilled slots as placeholder characters.
    pub guide: bool,
    /// Keep already-placed characters in their slots when inserting or
    /// deleting before them.
    pub keep_char_positions: bool,
    /// Character standing in for an unfilled pattern slot.
    pub placeholder_char: char,
    /// Precomputed placeholder. Derived from the mask when `None`.
    pub placeholder: Option<String>,
    /// Value displayed before this edit.
    pub previous_conformed_value: String,
    /// Caret position right after the edit. `None` leaves the edited
    /// region undetermined.
    pub current_caret_position: Option<usize>,
}

impl Default for ConformOptions {
    fn default() -> Self {
        Self {
            guide: true,
            keep_char_positions: false,
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
            placeholder: None,
            previous_conformed_value: String::new(),
            current_caret_position: None,
        }
    }
}

impl ConformOptions {
    /// Options with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set guide mode (builder).
    #[must_use]
    pub fn with_guide(mut self, guide: bool) -> Self {
        self.guide = guide;
        self
    }

    /// Set keep-char-positions mode (builder).
    #[must_use]
    pub fn with_keep_char_positions(mut self, keep: bool) -> Self {
        self.keep_char_positions = keep;
        self
    }

    /// Set the placeholder character (builder).
    #[must_use]
    pub fn with_placeholder_char(mut self, placeholder_char: char) -> Self {
        self.placeholder_char = placeholder_char;
        self
    }

    /// Supply a precomputed placeholder (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the value displayed before the edit (builder).
    #[must_use]
    pub fn with_previous_conformed_value(mut self, value: impl Into<String>) -> Self {
        self.previous_conformed_value = value.into();
        self
    }

    /// Set the caret position after the edit (builder).
    #[must_use]
    pub fn with_caret(mut self, caret: usize) -> Self {
        self.current_caret_position = Some(caret);
        self
    }
}

/// Result of conforming a raw value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConformResult {
    /// Value to display.
    pub conformed_value: String,
    /// Whether any user character was dropped for not fitting its slot.
    pub some_chars_rejected: bool,
}

/// A raw character queued for placement.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    ch: char,
    /// Inside the region touched by the current edit.
    is_new: bool,
}

/// Conform `raw` against a static mask.
///
/// Returns [`MaskError::InvalidMask`] for an unresolved dynamic mask or a
/// supplied placeholder whose length differs from the mask's.
pub fn conform(raw: &str, mask: &Mask, options: &ConformOptions) -> Result<ConformResult, MaskError> {
    let slots = mask.require_static("conform")?;
    conform_slots(raw, slots, options)
}

pub(crate) fn conform_slots(
    raw: &str,
    slots: &[Slot],
    options: &ConformOptions,
) -> Result<ConformResult, MaskError> {
    let placeholder_char = options.placeholder_char;
    let placeholder: Vec<char> = match &options.placeholder {
        Some(placeholder) => placeholder.chars().collect(),
        None => placeholder_for_slots(slots, placeholder_char)?
            .chars()
            .collect(),
    };
    if placeholder.len() != slots.len() {
        return Err(MaskError::invalid_mask(format!(
            "placeholder has {} characters but the mask has {} slots",
            placeholder.len(),
            slots.len()
        )));
    }

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "mask_conform",
        raw_len = raw.len(),
        mask_len = slots.len(),
        guide = options.guide,
        keep_char_positions = options.keep_char_positions
    )
    .entered();

    let suppress_guide = !options.guide;
    let previous_len = options.previous_conformed_value.chars().count();
    let mut raw: Vec<char> = raw.chars().collect();
    let raw_len = raw.len();

    let edit_distance = raw_len as isize - previous_len as isize;
    let is_addition = edit_distance > 0;
    // Hosts may report any caret; past the raw value it means "at the end".
    let edit_region = options.current_caret_position.map(|caret| {
        let caret = caret.min(raw_len) as isize;
        let first = caret.saturating_sub(if is_addition { edit_distance } else { 0 });
        (first, first.saturating_add(edit_distance.abs()))
    });

    // Deleting with keep_char_positions: pad the hole with placeholder chars
    // so everything after it stays in its slot.
    if options.keep_char_positions
        && !is_addition
        && let Some((first, last)) = edit_region
    {
        let compensating = (first.max(0)..last.max(0))
            .filter(|&i| placeholder.get(i as usize) == Some(&placeholder_char))
            .count();
        let at = (first.max(0) as usize).min(raw.len());
        let tail = raw.split_off(at);
        raw.extend(std::iter::repeat_n(placeholder_char, compensating));
        raw.extend(tail);
    }

    let in_region = |i: usize| {
        edit_region.is_some_and(|(first, last)| (i as isize) >= first && (i as isize) < last)
    };
    let mut queue: VecDeque<Candidate> = raw
        .iter()
        .enumerate()
        .map(|(i, &ch)| Candidate {
            ch,
            is_new: in_region(i),
        })
        .collect();

    // Drop characters the placeholder already holds at the same position
    // (shifted by the edit when the previous value spanned the whole mask).
    let previous_spans_mask = previous_len == slots.len();
    for i in (0..queue.len()).rev() {
        let ch = queue[i].ch;
        if ch == placeholder_char {
            continue;
        }
        let should_offset =
            previous_spans_mask && edit_region.is_some_and(|(first, _)| i as isize >= first);
        let index = if should_offset {
            i as isize - edit_distance
        } else {
            i as isize
        };
        if index >= 0 && placeholder.get(index as usize) == Some(&ch) {
            queue.remove(i);
        }
    }

    let mut conformed = String::with_capacity(placeholder.len());
    let mut some_chars_rejected = false;
    let mut i = 0;

    'placeholder: while i < placeholder.len() {
        let placeholder_at = placeholder[i];
        if placeholder_at != placeholder_char {
            conformed.push(placeholder_at);
            i += 1;
            continue;
        }

        while let Some(candidate) = queue.pop_front() {
            if candidate.ch == placeholder_char && !suppress_guide {
                conformed.push(placeholder_char);
                i += 1;
                continue 'placeholder;
            }

            if !slots[i].accepts(candidate.ch) {
                some_chars_rejected = true;
                #[cfg(feature = "tracing")]
                tracing::trace!(slot = i, ch = %candidate.ch, "candidate rejected");
                continue;
            }

            let place_directly = !options.keep_char_positions
                || !candidate.is_new
                || options.previous_conformed_value.is_empty()
                || !options.guide
                || !is_addition;

            if place_directly {
                conformed.push(candidate.ch);
            } else {
                // Insert into the nearest free slot instead of pushing the
                // characters after it to the right.
                let free = queue
                    .iter()
                    .position(|c| c.ch == placeholder_char || !c.is_new)
                    .filter(|&j| queue[j].ch == placeholder_char);
                match free {
                    Some(j) => {
                        conformed.push(candidate.ch);
                        queue.remove(j);
                    }
                    // No room: discard the candidate and retry this slot.
                    None => continue 'placeholder,
                }
            }
            i += 1;
            continue 'placeholder;
        }

        // Queue exhausted.
        if !suppress_guide {
            conformed.extend(&placeholder[i..]);
        }
        break;
    }

    if suppress_guide && edit_distance < 0 {
        let conformed_len = conformed.chars().count();
        let keep = match (0..conformed_len)
            .rev()
            .find(|&j| placeholder[j] == placeholder_char)
        {
            Some(last_filled) => last_filled + 1,
            // Only the leading literals are left; never show more of them
            // than the user still has.
            None => conformed_len.min(raw_len),
        };
        conformed = conformed.chars().take(keep).collect();
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        conformed_len = conformed.len(),
        some_chars_rejected,
        "conform finished"
    );

    Ok(ConformResult {
        conformed_value: conformed,
        some_chars_rejected,
    })
}
