#![forbid(unsafe_code)]

//! Unmasking: recover only what the user entered.

use crate::DEFAULT_PLACEHOLDER_CHAR;
use crate::error::MaskError;
use crate::mask::{GeneratorContext, Mask, Resolution};
use crate::placeholder::check_placeholder_char;

/// Options for [`unmask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmaskOptions {
    /// Return the conformed value unchanged.
    pub keep_mask: bool,
    /// Character standing in for an unfilled slot.
    pub placeholder_char: char,
}

impl Default for UnmaskOptions {
    fn default() -> Self {
        Self {
            keep_mask: false,
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
        }
    }
}

impl UnmaskOptions {
    /// Set keep-mask mode (builder).
    #[must_use]
    pub fn with_keep_mask(mut self, keep_mask: bool) -> Self {
        self.keep_mask = keep_mask;
        self
    }

    /// Set the placeholder character (builder).
    #[must_use]
    pub fn with_placeholder_char(mut self, placeholder_char: char) -> Self {
        self.placeholder_char = placeholder_char;
        self
    }
}

/// Keep the characters of `conformed` that sit in pattern slots and are not
/// the placeholder char.
///
/// Dynamic masks are resolved against `conformed` itself; a generator that
/// disables masking yields `conformed` verbatim.
///
/// ```
/// use tmask_core::{Mask, UnmaskOptions, unmask};
///
/// let mask = Mask::from_template("(999) 999-9999").unwrap();
/// let digits = unmask("(202) 555-12__", &mask, &UnmaskOptions::default()).unwrap();
/// assert_eq!(digits, "20255512");
/// ```
pub fn unmask(conformed: &str, mask: &Mask, options: &UnmaskOptions) -> Result<String, MaskError> {
    if options.keep_mask {
        return Ok(conformed.to_string());
    }

    let ctx = GeneratorContext {
        current_caret_position: None,
        previous_conformed_value: conformed,
        placeholder_char: options.placeholder_char,
    };
    let resolved = match mask.resolve(conformed, &ctx) {
        Resolution::Masked(resolved) => resolved,
        Resolution::Verbatim => return Ok(conformed.to_string()),
    };
    check_placeholder_char(&resolved.slots, options.placeholder_char)?;

    Ok(conformed
        .chars()
        .zip(&resolved.slots)
        .filter(|&(c, slot)| slot.is_pattern() && c != options.placeholder_char)
        .map(|(c, _)| c)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{MaskToken, Pattern};

    #[test]
    fn strips_literals_and_placeholders() {
        let mask = Mask::from_template("99/99/9999").unwrap();
        let out = unmask("12/3_/____", &mask, &UnmaskOptions::default()).unwrap();
        assert_eq!(out, "123");
    }

    #[test]
    fn keep_mask_returns_input() {
        let mask = Mask::from_template("99/99").unwrap();
        let options = UnmaskOptions::default().with_keep_mask(true);
        assert_eq!(unmask("12/3_", &mask, &options).unwrap(), "12/3_");
    }

    #[test]
    fn characters_beyond_mask_are_dropped() {
        let mask = Mask::from_template("99").unwrap();
        assert_eq!(unmask("1234", &mask, &UnmaskOptions::default()).unwrap(), "12");
    }

    #[test]
    fn custom_placeholder_char() {
        let mask = Mask::from_template("99-99").unwrap();
        let options = UnmaskOptions::default().with_placeholder_char('#');
        assert_eq!(unmask("1#-_2", &mask, &options).unwrap(), "1_2");
    }

    #[test]
    fn dynamic_mask_resolves_against_value() {
        let mask = Mask::dynamic(|raw, _| {
            Some(
                raw.chars()
                    .map(|c| {
                        if c.is_ascii_digit() {
                            MaskToken::from(Pattern::digit())
                        } else {
                            MaskToken::from(c)
                        }
                    })
                    .collect(),
            )
        });
        let out = unmask("1-2-3", &mask, &UnmaskOptions::default()).unwrap();
        assert_eq!(out, "123");
    }

    #[test]
    fn verbatim_generator() {
        let mask = Mask::dynamic(|_, _| None);
        assert_eq!(unmask("a-b", &mask, &UnmaskOptions::default()).unwrap(), "a-b");
    }

    #[test]
    fn placeholder_collision_is_reported() {
        let mask = Mask::from_template("9-9").unwrap();
        let options = UnmaskOptions::default().with_placeholder_char('-');
        assert!(matches!(
            unmask("1-2", &mask, &options),
            Err(MaskError::InvalidPlaceholder { .. })
        ));
    }
}
