#![forbid(unsafe_code)]

//! Placeholder construction.

use crate::error::MaskError;
use crate::mask::Mask;
use crate::slot::Slot;

/// Build the display placeholder for a static mask: pattern slots become
/// `placeholder_char`, literal slots keep their character.
///
/// ```
/// use tmask_core::{Mask, build_placeholder};
///
/// let mask = Mask::from_template("(999) 999-9999").unwrap();
/// assert_eq!(build_placeholder(&mask, '_').unwrap(), "(___) ___-____");
/// ```
pub fn build_placeholder(mask: &Mask, placeholder_char: char) -> Result<String, MaskError> {
    let slots = mask.require_static("building a placeholder")?;
    placeholder_for_slots(slots, placeholder_char)
}

pub(crate) fn placeholder_for_slots(
    slots: &[Slot],
    placeholder_char: char,
) -> Result<String, MaskError> {
    check_placeholder_char(slots, placeholder_char)?;
    Ok(slots
        .iter()
        .map(|slot| slot.literal().unwrap_or(placeholder_char))
        .collect())
}

/// Reject a placeholder char that also appears as a literal.
pub(crate) fn check_placeholder_char(
    slots: &[Slot],
    placeholder_char: char,
) -> Result<(), MaskError> {
    match slots
        .iter()
        .position(|slot| slot.literal() == Some(placeholder_char))
    {
        Some(position) => Err(MaskError::InvalidPlaceholder {
            placeholder_char,
            position,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Pattern;

    #[test]
    fn maps_patterns_to_placeholder_char() {
        let mask = Mask::fixed([
            Slot::from(Pattern::digit()),
            Slot::from('/'),
            Slot::from(Pattern::digit()),
        ]);
        assert_eq!(build_placeholder(&mask, '_').unwrap(), "_/_");
        assert_eq!(build_placeholder(&mask, '\u{2000}').unwrap(), "\u{2000}/\u{2000}");
    }

    #[test]
    fn empty_mask_has_empty_placeholder() {
        assert_eq!(build_placeholder(&Mask::Static(Vec::new()), '_').unwrap(), "");
    }

    #[test]
    fn placeholder_char_colliding_with_literal() {
        let mask = Mask::from_template("99-99").unwrap();
        assert_eq!(
            build_placeholder(&mask, '-'),
            Err(MaskError::InvalidPlaceholder {
                placeholder_char: '-',
                position: 2,
            })
        );
    }

    #[test]
    fn dynamic_mask_is_rejected() {
        let mask = Mask::dynamic(|_, _| None);
        assert!(matches!(
            build_placeholder(&mask, '_'),
            Err(MaskError::InvalidMask { .. })
        ));
    }
}
