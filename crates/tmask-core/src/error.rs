#![forbid(unsafe_code)]

//! Error taxonomy for mask configuration problems.
//!
//! Every variant is a programmer/configuration error surfaced synchronously.
//! Characters typed by the user that do not fit a slot are never errors; they
//! are reported through [`ConformResult::some_chars_rejected`](crate::ConformResult).

use std::fmt;

/// Errors returned by the masking engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The mask is not a concrete slot sequence where one is required, or a
    /// mask definition could not be parsed.
    InvalidMask {
        /// Human-readable reason.
        reason: String,
    },
    /// The placeholder character collides with a literal in the mask.
    InvalidPlaceholder {
        /// The offending placeholder character.
        placeholder_char: char,
        /// Index of the first literal slot holding the same character.
        position: usize,
    },
    /// The raw value is neither text, a number, nor absent.
    InvalidInputType {
        /// Name of the rejected value type.
        type_name: &'static str,
    },
}

impl MaskError {
    /// Shorthand for an [`MaskError::InvalidMask`] with the given reason.
    #[must_use]
    pub fn invalid_mask(reason: impl Into<String>) -> Self {
        Self::InvalidMask {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMask { reason } => write!(f, "invalid mask: {reason}"),
            Self::InvalidPlaceholder {
                placeholder_char,
                position,
            } => write!(
                f,
                "placeholder character {placeholder_char:?} must not appear as a mask literal \
                 (found at slot {position})"
            ),
            Self::InvalidInputType { type_name } => write!(
                f,
                "raw value must be text, a number, or absent; got {type_name}"
            ),
        }
    }
}

impl std::error::Error for MaskError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offending_char() {
        let err = MaskError::InvalidPlaceholder {
            placeholder_char: '-',
            position: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("'-'"));
        assert!(msg.contains("slot 3"));
    }

    #[test]
    fn invalid_mask_shorthand() {
        assert_eq!(
            MaskError::invalid_mask("dangling escape"),
            MaskError::InvalidMask {
                reason: "dangling escape".to_string()
            }
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&MaskError::InvalidInputType { type_name: "bool" });
    }
}
