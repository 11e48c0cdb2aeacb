#![forbid(unsafe_code)]

//! Compact textual mask notation.
//!
//! | token | meaning                          |
//! |-------|----------------------------------|
//! | `9`, `d` | digit                         |
//! | `a`   | alphabetic                       |
//! | `*`   | alphanumeric                     |
//! | `?`   | any character                    |
//! | `[]`  | caret trap                       |
//! | `\x`  | literal `x` (escape)             |
//! | other | literal                          |
//!
//! ```
//! use tmask_core::{MaskToken, parse_template};
//!
//! let tokens = parse_template("+1 (999) 999-9999").unwrap();
//! assert_eq!(tokens.len(), 17);
//! assert!(matches!(tokens[0], MaskToken::Slot(_)));
//! ```

use crate::caret_trap::CARET_TRAP;
use crate::error::MaskError;
use crate::slot::{MaskToken, Pattern, Slot};

/// Parse a template into mask tokens.
pub fn parse_template(template: &str) -> Result<Vec<MaskToken>, MaskError> {
    let mut tokens = Vec::with_capacity(template.len());
    let mut chars = template.char_indices();

    while let Some((at, c)) = chars.next() {
        let token = match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => MaskToken::Slot(Slot::Literal(escaped)),
                None => {
                    return Err(MaskError::invalid_mask(format!(
                        "dangling escape at end of template {template:?}"
                    )));
                }
            },
            _ if template[at..].starts_with(CARET_TRAP) => {
                for _ in 1..CARET_TRAP.chars().count() {
                    chars.next();
                }
                MaskToken::CaretTrap
            }
            '9' | 'd' => Pattern::digit().into(),
            'a' => Pattern::alphabetic().into(),
            '*' => Pattern::alphanumeric().into(),
            '?' => Pattern::any().into(),
            other => MaskToken::Slot(Slot::Literal(other)),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(tokens: &[MaskToken]) -> String {
        tokens
            .iter()
            .map(|t| match t {
                MaskToken::Slot(Slot::Literal(c)) => *c,
                MaskToken::Slot(Slot::Pattern(_)) => '#',
                MaskToken::CaretTrap => '^',
            })
            .collect()
    }

    #[test]
    fn phone_template() {
        let tokens = parse_template("(999) 999-9999").unwrap();
        assert_eq!(shape(&tokens), "(###) ###-####");
    }

    #[test]
    fn escapes_and_traps() {
        let tokens = parse_template("\\9$[]99\\[").unwrap();
        assert_eq!(shape(&tokens), "9$^##[");
    }

    #[test]
    fn caret_trap_notation() {
        let tokens = parse_template(&format!("99{CARET_TRAP}.99")).unwrap();
        assert_eq!(shape(&tokens), "##^.##");
        assert!(matches!(tokens[2], MaskToken::CaretTrap));
    }

    #[test]
    fn lone_bracket_is_literal() {
        let tokens = parse_template("[9]").unwrap();
        assert_eq!(shape(&tokens), "[#]");
    }

    #[test]
    fn pattern_kinds() {
        let tokens = parse_template("da*?").unwrap();
        let MaskToken::Slot(Slot::Pattern(alpha)) = &tokens[1] else {
            panic!("expected pattern");
        };
        assert!(alpha.test('q'));
        assert!(!alpha.test('1'));
        let MaskToken::Slot(Slot::Pattern(any)) = &tokens[3] else {
            panic!("expected pattern");
        };
        assert!(any.test('%'));
    }

    #[test]
    fn dangling_escape_is_an_error() {
        assert!(matches!(
            parse_template("99\\"),
            Err(MaskError::InvalidMask { .. })
        ));
    }
}
