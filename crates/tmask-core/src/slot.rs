#![forbid(unsafe_code)]

//! Mask positions.
//!
//! A mask is an ordered sequence of [`Slot`]s. A [`Slot::Literal`] must appear
//! verbatim in the conformed value; a [`Slot::Pattern`] accepts any single
//! character its predicate admits.
//!
//! Dynamic masks produce [`MaskToken`]s, which may additionally carry the
//! caret-trap marker. Traps are stripped out before conforming (see
//! [`strip_caret_traps`](crate::strip_caret_traps)) and never live inside a
//! resolved slot sequence.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(char) -> bool + Send + Sync;

/// A named predicate over one character.
#[derive(Clone)]
pub struct Pattern {
    label: Cow<'static, str>,
    predicate: Arc<Predicate>,
}

impl Pattern {
    /// Create a pattern from a label and predicate.
    pub fn new(
        label: impl Into<Cow<'static, str>>,
        predicate: impl Fn(char) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// ASCII digit `0-9`.
    #[must_use]
    pub fn digit() -> Self {
        Self::new("digit", |c| c.is_ascii_digit())
    }

    /// Any alphabetic character.
    #[must_use]
    pub fn alphabetic() -> Self {
        Self::new("alphabetic", char::is_alphabetic)
    }

    /// Any alphanumeric character.
    #[must_use]
    pub fn alphanumeric() -> Self {
        Self::new("alphanumeric", char::is_alphanumeric)
    }

    /// Any character at all.
    #[must_use]
    pub fn any() -> Self {
        Self::new("any", |_| true)
    }

    /// Any character contained in `set`.
    #[must_use]
    pub fn one_of(set: &str) -> Self {
        let owned: Vec<char> = set.chars().collect();
        Self::new(format!("one_of({set})"), move |c| owned.contains(&c))
    }

    /// Whether `c` satisfies this pattern.
    #[inline]
    #[must_use]
    pub fn test(&self, c: char) -> bool {
        (self.predicate)(c)
    }

    /// Label used in debug output.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.label).finish()
    }
}

/// A single mask position.
#[derive(Debug, Clone)]
pub enum Slot {
    /// Must appear verbatim.
    Literal(char),
    /// Accepts any character satisfying the pattern.
    Pattern(Pattern),
}

impl Slot {
    /// Literal character, if this is a literal slot.
    #[must_use]
    pub fn literal(&self) -> Option<char> {
        match self {
            Self::Literal(c) => Some(*c),
            Self::Pattern(_) => None,
        }
    }

    /// Whether this slot is user-fillable.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    /// Whether `c` is acceptable in this slot. Literal slots only accept
    /// their own character.
    #[must_use]
    pub fn accepts(&self, c: char) -> bool {
        match self {
            Self::Literal(lit) => *lit == c,
            Self::Pattern(pattern) => pattern.test(c),
        }
    }
}

impl From<char> for Slot {
    fn from(c: char) -> Self {
        Self::Literal(c)
    }
}

impl From<Pattern> for Slot {
    fn from(pattern: Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

/// One item of a generator's output: a slot or the caret-trap marker.
#[derive(Debug, Clone)]
pub enum MaskToken {
    /// A regular mask position.
    Slot(Slot),
    /// Caret stop at the position of the next slot.
    CaretTrap,
}

impl From<Slot> for MaskToken {
    fn from(slot: Slot) -> Self {
        Self::Slot(slot)
    }
}

impl From<char> for MaskToken {
    fn from(c: char) -> Self {
        Self::Slot(Slot::Literal(c))
    }
}

impl From<Pattern> for MaskToken {
    fn from(pattern: Pattern) -> Self {
        Self::Slot(Slot::Pattern(pattern))
    }
}

/// Literal slots for every character of `text`.
pub fn literals(text: &str) -> impl Iterator<Item = Slot> + '_ {
    text.chars().map(Slot::Literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns() {
        assert!(Pattern::digit().test('7'));
        assert!(!Pattern::digit().test('a'));
        assert!(!Pattern::digit().test('٣'));
        assert!(Pattern::alphabetic().test('é'));
        assert!(Pattern::alphanumeric().test('x'));
        assert!(!Pattern::alphanumeric().test('-'));
        assert!(Pattern::any().test(' '));
    }

    #[test]
    fn one_of_set() {
        let p = Pattern::one_of("+-");
        assert!(p.test('+'));
        assert!(p.test('-'));
        assert!(!p.test('0'));
        assert_eq!(p.label(), "one_of(+-)");
    }

    #[test]
    fn literal_slot_accepts_only_itself() {
        let slot = Slot::from('/');
        assert!(slot.accepts('/'));
        assert!(!slot.accepts('1'));
        assert_eq!(slot.literal(), Some('/'));
        assert!(!slot.is_pattern());
    }

    #[test]
    fn pattern_debug_shows_label() {
        assert_eq!(format!("{:?}", Pattern::digit()), "Pattern(\"digit\")");
    }

    #[test]
    fn literals_helper() {
        let slots: Vec<Slot> = literals("+1 ").collect();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[1].literal(), Some('1'));
    }
}
