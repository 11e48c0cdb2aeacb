#![forbid(unsafe_code)]

//! Static and dynamic masks.
//!
//! A [`Mask`] is either a fixed slot sequence or a generator invoked with the
//! current raw value. Generators are resolved into a [`ResolvedMask`] right
//! before conforming; resolution and conforming are never interleaved.
//!
//! ```
//! use tmask_core::{GeneratorContext, Mask, MaskToken, Pattern, Resolution};
//!
//! // One digit slot per typed character, at least one.
//! let mask = Mask::dynamic(|raw, _ctx| {
//!     let n = raw.chars().count().max(1);
//!     Some(std::iter::repeat_with(|| MaskToken::from(Pattern::digit())).take(n).collect())
//! });
//!
//! match mask.resolve("123", &GeneratorContext::default()) {
//!     Resolution::Masked(resolved) => assert_eq!(resolved.len(), 3),
//!     Resolution::Verbatim => unreachable!(),
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::caret_trap::{TrapIndexes, strip_caret_traps};
use crate::error::MaskError;
use crate::placeholder::placeholder_for_slots;
use crate::slot::{MaskToken, Slot};
use crate::template::parse_template;
use crate::DEFAULT_PLACEHOLDER_CHAR;

/// Information handed to a mask generator alongside the raw value.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext<'a> {
    /// Caret position right after the edit, if known.
    pub current_caret_position: Option<usize>,
    /// Value displayed before the edit.
    pub previous_conformed_value: &'a str,
    /// Character used for unfilled pattern slots.
    pub placeholder_char: char,
}

impl Default for GeneratorContext<'_> {
    fn default() -> Self {
        Self {
            current_caret_position: None,
            previous_conformed_value: "",
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
        }
    }
}

/// Signature of a mask generator. Returning `None` disables masking for the
/// given raw value.
pub type MaskGenerator =
    dyn Fn(&str, &GeneratorContext<'_>) -> Option<Vec<MaskToken>> + Send + Sync;

/// A mask: fixed, or generated from the raw value on each edit.
#[derive(Clone)]
pub enum Mask {
    /// Fixed ordered slot sequence.
    Static(Vec<Slot>),
    /// Generator resolved against each raw value.
    Dynamic(Arc<MaskGenerator>),
}

impl Mask {
    /// Static mask from anything convertible into slots.
    pub fn fixed<S: Into<Slot>>(slots: impl IntoIterator<Item = S>) -> Self {
        Self::Static(slots.into_iter().map(Into::into).collect())
    }

    /// Dynamic mask from a generator closure.
    pub fn dynamic(
        generator: impl Fn(&str, &GeneratorContext<'_>) -> Option<Vec<MaskToken>>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self::Dynamic(Arc::new(generator))
    }

    /// Static mask from template notation (see [`parse_template`]).
    ///
    /// Static masks carry no caret traps, so a `[]` marker is rejected.
    pub fn from_template(template: &str) -> Result<Self, MaskError> {
        let mut slots = Vec::new();
        for token in parse_template(template)? {
            match token {
                MaskToken::Slot(slot) => slots.push(slot),
                MaskToken::CaretTrap => {
                    return Err(MaskError::invalid_mask(
                        "caret traps are only supported in dynamic masks",
                    ));
                }
            }
        }
        Ok(Self::Static(slots))
    }

    /// Whether this mask must be resolved before use.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// The slot sequence of a static mask.
    #[must_use]
    pub fn slots(&self) -> Option<&[Slot]> {
        match self {
            Self::Static(slots) => Some(slots),
            Self::Dynamic(_) => None,
        }
    }

    /// Slots of a static mask, or [`MaskError::InvalidMask`] for an
    /// unresolved generator.
    pub(crate) fn require_static(&self, operation: &str) -> Result<&[Slot], MaskError> {
        self.slots().ok_or_else(|| {
            MaskError::invalid_mask(format!(
                "{operation} needs a concrete slot sequence; resolve the dynamic mask first"
            ))
        })
    }

    /// Resolve against `raw`. Static masks resolve to themselves.
    pub fn resolve(&self, raw: &str, ctx: &GeneratorContext<'_>) -> Resolution {
        match self {
            Self::Static(slots) => Resolution::Masked(ResolvedMask {
                slots: slots.clone(),
                caret_traps: TrapIndexes::new(),
            }),
            Self::Dynamic(generator) => match generator(raw, ctx) {
                Some(tokens) => {
                    let stripped = strip_caret_traps(tokens);
                    Resolution::Masked(ResolvedMask {
                        slots: stripped.slots,
                        caret_traps: stripped.trap_indexes,
                    })
                }
                None => Resolution::Verbatim,
            },
        }
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(slots) => f.debug_tuple("Static").field(slots).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<Vec<Slot>> for Mask {
    fn from(slots: Vec<Slot>) -> Self {
        Self::Static(slots)
    }
}

/// Outcome of resolving a mask.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Conform against these slots.
    Masked(ResolvedMask),
    /// Accept the raw value verbatim.
    Verbatim,
}

/// A concrete slot sequence plus the caret traps its generator declared.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMask {
    /// Slots, traps removed.
    pub slots: Vec<Slot>,
    /// Caret stops, as indexes into `slots`.
    pub caret_traps: TrapIndexes,
}

impl ResolvedMask {
    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Placeholder for this mask.
    pub fn placeholder(&self, placeholder_char: char) -> Result<String, MaskError> {
        placeholder_for_slots(&self.slots, placeholder_char)
    }

    /// Convert into a static mask, dropping the caret traps.
    #[must_use]
    pub fn into_mask(self) -> Mask {
        Mask::Static(self.slots)
    }
}
