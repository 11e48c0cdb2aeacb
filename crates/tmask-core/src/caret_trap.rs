#![forbid(unsafe_code)]

//! Caret-trap extraction.
//!
//! Dynamic masks may declare caret stops that are independent of slot
//! fillability, e.g. right after a currency prefix. They ride inside the
//! generator output as [`MaskToken::CaretTrap`] and are pulled out into a
//! separate index set before the mask is used.

use smallvec::SmallVec;

use crate::slot::{MaskToken, Slot};

/// Textual form of a caret trap in mask templates.
pub const CARET_TRAP: &str = "[]";

/// Ordered, de-duplicated caret-trap positions.
pub type TrapIndexes = SmallVec<[usize; 4]>;

/// A mask with its caret-trap markers removed.
#[derive(Debug, Clone, Default)]
pub struct StrippedMask {
    /// Slots without trap markers.
    pub slots: Vec<Slot>,
    /// Positions in `slots` at which a trap marker stood.
    pub trap_indexes: TrapIndexes,
}

/// Remove trap markers from `tokens`, recording where they occurred.
///
/// A trap's index is the position of the slot that followed it, so a trap at
/// the very end of the mask yields `slots.len()`.
pub fn strip_caret_traps(tokens: impl IntoIterator<Item = MaskToken>) -> StrippedMask {
    let mut stripped = StrippedMask::default();
    for token in tokens {
        match token {
            MaskToken::Slot(slot) => stripped.slots.push(slot),
            MaskToken::CaretTrap => {
                let index = stripped.slots.len();
                if stripped.trap_indexes.last() != Some(&index) {
                    stripped.trap_indexes.push(index);
                }
            }
        }
    }
    stripped
}
