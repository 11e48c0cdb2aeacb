#![forbid(unsafe_code)]

//! Headless masked text input.
//!
//! [`MaskedInput`] is the state a single-line field keeps around a
//! [`MaskEngine`](tmask_core::MaskEngine): value, cursor and selection. Each
//! edit is turned into the raw value and caret a text field would report and
//! passed through the engine; the field then shows whatever the engine
//! returns.

pub mod input;

pub use input::{EditCommand, MaskedInput};
