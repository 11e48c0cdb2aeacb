#![forbid(unsafe_code)]

//! Positional input masking.
//!
//! This crate reconciles incrementally edited user input with a mask
//! template and keeps the caret where the user expects it:
//! - [`Mask`] - a fixed [`Slot`] sequence or a generator resolved per edit
//! - [`conform`] - lay raw input out against the mask
//! - [`adjust_caret`] - re-derive the caret after conforming
//! - [`unmask`] - recover only the user-entered characters
//! - [`MaskEngine`] - run a whole edit, carrying [`EngineState`] between calls
//!
//! Every index the crate accepts or returns is a char index.
//!
//! # Example
//! ```
//! use tmask_core::{EngineOptions, EngineState, Mask, MaskEngine};
//!
//! let engine = MaskEngine::new(
//!     Mask::from_template("(999) 999-9999").unwrap(),
//!     EngineOptions::default(),
//! )
//! .unwrap();
//!
//! let update = engine.update(&EngineState::default(), "2025551234", 10).unwrap();
//! assert_eq!(update.value, "(202) 555-1234");
//! assert_eq!(update.caret, 14);
//! assert_eq!(engine.unmask(&update.value).unwrap(), "2025551234");
//! ```
//!
//! # Features
//! - `tracing`: spans around conforming, caret adjustment and engine updates
//! - `json`: accept `serde_json::Value` as raw input

pub mod caret;
pub mod caret_trap;
pub mod conform;
pub mod engine;
pub mod error;
pub mod mask;
pub mod pipe;
pub mod placeholder;
pub mod slot;
pub mod template;
pub mod unmask;
pub mod value;

/// Placeholder character used unless configured otherwise.
pub const DEFAULT_PLACEHOLDER_CHAR: char = '_';

pub use caret::{CaretContext, adjust_caret};
pub use caret_trap::{CARET_TRAP, StrippedMask, TrapIndexes, strip_caret_traps};
pub use conform::{ConformOptions, ConformResult, conform};
pub use engine::{EngineOptions, EngineState, MaskEngine, Update};
pub use error::MaskError;
pub use mask::{GeneratorContext, Mask, MaskGenerator, Resolution, ResolvedMask};
pub use pipe::{Pipe, PipeContext, PipeOutcome};
pub use placeholder::build_placeholder;
pub use slot::{MaskToken, Pattern, Slot, literals};
pub use template::parse_template;
pub use unmask::{UnmaskOptions, unmask};
pub use value::{InputValue, normalize};
