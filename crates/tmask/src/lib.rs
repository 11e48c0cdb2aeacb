#![forbid(unsafe_code)]

//! Positional input masking, public facade.
//!
//! Re-exports the engine from `tmask-core` and, with the default `input`
//! feature, the headless [`MaskedInput`] from `tmask-input`.
//!
//! ```
//! use tmask::prelude::*;
//!
//! let engine = MaskEngine::new(Mask::from_template("99/99/9999")?, EngineOptions::default())?;
//! let mut input = MaskedInput::new(engine)?;
//! for c in "12252024".chars() {
//!     input.apply(&EditCommand::Insert(c))?;
//! }
//! assert_eq!(input.value(), "12/25/2024");
//! assert_eq!(input.unmasked()?, "12252024");
//! # Ok::<(), tmask::Error>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use tmask_core::{
    CARET_TRAP, CaretContext, ConformOptions, ConformResult, DEFAULT_PLACEHOLDER_CHAR,
    EngineOptions, EngineState, GeneratorContext, InputValue, Mask, MaskEngine, MaskGenerator,
    MaskToken, Pattern, Pipe, PipeContext, PipeOutcome, Resolution, ResolvedMask, Slot,
    StrippedMask, TrapIndexes, UnmaskOptions, Update, adjust_caret, build_placeholder, conform,
    literals, normalize, parse_template, strip_caret_traps, unmask,
};

// --- Input re-exports ------------------------------------------------------

#[cfg(feature = "input")]
pub use tmask_input::{EditCommand, MaskedInput};

// --- Errors ---------------------------------------------------------------

/// Error type for every fallible tmask operation.
pub use tmask_core::MaskError as Error;

/// Standard result type for tmask APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ConformOptions, EngineOptions, EngineState, Error, Mask, MaskEngine, MaskToken, Pattern,
        Pipe, PipeOutcome, Result, Slot, UnmaskOptions, conform, unmask,
    };

    #[cfg(feature = "input")]
    pub use crate::{EditCommand, MaskedInput};

    pub use crate::core;
    #[cfg(feature = "input")]
    pub use crate::input;
}

pub use tmask_core as core;
#[cfg(feature = "input")]
pub use tmask_input as input;
