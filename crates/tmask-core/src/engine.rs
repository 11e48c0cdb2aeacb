#![forbid(unsafe_code)]

//! Per-edit driver and its cross-call state.
//!
//! [`MaskEngine::update`] runs one user edit through the whole pipeline:
//! normalize → resolve mask → strip caret traps → build placeholder →
//! conform → pipe → adjust caret. The state it needs from the previous edit
//! lives in an explicit [`EngineState`] that the caller passes in and
//! replaces with [`Update::state`] once the call succeeds.
//!
//! ```
//! use tmask_core::{EngineOptions, EngineState, Mask, MaskEngine};
//!
//! let engine = MaskEngine::new(
//!     Mask::from_template("99/99").unwrap(),
//!     EngineOptions::default(),
//! )
//! .unwrap();
//!
//! let mut state = EngineState::default();
//! let update = engine.update(&state, "1", 1).unwrap();
//! assert_eq!(update.value, "1_/__");
//! assert_eq!(update.caret, 1);
//! state = update.state;
//!
//! let update = engine.update(&state, "12_/__", 2).unwrap();
//! assert_eq!(update.value, "12/__");
//! assert_eq!(update.caret, 3);
//! ```

use crate::DEFAULT_PLACEHOLDER_CHAR;
use crate::caret::{CaretContext, adjust_caret};
use crate::conform::{ConformOptions, conform_slots};
use crate::error::MaskError;
use crate::mask::{GeneratorContext, Mask, Resolution};
use crate::pipe::{Pipe, PipeContext, PipeOutcome};
use crate::placeholder::{check_placeholder_char, placeholder_for_slots};
use crate::unmask::{UnmaskOptions, unmask};
use crate::value::{InputValue, normalize};

/// State carried from one edit to the next for a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Value displayed after the last edit.
    pub previous_conformed_value: String,
    /// Placeholder of the mask used for the last edit.
    pub previous_placeholder: String,
}

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Show unfilled slots as placeholder characters.
    pub guide: bool,
    /// Keep already-placed characters in their slots on insert/delete.
    pub keep_char_positions: bool,
    /// Character standing in for an unfilled slot.
    pub placeholder_char: char,
    /// Show the placeholder instead of an empty value.
    pub show_mask: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            guide: true,
            keep_char_positions: false,
            placeholder_char: DEFAULT_PLACEHOLDER_CHAR,
            show_mask: false,
        }
    }
}

impl EngineOptions {
    /// Set guide mode (builder).
    #[must_use]
    pub fn with_guide(mut self, guide: bool) -> Self {
        self.guide = guide;
        self
    }

    /// Set keep-char-positions mode (builder).
    #[must_use]
    pub fn with_keep_char_positions(mut self, keep: bool) -> Self {
        self.keep_char_positions = keep;
        self
    }

    /// Set the placeholder character (builder).
    #[must_use]
    pub fn with_placeholder_char(mut self, placeholder_char: char) -> Self {
        self.placeholder_char = placeholder_char;
        self
    }

    /// Set show-mask mode (builder).
    #[must_use]
    pub fn with_show_mask(mut self, show_mask: bool) -> Self {
        self.show_mask = show_mask;
        self
    }
}

/// Outcome of one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Value to write back into the field.
    pub value: String,
    /// Caret position (char index) to restore.
    pub caret: usize,
    /// Whether the mask or pipe refused some of the input.
    pub some_chars_rejected: bool,
    /// State to use for the next edit.
    pub state: EngineState,
}

/// Conforms edits of a single logical input against a mask.
#[derive(Debug, Clone)]
pub struct MaskEngine {
    mask: Mask,
    options: EngineOptions,
    pipe: Option<Pipe>,
}

impl MaskEngine {
    /// Create an engine. Static masks are checked against the placeholder
    /// character right away.
    pub fn new(mask: Mask, options: EngineOptions) -> Result<Self, MaskError> {
        if let Some(slots) = mask.slots() {
            check_placeholder_char(slots, options.placeholder_char)?;
        }
        Ok(Self {
            mask,
            options,
            pipe: None,
        })
    }

    /// Attach a post-conform pipe (builder).
    #[must_use]
    pub fn with_pipe(mut self, pipe: Pipe) -> Self {
        self.pipe = Some(pipe);
        self
    }

    /// The configured mask.
    #[must_use]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Value to show before the user typed anything.
    pub fn initial_value(&self) -> Result<String, MaskError> {
        match self.mask.slots() {
            Some(slots) if self.options.show_mask => {
                placeholder_for_slots(slots, self.options.placeholder_char)
            }
            _ => Ok(String::new()),
        }
    }

    /// Run one edit. `raw` is the field content after the edit and `caret`
    /// the caret position (char index) the host reported for it.
    ///
    /// On error the caller's state is untouched.
    pub fn update<'a>(
        &self,
        state: &EngineState,
        raw: impl Into<InputValue<'a>>,
        caret: usize,
    ) -> Result<Update, MaskError> {
        let raw = normalize(raw)?;
        let caret = caret.min(raw.chars().count());
        let options = &self.options;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "engine_update",
            raw_len = raw.len(),
            caret,
            dynamic = self.mask.is_dynamic()
        )
        .entered();

        if raw == state.previous_conformed_value {
            return Ok(Update {
                caret,
                value: raw,
                some_chars_rejected: false,
                state: state.clone(),
            });
        }

        let generator_ctx = GeneratorContext {
            current_caret_position: Some(caret),
            previous_conformed_value: &state.previous_conformed_value,
            placeholder_char: options.placeholder_char,
        };
        let resolved = match self.mask.resolve(&raw, &generator_ctx) {
            Resolution::Masked(resolved) => resolved,
            Resolution::Verbatim => {
                #[cfg(feature = "tracing")]
                tracing::trace!("masking disabled for this value");
                return Ok(Update {
                    caret,
                    state: EngineState {
                        previous_conformed_value: raw.clone(),
                        previous_placeholder: String::new(),
                    },
                    value: raw,
                    some_chars_rejected: false,
                });
            }
        };
        let placeholder = resolved.placeholder(options.placeholder_char)?;

        let conform_options = ConformOptions {
            guide: options.guide,
            keep_char_positions: options.keep_char_positions,
            placeholder_char: options.placeholder_char,
            placeholder: Some(placeholder.clone()),
            previous_conformed_value: state.previous_conformed_value.clone(),
            current_caret_position: Some(caret),
        };
        let conformed = conform_slots(&raw, &resolved.slots, &conform_options)?;
        let mut some_chars_rejected = conformed.some_chars_rejected;

        let mut piped_indexes = Vec::new();
        let final_value = match &self.pipe {
            None => conformed.conformed_value,
            Some(pipe) => {
                let pipe_ctx = PipeContext {
                    raw_value: &raw,
                    previous_conformed_value: &state.previous_conformed_value,
                    placeholder: &placeholder,
                    placeholder_char: options.placeholder_char,
                    current_caret_position: caret,
                    guide: options.guide,
                    keep_char_positions: options.keep_char_positions,
                };
                match pipe.apply(&conformed.conformed_value, &pipe_ctx) {
                    PipeOutcome::Reject => {
                        some_chars_rejected = true;
                        state.previous_conformed_value.clone()
                    }
                    PipeOutcome::Value(value) => value,
                    PipeOutcome::Piped {
                        value,
                        piped_indexes: indexes,
                    } => {
                        piped_indexes = indexes;
                        value
                    }
                }
            }
        };

        let caret = adjust_caret(&CaretContext {
            previous_conformed_value: &state.previous_conformed_value,
            previous_placeholder: &state.previous_placeholder,
            current_caret_position: caret,
            conformed_value: &final_value,
            raw_value: &raw,
            placeholder_char: options.placeholder_char,
            placeholder: &placeholder,
            piped_char_indexes: &piped_indexes,
            caret_trap_indexes: &resolved.caret_traps,
        });

        // An untouched guide with the caret at the start reads as empty.
        let value = if final_value == placeholder && caret == 0 {
            if options.show_mask {
                placeholder.clone()
            } else {
                String::new()
            }
        } else {
            final_value
        };

        Ok(Update {
            state: EngineState {
                previous_conformed_value: value.clone(),
                previous_placeholder: placeholder,
            },
            value,
            caret,
            some_chars_rejected,
        })
    }

    /// Strip literals and placeholder chars from a value this engine produced.
    pub fn unmask(&self, value: &str) -> Result<String, MaskError> {
        let options = UnmaskOptions::default().with_placeholder_char(self.options.placeholder_char);
        unmask(value, &self.mask, &options)
    }
}
