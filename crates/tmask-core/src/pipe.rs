#![forbid(unsafe_code)]

//! Post-conform pipes.
//!
//! A pipe sees the conformed value and may veto it, replace it, or replace it
//! while reporting which positions it inserted. Those positions let the caret
//! adjuster skip characters the user never typed.
//!
//! ```
//! use tmask_core::{Pipe, PipeOutcome};
//!
//! // Upper-case everything.
//! let pipe = Pipe::new(|value, _ctx| PipeOutcome::Value(value.to_uppercase()));
//! # let _ = pipe;
//! ```

use std::fmt;
use std::sync::Arc;

/// What a pipe decided about a conformed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipeOutcome {
    /// Refuse the edit; the previous value stays.
    Reject,
    /// Use this value instead.
    Value(String),
    /// Use this value; the listed char positions were inserted by the pipe.
    Piped {
        /// Replacement value.
        value: String,
        /// Positions in `value` the pipe added.
        piped_indexes: Vec<usize>,
    },
}

/// Context handed to a pipe.
#[derive(Debug, Clone, Copy)]
pub struct PipeContext<'a> {
    /// Raw value the user produced.
    pub raw_value: &'a str,
    /// Value displayed before the edit.
    pub previous_conformed_value: &'a str,
    /// Placeholder of the resolved mask.
    pub placeholder: &'a str,
    /// Character standing in for an unfilled slot.
    pub placeholder_char: char,
    /// Caret position right after the edit.
    pub current_caret_position: usize,
    /// Whether guide mode is on.
    pub guide: bool,
    /// Whether keep-char-positions mode is on.
    pub keep_char_positions: bool,
}

type PipeFn = dyn Fn(&str, &PipeContext<'_>) -> PipeOutcome + Send + Sync;

/// A shareable post-conform transform.
#[derive(Clone)]
pub struct Pipe(Arc<PipeFn>);

impl Pipe {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&str, &PipeContext<'_>) -> PipeOutcome + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the pipe.
    #[must_use]
    pub fn apply(&self, conformed: &str, ctx: &PipeContext<'_>) -> PipeOutcome {
        (self.0)(conformed, ctx)
    }
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pipe(..)")
    }
}
