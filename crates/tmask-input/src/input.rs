#![forbid(unsafe_code)]

//! Masked input state.
//!
//! Cursor and selection positions are char indexes, matching the engine.
//! Deletion and cursor movement step over whole grapheme clusters.

use tmask_core::{EngineState, MaskEngine, MaskError};
use unicode_segmentation::UnicodeSegmentation;

/// An editing action, as a key handler would produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Type one character, replacing the selection.
    Insert(char),
    /// Insert a string at once, replacing the selection.
    Paste(String),
    /// Delete the selection or the grapheme before the cursor.
    Backspace,
    /// Delete the selection or the grapheme after the cursor.
    Delete,
    /// Move one grapheme left, extending the selection when `select`.
    Left { select: bool },
    /// Move one grapheme right, extending the selection when `select`.
    Right { select: bool },
    /// Move to the start.
    Home { select: bool },
    /// Move to the end.
    End { select: bool },
    /// Select the whole value.
    SelectAll,
    /// Reset to the initial value.
    Clear,
}

/// A single-line input whose value always conforms to a mask.
#[derive(Debug, Clone)]
pub struct MaskedInput {
    engine: MaskEngine,
    /// State carried between engine updates.
    state: EngineState,
    /// Displayed value.
    value: String,
    /// Cursor position (char index).
    cursor: usize,
    /// Selection anchor (char index). When set, selection spans from anchor to cursor.
    selection_anchor: Option<usize>,
    /// Whether the last edit had characters refused.
    rejected: bool,
}

impl MaskedInput {
    /// Create an input showing the engine's initial value.
    pub fn new(engine: MaskEngine) -> Result<Self, MaskError> {
        let (value, state) = initial(&engine)?;
        Ok(Self {
            engine,
            state,
            value,
            cursor: 0,
            selection_anchor: None,
            rejected: false,
        })
    }

    /// Set the value (builder).
    pub fn with_value(mut self, value: &str) -> Result<Self, MaskError> {
        self.set_value(value)?;
        Ok(self)
    }

    // --- Value access ---

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position (char index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The engine driving this input.
    #[must_use]
    pub fn engine(&self) -> &MaskEngine {
        &self.engine
    }

    /// State the next edit will be conformed against.
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Whether the last edit had characters refused by the mask or pipe.
    #[must_use]
    pub fn rejected(&self) -> bool {
        self.rejected
    }

    /// The value with literals and placeholder chars removed.
    pub fn unmasked(&self) -> Result<String, MaskError> {
        self.engine.unmask(&self.value)
    }

    /// Replace the whole value as if it were typed into an empty field.
    pub fn set_value(&mut self, value: &str) -> Result<(), MaskError> {
        if value.is_empty() {
            return self.clear();
        }
        let update = self
            .engine
            .update(&EngineState::default(), value, value.chars().count())?;
        self.rejected = update.some_chars_rejected;
        self.value = update.value;
        self.state = update.state;
        self.cursor = char_count(&self.value);
        self.selection_anchor = None;
        Ok(())
    }

    /// Reset to the initial value.
    pub fn clear(&mut self) -> Result<(), MaskError> {
        let (value, state) = initial(&self.engine)?;
        self.value = value;
        self.state = state;
        self.cursor = 0;
        self.selection_anchor = None;
        self.rejected = false;
        Ok(())
    }

    /// Move the cursor, dropping any selection.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(char_count(&self.value));
        self.selection_anchor = None;
    }

    /// Selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let anchor = self.selection_anchor?;
        let (start, end) = self.selection_range(anchor);
        Some(&self.value[self.byte_offset(start)..self.byte_offset(end)])
    }

    // --- Commands ---

    /// Apply one command. Returns whether the value or cursor changed.
    pub fn apply(&mut self, command: &EditCommand) -> Result<bool, MaskError> {
        let before = (self.cursor, self.selection_anchor);
        let value_changed = match command {
            EditCommand::Insert(c) => self.insert_char(*c)?,
            EditCommand::Paste(text) => self.insert_text(text)?,
            EditCommand::Backspace => self.delete_backward()?,
            EditCommand::Delete => self.delete_forward()?,
            EditCommand::Left { select } => {
                self.move_left(*select);
                false
            }
            EditCommand::Right { select } => {
                self.move_right(*select);
                false
            }
            EditCommand::Home { select } => {
                self.move_home(*select);
                false
            }
            EditCommand::End { select } => {
                self.move_end(*select);
                false
            }
            EditCommand::SelectAll => {
                self.select_all();
                false
            }
            EditCommand::Clear => {
                let old = self.value.clone();
                self.clear()?;
                old != self.value
            }
        };
        Ok(value_changed || before != (self.cursor, self.selection_anchor))
    }

    // --- Editing operations ---

    /// Type `c` at the cursor, replacing the selection.
    pub fn insert_char(&mut self, c: char) -> Result<bool, MaskError> {
        let mut buf = [0u8; 4];
        self.insert_text(c.encode_utf8(&mut buf))
    }

    /// Insert `text` at the cursor, replacing the selection.
    pub fn insert_text(&mut self, text: &str) -> Result<bool, MaskError> {
        let (start, end) = match self.selection_anchor {
            Some(anchor) => self.selection_range(anchor),
            None => (self.cursor, self.cursor),
        };
        let raw = self.spliced(start, end, text);
        self.commit(raw, start + char_count(text))
    }

    /// Delete the selection, or the grapheme before the cursor.
    pub fn delete_backward(&mut self) -> Result<bool, MaskError> {
        if self.selection_anchor.is_some() {
            return self.delete_selection();
        }
        if self.cursor == 0 {
            return Ok(false);
        }
        let start = self.prev_boundary(self.cursor);
        let raw = self.spliced(start, self.cursor, "");
        self.commit(raw, start)
    }

    /// Delete the selection, or the grapheme after the cursor.
    pub fn delete_forward(&mut self) -> Result<bool, MaskError> {
        if self.selection_anchor.is_some() {
            return self.delete_selection();
        }
        if self.cursor >= char_count(&self.value) {
            return Ok(false);
        }
        let end = self.next_boundary(self.cursor);
        let raw = self.spliced(self.cursor, end, "");
        self.commit(raw, self.cursor)
    }

    fn delete_selection(&mut self) -> Result<bool, MaskError> {
        match self.selection_anchor {
            Some(anchor) => {
                let (start, end) = self.selection_range(anchor);
                let raw = self.spliced(start, end, "");
                self.commit(raw, start)
            }
            None => Ok(false),
        }
    }

    /// Run `raw` through the engine and adopt the result.
    fn commit(&mut self, raw: String, caret: usize) -> Result<bool, MaskError> {
        let update = self.engine.update(&self.state, raw.as_str(), caret)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            caret = update.caret,
            rejected = update.some_chars_rejected,
            "masked input updated"
        );

        let changed = update.value != self.value;
        self.rejected = update.some_chars_rejected;
        self.value = update.value;
        self.cursor = update.caret;
        self.state = update.state;
        self.selection_anchor = None;
        Ok(changed)
    }

    // --- Selection ---

    /// Select the whole value.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = char_count(&self.value);
    }

    /// Select from `anchor` to `cursor` (char indexes, clamped).
    pub fn select(&mut self, anchor: usize, cursor: usize) {
        let len = char_count(&self.value);
        self.selection_anchor = Some(anchor.min(len));
        self.cursor = cursor.min(len);
    }

    fn ensure_selection_anchor(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.cursor);
        }
    }

    fn selection_range(&self, anchor: usize) -> (usize, usize) {
        if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        }
    }

    // --- Cursor movement ---

    /// Move one grapheme left.
    pub fn move_left(&mut self, select: bool) {
        if select {
            self.ensure_selection_anchor();
            self.cursor = self.prev_boundary(self.cursor);
        } else if let Some(anchor) = self.selection_anchor.take() {
            self.cursor = self.cursor.min(anchor);
        } else {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    /// Move one grapheme right.
    pub fn move_right(&mut self, select: bool) {
        if select {
            self.ensure_selection_anchor();
            self.cursor = self.next_boundary(self.cursor);
        } else if let Some(anchor) = self.selection_anchor.take() {
            self.cursor = self.cursor.max(anchor);
        } else {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    /// Move to the start of the value.
    pub fn move_home(&mut self, select: bool) {
        if select {
            self.ensure_selection_anchor();
        } else {
            self.selection_anchor = None;
        }
        self.cursor = 0;
    }

    /// Move to the end of the value.
    pub fn move_end(&mut self, select: bool) {
        if select {
            self.ensure_selection_anchor();
        } else {
            self.selection_anchor = None;
        }
        self.cursor = char_count(&self.value);
    }

    // --- Internal helpers ---

    /// Char indexes where grapheme clusters start, plus the end.
    fn boundaries(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut at = 0;
        for g in self.value.graphemes(true) {
            out.push(at);
            at += g.chars().count();
        }
        out.push(at);
        out
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.boundaries()
            .into_iter()
            .rev()
            .find(|&b| b < pos)
            .unwrap_or(0)
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let len = char_count(&self.value);
        self.boundaries()
            .into_iter()
            .find(|&b| b > pos)
            .unwrap_or(len)
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// The value with chars `start..end` replaced by `text`.
    fn spliced(&self, start: usize, end: usize, text: &str) -> String {
        let mut raw = String::with_capacity(self.value.len() + text.len());
        raw.push_str(&self.value[..self.byte_offset(start)]);
        raw.push_str(text);
        raw.push_str(&self.value[self.byte_offset(end)..]);
        raw
    }
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Value and state before the first edit.
fn initial(engine: &MaskEngine) -> Result<(String, EngineState), MaskError> {
    let value = engine.initial_value()?;
    let state = EngineState {
        previous_conformed_value: value.clone(),
        // A non-empty initial value is the placeholder itself.
        previous_placeholder: value.clone(),
    };
    Ok((value, state))
}
