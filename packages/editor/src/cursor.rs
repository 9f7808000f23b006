//! # Cursor Preservation
//!
//! Carries a caret/selection across a replacement of the free-text surface.
//!
//! The selection is read once into a [`CursorSnapshot`] before the content is
//! replaced, and written back after the surface shows the new text:
//!
//! ```text
//! capture ──▶ snapshot ──▶ (replace content) ──▶ restore(snapshot)
//! ```
//!
//! Offsets are character counts, not bytes.

use serde::Serialize;

/// Selection offsets within the surface's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CursorSnapshot {
    pub start: usize,
    pub end: usize,
}

impl CursorSnapshot {
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }
}

/// Free-text editing surface holding a single text node
pub trait TextSurface {
    fn text(&self) -> &str;

    /// Replace the displayed text; any selection is lost
    fn replace_text(&mut self, text: &str);

    /// Current selection, if the surface has one
    fn selection(&self) -> Option<CursorSnapshot>;

    fn set_selection(&mut self, selection: CursorSnapshot);
}

pub struct CursorTracker;

impl CursorTracker {
    pub fn capture<S: TextSurface + ?Sized>(surface: &S) -> Option<CursorSnapshot> {
        surface.selection()
    }

    /// Re-apply a snapshot, clamped to the current text length
    ///
    /// A surface with no text has no node to select in and is left alone.
    pub fn restore<S: TextSurface + ?Sized>(surface: &mut S, snapshot: Option<CursorSnapshot>) {
        let Some(snapshot) = snapshot else {
            return;
        };

        let len = surface.text().chars().count();
        if len == 0 {
            return;
        }

        let start = snapshot.start.min(len);
        let end = snapshot.end.min(len).max(start);
        surface.set_selection(CursorSnapshot { start, end });
    }

    /// Capture, run `mutate`, then restore, as one step
    pub fn preserve<S, F, R>(surface: &mut S, mutate: F) -> R
    where
        S: TextSurface + ?Sized,
        F: FnOnce(&mut S) -> R,
    {
        let snapshot = Self::capture(surface);
        let result = mutate(surface);
        Self::restore(surface, snapshot);
        result
    }
}

/// In-memory text surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSurface {
    text: String,
    selection: Option<CursorSnapshot>,
}

impl BufferSurface {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
        }
    }

    /// Insert at the caret (or replace the selection) and move the caret
    /// past the inserted text, the way typing does
    ///
    /// Without a selection the text is appended.
    pub fn type_text(&mut self, typed: &str) {
        let len = self.text.chars().count();
        let CursorSnapshot { start, end } = self.selection.unwrap_or(CursorSnapshot::caret(len));
        let start = start.min(len);
        let end = end.min(len).max(start);

        let from = byte_offset(&self.text, start);
        let to = byte_offset(&self.text, end);
        self.text.replace_range(from..to, typed);

        self.selection = Some(CursorSnapshot::caret(start + typed.chars().count()));
    }

    /// Delete the character before the caret, or the selection
    pub fn backspace(&mut self) {
        let len = self.text.chars().count();
        let CursorSnapshot { start, end } = self.selection.unwrap_or(CursorSnapshot::caret(len));
        let end = end.min(len);
        let start = if start == end { start.saturating_sub(1) } else { start.min(end) };

        let from = byte_offset(&self.text, start);
        let to = byte_offset(&self.text, end);
        self.text.replace_range(from..to, "");

        self.selection = Some(CursorSnapshot::caret(start));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

impl TextSurface for BufferSurface {
    fn text(&self) -> &str {
        &self.text
    }

    fn replace_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.selection = None;
    }

    fn selection(&self) -> Option<CursorSnapshot> {
        self.selection
    }

    fn set_selection(&mut self, selection: CursorSnapshot) {
        self.selection = Some(selection);
    }
}
