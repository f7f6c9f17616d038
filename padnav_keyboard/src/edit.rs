// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text editing against the keyboard's target.

use alloc::string::String;

/// An element that receives text from the keyboard.
///
/// Offsets are counted in `char`s. Implementations should tolerate selections that exceed the
/// value length; the editing helpers clamp them.
pub trait TextField {
    /// Current value.
    fn value(&self) -> String;

    /// Current selection as `(start, end)`; a collapsed selection is the caret.
    fn selection(&self) -> (usize, usize);

    /// Replaces the value, collapses the selection to `caret`, and notifies the content that
    /// its value changed (an input-changed event), in that order.
    fn commit(&mut self, value: String, caret: usize);
}

fn clamp_selection(value: &str, (start, end): (usize, usize)) -> (usize, usize) {
    let len = value.chars().count();
    let start = start.min(len);
    (start, end.clamp(start, len))
}

fn splice(value: &str, from: usize, to: usize, text: &str) -> String {
    let mut out = String::with_capacity(value.len() + text.len());
    out.extend(value.chars().take(from));
    out.push_str(text);
    out.extend(value.chars().skip(to));
    out
}

/// Replaces the selection `(start, end)` of `value` with `text`.
///
/// Returns the new value and the caret immediately after the inserted text.
pub fn insert_text(value: &str, selection: (usize, usize), text: &str) -> (String, usize) {
    let (start, end) = clamp_selection(value, selection);
    (splice(value, start, end, text), start + text.chars().count())
}

/// Deletes the selection `(start, end)` of `value`, or the character before a collapsed caret.
///
/// Returns `None` when there is nothing to delete (collapsed caret at the start).
pub fn delete_backward(value: &str, selection: (usize, usize)) -> Option<(String, usize)> {
    let (start, end) = clamp_selection(value, selection);
    if start == end {
        if start == 0 {
            return None;
        }
        Some((splice(value, start - 1, end, ""), start - 1))
    } else {
        Some((splice(value, start, end, ""), start))
    }
}

/// In-memory [`TextField`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    /// Current value.
    pub value: String,
    /// Current selection.
    pub selection: (usize, usize),
    /// Number of commits, one per input-changed notification.
    pub revisions: u32,
}

impl TextBuffer {
    /// Creates a buffer holding `value` with the caret at its end.
    pub fn new(value: &str) -> Self {
        let end = value.chars().count();
        Self {
            value: value.into(),
            selection: (end, end),
            revisions: 0,
        }
    }
}

impl TextField for TextBuffer {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn commit(&mut self, value: String, caret: usize) {
        self.value = value;
        self.selection = (caret, caret);
        self.revisions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_caret_and_over_selection() {
        assert_eq!(insert_text("hllo", (1, 1), "e"), ("hello".into(), 2));
        assert_eq!(insert_text("hello", (1, 4), "ipp"), ("hippo".into(), 4));
        assert_eq!(insert_text("", (0, 0), " "), (" ".into(), 1));
    }

    #[test]
    fn out_of_range_selection_is_clamped() {
        assert_eq!(insert_text("ab", (9, 3), "c"), ("abc".into(), 3));
        assert_eq!(delete_backward("ab", (5, 5)), Some(("a".into(), 1)));
    }

    #[test]
    fn backspace_semantics() {
        assert_eq!(delete_backward("abc", (0, 0)), None);
        assert_eq!(delete_backward("abc", (2, 2)), Some(("ac".into(), 1)));
        // A non-empty selection is removed whole, even at the start.
        assert_eq!(delete_backward("abc", (0, 2)), Some(("c".into(), 0)));
    }

    #[test]
    fn offsets_are_chars() {
        assert_eq!(insert_text("h\u{e9}o", (2, 2), "l"), ("h\u{e9}lo".into(), 3));
        assert_eq!(delete_backward("h\u{e9}", (2, 2)), Some(("h".into(), 1)));
    }

    #[test]
    fn buffer_commit_moves_caret_and_counts() {
        let mut buf = TextBuffer::new("ab");
        assert_eq!(buf.selection, (2, 2));
        buf.commit("abc".into(), 3);
        assert_eq!(buf.value, "abc");
        assert_eq!(buf.selection, (3, 3));
        assert_eq!(buf.revisions, 1);
    }
}
