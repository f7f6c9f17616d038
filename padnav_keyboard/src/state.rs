// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard grid state machine.

use alloc::string::String;

use padnav_focus::Direction;

use crate::edit::{TextField, delete_backward, insert_text};
use crate::layout::{Key, LAYOUT};

/// Result of [`KeyboardState::activate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The keyboard is hidden; nothing happened.
    Ignored,
    /// Shift was toggled; carries the new state.
    Shift(bool),
    /// The target's text changed.
    Edited,
    /// A key that edits text had nothing to do (backspace at the start of the field).
    Unchanged,
    /// The confirm key was pressed and the keyboard hid itself.
    Done,
}

/// On-screen keyboard state.
///
/// The keyboard is visible exactly while it has a target. The selection always indexes a
/// valid cell of [`LAYOUT`].
#[derive(Clone, Debug)]
pub struct KeyboardState<K> {
    target: Option<K>,
    row: usize,
    col: usize,
    shift: bool,
}

impl<K> Default for KeyboardState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> KeyboardState<K> {
    /// Creates a hidden keyboard.
    pub const fn new() -> Self {
        Self {
            target: None,
            row: 0,
            col: 0,
            shift: false,
        }
    }

    /// Shows the keyboard for `target`, resetting selection and shift.
    ///
    /// Showing while already visible rebinds to the new target.
    pub fn show(&mut self, target: K) {
        self.target = Some(target);
        self.row = 0;
        self.col = 0;
        self.shift = false;
    }

    /// Hides the keyboard, returning the target it was bound to.
    pub fn hide(&mut self) -> Option<K> {
        self.target.take()
    }

    /// Returns `true` while the keyboard has a target.
    pub const fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    /// The element receiving text, if visible.
    pub const fn target(&self) -> Option<&K> {
        self.target.as_ref()
    }

    /// Selected `(row, column)`.
    pub const fn selection(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Whether the next character will be uppercased.
    pub const fn shift_active(&self) -> bool {
        self.shift
    }

    /// The key under the selection.
    pub fn selected_key(&self) -> Key {
        LAYOUT[self.row][self.col]
    }

    /// Moves the selection one cell in `direction`.
    ///
    /// There is no wraparound. Moving to a shorter row clamps the column to that row's last
    /// cell. Returns `true` if the selection moved; a hidden keyboard never moves.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if !self.is_visible() {
            return false;
        }
        let before = (self.row, self.col);
        match direction {
            Direction::Up => {
                if self.row > 0 {
                    self.row -= 1;
                }
            }
            Direction::Down => {
                if self.row + 1 < LAYOUT.len() {
                    self.row += 1;
                }
            }
            Direction::Left => {
                self.col = self.col.saturating_sub(1);
            }
            Direction::Right => {
                if self.col + 1 < LAYOUT[self.row].len() {
                    self.col += 1;
                }
            }
        }
        self.col = self.col.min(LAYOUT[self.row].len() - 1);
        before != (self.row, self.col)
    }

    /// Activates the selected key against `field`.
    pub fn activate<F: TextField + ?Sized>(&mut self, field: &mut F) -> KeyOutcome {
        if !self.is_visible() {
            return KeyOutcome::Ignored;
        }
        match self.selected_key() {
            Key::Shift => {
                self.shift = !self.shift;
                KeyOutcome::Shift(self.shift)
            }
            Key::Backspace => {
                let value = field.value();
                match delete_backward(&value, field.selection()) {
                    Some((value, caret)) => {
                        field.commit(value, caret);
                        KeyOutcome::Edited
                    }
                    None => KeyOutcome::Unchanged,
                }
            }
            Key::Space => {
                Self::insert(field, " ");
                KeyOutcome::Edited
            }
            Key::Done => {
                self.target = None;
                KeyOutcome::Done
            }
            Key::Char(ch) => {
                if self.shift {
                    self.shift = false;
                    let upper: String = ch.to_uppercase().collect();
                    Self::insert(field, &upper);
                } else {
                    let mut buf = [0_u8; 4];
                    Self::insert(field, ch.encode_utf8(&mut buf));
                }
                KeyOutcome::Edited
            }
        }
    }

    fn insert<F: TextField + ?Sized>(field: &mut F, text: &str) {
        let value = field.value();
        let (value, caret) = insert_text(&value, field.selection(), text);
        field.commit(value, caret);
    }
}
