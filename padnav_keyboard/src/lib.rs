// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Padnav Keyboard: an on-screen keyboard driven by a directional pad.
//!
//! The keyboard is a fixed five-row grid ([`LAYOUT`]): digits, two letter rows, a row with
//! shift and backspace around the last letters, and a row with space and a confirm key.
//!
//! - [`KeyboardState`] owns the selection (row, column), the one-shot shift flag, and the
//!   target the text goes to. It is visible exactly while it has a target.
//! - [`TextField`] abstracts the element receiving text: its value, its selection, and a
//!   commit step that must notify the host content that the value changed.
//! - [`TextBuffer`] is a plain in-memory [`TextField`].
//!
//! ## Example
//!
//! ```
//! use padnav_focus::Direction;
//! use padnav_keyboard::{KeyOutcome, KeyboardState, TextBuffer};
//!
//! let mut field = TextBuffer::default();
//! let mut kb = KeyboardState::new();
//! kb.show(1_u32);
//!
//! // Row 0 is the digit row; move to "2" and type it.
//! kb.navigate(Direction::Right);
//! assert_eq!(kb.activate(&mut field), KeyOutcome::Edited);
//! assert_eq!(field.value, "2");
//!
//! // Shift capitalizes exactly one letter.
//! kb.navigate(Direction::Down); // "w"
//! kb.navigate(Direction::Down); // "s"
//! kb.navigate(Direction::Down); // "z"
//! kb.navigate(Direction::Left); // shift
//! kb.activate(&mut field);
//! kb.navigate(Direction::Right); // "z"
//! kb.activate(&mut field);
//! kb.activate(&mut field);
//! assert_eq!(field.value, "2Zz");
//! ```
//!
//! Caret positions and selections are counted in `char`s.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod edit;
mod layout;
mod state;

pub use edit::{TextBuffer, TextField, delete_backward, insert_text};
pub use layout::{Key, LAYOUT};
pub use state::{KeyOutcome, KeyboardState};
