// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// A key of the on-screen keyboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Inserts its character (uppercased when shift is active).
    Char(char),
    /// Toggles one-shot shift.
    Shift,
    /// Deletes the selection, or the character before the caret.
    Backspace,
    /// Inserts a literal space.
    Space,
    /// Closes the keyboard.
    Done,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Shift => f.write_str("\u{21e7}"),
            Self::Backspace => f.write_str("\u{232b}"),
            Self::Space => f.write_str("Space"),
            Self::Done => f.write_str("\u{2713}"),
        }
    }
}

const fn c(ch: char) -> Key {
    Key::Char(ch)
}

/// The fixed keyboard layout, top row first. Rows have different lengths.
pub const LAYOUT: [&[Key]; 5] = [
    &[
        c('1'),
        c('2'),
        c('3'),
        c('4'),
        c('5'),
        c('6'),
        c('7'),
        c('8'),
        c('9'),
        c('0'),
    ],
    &[
        c('q'),
        c('w'),
        c('e'),
        c('r'),
        c('t'),
        c('y'),
        c('u'),
        c('i'),
        c('o'),
        c('p'),
    ],
    &[
        c('a'),
        c('s'),
        c('d'),
        c('f'),
        c('g'),
        c('h'),
        c('j'),
        c('k'),
        c('l'),
    ],
    &[
        Key::Shift,
        c('z'),
        c('x'),
        c('c'),
        c('v'),
        c('b'),
        c('n'),
        c('m'),
        Key::Backspace,
    ],
    &[Key::Space, Key::Done],
];

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn row_lengths() {
        let lens: [usize; 5] = LAYOUT.map(|row| row.len());
        assert_eq!(lens, [10, 10, 9, 9, 2]);
    }

    #[test]
    fn labels() {
        assert_eq!(Key::Char('q').to_string(), "q");
        assert_eq!(Key::Space.to_string(), "Space");
        assert_eq!(Key::Done.to_string(), "\u{2713}");
    }
}
