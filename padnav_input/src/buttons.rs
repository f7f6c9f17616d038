// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical buttons, raw samples, and edge detection.

use alloc::vec::Vec;

use padnav_focus::Direction;

bitflags::bitflags! {
    /// Logical buttons read from a gamepad on one poll tick.
    ///
    /// A value of this type is a button snapshot: one pressed/released bit per logical button.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// D-pad up.
        const UP       = 0b0000_0001;
        /// D-pad down.
        const DOWN     = 0b0000_0010;
        /// D-pad left.
        const LEFT     = 0b0000_0100;
        /// D-pad right.
        const RIGHT    = 0b0000_1000;
        /// Primary face button (A / Cross): activate.
        const CONFIRM  = 0b0001_0000;
        /// Secondary face button (B / Circle): back out.
        const CANCEL   = 0b0010_0000;
        /// Tertiary face button (X / Square).
        const CONTEXT  = 0b0100_0000;
        /// Left trigger: hold to hover.
        const HOVER    = 0b1000_0000;
    }
}

impl Buttons {
    /// The d-pad bit for `direction`.
    pub const fn dpad(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::UP,
            Direction::Down => Self::DOWN,
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
        }
    }

    /// Iterates the d-pad directions present in `self`, in up, down, left, right order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.contains(Self::dpad(d)))
    }
}

/// One poll of a gamepad.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamepadSample {
    /// Pressed state per raw button index.
    pub buttons: Vec<bool>,
    /// Raw axis values, nominally in `[-1, 1]`.
    pub axes: Vec<f64>,
}

impl GamepadSample {
    /// Pressed state of raw button `index`; absent buttons read as released.
    pub fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Value of raw axis `index`; absent or non-finite axes read as `0.0`.
    pub fn axis(&self, index: usize) -> f64 {
        self.axes
            .get(index)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// Raw indices of the logical buttons and stick axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonMap {
    /// Raw index of each logical button, in [`Buttons`] bit order.
    pub indices: [(Buttons, usize); 8],
    /// Horizontal stick axis.
    pub axis_x: usize,
    /// Vertical stick axis.
    pub axis_y: usize,
}

impl ButtonMap {
    /// The W3C "standard" gamepad mapping.
    pub const STANDARD: Self = Self {
        indices: [
            (Buttons::UP, 12),
            (Buttons::DOWN, 13),
            (Buttons::LEFT, 14),
            (Buttons::RIGHT, 15),
            (Buttons::CONFIRM, 0),
            (Buttons::CANCEL, 1),
            (Buttons::CONTEXT, 2),
            (Buttons::HOVER, 6),
        ],
        axis_x: 0,
        axis_y: 1,
    };

    /// Builds the logical snapshot for `sample`.
    pub fn snapshot(&self, sample: &GamepadSample) -> Buttons {
        self.indices
            .iter()
            .filter(|(_, index)| sample.pressed(*index))
            .fold(Buttons::empty(), |acc, (button, _)| acc | *button)
    }

    /// Stick position `(x, y)` for `sample`.
    pub fn stick(&self, sample: &GamepadSample) -> (f64, f64) {
        (sample.axis(self.axis_x), sample.axis(self.axis_y))
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Transitions between two consecutive snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    /// Buttons that went from released to pressed.
    pub pressed: Buttons,
    /// Buttons that went from pressed to released.
    pub released: Buttons,
}

/// Rising/falling edge detector over [`Buttons`] snapshots.
///
/// Only the previous snapshot is retained. Hosts that report a held button on every poll
/// produce a single rising edge for the whole hold.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeDetector {
    previous: Buttons,
}

impl EdgeDetector {
    /// Creates a detector with every button released.
    pub const fn new() -> Self {
        Self {
            previous: Buttons::empty(),
        }
    }

    /// Records `current` and returns the edges relative to the previous snapshot.
    pub fn update(&mut self, current: Buttons) -> Edges {
        let previous = core::mem::replace(&mut self.previous, current);
        Edges {
            pressed: current & !previous,
            released: previous & !current,
        }
    }

    /// Forgets the previous snapshot, treating every button as released.
    pub fn reset(&mut self) {
        self.previous = Buttons::empty();
    }

    /// The last recorded snapshot.
    pub const fn held(&self) -> Buttons {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample_with(pressed: &[usize]) -> GamepadSample {
        let mut buttons = vec![false; 17];
        for &i in pressed {
            buttons[i] = true;
        }
        GamepadSample {
            buttons,
            axes: vec![0.0; 4],
        }
    }

    #[test]
    fn standard_mapping() {
        let map = ButtonMap::STANDARD;
        assert_eq!(
            map.snapshot(&sample_with(&[12, 0, 6])),
            Buttons::UP | Buttons::CONFIRM | Buttons::HOVER
        );
        assert_eq!(
            map.snapshot(&sample_with(&[15, 1, 2])),
            Buttons::RIGHT | Buttons::CANCEL | Buttons::CONTEXT
        );
    }

    #[test]
    fn missing_buttons_and_axes_are_neutral() {
        let sample = GamepadSample {
            buttons: vec![true],
            axes: vec![f64::NAN],
        };
        let map = ButtonMap::STANDARD;
        assert_eq!(map.snapshot(&sample), Buttons::CONFIRM);
        assert_eq!(map.stick(&sample), (0.0, 0.0));
    }

    #[test]
    fn held_button_fires_once() {
        let map = ButtonMap::STANDARD;
        let mut edges = EdgeDetector::new();
        let down = map.snapshot(&sample_with(&[0]));

        assert_eq!(edges.update(down).pressed, Buttons::CONFIRM);
        for _ in 0..10 {
            let e = edges.update(down);
            assert!(e.pressed.is_empty());
            assert!(e.released.is_empty());
        }
        let e = edges.update(Buttons::empty());
        assert_eq!(e.released, Buttons::CONFIRM);
        assert_eq!(edges.update(down).pressed, Buttons::CONFIRM);
    }

    #[test]
    fn simultaneous_presses_report_together() {
        let mut edges = EdgeDetector::new();
        edges.update(Buttons::HOVER);
        let e = edges.update(Buttons::HOVER | Buttons::LEFT | Buttons::CANCEL);
        assert_eq!(e.pressed, Buttons::LEFT | Buttons::CANCEL);
        assert!(e.released.is_empty());
        assert_eq!(edges.held(), Buttons::HOVER | Buttons::LEFT | Buttons::CANCEL);
    }

    #[test]
    fn directions_in_dpad_order() {
        let dirs: Vec<_> = (Buttons::RIGHT | Buttons::UP | Buttons::CONFIRM)
            .directions()
            .collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::Right]);
    }
}
