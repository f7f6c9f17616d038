// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Padnav Input: gamepad state machines for directional navigation.
//!
//! This crate turns raw per-frame gamepad samples into discrete navigation intents without
//! knowing what those intents do:
//!
//! - [`GamepadSample`]: one poll of a device (button pressed-states and stick axes). Missing
//!   buttons read as released and missing axes read as `0.0`.
//! - [`Buttons`] / [`ButtonMap`]: the logical buttons the navigator cares about and their
//!   indices in the standard gamepad mapping.
//! - [`EdgeDetector`]: diffs consecutive [`Buttons`] snapshots into rising and falling edges,
//!   so a held button fires exactly once per press.
//! - [`AnalogStick`]: deadzone filtering plus a repeat cooldown for the left stick.
//! - [`DeviceTracker`]: which connected device is currently driving navigation.
//!
//! Timestamps are caller-provided milliseconds.
//!
//! ## Example
//!
//! ```
//! use padnav_input::{ButtonMap, Buttons, EdgeDetector, GamepadSample};
//!
//! let map = ButtonMap::STANDARD;
//! let mut edges = EdgeDetector::new();
//!
//! let mut sample = GamepadSample::default();
//! sample.buttons = vec![false; 16];
//! sample.buttons[13] = true; // d-pad down
//!
//! // First frame with the button down: one rising edge.
//! let e = edges.update(map.snapshot(&sample));
//! assert_eq!(e.pressed, Buttons::DOWN);
//!
//! // Still held: nothing new.
//! let e = edges.update(map.snapshot(&sample));
//! assert!(e.pressed.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod buttons;
mod device;
mod stick;

pub use buttons::{ButtonMap, Buttons, Edges, EdgeDetector, GamepadSample};
pub use device::DeviceTracker;
pub use stick::AnalogStick;
