// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Padnav Engine: gamepad-driven spatial navigation over arbitrary host content.
//!
//! The engine discovers navigable elements in a host's visual tree, moves focus between them
//! with a directional pad or analog stick, scopes navigation to open modal dialogs, and offers
//! an on-screen keyboard for text fields. It owns no event loop and reads no clock: the host
//! forwards notifications, calls it once per frame while a gamepad is connected, and wakes it
//! when a timer is due.
//!
//! ## Pieces
//!
//! - [`catalog`]: the focusable-element definition, viewport filtering, dialog detection.
//! - [`ChangeWatcher`]: debounces structural changes, resizes, and scrolls into rebuilds.
//! - [`NavigationState`]: the node catalog, current focus, hover target, and dialog scope.
//! - [`FocusController`]: focus application, band scrolling, activation, dialog closing.
//! - [`VirtualKeyboard`]: the keyboard grid bound to host text fields.
//! - [`InputRouter`]: edge detection and routing between spatial and keyboard navigation.
//! - [`Engine`]: all of the above behind the host-facing entry points.
//!
//! The host implements [`PageHost`] and [`DeviceHost`].
//!
//! ## Minimal example
//!
//! ```rust,ignore
//! use padnav_engine::{Defaults, Engine, FrameRequest, PageEvent};
//!
//! let mut engine = Engine::new(Defaults);
//! engine.start(&mut host, now());
//!
//! // On gamepad connection, then every animation frame:
//! engine.handle(&mut host, PageEvent::DeviceConnected(0), now());
//! while engine.frame(&mut host, now()) == FrameRequest::Continue {
//!     engine.advance(&mut host, now());
//!     wait_for_next_frame();
//! }
//! ```
//!
//! Diagnostics go through the [`log`] facade.

pub mod catalog;
mod config;
mod engine;
mod focus;
mod host;
mod keyboard;
mod router;
mod state;
mod timer;
mod watcher;

#[cfg(test)]
mod test_host;

pub use catalog::{Node, ViewportMargins};
pub use config::{
    ACTIVATION_SETTLE_MARGIN, Config, ConfigError, ConfigSource, DIALOG_CLOSE_REBUILD_DELAY,
    Defaults, JsonConfigSource, load_config, site_key,
};
pub use engine::{Engine, PageEvent};
pub use focus::FocusController;
pub use host::{
    ComputedStyle, DeviceHost, ElementDesc, ElementId, Host, KeyboardView, NamedKey, PageHost,
    SyntheticEvent,
};
pub use keyboard::VirtualKeyboard;
pub use router::{FrameRequest, InputRouter, Intent, Intents, PollHandle};
pub use state::{DialogScope, NavigationState};
pub use timer::{Debounce, Delay, Interval};
pub use watcher::{ChangeWatcher, Mutation, RebuildReason};

pub use padnav_focus::Direction;
pub use padnav_input::GamepadSample;
pub use padnav_keyboard::{Key, KeyOutcome, KeyboardState, LAYOUT};
