// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The on-screen keyboard bound to host elements and kept in sync with the host overlay.

use kurbo::Rect;
use padnav_focus::Direction;
use padnav_keyboard::{KeyOutcome, KeyboardState};

use crate::host::{ElementId, HostField, KeyboardView, PageHost};

/// Keyboard state plus its overlay.
///
/// Every state change that affects what the overlay shows is pushed to
/// [`PageHost::render_keyboard`] immediately.
#[derive(Clone, Debug, Default)]
pub struct VirtualKeyboard {
    state: KeyboardState<ElementId>,
}

impl VirtualKeyboard {
    /// Creates a hidden keyboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying grid state.
    pub fn state(&self) -> &KeyboardState<ElementId> {
        &self.state
    }

    /// Returns `true` while the keyboard is shown.
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// The element receiving text, if shown.
    pub fn target(&self) -> Option<ElementId> {
        self.state.target().copied()
    }

    /// Shows the keyboard for `target` with a fresh selection.
    pub fn show<H: PageHost + ?Sized>(&mut self, host: &mut H, target: ElementId) {
        self.state.show(target);
        log::debug!("Keyboard shown for {target:?}");
        self.render(host);
    }

    /// Hides the keyboard if it is shown.
    pub fn hide<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(target) = self.state.hide() {
            log::debug!("Keyboard hidden (was bound to {target:?})");
            host.render_keyboard(None);
        }
    }

    /// Moves the selection.
    pub fn navigate<H: PageHost + ?Sized>(&mut self, host: &mut H, direction: Direction) {
        if self.state.navigate(direction) {
            self.render(host);
        }
    }

    /// Activates the selected key against the bound element.
    pub fn activate<H: PageHost + ?Sized>(&mut self, host: &mut H) -> KeyOutcome {
        let Some(el) = self.target() else {
            return KeyOutcome::Ignored;
        };
        let outcome = {
            let mut field = HostField { host: &mut *host, el };
            self.state.activate(&mut field)
        };
        match outcome {
            KeyOutcome::Ignored | KeyOutcome::Unchanged => {}
            KeyOutcome::Done => {
                log::debug!("Keyboard dismissed by confirm key");
                host.render_keyboard(None);
            }
            KeyOutcome::Shift(on) => {
                log::debug!("Shift {}", if on { "armed" } else { "released" });
                self.render(host);
            }
            // One-shot shift may have been consumed, and the target may have moved.
            KeyOutcome::Edited => self.render(host),
        }
        outcome
    }

    fn render<H: PageHost + ?Sized>(&self, host: &mut H) {
        let Some(&target) = self.state.target() else {
            return;
        };
        let view = KeyboardView {
            target,
            anchor: host.bounding_rect(target).unwrap_or(Rect::ZERO),
            selection: self.state.selection(),
            shift: self.state.shift_active(),
        };
        host.render_keyboard(Some(&view));
    }
}
