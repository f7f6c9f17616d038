// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying focus decisions to the host.

use padnav_focus::{
    Direction, FocusBand, FocusPolicy, FocusSpace, WeightedPolicy, fallback_scroll,
    find_upper_left,
};

use crate::catalog::{self, Node};
use crate::config::Config;
use crate::host::{ElementId, NamedKey, PageHost, SyntheticEvent};
use crate::keyboard::VirtualKeyboard;
use crate::state::NavigationState;
use crate::timer::Delay;

/// Moves, activates, and reconciles focus.
#[derive(Clone, Debug)]
pub struct FocusController {
    policy: WeightedPolicy,
    band: FocusBand,
    scroll_amount: f64,
    settle_delay: u64,
    settle: Delay<ElementId>,
}

impl FocusController {
    /// Creates a controller tuned by `config`.
    pub fn new(config: &Config) -> Self {
        let mut controller = Self {
            policy: WeightedPolicy::default(),
            band: FocusBand::default(),
            scroll_amount: 0.0,
            settle_delay: 0,
            settle: Delay::new(),
        };
        controller.configure(config);
        controller
    }

    /// Applies new tunables. A pending activation check keeps its schedule.
    pub fn configure(&mut self, config: &Config) {
        self.policy = WeightedPolicy::new(config.axis_weights());
        self.band = config.focus_band();
        self.scroll_amount = config.scroll_amount;
        self.settle_delay = config.activation_settle_delay();
    }

    /// When the pending activation check runs, if any.
    pub fn settle_deadline(&self) -> Option<u64> {
        self.settle.deadline()
    }

    /// Focuses `node`, or only hides the keyboard for `None`.
    ///
    /// The previous node loses its highlight, the host focuses the element without implicit
    /// scrolling, the viewport scrolls the node into the focus band, and the keyboard follows
    /// whether the element accepts text.
    pub fn focus<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        nav: &mut NavigationState,
        keyboard: &mut VirtualKeyboard,
        node: Option<Node>,
    ) {
        let Some(node) = node else {
            keyboard.hide(host);
            return;
        };

        if let Some(previous) = nav.current.take() {
            host.clear_highlight(previous.id);
        }
        let el = node.id;
        let rect = node.rect;
        nav.current = Some(node);
        host.focus(el);

        let viewport = host.viewport();
        if let Some(dy) = self.band.scroll_delta(rect, viewport.height) {
            host.scroll_by(dy);
        }
        log::debug!("Focused {el:?} at {rect:?}");

        if host.describe(el).is_some_and(|d| catalog::accepts_text(&d)) {
            keyboard.show(host, el);
        } else {
            keyboard.hide(host);
        }
    }

    /// Moves focus one step in `direction`.
    ///
    /// With nothing focused yet, the node nearest the upper-left corner is focused instead. With
    /// no candidate in `direction`, vertical moves scroll the viewport.
    pub fn navigate<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        nav: &mut NavigationState,
        keyboard: &mut VirtualKeyboard,
        direction: Direction,
    ) {
        if nav.current.is_none() {
            if let Some(entry) = find_upper_left(&nav.nodes).cloned() {
                self.focus(host, nav, keyboard, Some(entry));
            }
            return;
        }
        let Some(current) = nav.current.as_ref() else {
            return;
        };

        let origin = current.id;
        let space = FocusSpace { nodes: &nav.nodes };
        let next = self.policy.next(current, direction, &space).cloned();
        match next {
            Some(next) => self.focus(host, nav, keyboard, Some(next)),
            None => {
                if let Some(dy) = fallback_scroll(direction, self.scroll_amount) {
                    log::debug!("Nothing {direction:?} of {origin:?}, scrolling by {dy}");
                    host.scroll_by(dy);
                }
            }
        }
    }

    /// Activates the current node and schedules a check for content-driven focus moves.
    pub fn activate<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        nav: &NavigationState,
        now: u64,
    ) {
        let Some(el) = nav.current_id() else {
            return;
        };
        host.dispatch(el, SyntheticEvent::Click);
        host.dispatch(el, SyntheticEvent::KeyDown(NamedKey::Enter));
        self.settle.schedule(now, self.settle_delay, el);
    }

    /// Runs the activation check if it is due: when platform focus moved away from the
    /// activated element onto a navigable one, that node becomes current.
    pub fn settle<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        nav: &mut NavigationState,
        keyboard: &mut VirtualKeyboard,
        now: u64,
    ) {
        let Some(activated) = self.settle.poll(now) else {
            return;
        };
        let Some(active) = host.active_element() else {
            return;
        };
        if active == activated {
            return;
        }
        let adopted = nav.find(active).cloned();
        log::debug!("Focus moved to {active:?} after activation, adopting: {}", adopted.is_some());
        if adopted.is_some() {
            self.focus(host, nav, keyboard, adopted);
        }
    }

    /// Replaces the catalog.
    ///
    /// A current node still present is rebound to its refreshed geometry; a vanished one is
    /// blurred and cleared.
    pub fn update_nodes<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        nav: &mut NavigationState,
        nodes: Vec<Node>,
    ) {
        nav.nodes = nodes;
        let Some(current) = nav.current.take() else {
            return;
        };
        match nav.find(current.id) {
            Some(fresh) => nav.current = Some(fresh.clone()),
            None => {
                log::debug!("Focused {:?} left the catalog", current.id);
                host.blur(current.id);
            }
        }
    }

    /// Tries to close the scoped dialog.
    ///
    /// Closes a native dialog directly, else clicks its close control, else sends it Escape.
    /// Returns `false` if no dialog scope is active. Whether the dialog actually closed is left
    /// to the next rebuild.
    pub fn close_dialog<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        nav: &NavigationState,
    ) -> bool {
        let Some(container) = nav.dialog.container else {
            return false;
        };
        if host.describe(container).is_some_and(|d| d.is("dialog")) {
            host.close_native_dialog(container);
        } else if let Some(control) = catalog::find_close_control(host, container) {
            host.dispatch(control, SyntheticEvent::Click);
        } else {
            host.dispatch(container, SyntheticEvent::KeyDown(NamedKey::Escape));
        }
        true
    }
}
