// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: one navigation context per page, driven by host events, frames, and timers.

use core::fmt;

use padnav_keyboard::KeyboardState;

use crate::catalog::{self, detect_open_dialog, is_element_accessible};
use crate::config::{Config, ConfigSource, DIALOG_CLOSE_REBUILD_DELAY, load_config};
use crate::focus::FocusController;
use crate::host::{ElementId, Host, PageHost, SyntheticEvent};
use crate::keyboard::VirtualKeyboard;
use crate::router::{FrameRequest, InputRouter, Intent, Intents, PollHandle};
use crate::state::NavigationState;
use crate::timer::Interval;
use crate::watcher::{ChangeWatcher, Mutation, RebuildReason};

/// Notifications a host forwards to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    /// The document changed structurally.
    Mutation(Mutation),
    /// The viewport was resized.
    Resize,
    /// The viewport scrolled.
    Scroll,
    /// The page finished loading.
    Loaded,
    /// Stored tunables changed.
    SettingsChanged,
    /// A gamepad was connected at this index.
    DeviceConnected(usize),
    /// The gamepad at this index was disconnected.
    DeviceDisconnected(usize),
}

/// Gamepad navigation over one page.
///
/// The host drives the engine through three entry points:
///
/// - [`Engine::handle`] for page and device notifications,
/// - [`Engine::frame`] once per visual frame while it returns [`FrameRequest::Continue`],
/// - [`Engine::advance`] whenever time passes, at the latest by [`Engine::next_deadline`].
///
/// All of them take the current time in milliseconds. Handlers run to completion, so a
/// rebuild always replaces the whole catalog before the next input is routed.
pub struct Engine {
    config: Config,
    source: Box<dyn ConfigSource>,
    nav: NavigationState,
    keyboard: VirtualKeyboard,
    focus: FocusController,
    watcher: ChangeWatcher,
    router: InputRouter,
    validation: Interval,
    poll: PollHandle,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("nav", &self.nav)
            .field("keyboard", &self.keyboard)
            .field("router", &self.router)
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine, loading tunables from `source`.
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        let mut source: Box<dyn ConfigSource> = Box::new(source);
        let config = load_config(source.as_mut());
        Self {
            focus: FocusController::new(&config),
            watcher: ChangeWatcher::new(&config),
            router: InputRouter::new(&config),
            validation: Interval::new(config.focus_validation_interval),
            nav: NavigationState::new(),
            keyboard: VirtualKeyboard::new(),
            poll: PollHandle::default(),
            source,
            config,
        }
    }

    /// Active tunables.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Navigation context.
    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Keyboard state.
    pub fn keyboard(&self) -> &KeyboardState<ElementId> {
        self.keyboard.state()
    }

    /// A handle that stops the per-frame poll loop.
    pub fn poll_handle(&self) -> PollHandle {
        self.poll.clone()
    }

    /// Initial discovery: builds the catalog, adopts already connected devices, and starts
    /// focus validation.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H, now: u64) {
        self.nav.reset();
        self.rebuild(host, RebuildReason::Startup);
        // Connect in reverse so the first listed device ends up active.
        for index in host.connected_devices().into_iter().rev() {
            let intents = self.router.connect(index);
            self.apply_all(host, intents, now);
        }
        if let Some(index) = self.router.active() {
            log::info!("Gamepad {index} connected");
        }
        self.validation.start(now);
        log::info!("Ready: {} navigable elements", self.nav.nodes.len());
    }

    /// Handles a host notification.
    pub fn handle<H: PageHost + ?Sized>(&mut self, host: &mut H, event: PageEvent, now: u64) {
        match event {
            PageEvent::Mutation(mutation) => {
                self.watcher.mutation(&mutation, now);
            }
            PageEvent::Resize => self.watcher.resize(now),
            PageEvent::Scroll => self.watcher.scroll(now),
            PageEvent::Loaded => self.watcher.page_loaded(now),
            PageEvent::SettingsChanged => {
                log::info!("Reloading settings");
                self.config = load_config(self.source.as_mut());
                self.focus.configure(&self.config);
                self.watcher.configure(&self.config);
                self.router.configure(&self.config);
                self.validation
                    .set_period(self.config.focus_validation_interval, now);
                self.rebuild(host, RebuildReason::Settings);
            }
            PageEvent::DeviceConnected(index) => {
                let intents = self.router.connect(index);
                log::info!("Gamepad {index} connected");
                self.apply_all(host, intents, now);
            }
            PageEvent::DeviceDisconnected(index) => {
                if let Some(intents) = self.router.disconnect(index) {
                    log::info!("Gamepad {index} disconnected");
                    self.apply_all(host, intents, now);
                }
            }
        }
    }

    /// Polls the active device once and applies the resulting intents.
    pub fn frame<H: Host + ?Sized>(&mut self, host: &mut H, now: u64) -> FrameRequest {
        if self.poll.is_stopped() {
            return FrameRequest::Stopped;
        }
        let Some(index) = self.router.active() else {
            return FrameRequest::Idle;
        };
        let Some(sample) = host.sample(index) else {
            if let Some(intents) = self.router.disconnect(index) {
                self.apply_all(host, intents, now);
            }
            log::info!("Gamepad {index} disconnected");
            return if self.router.active().is_some() {
                FrameRequest::Continue
            } else {
                FrameRequest::Idle
            };
        };

        let intents = self.router.route(&sample, self.keyboard.is_visible(), now);
        self.apply_all(host, intents, now);
        FrameRequest::Continue
    }

    /// Fires every timer due at `now`: pending rebuilds, the activation check, and focus
    /// validation.
    pub fn advance<H: PageHost + ?Sized>(&mut self, host: &mut H, now: u64) {
        if let Some(reason) = self.watcher.poll(now) {
            self.rebuild(host, reason);
        }
        self.focus
            .settle(host, &mut self.nav, &mut self.keyboard, now);
        if self.validation.poll(now)
            && let Some(current) = self.nav.current_id()
            && !is_element_accessible(host, current)
        {
            log::debug!("Focused {current:?} became inaccessible");
            self.rebuild(host, RebuildReason::Validation);
        }
    }

    /// Earliest time at which [`Engine::advance`] has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.watcher.next_deadline(),
            self.focus.settle_deadline(),
            self.validation.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Applies one intent.
    pub fn apply<H: PageHost + ?Sized>(&mut self, host: &mut H, intent: Intent, now: u64) {
        match intent {
            Intent::Navigate(direction) => {
                self.focus
                    .navigate(host, &mut self.nav, &mut self.keyboard, direction);
            }
            Intent::Activate => self.focus.activate(host, &self.nav, now),
            Intent::KeyboardNavigate(direction) => self.keyboard.navigate(host, direction),
            Intent::KeyboardActivate => {
                self.keyboard.activate(host);
            }
            Intent::Cancel => self.cancel(host, now),
            Intent::HoverStart => {
                if let Some(current) = self.nav.current.clone() {
                    host.dispatch(current.id, SyntheticEvent::PointerEnter);
                    host.dispatch(current.id, SyntheticEvent::PointerOver);
                    self.nav.hover = Some(current);
                }
            }
            Intent::HoverEnd => {
                if let Some(hover) = self.nav.hover.take() {
                    log::debug!("Hover ended on {:?}", hover.id);
                    host.dispatch(hover.id, SyntheticEvent::PointerOut);
                    host.dispatch(hover.id, SyntheticEvent::PointerLeave);
                }
            }
        }
    }

    fn apply_all<H: PageHost + ?Sized>(&mut self, host: &mut H, intents: Intents, now: u64) {
        for intent in intents {
            self.apply(host, intent, now);
        }
    }

    fn cancel<H: PageHost + ?Sized>(&mut self, host: &mut H, now: u64) {
        if self.keyboard.is_visible() {
            self.keyboard.hide(host);
        } else if self.focus.close_dialog(host, &self.nav) {
            log::info!("Closing dialog");
            self.watcher.force(now, DIALOG_CLOSE_REBUILD_DELAY);
        } else {
            host.history_back();
        }
    }

    /// Re-detects the dialog scope and replaces the catalog.
    pub fn rebuild<H: PageHost + ?Sized>(&mut self, host: &mut H, reason: RebuildReason) {
        let dialog = detect_open_dialog(host);
        let mut closed = false;
        match (self.nav.dialog.container, dialog) {
            (None, Some(container)) => {
                log::info!("Dialog {container:?} opened, scoping navigation to it");
                self.nav.dialog.starting_node = self.nav.current.clone();
                self.nav.dialog.container = Some(container);
            }
            (Some(_), None) => {
                log::info!("Dialog closed, restoring page navigation");
                self.nav.dialog.container = None;
                closed = true;
            }
            (Some(previous), Some(container)) if previous != container => {
                self.nav.dialog.container = Some(container);
            }
            _ => {}
        }

        let nodes = catalog::collect(
            host,
            self.nav.dialog.container,
            self.config.viewport_margins(),
        );
        log::debug!(
            "Rebuilt catalog ({reason:?}): {} nodes{}",
            nodes.len(),
            if dialog.is_some() { " in dialog" } else { "" }
        );
        self.focus.update_nodes(host, &mut self.nav, nodes);

        if closed {
            let restored = self
                .nav
                .dialog
                .starting_node
                .take()
                .and_then(|start| self.nav.find(start.id).cloned());
            self.focus
                .focus(host, &mut self.nav, &mut self.keyboard, restored);
        }

        if let Some(target) = self.keyboard.target()
            && !host.is_connected(target)
        {
            self.keyboard.hide(host);
        }
    }
}
