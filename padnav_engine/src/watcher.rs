// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalescing page changes into catalog rebuilds.

use crate::config::Config;
use crate::timer::{Debounce, Delay};

/// A structural change reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Children were inserted or removed somewhere in the document.
    ChildList,
    /// An attribute changed; carries its lowercase name.
    Attribute(String),
}

impl Mutation {
    /// Returns `true` if the change can affect navigability.
    ///
    /// Only `style`, `class`, and `hidden` attribute changes count.
    pub fn affects_layout(&self) -> bool {
        match self {
            Self::ChildList => true,
            Self::Attribute(name) => matches!(name.as_str(), "style" | "class" | "hidden"),
        }
    }
}

/// Why a rebuild ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RebuildReason {
    /// Initial discovery.
    Startup,
    /// Structural changes went quiet.
    Mutation,
    /// Resizing went quiet.
    Resize,
    /// Scrolling went quiet.
    Scroll,
    /// The settling delay after page load elapsed.
    PageLoad,
    /// An explicit delayed rebuild, such as after closing a dialog.
    Forced,
    /// Tunables were reloaded.
    Settings,
    /// The focused element stopped being accessible.
    Validation,
}

/// Debounces page changes into rebuild requests.
///
/// Each signal has its own timer. Signals that come due on the same poll collapse into one
/// rebuild.
#[derive(Clone, Debug)]
pub struct ChangeWatcher {
    mutation: Debounce,
    resize: Debounce,
    scroll: Debounce,
    page_load_delay: u64,
    page_load: Delay<()>,
    forced: Delay<()>,
}

impl ChangeWatcher {
    /// Creates an idle watcher tuned by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            mutation: Debounce::new(config.observer_timeout),
            resize: Debounce::new(config.resize_throttle),
            scroll: Debounce::new(config.scroll_throttle),
            page_load_delay: config.page_load_rebuild_delay,
            page_load: Delay::new(),
            forced: Delay::new(),
        }
    }

    /// Applies new quiet windows to future triggers.
    pub fn configure(&mut self, config: &Config) {
        self.mutation.set_delay(config.observer_timeout);
        self.resize.set_delay(config.resize_throttle);
        self.scroll.set_delay(config.scroll_throttle);
        self.page_load_delay = config.page_load_rebuild_delay;
    }

    /// Records a structural change. Returns `true` if it restarted the quiet window.
    pub fn mutation(&mut self, mutation: &Mutation, now: u64) -> bool {
        if !mutation.affects_layout() {
            return false;
        }
        self.mutation.trigger(now);
        true
    }

    /// Records a viewport resize.
    pub fn resize(&mut self, now: u64) {
        self.resize.trigger(now);
    }

    /// Records a scroll event.
    pub fn scroll(&mut self, now: u64) {
        self.scroll.trigger(now);
    }

    /// Records page-load completion.
    pub fn page_loaded(&mut self, now: u64) {
        self.page_load.schedule(now, self.page_load_delay, ());
    }

    /// Requests a rebuild `delay` after `now`, replacing any earlier request.
    pub fn force(&mut self, now: u64, delay: u64) {
        self.forced.schedule(now, delay, ());
    }

    /// Returns the reason for a rebuild if any signal came due at `now`.
    ///
    /// Every due signal is consumed, so a burst across signals yields one rebuild.
    pub fn poll(&mut self, now: u64) -> Option<RebuildReason> {
        let due = [
            (self.mutation.poll(now), RebuildReason::Mutation),
            (self.resize.poll(now), RebuildReason::Resize),
            (self.scroll.poll(now), RebuildReason::Scroll),
            (self.page_load.poll(now).is_some(), RebuildReason::PageLoad),
            (self.forced.poll(now).is_some(), RebuildReason::Forced),
        ];
        due.into_iter()
            .find_map(|(fired, reason)| fired.then_some(reason))
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.mutation.deadline(),
            self.resize.deadline(),
            self.scroll.deadline(),
            self.page_load.deadline(),
            self.forced.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}
