// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-owner timer handles over caller-provided millisecond timestamps.
//!
//! None of these run anything by themselves: the owner polls them with the current time and
//! acts when they report that they fired.

/// A debounced signal: every trigger cancels the pending deadline and schedules a new one, so
/// the signal fires once, `delay` after the last trigger of a burst.
#[derive(Clone, Debug)]
pub struct Debounce {
    delay: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Creates an idle debounce with the given quiet window.
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Changes the quiet window. A pending deadline keeps its old schedule.
    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    /// Records an event at `now`.
    pub fn trigger(&mut self, now: u64) {
        self.cancel();
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Drops the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the signal will fire, if pending.
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true`, once, when the pending deadline has passed at `now`.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A one-shot deadline carrying a payload. Scheduling replaces any pending one.
#[derive(Clone, Debug)]
pub struct Delay<T> {
    pending: Option<(u64, T)>,
}

impl<T> Default for Delay<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Delay<T> {
    /// Creates an idle delay.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Schedules `payload` to fire `delay` after `now`, cancelling any pending payload.
    pub fn schedule(&mut self, now: u64, delay: u64, payload: T) {
        self.cancel();
        self.pending = Some((now.saturating_add(delay), payload));
    }

    /// Drops the pending payload, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the payload will fire, if pending.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Takes the payload once its deadline has passed at `now`.
    pub fn poll(&mut self, now: u64) -> Option<T> {
        match self.pending {
            Some((at, _)) if at <= now => self.pending.take().map(|(_, payload)| payload),
            _ => None,
        }
    }
}

/// A fixed-period tick.
#[derive(Clone, Debug)]
pub struct Interval {
    period: u64,
    next: Option<u64>,
}

impl Interval {
    /// Creates a stopped interval.
    pub const fn new(period: u64) -> Self {
        Self { period, next: None }
    }

    /// Starts ticking, first at `now + period`.
    pub fn start(&mut self, now: u64) {
        self.next = Some(now.saturating_add(self.period));
    }

    /// Changes the period and, if running, restarts it from `now`.
    pub fn set_period(&mut self, period: u64, now: u64) {
        self.period = period;
        if self.next.is_some() {
            self.start(now);
        }
    }

    /// When the next tick is due, if running.
    pub const fn deadline(&self) -> Option<u64> {
        self.next
    }

    /// Returns `true` if a tick is due at `now`.
    ///
    /// Missed ticks collapse into one; the next tick is scheduled a full period after `now`.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.next {
            Some(at) if at <= now => {
                self.start(now);
                true
            }
            _ => false,
        }
    }
}
