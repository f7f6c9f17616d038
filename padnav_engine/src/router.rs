// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning device samples into navigation intents.

use std::cell::Cell;
use std::rc::Rc;

use padnav_focus::Direction;
use padnav_input::{AnalogStick, ButtonMap, Buttons, DeviceTracker, EdgeDetector, GamepadSample};
use smallvec::SmallVec;

use crate::config::Config;

/// What one poll asks the engine to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Move focus spatially.
    Navigate(Direction),
    /// Activate the focused element.
    Activate,
    /// Move the keyboard selection.
    KeyboardNavigate(Direction),
    /// Press the selected key.
    KeyboardActivate,
    /// Back out: keyboard, then dialog, then history.
    Cancel,
    /// Start simulated hover on the focused element.
    HoverStart,
    /// End simulated hover.
    HoverEnd,
}

/// Intents produced by a single poll, in dispatch order.
pub type Intents = SmallVec<[Intent; 4]>;

/// Answer to [`crate::Engine::frame`]: what the host should do about the next frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameRequest {
    /// Call again on the next visual frame.
    Continue,
    /// No device is connected; wait for a connection event before polling again.
    Idle,
    /// The poll loop was stopped through its [`PollHandle`].
    Stopped,
}

/// Cancels the per-frame poll loop. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct PollHandle(Rc<Cell<bool>>);

impl PollHandle {
    /// Stops the loop; subsequent frames report [`FrameRequest::Stopped`].
    pub fn stop(&self) {
        self.0.set(true);
    }

    /// Returns `true` once [`PollHandle::stop`] was called.
    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Device tracking, edge detection, and routing between spatial and keyboard navigation.
#[derive(Clone, Debug)]
pub struct InputRouter {
    map: ButtonMap,
    edges: EdgeDetector,
    stick: AnalogStick,
    devices: DeviceTracker,
}

impl InputRouter {
    /// Creates a router for the standard mapping, tuned by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            map: ButtonMap::STANDARD,
            edges: EdgeDetector::new(),
            stick: AnalogStick::new(config.analog_deadzone, config.analog_cooldown),
            devices: DeviceTracker::new(),
        }
    }

    /// Applies new stick tunables.
    pub fn configure(&mut self, config: &Config) {
        self.stick.deadzone = config.analog_deadzone;
        self.stick.cooldown = config.analog_cooldown;
    }

    /// Records a connection; the device becomes active.
    ///
    /// Switching devices forgets held buttons, so the returned intents end a hover the previous
    /// device was still holding.
    pub fn connect(&mut self, index: usize) -> Intents {
        let before = self.devices.active();
        self.devices.connect(index);
        if before == Some(index) {
            return Intents::new();
        }
        self.switch_device()
    }

    /// Records a disconnection.
    ///
    /// Returns `None` if the active device did not change, else the intents that wind down
    /// the input held on the device that went away.
    pub fn disconnect(&mut self, index: usize) -> Option<Intents> {
        self.devices
            .disconnect(index)
            .then(|| self.switch_device())
    }

    fn switch_device(&mut self) -> Intents {
        let mut intents = Intents::new();
        if self.edges.held().contains(Buttons::HOVER) {
            intents.push(Intent::HoverEnd);
        }
        self.edges.reset();
        intents
    }

    /// The device being polled.
    pub fn active(&self) -> Option<usize> {
        self.devices.active()
    }

    /// Buttons held on the last poll.
    pub fn held(&self) -> Buttons {
        self.edges.held()
    }

    /// Routes one sample of the active device taken at `now`.
    ///
    /// Each press yields its intent once, however long it is held. While the keyboard is
    /// visible the d-pad and confirm drive it instead of spatial navigation; the stick always
    /// navigates spatially.
    pub fn route(&mut self, sample: &GamepadSample, keyboard_visible: bool, now: u64) -> Intents {
        let edges = self.edges.update(self.map.snapshot(sample));
        let mut intents = Intents::new();

        for direction in edges.pressed.directions() {
            intents.push(if keyboard_visible {
                Intent::KeyboardNavigate(direction)
            } else {
                Intent::Navigate(direction)
            });
        }
        if edges.pressed.contains(Buttons::CONFIRM) {
            intents.push(if keyboard_visible {
                Intent::KeyboardActivate
            } else {
                Intent::Activate
            });
        }
        if edges.pressed.contains(Buttons::CANCEL) {
            intents.push(Intent::Cancel);
        }
        if edges.pressed.contains(Buttons::HOVER) {
            intents.push(Intent::HoverStart);
        }
        if edges.released.contains(Buttons::HOVER) {
            intents.push(Intent::HoverEnd);
        }

        let (x, y) = self.map.stick(sample);
        if let Some(direction) = self.stick.update(x, y, now) {
            intents.push(Intent::Navigate(direction));
        }
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWN: usize = 13;
    const RIGHT: usize = 15;
    const A: usize = 0;
    const B: usize = 1;
    const X: usize = 2;
    const LT: usize = 6;

    fn sample(pressed: &[usize]) -> GamepadSample {
        let mut buttons = vec![false; 17];
        for &i in pressed {
            buttons[i] = true;
        }
        GamepadSample {
            buttons,
            axes: vec![0.0, 0.0],
        }
    }

    fn router() -> InputRouter {
        let mut r = InputRouter::new(&Config::default());
        r.connect(0);
        r
    }

    #[test]
    fn presses_fire_once_per_edge() {
        let mut r = router();
        assert_eq!(
            r.route(&sample(&[DOWN]), false, 0).as_slice(),
            &[Intent::Navigate(Direction::Down)]
        );
        assert!(r.route(&sample(&[DOWN]), false, 16).is_empty());
        assert!(r.route(&sample(&[DOWN]), false, 32).is_empty());
        assert!(r.route(&sample(&[]), false, 48).is_empty());
        assert_eq!(r.route(&sample(&[DOWN]), false, 64).len(), 1);
    }

    #[test]
    fn keyboard_captures_dpad_and_confirm() {
        let mut r = router();
        assert_eq!(
            r.route(&sample(&[RIGHT, A, B]), true, 0).as_slice(),
            &[
                Intent::KeyboardNavigate(Direction::Right),
                Intent::KeyboardActivate,
                Intent::Cancel,
            ]
        );
    }

    #[test]
    fn context_button_is_unbound() {
        let mut r = router();
        assert!(r.route(&sample(&[X]), false, 0).is_empty());
        assert!(r.held().contains(Buttons::CONTEXT));
    }

    #[test]
    fn hover_is_level_driven() {
        let mut r = router();
        assert_eq!(
            r.route(&sample(&[LT]), false, 0).as_slice(),
            &[Intent::HoverStart]
        );
        assert!(r.route(&sample(&[LT]), false, 16).is_empty());
        assert_eq!(
            r.route(&sample(&[]), false, 32).as_slice(),
            &[Intent::HoverEnd]
        );
    }

    #[test]
    fn stick_navigates_spatially_with_cooldown() {
        let mut r = router();
        let mut tilted = sample(&[]);
        tilted.axes = vec![0.0, 0.9];
        assert_eq!(
            r.route(&tilted, true, 1_000).as_slice(),
            &[Intent::Navigate(Direction::Down)]
        );
        assert!(r.route(&tilted, true, 1_100).is_empty());
        assert_eq!(r.route(&tilted, true, 1_300).len(), 1);
    }

    #[test]
    fn missing_buttons_and_axes_read_as_idle() {
        let mut r = router();
        assert!(r.route(&GamepadSample::default(), false, 0).is_empty());
    }

    #[test]
    fn device_switch_forgets_held_buttons() {
        let mut r = router();
        r.route(&sample(&[DOWN]), false, 0);
        assert!(r.connect(1).is_empty(), "no hover to end");
        assert_eq!(r.active(), Some(1));
        assert_eq!(r.route(&sample(&[DOWN]), false, 16).len(), 1);
        assert_eq!(r.disconnect(1).as_deref(), Some(&[][..]));
        assert_eq!(r.active(), Some(0));
        assert_eq!(r.disconnect(5), None, "inactive device");
    }

    #[test]
    fn device_switch_ends_held_hover() {
        let mut r = router();
        r.route(&sample(&[LT]), false, 0);
        assert_eq!(r.connect(1).as_slice(), &[Intent::HoverEnd]);
        // Reconnecting the active device changes nothing.
        assert!(r.connect(1).is_empty(), "same device");

        r.route(&sample(&[LT]), false, 16);
        assert_eq!(
            r.disconnect(1).as_deref(),
            Some(&[Intent::HoverEnd][..]),
            "hover held on the departing device ends with it"
        );
        // The fallback device starts from released buttons.
        assert_eq!(
            r.route(&sample(&[LT]), false, 32).as_slice(),
            &[Intent::HoverStart]
        );
    }

    #[test]
    fn poll_handle_is_shared() {
        let handle = PollHandle::default();
        let clone = handle.clone();
        assert!(!handle.is_stopped());
        clone.stop();
        assert!(handle.is_stopped());
    }
}
