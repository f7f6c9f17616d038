// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Analog stick to direction conversion with deadzone and repeat cooldown.

use padnav_focus::Direction;

/// Deadzone and cooldown state for one analog stick.
///
/// A reading triggers a direction when either axis magnitude strictly exceeds the deadzone.
/// The horizontal axis wins when both do. After a trigger, further triggers are suppressed
/// until `cooldown` milliseconds have elapsed, whichever axis the next reading is on; holding
/// the stick therefore repeats at most once per cooldown window.
#[derive(Clone, Debug)]
pub struct AnalogStick {
    /// Axis magnitude at or below which input is ignored.
    pub deadzone: f64,
    /// Minimum time between two triggers, in milliseconds.
    pub cooldown: u64,
    last_trigger: Option<u64>,
}

impl AnalogStick {
    /// Creates a stick with the given deadzone and cooldown (milliseconds).
    pub const fn new(deadzone: f64, cooldown: u64) -> Self {
        Self {
            deadzone,
            cooldown,
            last_trigger: None,
        }
    }

    /// Processes one reading taken at `timestamp` (milliseconds).
    ///
    /// Returns the triggered direction, if any. Positive `x` is right, positive `y` is down.
    pub fn update(&mut self, x: f64, y: f64, timestamp: u64) -> Option<Direction> {
        if let Some(last) = self.last_trigger
            && timestamp.saturating_sub(last) < self.cooldown
        {
            return None;
        }

        let direction = if x.abs() > self.deadzone {
            if x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if y.abs() > self.deadzone {
            if y > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            }
        } else {
            return None;
        };

        self.last_trigger = Some(timestamp);
        Some(direction)
    }

    /// Timestamp of the last trigger, if any.
    pub const fn last_trigger(&self) -> Option<u64> {
        self.last_trigger
    }
}

impl Default for AnalogStick {
    fn default() -> Self {
        Self::new(0.5, 300)
    }
}
