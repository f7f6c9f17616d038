// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active device selection.

use smallvec::SmallVec;

/// Tracks connected devices and which one drives navigation.
///
/// At most one device is active. The most recently connected device becomes active; when the
/// active device disconnects, the most recently connected of the remaining devices takes over.
#[derive(Clone, Debug, Default)]
pub struct DeviceTracker {
    /// Connected device indices, oldest first.
    connected: SmallVec<[usize; 4]>,
}

impl DeviceTracker {
    /// Creates a tracker with no connected devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a connection and makes `index` the active device.
    pub fn connect(&mut self, index: usize) {
        self.connected.retain(|i| *i != index);
        self.connected.push(index);
    }

    /// Records a disconnection.
    ///
    /// Returns `true` if the active device changed as a result.
    pub fn disconnect(&mut self, index: usize) -> bool {
        let was_active = self.active() == Some(index);
        self.connected.retain(|i| *i != index);
        was_active
    }

    /// The device currently driving navigation.
    pub fn active(&self) -> Option<usize> {
        self.connected.last().copied()
    }

    /// Returns `true` if any device is connected.
    pub fn is_connected(&self) -> bool {
        !self.connected.is_empty()
    }
}
