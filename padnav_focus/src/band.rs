// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll planning for the focused node.

use kurbo::Rect;

use crate::Direction;

/// Vertical region of the viewport, as fractions of its height, inside which a focused node
/// needs no automatic scrolling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FocusBand {
    /// Upper boundary, as a fraction of viewport height from the top.
    pub upper: f64,
    /// Lower boundary, as a fraction of viewport height from the top.
    pub lower: f64,
}

impl Default for FocusBand {
    fn default() -> Self {
        Self {
            upper: 0.25,
            lower: 0.75,
        }
    }
}

impl FocusBand {
    /// Returns the vertical scroll delta that brings `rect` (in viewport coordinates) into the
    /// band, or `None` if no scroll is needed.
    ///
    /// A node whose top lies above the upper boundary is scrolled so its top sits exactly on
    /// that boundary (negative delta). Otherwise a node whose bottom lies below the lower
    /// boundary is scrolled so its bottom sits on that boundary (positive delta). The top edge
    /// wins when a node is taller than the band.
    pub fn scroll_delta(&self, rect: Rect, viewport_height: f64) -> Option<f64> {
        let upper = viewport_height * self.upper;
        let lower = viewport_height * self.lower;
        if rect.y0 < upper {
            Some(rect.y0 - upper)
        } else if rect.y1 > lower {
            Some(rect.y1 - lower)
        } else {
            None
        }
    }
}

/// Vertical scroll applied when no candidate exists in `direction`.
///
/// Vertical directions scroll by `amount` pixels; horizontal directions return `None`, since
/// most layouts do not scroll horizontally.
pub fn fallback_scroll(direction: Direction, amount: f64) -> Option<f64> {
    match direction {
        Direction::Down => Some(amount),
        Direction::Up => Some(-amount),
        Direction::Left | Direction::Right => None,
    }
}
