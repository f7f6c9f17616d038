// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Padnav Focus: directional focus scoring primitives.
//!
//! This crate models directional ("spatial") navigation over arbitrary layouts as:
//! - **Directions** ([`Direction`]): the four intents a directional pad or stick can produce.
//! - **Navigable nodes** ([`NavNode`]): an identifier plus its bounding rectangle and cached
//!   center, recomputed whenever the host rebuilds its catalog.
//! - A **read-only view of candidates** ([`FocusSpace`]) in catalog (discovery) order.
//! - Pluggable **policies** ([`FocusPolicy`]) that select the next node given an origin, a
//!   direction, and the candidate view. [`WeightedPolicy`] is the distance-weighted scorer.
//! - **Entry heuristics** ([`find_upper_left`], [`find_nearest_to_center`]) for the very first
//!   focus acquisition, when nothing is focused yet.
//! - **Scroll planning** ([`FocusBand`], [`fallback_scroll`]) for keeping the focused node
//!   inside a comfortable vertical band of the viewport.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use padnav_focus::{Direction, FocusPolicy, FocusSpace, NavNode, WeightedPolicy};
//!
//! let nodes = vec![
//!     NavNode::new(1_u32, Rect::new(90.0, 90.0, 110.0, 110.0)),
//!     // Straight to the right, 50px away.
//!     NavNode::new(2_u32, Rect::new(140.0, 90.0, 160.0, 110.0)),
//!     // Closer along x, but 40px below.
//!     NavNode::new(3_u32, Rect::new(110.0, 130.0, 130.0, 150.0)),
//! ];
//!
//! let space = FocusSpace { nodes: &nodes };
//! let policy = WeightedPolicy::default();
//!
//! // 50 * 0.3 = 15 beats 20 * 0.3 + 40 * 0.7 = 34.
//! let next = policy.next(&nodes[0], Direction::Right, &space).map(|n| n.id);
//! assert_eq!(next, Some(2));
//! ```
//!
//! The core types are generic over the node identifier `K`, so callers can use any small,
//! copyable handle for the underlying element.
//! Geometry is expressed with [`kurbo`] types. All nodes of a [`FocusSpace`] should share one
//! coordinate space (typically viewport coordinates).
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

mod band;

pub use band::{FocusBand, fallback_scroll};

use kurbo::{Point, Rect, Size, Vec2};

/// Direction of a navigation intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

impl Direction {
    /// All four directions, in d-pad button order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns `true` for [`Direction::Up`] and [`Direction::Down`].
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Returns `true` if an offset `delta` (candidate center minus origin center) lies strictly
    /// on this side of the origin.
    ///
    /// Offsets of exactly zero along the axis of travel are never admitted.
    pub fn admits(self, delta: Vec2) -> bool {
        match self {
            Self::Right => delta.x > 0.0,
            Self::Left => delta.x < 0.0,
            Self::Down => delta.y > 0.0,
            Self::Up => delta.y < 0.0,
        }
    }

    /// Splits `delta` into `(primary, perpendicular)` magnitudes, where the primary axis is the
    /// axis of travel.
    pub fn axes(self, delta: Vec2) -> (f64, f64) {
        if self.is_vertical() {
            (delta.y.abs(), delta.x.abs())
        } else {
            (delta.x.abs(), delta.y.abs())
        }
    }
}

/// A navigable element plus its cached geometry.
///
/// Nodes are derived data: hosts rebuild them from scratch on every catalog rebuild, so
/// `rect` and `center` only describe the layout at the moment of collection.
#[derive(Clone, Debug, PartialEq)]
pub struct NavNode<K> {
    /// Identifier of the underlying element.
    pub id: K,
    /// Axis-aligned bounds, in the coordinate space of the surrounding [`FocusSpace`].
    pub rect: Rect,
    /// Geometric center of `rect`.
    pub center: Point,
}

impl<K> NavNode<K> {
    /// Creates a node, deriving its center from `rect`.
    pub fn new(id: K, rect: Rect) -> Self {
        Self {
            id,
            center: rect.center(),
            rect,
        }
    }
}

/// A read-only view of navigable candidates.
///
/// Order is significant: it is the discovery order of the catalog and is used as the
/// tie-break between equally scored candidates.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Candidates, in discovery order.
    pub nodes: &'a [NavNode<K>],
}

impl<'a, K: PartialEq> FocusSpace<'a, K> {
    /// Returns the node carrying `id`, if any.
    pub fn get(&self, id: &K) -> Option<&'a NavNode<K>> {
        self.nodes.iter().find(|n| n.id == *id)
    }
}

/// Trait for directional traversal policies.
///
/// A policy receives the origin node, a direction, and the candidate view, and returns the
/// node that should receive focus next, if any.
pub trait FocusPolicy<K> {
    /// Compute the next focus target given an origin, a direction, and a focus space.
    fn next<'a>(
        &self,
        origin: &NavNode<K>,
        direction: Direction,
        space: &FocusSpace<'a, K>,
    ) -> Option<&'a NavNode<K>>;
}

/// Weights applied to the two axes of a candidate offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisWeights {
    /// Weight of the distance along the axis of travel.
    pub primary: f64,
    /// Weight of the deviation across the axis of travel.
    pub perpendicular: f64,
}

impl Default for AxisWeights {
    fn default() -> Self {
        Self {
            primary: 0.3,
            perpendicular: 0.7,
        }
    }
}

/// Distance-weighted directional policy.
///
/// Candidates are the nodes other than the origin whose center lies strictly on the requested
/// side of the origin's center. Each is scored as
/// `primary * weights.primary + perpendicular * weights.perpendicular`; the lowest score wins
/// and ties keep the earliest node in catalog order.
///
/// With the default weights, deviation across the axis of travel costs more than distance
/// along it, so aligned elements win over merely closer ones.
#[derive(Copy, Clone, Debug, Default)]
pub struct WeightedPolicy {
    /// Axis weights used for scoring.
    pub weights: AxisWeights,
}

impl WeightedPolicy {
    /// Creates a policy with the given weights.
    pub const fn new(weights: AxisWeights) -> Self {
        Self { weights }
    }

    /// Scores `candidate` relative to `origin`, or returns `None` if it does not lie strictly
    /// in `direction`.
    pub fn score<K>(
        &self,
        origin: &NavNode<K>,
        candidate: &NavNode<K>,
        direction: Direction,
    ) -> Option<f64> {
        let delta = candidate.center - origin.center;
        if !direction.admits(delta) {
            return None;
        }
        let (primary, perpendicular) = direction.axes(delta);
        Some(primary * self.weights.primary + perpendicular * self.weights.perpendicular)
    }
}

impl<K: PartialEq> FocusPolicy<K> for WeightedPolicy {
    fn next<'a>(
        &self,
        origin: &NavNode<K>,
        direction: Direction,
        space: &FocusSpace<'a, K>,
    ) -> Option<&'a NavNode<K>> {
        let mut best: Option<&'a NavNode<K>> = None;
        let mut best_score = f64::INFINITY;

        for candidate in space.nodes {
            if candidate.id == origin.id {
                continue;
            }
            let Some(score) = self.score(origin, candidate, direction) else {
                continue;
            };
            if !score.is_finite() {
                continue;
            }
            // Strict comparison keeps the earliest node on ties.
            if score < best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        best
    }
}

/// Returns the node whose center is nearest (Euclidean) to `point`.
///
/// Ties keep the earliest node in catalog order. Returns `None` for an empty slice.
pub fn nearest_to<K>(nodes: &[NavNode<K>], point: Point) -> Option<&NavNode<K>> {
    let mut nearest = None;
    let mut min = f64::INFINITY;
    for node in nodes {
        let d = node.center.distance_squared(point);
        if d < min {
            min = d;
            nearest = Some(node);
        }
    }
    // All distances non-finite: still hand back something to focus.
    nearest.or(nodes.first())
}

/// Entry heuristic: the node nearest to the viewport origin.
pub fn find_upper_left<K>(nodes: &[NavNode<K>]) -> Option<&NavNode<K>> {
    nearest_to(nodes, Point::ORIGIN)
}

/// Alternative entry heuristic: the node nearest to the center of a viewport of `viewport`
/// size.
pub fn find_nearest_to_center<K>(nodes: &[NavNode<K>], viewport: Size) -> Option<&NavNode<K>> {
    nearest_to(nodes, Point::new(viewport.width / 2.0, viewport.height / 2.0))
}
