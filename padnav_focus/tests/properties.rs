// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the weighted directional policy.

use kurbo::Rect;
use padnav_focus::{Direction, FocusPolicy, FocusSpace, NavNode, WeightedPolicy};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn nodes() -> impl Strategy<Value = Vec<NavNode<usize>>> {
    // Integer coordinates make exact axis ties common.
    prop::collection::vec((-50_i32..50, -50_i32..50, 1_i32..20, 1_i32..20), 1..24).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(id, (x, y, w, h))| {
                    let (x, y, w, h) = (f64::from(x), f64::from(y), f64::from(w), f64::from(h));
                    NavNode::new(id, Rect::new(x, y, x + w, y + h))
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn next_is_never_origin_and_always_strictly_in_direction(
        nodes in nodes(),
        origin_pick in any::<prop::sample::Index>(),
        dir in direction(),
    ) {
        let origin = &nodes[origin_pick.index(nodes.len())];
        let space = FocusSpace { nodes: &nodes };
        if let Some(next) = WeightedPolicy::default().next(origin, dir, &space) {
            prop_assert_ne!(next.id, origin.id);
            prop_assert!(dir.admits(next.center - origin.center));
        }
    }

    #[test]
    fn next_has_the_minimum_score(
        nodes in nodes(),
        origin_pick in any::<prop::sample::Index>(),
        dir in direction(),
    ) {
        let origin = &nodes[origin_pick.index(nodes.len())];
        let space = FocusSpace { nodes: &nodes };
        let policy = WeightedPolicy::default();
        let best = nodes
            .iter()
            .filter(|n| n.id != origin.id)
            .filter_map(|n| policy.score(origin, n, dir))
            .fold(f64::INFINITY, f64::min);
        match policy.next(origin, dir, &space) {
            Some(next) => prop_assert_eq!(policy.score(origin, next, dir), Some(best)),
            None => prop_assert!(best.is_infinite()),
        }
    }
}
