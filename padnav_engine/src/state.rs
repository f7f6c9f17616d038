// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared navigation context.

use crate::catalog::Node;
use crate::host::ElementId;

/// Modal scope bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogScope {
    /// The node that was current when the dialog appeared.
    pub starting_node: Option<Node>,
    /// The open dialog restricting the catalog.
    pub container: Option<ElementId>,
}

impl DialogScope {
    /// Returns `true` while a dialog restricts the catalog.
    pub fn is_active(&self) -> bool {
        self.container.is_some()
    }
}

/// Navigation context for one page.
///
/// `current` is always `None` or a node of `nodes`. While `dialog.container` is set, `nodes`
/// only holds descendants of that container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
    /// The catalog, in discovery order.
    pub nodes: Vec<Node>,
    /// The focused node.
    pub current: Option<Node>,
    /// The node receiving simulated hover, independent of `current`.
    pub hover: Option<Node>,
    /// Modal scope.
    pub dialog: DialogScope,
}

impl NavigationState {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns to the empty context of a fresh page.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The element of the current node.
    pub fn current_id(&self) -> Option<ElementId> {
        self.current.as_ref().map(|n| n.id)
    }

    /// The catalog node for `el`, if it is navigable.
    pub fn find(&self, el: ElementId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == el)
    }
}
