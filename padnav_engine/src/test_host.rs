// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory page and device host for tests.

use std::collections::BTreeMap;

use kurbo::{Rect, Size};
use padnav_input::GamepadSample;

use crate::host::{
    ComputedStyle, DeviceHost, ElementDesc, ElementId, KeyboardView, PageHost, SyntheticEvent,
};

#[derive(Clone, Debug)]
struct Element {
    id: ElementId,
    parent: Option<ElementId>,
    desc: ElementDesc,
    rect: Option<Rect>,
    style: ComputedStyle,
    connected: bool,
    value: String,
    selection: (usize, usize),
}

/// A flat element list with parent links, in document order, plus a log of every side effect
/// the engine requested.
#[derive(Debug)]
pub(crate) struct TestHost {
    elements: Vec<Element>,
    next_id: u64,
    pub(crate) viewport: Size,
    pub(crate) active: Option<ElementId>,
    pub(crate) focused: Vec<ElementId>,
    pub(crate) blurred: Vec<ElementId>,
    pub(crate) unhighlighted: Vec<ElementId>,
    pub(crate) scrolls: Vec<f64>,
    pub(crate) events: Vec<(ElementId, SyntheticEvent)>,
    pub(crate) closed_dialogs: Vec<ElementId>,
    pub(crate) history_backs: usize,
    pub(crate) keyboard: Option<KeyboardView>,
    pub(crate) keyboard_renders: usize,
    pub(crate) pads: BTreeMap<usize, GamepadSample>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
            viewport: Size::new(800.0, 600.0),
            active: None,
            focused: Vec::new(),
            blurred: Vec::new(),
            unhighlighted: Vec::new(),
            scrolls: Vec::new(),
            events: Vec::new(),
            closed_dialogs: Vec::new(),
            history_backs: 0,
            keyboard: None,
            keyboard_renders: 0,
            pads: BTreeMap::new(),
        }
    }

    fn push(&mut self, parent: Option<ElementId>, desc: ElementDesc, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let element = Element {
            id,
            parent,
            desc,
            rect: Some(rect),
            style: ComputedStyle::default(),
            connected: true,
            value: String::new(),
            selection: (0, 0),
        };
        // Keep children after their ancestors' existing subtree so document order holds.
        let at = match parent {
            Some(p) => self
                .elements
                .iter()
                .rposition(|e| e.id == p || self.is_descendant(e.id, p))
                .map_or(self.elements.len(), |i| i + 1),
            None => self.elements.len(),
        };
        self.elements.insert(at, element);
        id
    }

    pub(crate) fn add(&mut self, desc: ElementDesc, rect: Rect) -> ElementId {
        self.push(None, desc, rect)
    }

    pub(crate) fn add_in(&mut self, parent: ElementId, desc: ElementDesc, rect: Rect) -> ElementId {
        self.push(Some(parent), desc, rect)
    }

    /// A 40x20 button with its top-left corner at `(x, y)`.
    pub(crate) fn button(&mut self, x: f64, y: f64) -> ElementId {
        self.add(ElementDesc::new("button"), Rect::new(x, y, x + 40.0, y + 20.0))
    }

    pub(crate) fn button_in(&mut self, parent: ElementId, x: f64, y: f64) -> ElementId {
        self.add_in(
            parent,
            ElementDesc::new("button"),
            Rect::new(x, y, x + 40.0, y + 20.0),
        )
    }

    pub(crate) fn link(&mut self, x: f64, y: f64) -> ElementId {
        self.add(
            ElementDesc::new("a").with_attr("href", "#"),
            Rect::new(x, y, x + 60.0, y + 16.0),
        )
    }

    /// A 200x24 text input with its top-left corner at `(x, y)`.
    pub(crate) fn text_input(&mut self, x: f64, y: f64) -> ElementId {
        self.add(
            ElementDesc::new("input").with_attr("type", "text"),
            Rect::new(x, y, x + 200.0, y + 24.0),
        )
    }

    fn element(&self, el: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == el && e.connected)
    }

    fn element_mut(&mut self, el: ElementId) -> &mut Element {
        self.elements
            .iter_mut()
            .find(|e| e.id == el)
            .expect("unknown test element")
    }

    fn is_descendant(&self, el: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = self
            .elements
            .iter()
            .find(|e| e.id == el)
            .and_then(|e| e.parent);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self
                .elements
                .iter()
                .find(|e| e.id == p)
                .and_then(|e| e.parent);
        }
        false
    }

    pub(crate) fn set_rect(&mut self, el: ElementId, rect: Rect) {
        self.element_mut(el).rect = Some(rect);
    }

    /// Makes geometry queries for `el` fail, as for an element mid-teardown.
    pub(crate) fn forget_rect(&mut self, el: ElementId) {
        self.element_mut(el).rect = None;
    }

    pub(crate) fn style_mut(&mut self, el: ElementId) -> &mut ComputedStyle {
        &mut self.element_mut(el).style
    }

    pub(crate) fn set_attr(&mut self, el: ElementId, name: &str, value: &str) {
        let desc = &mut self.element_mut(el).desc;
        desc.attributes.retain(|(n, _)| n != name);
        desc.attributes.push((name.to_owned(), value.to_owned()));
    }

    /// Detaches `el` and its subtree.
    pub(crate) fn remove(&mut self, el: ElementId) {
        let doomed: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|e| e.id == el || self.is_descendant(e.id, el))
            .map(|e| e.id)
            .collect();
        for e in &mut self.elements {
            if doomed.contains(&e.id) {
                e.connected = false;
            }
        }
        if self.active.is_some_and(|a| doomed.contains(&a)) {
            self.active = None;
        }
    }

    pub(crate) fn value(&self, el: ElementId) -> &str {
        self.element(el).map_or("", |e| e.value.as_str())
    }

    pub(crate) fn set_value(&mut self, el: ElementId, value: &str, selection: (usize, usize)) {
        let e = self.element_mut(el);
        e.value = value.to_owned();
        e.selection = selection;
    }

    pub(crate) fn events_at(&self, el: ElementId) -> Vec<SyntheticEvent> {
        self.events
            .iter()
            .filter(|(target, _)| *target == el)
            .map(|(_, ev)| *ev)
            .collect()
    }

    /// Plugs in device `index` with nothing pressed.
    pub(crate) fn plug(&mut self, index: usize) {
        self.pads.insert(index, GamepadSample::default());
    }

    pub(crate) fn unplug(&mut self, index: usize) {
        self.pads.remove(&index);
    }

    /// Sets raw button `button` of device `index`.
    pub(crate) fn press(&mut self, index: usize, button: usize, pressed: bool) {
        let pad = self.pads.entry(index).or_default();
        if pad.buttons.len() <= button {
            pad.buttons.resize(button + 1, false);
        }
        pad.buttons[button] = pressed;
    }

    pub(crate) fn tilt(&mut self, index: usize, x: f64, y: f64) {
        self.pads.entry(index).or_default().axes = vec![x, y];
    }
}

impl PageHost for TestHost {
    fn elements(&self, scope: Option<ElementId>) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.connected)
            .filter(|e| scope.is_none_or(|s| self.is_descendant(e.id, s)))
            .map(|e| e.id)
            .collect()
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.element(el).and_then(|e| e.parent)
    }

    fn describe(&self, el: ElementId) -> Option<ElementDesc> {
        self.element(el).map(|e| e.desc.clone())
    }

    fn computed_style(&self, el: ElementId) -> Option<ComputedStyle> {
        self.element(el).map(|e| e.style)
    }

    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        self.element(el).and_then(|e| e.rect)
    }

    fn is_connected(&self, el: ElementId) -> bool {
        self.element(el).is_some()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, el: ElementId) {
        self.active = Some(el);
        self.focused.push(el);
    }

    fn blur(&mut self, el: ElementId) {
        if self.active == Some(el) {
            self.active = None;
        }
        self.blurred.push(el);
    }

    fn clear_highlight(&mut self, el: ElementId) {
        self.unhighlighted.push(el);
    }

    fn scroll_by(&mut self, dy: f64) {
        self.scrolls.push(dy);
    }

    fn dispatch(&mut self, el: ElementId, event: SyntheticEvent) {
        self.events.push((el, event));
    }

    fn close_native_dialog(&mut self, el: ElementId) {
        self.element_mut(el).desc.attributes.retain(|(n, _)| n != "open");
        self.closed_dialogs.push(el);
    }

    fn history_back(&mut self) {
        self.history_backs += 1;
    }

    fn text_value(&self, el: ElementId) -> String {
        self.value(el).to_owned()
    }

    fn text_selection(&self, el: ElementId) -> (usize, usize) {
        self.element(el).map_or((0, 0), |e| e.selection)
    }

    fn set_text(&mut self, el: ElementId, value: String, caret: usize) {
        let e = self.element_mut(el);
        e.value = value;
        e.selection = (caret, caret);
    }

    fn render_keyboard(&mut self, view: Option<&KeyboardView>) {
        self.keyboard = view.cloned();
        self.keyboard_renders += 1;
    }
}

impl DeviceHost for TestHost {
    fn connected_devices(&self) -> Vec<usize> {
        self.pads.keys().copied().collect()
    }

    fn sample(&self, index: usize) -> Option<GamepadSample> {
        self.pads.get(&index).cloned()
    }
}
