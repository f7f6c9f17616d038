// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the engine consumes from its environment.
//!
//! [`PageHost`] is the visual tree: enumeration, description, geometry, visibility, platform
//! focus, scrolling, synthetic events, and the keyboard overlay. [`DeviceHost`] is the gamepad
//! API. Keeping both behind traits lets the engine run against an in-memory tree in tests.

use kurbo::{Rect, Size};
use padnav_input::GamepadSample;
use padnav_keyboard::TextField;
use smallvec::SmallVec;

/// Opaque handle to an element of the host's visual tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Static description of an element: its tag and attributes.
///
/// Tags and attribute names are lowercase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementDesc {
    /// Tag name.
    pub tag: String,
    /// Attributes as `(name, value)` pairs. Boolean attributes carry an empty value.
    pub attributes: SmallVec<[(String, String); 4]>,
}

impl ElementDesc {
    /// Creates a description with no attributes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: SmallVec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .push((name.to_ascii_lowercase(), value.to_owned()));
        self
    }

    /// Value of attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if attribute `name` is present, whatever its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Returns `true` if the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Returns `true` if the tag is `tag`.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

/// The parts of an element's computed style that affect navigability.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    /// `display: none`.
    pub display_none: bool,
    /// `visibility: hidden`.
    pub visibility_hidden: bool,
}

impl ComputedStyle {
    /// Returns `true` unless display or visibility suppress rendering.
    pub const fn is_rendered(&self) -> bool {
        !self.display_none && !self.visibility_hidden
    }
}

/// Keys carried by synthetic key-down events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamedKey {
    /// Enter.
    Enter,
    /// Escape.
    Escape,
}

/// Events the engine dispatches at elements, observable by the content's own listeners.
///
/// Hosts dispatch them bubbling; the key-down for [`NamedKey::Escape`] is also cancelable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyntheticEvent {
    /// Pointer enters the element.
    PointerEnter,
    /// Pointer moves over the element.
    PointerOver,
    /// Pointer moves out of the element.
    PointerOut,
    /// Pointer leaves the element.
    PointerLeave,
    /// Primary activation.
    Click,
    /// Key press.
    KeyDown(NamedKey),
    /// The element's value changed.
    Input,
}

/// What the keyboard overlay should show.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardView {
    /// Element receiving text.
    pub target: ElementId,
    /// Bounds of the target in viewport coordinates; the overlay sits next to it.
    pub anchor: Rect,
    /// Selected `(row, column)` of [`padnav_keyboard::LAYOUT`].
    pub selection: (usize, usize),
    /// Whether shift is armed.
    pub shift: bool,
}

/// The visual tree and page-level controls.
///
/// Methods that read an element return `None` (or a neutral value) once the element is gone;
/// the engine treats that as "skip this element", never as a failure.
pub trait PageHost {
    /// Elements under `scope` (excluding `scope` itself), or the whole document when `scope` is
    /// `None`, in document order.
    ///
    /// The contents of open shadow roots are included, each tree in place of its shadow host's
    /// position. Closed shadow roots are opaque.
    fn elements(&self, scope: Option<ElementId>) -> Vec<ElementId>;

    /// Parent of `el` in the tree [`PageHost::elements`] walks.
    ///
    /// For the top-level children of a shadow root this is the shadow host.
    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Tag and attributes of `el`.
    fn describe(&self, el: ElementId) -> Option<ElementDesc>;

    /// Computed style of `el`.
    fn computed_style(&self, el: ElementId) -> Option<ComputedStyle>;

    /// Bounding rectangle of `el` in viewport coordinates.
    fn bounding_rect(&self, el: ElementId) -> Option<Rect>;

    /// Returns `true` while `el` is attached to the document.
    fn is_connected(&self, el: ElementId) -> bool;

    /// Size of the viewport.
    fn viewport(&self) -> Size;

    /// Element holding platform focus.
    fn active_element(&self) -> Option<ElementId>;

    /// Gives `el` platform focus without implicit scrolling.
    fn focus(&mut self, el: ElementId);

    /// Removes platform focus from `el`.
    fn blur(&mut self, el: ElementId);

    /// Removes any "current element" decoration from `el`.
    fn clear_highlight(&mut self, el: ElementId);

    /// Scrolls the viewport vertically by `dy` pixels, animated.
    fn scroll_by(&mut self, dy: f64);

    /// Dispatches `event` at `el`.
    fn dispatch(&mut self, el: ElementId, event: SyntheticEvent);

    /// Closes a native modal dialog element.
    fn close_native_dialog(&mut self, el: ElementId);

    /// Navigates back in session history.
    fn history_back(&mut self);

    /// Current value of a text-accepting element.
    fn text_value(&self, el: ElementId) -> String;

    /// Selection of a text-accepting element, in `char`s.
    fn text_selection(&self, el: ElementId) -> (usize, usize);

    /// Sets the value of a text-accepting element and collapses its selection to `caret`.
    fn set_text(&mut self, el: ElementId, value: String, caret: usize);

    /// Shows the keyboard overlay as described, or hides it for `None`.
    fn render_keyboard(&mut self, view: Option<&KeyboardView>);
}

/// The gamepad API.
pub trait DeviceHost {
    /// Indices of the currently connected devices.
    fn connected_devices(&self) -> Vec<usize>;

    /// Current state of device `index`, or `None` if it is gone.
    fn sample(&self, index: usize) -> Option<GamepadSample>;
}

/// Everything the engine needs from its environment.
pub trait Host: PageHost + DeviceHost {}

impl<T: PageHost + DeviceHost + ?Sized> Host for T {}

/// A text-accepting element seen through a [`PageHost`].
#[derive(Debug)]
pub(crate) struct HostField<'a, H: ?Sized> {
    pub(crate) host: &'a mut H,
    pub(crate) el: ElementId,
}

impl<H: PageHost + ?Sized> TextField for HostField<'_, H> {
    fn value(&self) -> String {
        self.host.text_value(self.el)
    }

    fn selection(&self) -> (usize, usize) {
        self.host.text_selection(self.el)
    }

    fn commit(&mut self, value: String, caret: usize) {
        self.host.set_text(self.el, value, caret);
        self.host.dispatch(self.el, SyntheticEvent::Input);
    }
}
