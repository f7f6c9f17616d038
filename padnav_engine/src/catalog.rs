// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element discovery: which elements are navigable right now, and which dialog is open.

use kurbo::{Rect, Size};
use padnav_focus::NavNode;

use crate::host::{ElementDesc, ElementId, PageHost};

/// A navigable element with its geometry at collection time.
pub type Node = NavNode<ElementId>;

/// Slack around the viewport inside which elements stay navigable.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportMargins {
    /// Horizontal slack, in pixels.
    pub horizontal: f64,
    /// Vertical slack, in pixels.
    pub vertical: f64,
}

impl ViewportMargins {
    /// Returns `true` if `rect` overlaps the viewport of size `viewport` grown by the margins.
    ///
    /// Rectangles that merely touch the grown edge still count.
    pub fn admits(&self, rect: Rect, viewport: Size) -> bool {
        !(rect.y1 < -self.vertical
            || rect.y0 > viewport.height + self.vertical
            || rect.x1 < -self.horizontal
            || rect.x0 > viewport.width + self.horizontal)
    }
}

const INTERACTIVE_ROLES: &[&str] = &[
    "button",
    "link",
    "checkbox",
    "radio",
    "tab",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "switch",
    "textbox",
    "combobox",
    "slider",
    "spinbutton",
    "searchbox",
];

const TEXT_INPUT_TYPES: &[&str] = &["text", "email", "password", "search", "tel", "url", "number"];

fn tab_index(desc: &ElementDesc) -> Option<i32> {
    desc.attr("tabindex")?.trim().parse().ok()
}

fn is_hidden_input(desc: &ElementDesc) -> bool {
    desc.is("input")
        && desc
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
}

fn is_excluded(desc: &ElementDesc) -> bool {
    desc.has_attr("hidden")
        || desc.has_attr("inert")
        || is_hidden_input(desc)
        || tab_index(desc).is_some_and(|t| t < 0)
}

/// Returns `true` if `desc` describes an element that takes part in sequential focus.
///
/// Covers links with a target, enabled form controls, elements with a non-negative tab index,
/// editable regions, media with controls, and elements carrying an interactive role. A negative
/// tab index, `hidden`, `inert`, or a hidden input always exclude.
///
/// Disclosure widgets depend on their surroundings, so `summary` and `details` only qualify
/// here through a tab index or role; [`is_focusable_in`] decides them from the tree.
pub fn is_focusable(desc: &ElementDesc) -> bool {
    if is_excluded(desc) {
        return false;
    }

    let disabled = desc.has_attr("disabled");
    let native = match desc.tag.as_str() {
        "a" | "area" => desc.has_attr("href"),
        "button" | "select" | "textarea" | "input" => !disabled,
        "audio" | "video" => desc.has_attr("controls"),
        "iframe" => true,
        _ => false,
    };
    if native {
        return true;
    }
    if disabled && matches!(desc.tag.as_str(), "button" | "select" | "textarea" | "input") {
        return false;
    }

    tab_index(desc).is_some()
        || desc
            .attr("contenteditable")
            .is_some_and(|v| !v.eq_ignore_ascii_case("false"))
        || desc
            .attr("role")
            .is_some_and(|r| INTERACTIVE_ROLES.contains(&r.trim().to_ascii_lowercase().as_str()))
}

fn first_summary<H: PageHost + ?Sized>(host: &H, details: ElementId) -> Option<ElementId> {
    host.elements(Some(details)).into_iter().find(|&child| {
        host.parent(child) == Some(details)
            && host.describe(child).is_some_and(|d| d.is("summary"))
    })
}

/// [`is_focusable`] for element `el` described by `desc`, with disclosure widgets resolved.
///
/// The first `summary` child of a `details` is its toggle and takes focus. A `details` without
/// such a child takes focus itself.
pub fn is_focusable_in<H: PageHost + ?Sized>(
    host: &H,
    el: ElementId,
    desc: &ElementDesc,
) -> bool {
    if is_focusable(desc) {
        return true;
    }
    if is_excluded(desc) {
        return false;
    }
    match desc.tag.as_str() {
        "summary" => host.parent(el).is_some_and(|parent| {
            host.describe(parent).is_some_and(|d| d.is("details"))
                && first_summary(host, parent) == Some(el)
        }),
        "details" => first_summary(host, el).is_none(),
        _ => false,
    }
}

/// Returns `true` if `desc` accepts free-form text and should get the on-screen keyboard.
///
/// That is a text area, or an input whose type is absent, empty, or one of the text-like types.
pub fn accepts_text(desc: &ElementDesc) -> bool {
    match desc.tag.as_str() {
        "textarea" => true,
        "input" => match desc.attr("type") {
            None | Some("") => true,
            Some(t) => TEXT_INPUT_TYPES
                .iter()
                .any(|known| t.eq_ignore_ascii_case(known)),
        },
        _ => false,
    }
}

fn is_rendered<H: PageHost + ?Sized>(host: &H, el: ElementId) -> bool {
    host.computed_style(el).is_some_and(|s| s.is_rendered())
}

fn node_for<H: PageHost + ?Sized>(
    host: &H,
    el: ElementId,
    viewport: Size,
    margins: ViewportMargins,
) -> Option<Node> {
    let rect = host.bounding_rect(el)?;
    if rect.width() == 0.0 || rect.height() == 0.0 {
        return None;
    }
    if !margins.admits(rect, viewport) {
        return None;
    }
    if !is_rendered(host, el) {
        return None;
    }
    Some(NavNode::new(el, rect))
}

/// Collects the navigable elements under `scope` (or the whole document), in discovery order.
///
/// Elements with an empty rectangle, outside the viewport grown by `margins`, or not rendered
/// are skipped, as are elements that vanish while being inspected.
pub fn collect<H: PageHost + ?Sized>(
    host: &H,
    scope: Option<ElementId>,
    margins: ViewportMargins,
) -> Vec<Node> {
    let viewport = host.viewport();
    host.elements(scope)
        .into_iter()
        .filter(|&el| host.describe(el).is_some_and(|d| is_focusable_in(host, el, &d)))
        .filter_map(|el| node_for(host, el, viewport, margins))
        .collect()
}

/// Returns `true` if `el` is attached, has a non-empty rectangle, and is rendered.
pub fn is_element_accessible<H: PageHost + ?Sized>(host: &H, el: ElementId) -> bool {
    if !host.is_connected(el) {
        return false;
    }
    let Some(rect) = host.bounding_rect(el) else {
        return false;
    };
    if rect.width() == 0.0 || rect.height() == 0.0 {
        return false;
    }
    is_rendered(host, el)
}

/// Finds the open modal dialog, if any.
///
/// A native `dialog` element with the `open` attribute wins; otherwise the first element with
/// a `dialog` or `alertdialog` role and `aria-modal="true"` that is itself accessible.
pub fn detect_open_dialog<H: PageHost + ?Sized>(host: &H) -> Option<ElementId> {
    let described: Vec<(ElementId, ElementDesc)> = host
        .elements(None)
        .into_iter()
        .filter_map(|el| Some((el, host.describe(el)?)))
        .collect();

    if let Some((el, _)) = described
        .iter()
        .find(|(_, d)| d.is("dialog") && d.has_attr("open"))
    {
        return Some(*el);
    }

    described
        .iter()
        .filter(|(_, d)| {
            d.attr("role")
                .is_some_and(|r| r == "dialog" || r == "alertdialog")
                && d.attr("aria-modal") == Some("true")
        })
        .map(|(el, _)| *el)
        .find(|&el| is_element_accessible(host, el))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle)
}

fn is_close_control(desc: &ElementDesc) -> bool {
    if desc.is("button") {
        let labelled = |attr: &str, words: &[&str]| {
            desc.attr(attr)
                .is_some_and(|v| words.iter().any(|w| contains_ignore_case(v, w)))
        };
        if labelled("aria-label", &["close", "dismiss"])
            || labelled("title", &["close"])
            || desc.has_class("close")
            || desc.has_class("btn-close")
        {
            return true;
        }
    }
    desc.attr("data-dismiss") == Some("modal")
        || desc.has_class("modal-close")
        || desc.has_class("dialog-close")
}

/// Finds the first close/dismiss control inside `container`, in document order.
pub fn find_close_control<H: PageHost + ?Sized>(
    host: &H,
    container: ElementId,
) -> Option<ElementId> {
    host.elements(Some(container))
        .into_iter()
        .find(|&el| host.describe(el).is_some_and(|d| is_close_control(&d)))
}
