//! Focus mode: dim distractions, and lock blocked sites behind an overlay.

use crate::dom::{Document, NodeId};
use crate::settings::ClassNames;

pub const LOCK_ICON: &str = "🔒";
pub const OVERLAY_TITLE: &str = "Focus Locked";
pub const OVERLAY_MESSAGE: &str = "This site is blocked while Focus Mode is active.";
pub const MOTIVATION: &str = "\"Starve your distractions, feed your focus.\"";

/// Switch focus mode on. `blocked` says whether the page's host is on the
/// blocklist; only then is the overlay injected and scrolling locked.
///
/// `overlay` is the overlay injected earlier, if still on the page. Returns
/// the overlay now shown.
pub(super) fn enable(
    doc: &mut Document,
    body: NodeId,
    classes: &ClassNames,
    blocked: bool,
    overlay: Option<NodeId>,
) -> Option<NodeId> {
    doc.add_class(body, &classes.focus_mode);
    if !blocked || overlay.is_some() {
        return overlay;
    }

    log::info!("page is on the focus blocklist, locking it");
    let overlay = build_overlay(doc, classes);
    doc.append(body, overlay);
    doc.set_style(body, "overflow", Some("hidden"));
    Some(overlay)
}

/// Switch focus mode off, removing `overlay` if one was injected.
pub(super) fn disable(
    doc: &mut Document,
    body: NodeId,
    classes: &ClassNames,
    overlay: Option<NodeId>,
) {
    doc.remove_class(body, &classes.focus_mode);
    if let Some(overlay) = overlay {
        doc.detach(overlay);
        doc.set_style(body, "overflow", None);
    }
}

fn build_overlay(doc: &mut Document, classes: &ClassNames) -> NodeId {
    let overlay = doc.create_html_element("div", &[("id", classes.focus_overlay.as_str())]);
    let message = element(doc, overlay, "div", &classes.name("focus-message"));

    let icon = element(doc, message, "div", &classes.name("lock-icon"));
    doc.append_text(icon, LOCK_ICON);

    let title = doc.create_html_element("h1", &[]);
    doc.append(message, title);
    doc.append_text(title, OVERLAY_TITLE);

    let text = doc.create_html_element("p", &[]);
    doc.append(message, text);
    doc.append_text(text, OVERLAY_MESSAGE);

    let motivation = element(doc, message, "p", &classes.name("motivation"));
    doc.append_text(motivation, MOTIVATION);

    overlay
}

fn element(doc: &mut Document, parent: NodeId, tag: &str, class: &str) -> NodeId {
    let node = doc.create_html_element(tag, &[("class", class)]);
    doc.append(parent, node);
    node
}
