//! Read-aloud requests and the floating player that shows progress.

use serde::Serialize;

use crate::dom::{Document, NodeId};
use crate::settings::ClassNames;

pub const STATUS_READING: &str = "reading...";
pub const STATUS_DONE: &str = "Done";

/// Text the host should hand to its speech engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    /// Playback rate, 1.0 is normal speed.
    pub rate: f32,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, rate: f32) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
        Self {
            text: text.into(),
            rate,
        }
    }
}

/// First `max_chars` characters of `text`, with `...` when cut short.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Show the player with `text` as the preview, replacing `old`, the player
/// shown earlier. Returns the new player.
pub(super) fn show_player(
    doc: &mut Document,
    body: NodeId,
    classes: &ClassNames,
    text: &str,
    old: Option<NodeId>,
) -> NodeId {
    if let Some(old) = old {
        doc.detach(old);
    }

    let player = doc.create_html_element("div", &[("id", classes.speech_player.as_str())]);
    let content = child(doc, player, "div", &[("class", &classes.name("player-content"))]);
    let status = child(doc, content, "span", &[("class", &classes.name("player-status"))]);
    doc.append_text(status, STATUS_READING);
    let preview_el = child(doc, content, "div", &[("class", &classes.name("player-text"))]);
    doc.append_text(preview_el, text);
    let stop = child(doc, player, "button", &[("id", &classes.stop_button)]);
    doc.append_text(stop, "Stop");

    doc.set_style(player, "display", Some("flex"));
    doc.append(body, player);
    player
}

/// Mark `player` finished.
pub(super) fn finish(doc: &mut Document, classes: &ClassNames, player: NodeId) {
    let status_class = classes.name("player-status");
    let status = doc
        .descendants(player)
        .into_iter()
        .find(|&id| doc.has_class(id, &status_class));
    if let Some(status) = status {
        doc.set_text_content(status, STATUS_DONE);
    }
}

pub(super) fn hide(doc: &mut Document, player: NodeId) {
    doc.set_style(player, "display", Some("none"));
}

fn child(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &String)]) -> NodeId {
    let attrs: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let node = doc.create_html_element(tag, &attrs);
    doc.append(parent, node);
    node
}
