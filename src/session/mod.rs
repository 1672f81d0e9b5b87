//! Per-page state: the document plus the reading aids switched on for it.
//!
//! A [`Session`] owns a parsed page and the user's [`Settings`], and turns
//! popup [`Message`]s into document changes. Switching a text transform off
//! only removes the body class; the rewritten spans stay until the page is
//! reloaded, like the extension does.
//!
//! ```
//! use lockfocus::dom::parse_html;
//! use lockfocus::{Config, Message, Session};
//!
//! let doc = parse_html("<p>Reading aid</p>");
//! let mut session = Session::new(doc, Config::default());
//! session.apply(Message::ToggleBionicMode { value: true }).unwrap();
//!
//! assert!(session.settings().bionic_mode);
//! assert!(session.to_html().unwrap().contains("<b>Read</b>ing"));
//! ```

mod focus;
mod speech;
mod tint;

pub use focus::{LOCK_ICON, MOTIVATION, OVERLAY_MESSAGE, OVERLAY_TITLE};
pub use speech::{STATUS_DONE, STATUS_READING, SpeechRequest, preview};
pub use tint::{Rgb, TINT_ALPHA};

use crate::dom::{Document, NodeId, Scope};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::settings::{ClassNames, Config, Settings};
use crate::transform::{Mode, TransformStats, Transformer, transform, transform_scoped};

pub struct Session {
    doc: Document,
    settings: Settings,
    config: Config,
    transformer: Transformer,
    hostname: Option<String>,
    scope: Option<Scope>,
    injected: Injected,
}

/// Elements the session added to the page. Lookups go through these rather
/// than by id, so page elements that happen to share an id are left alone.
#[derive(Debug, Default)]
struct Injected {
    overlay: Option<NodeId>,
    ruler: Option<NodeId>,
    tint: Option<NodeId>,
    player: Option<NodeId>,
}

impl Session {
    pub fn new(doc: Document, config: Config) -> Self {
        let transformer = Transformer::new(config.class_names());
        Self {
            doc,
            settings: Settings::default(),
            config,
            transformer,
            hostname: None,
            scope: None,
            injected: Injected::default(),
        }
    }

    /// Host the page was served from, checked against the focus blocklist.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Restrict text transforms to the subtrees matched by `scope`.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Replace the transformer, e.g. to plug in another syllable splitter.
    /// Its class names must match the session's config.
    pub fn with_transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn to_html(&self) -> Result<String> {
        self.doc.to_html()
    }

    /// Current settings, for the caller to persist.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classes(&self) -> &ClassNames {
        self.transformer.classes()
    }

    /// Re-apply stored settings when a page loads.
    ///
    /// Every enabled aid is switched on once. A setting that fails to apply
    /// is logged and skipped so the rest still take effect.
    pub fn restore(&mut self, settings: &Settings) {
        let mut messages = Vec::new();
        if settings.dyslexia_mode {
            messages.push(Message::ToggleDyslexiaMode { value: true });
        }
        if settings.bionic_mode {
            messages.push(Message::ToggleBionicMode { value: true });
        }
        if settings.syllable_mode {
            messages.push(Message::ToggleSyllableMode { value: true });
        }
        if settings.focus_mode {
            messages.push(Message::ToggleFocusMode { value: true });
        }
        if settings.reading_ruler {
            messages.push(Message::ToggleReadingRuler { value: true });
        }
        if let Some(color) = &settings.tint_color {
            messages.push(Message::SetTintColor {
                value: color.clone(),
            });
        }
        messages.push(Message::SetVoiceSpeed {
            value: settings.voice_speed,
        });

        for message in messages {
            let action = message.action();
            if let Err(e) = self.apply(message) {
                log::warn!("could not restore {action}: {e}");
            }
        }
    }

    /// Decode and apply one JSON message.
    pub fn apply_json(&mut self, json: &str) -> Result<Option<SpeechRequest>> {
        self.apply(Message::from_json(json)?)
    }

    /// Apply one message. Only `speakSelection` yields a request.
    pub fn apply(&mut self, message: Message) -> Result<Option<SpeechRequest>> {
        log::debug!("applying {}", message.action());
        match message {
            Message::ToggleDyslexiaMode { value } => {
                let body = self.body()?;
                let class = self.classes().dyslexia_font.clone();
                toggle_class(&mut self.doc, body, &class, value);
                self.settings.dyslexia_mode = value;
            }
            Message::ToggleBionicMode { value } => {
                self.set_mode(Mode::Bionic, value)?;
            }
            Message::ToggleSyllableMode { value } => {
                self.set_mode(Mode::Syllable, value)?;
            }
            Message::ToggleFocusMode { value } => {
                let body = self.body()?;
                let overlay = self.live(self.injected.overlay);
                let classes = self.transformer.classes();
                self.injected.overlay = if value {
                    let blocked = self
                        .hostname
                        .as_deref()
                        .is_some_and(|host| self.config.is_blocked(host));
                    focus::enable(&mut self.doc, body, classes, blocked, overlay)
                } else {
                    focus::disable(&mut self.doc, body, classes, overlay);
                    None
                };
                self.settings.focus_mode = value;
            }
            Message::ToggleReadingRuler { value } => {
                self.set_ruler(value)?;
                self.settings.reading_ruler = value;
            }
            Message::SetTintColor { value } => {
                let color = Rgb::parse(&value)?;
                let body = self.body()?;
                let layer = self.live(self.injected.tint);
                let classes = self.transformer.classes();
                let layer = tint::set_tint(&mut self.doc, body, classes, color, layer);
                self.injected.tint = Some(layer);
                self.settings.tint_color = Some(value);
            }
            Message::SetVoiceSpeed { value } => {
                self.settings.voice_speed = value;
            }
            Message::SpeakSelection { text } => return self.speak(text),
        }
        Ok(None)
    }

    /// Switch a text transform on or off.
    ///
    /// Enabling runs a pass over `<body>`, or over the scope roots when a
    /// scope is set. Disabling leaves the spans in place.
    pub fn set_mode(&mut self, mode: Mode, enable: bool) -> Result<TransformStats> {
        let body = self.body()?;
        let class = match mode {
            Mode::Bionic => self.classes().bionic_reading.clone(),
            Mode::Syllable => self.classes().syllable_mode.clone(),
        };
        toggle_class(&mut self.doc, body, &class, enable);
        match mode {
            Mode::Bionic => self.settings.bionic_mode = enable,
            Mode::Syllable => self.settings.syllable_mode = enable,
        }
        if !enable {
            return Ok(TransformStats::default());
        }

        let stats = match &self.scope {
            Some(scope) => transform_scoped(&mut self.doc, scope, mode, &self.transformer),
            None => transform(&mut self.doc, body, mode, &self.transformer),
        };
        Ok(stats)
    }

    /// Track the pointer: place the ruler at `client_y` in the viewport
    /// scrolled by `scroll_y`. A no-op while the ruler is hidden.
    pub fn move_ruler(&mut self, client_y: f64, scroll_y: f64) {
        if !self.settings.reading_ruler {
            return;
        }
        if let Some(ruler) = self.live(self.injected.ruler) {
            let top = format!("{}px", client_y + scroll_y);
            self.doc.set_style(ruler, "top", Some(&top));
        }
    }

    /// The speech engine finished the current utterance.
    pub fn finish_speech(&mut self) {
        match self.live(self.injected.player) {
            Some(player) => speech::finish(&mut self.doc, self.transformer.classes(), player),
            None => log::debug!("speech finished with no player shown"),
        }
    }

    /// The user pressed stop.
    pub fn stop_speech(&mut self) {
        match self.live(self.injected.player) {
            Some(player) => speech::hide(&mut self.doc, player),
            None => log::debug!("stop pressed with no player shown"),
        }
    }

    fn set_ruler(&mut self, show: bool) -> Result<()> {
        let body = self.body()?;
        let ruler = match self.live(self.injected.ruler) {
            Some(ruler) => ruler,
            None if !show => return Ok(()),
            None => {
                let id = self.transformer.classes().reading_ruler.as_str();
                let ruler = self.doc.create_html_element("div", &[("id", id)]);
                self.doc.append(body, ruler);
                self.injected.ruler = Some(ruler);
                ruler
            }
        };
        let display = if show { "block" } else { "none" };
        self.doc.set_style(ruler, "display", Some(display));
        Ok(())
    }

    fn speak(&mut self, text: String) -> Result<Option<SpeechRequest>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let body = self.body()?;
        let shown = preview(&text, self.config.speech_preview_chars);
        let old = self.live(self.injected.player);
        let classes = self.transformer.classes();
        let player = speech::show_player(&mut self.doc, body, classes, &shown, old);
        self.injected.player = Some(player);
        Ok(Some(SpeechRequest::new(text, self.settings.voice_speed)))
    }

    /// `node` if it is still on the page.
    fn live(&self, node: Option<NodeId>) -> Option<NodeId> {
        node.filter(|&id| self.doc.is_attached(id))
    }

    fn body(&self) -> Result<NodeId> {
        self.doc
            .body()
            .ok_or_else(|| Error::MissingElement("body".into()))
    }
}

fn toggle_class(doc: &mut Document, node: NodeId, class: &str, on: bool) {
    if on {
        doc.add_class(node, class);
    } else {
        doc.remove_class(node, class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn session(html: &str) -> Session {
        Session::new(parse_html(html), Config::default())
    }

    fn body_classes(session: &Session) -> Vec<String> {
        let doc = session.document();
        doc.element_classes(doc.body().unwrap()).to_vec()
    }

    #[test]
    fn test_dyslexia_toggles_body_class() {
        let mut s = session("<p>x</p>");
        s.apply(Message::ToggleDyslexiaMode { value: true }).unwrap();
        assert_eq!(body_classes(&s), ["dyslexia-font"]);
        s.apply(Message::ToggleDyslexiaMode { value: false }).unwrap();
        assert!(body_classes(&s).is_empty());
        assert!(!s.settings().dyslexia_mode);
    }

    #[test]
    fn test_disabling_a_mode_keeps_markup() {
        let mut s = session("<p>garden</p>");
        s.apply(Message::ToggleSyllableMode { value: true }).unwrap();
        s.apply(Message::ToggleSyllableMode { value: false }).unwrap();
        assert!(body_classes(&s).is_empty());
        assert!(s.to_html().unwrap().contains("gar•den"));
    }

    #[test]
    fn test_reenabling_does_not_double_wrap() {
        let mut s = session("<p>Reading</p>");
        s.set_mode(Mode::Bionic, true).unwrap();
        let once = s.to_html().unwrap();
        let stats = s.set_mode(Mode::Bionic, true).unwrap();
        assert_eq!(stats.transformed, 0);
        assert_eq!(s.to_html().unwrap(), once);
    }

    #[test]
    fn test_scope_limits_transform() {
        let doc = parse_html("<header>Site name</header><main>Main text</main>");
        let mut s = Session::new(doc, Config::default()).with_scope(Scope::parse("main").unwrap());
        s.apply(Message::ToggleBionicMode { value: true }).unwrap();
        let html = s.to_html().unwrap();
        assert!(html.contains("<header>Site name</header>"));
        assert!(html.contains("<b>Ma</b>in"));
    }

    #[test]
    fn test_focus_on_unblocked_host() {
        let mut s = session("<p>x</p>").with_hostname("docs.rs");
        s.apply(Message::ToggleFocusMode { value: true }).unwrap();
        assert_eq!(body_classes(&s), ["focus-mode"]);
        assert!(s.document().get_by_id("focus-overlay").is_none());
    }

    #[test]
    fn test_focus_overlay_on_blocked_host() {
        let mut s = session("<p>x</p>").with_hostname("www.youtube.com");
        s.apply(Message::ToggleFocusMode { value: true }).unwrap();
        s.apply(Message::ToggleFocusMode { value: true }).unwrap();

        let doc = s.document();
        let overlay = doc.get_by_id("focus-overlay").unwrap();
        let text = doc.text_content(overlay);
        assert!(text.contains(LOCK_ICON));
        assert!(text.contains(OVERLAY_TITLE));
        assert!(text.contains(OVERLAY_MESSAGE));
        assert!(text.contains(MOTIVATION));
        assert_eq!(s.to_html().unwrap().matches("focus-overlay").count(), 1);
        assert_eq!(doc.style(doc.body().unwrap(), "overflow").as_deref(), Some("hidden"));

        s.apply(Message::ToggleFocusMode { value: false }).unwrap();
        let doc = s.document();
        assert!(doc.get_by_id("focus-overlay").is_none());
        assert_eq!(doc.style(doc.body().unwrap(), "overflow"), None);
    }

    #[test]
    fn test_ruler_show_move_hide() {
        let mut s = session("<p>x</p>");
        s.apply(Message::ToggleReadingRuler { value: true }).unwrap();
        s.move_ruler(120.0, 30.5);
        let ruler = s.document().get_by_id("reading-ruler").unwrap();
        assert_eq!(s.document().style(ruler, "top").as_deref(), Some("150.5px"));
        assert_eq!(s.document().style(ruler, "display").as_deref(), Some("block"));

        s.apply(Message::ToggleReadingRuler { value: false }).unwrap();
        s.move_ruler(0.0, 0.0);
        assert_eq!(s.document().style(ruler, "display").as_deref(), Some("none"));
        assert_eq!(s.document().style(ruler, "top").as_deref(), Some("150.5px"));
    }

    #[test]
    fn test_hiding_missing_ruler_injects_nothing() {
        let mut s = session("<p>x</p>");
        s.apply(Message::ToggleReadingRuler { value: false }).unwrap();
        assert!(s.document().get_by_id("reading-ruler").is_none());
    }

    #[test]
    fn test_tint_layer() {
        let mut s = session("<p>x</p>");
        s.apply(Message::SetTintColor { value: "#ff0000".into() }).unwrap();
        s.apply(Message::SetTintColor { value: "#0000ff".into() }).unwrap();

        let doc = s.document();
        let layer = doc.get_by_id("tint-layer").unwrap();
        assert_eq!(
            doc.style(layer, "background-color").as_deref(),
            Some("rgba(0, 0, 255, 0.2)")
        );
        assert_eq!(s.to_html().unwrap().matches("tint-layer").count(), 1);
        assert_eq!(s.settings().tint_color.as_deref(), Some("#0000ff"));
    }

    #[test]
    fn test_invalid_tint_changes_nothing() {
        let mut s = session("<p>x</p>");
        let before = s.to_html().unwrap();
        let err = s.apply(Message::SetTintColor { value: "purple-ish".into() });
        assert!(matches!(err, Err(Error::InvalidColor(_))));
        assert_eq!(s.to_html().unwrap(), before);
        assert_eq!(s.settings().tint_color, None);
    }

    #[test]
    fn test_speak_selection() {
        let mut s = session("<p>x</p>");
        s.apply(Message::SetVoiceSpeed { value: 1.5 }).unwrap();
        let text = "a".repeat(60);
        let request = s
            .apply(Message::SpeakSelection { text: text.clone() })
            .unwrap()
            .unwrap();
        assert_eq!(request, SpeechRequest { text, rate: 1.5 });

        let doc = s.document();
        let player = doc.get_by_id("speech-player").unwrap();
        let shown = doc.text_content(player);
        assert!(shown.contains(STATUS_READING));
        assert!(shown.contains(&format!("{}...", "a".repeat(50))));
        assert!(doc.get_by_id("stop-btn").is_some());

        s.finish_speech();
        assert!(s.document().text_content(player).contains(STATUS_DONE));
        s.stop_speech();
        assert_eq!(s.document().style(player, "display").as_deref(), Some("none"));
    }

    #[test]
    fn test_speak_empty_selection() {
        let mut s = session("<p>x</p>");
        assert_eq!(s.apply(Message::SpeakSelection { text: "  ".into() }).unwrap(), None);
        assert!(s.document().get_by_id("speech-player").is_none());
    }

    #[test]
    fn test_speech_text_is_not_markup() {
        let mut s = session("<p>x</p>");
        s.apply(Message::SpeakSelection { text: "<img src=x>".into() }).unwrap();
        let html = s.to_html().unwrap();
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(s.document().find_by_tag("img").is_none());
    }

    #[test]
    fn test_restore_applies_enabled_flags() {
        let mut s = session("<p>Reading</p>").with_hostname("reddit.com");
        let stored = Settings {
            dyslexia_mode: true,
            bionic_mode: true,
            focus_mode: true,
            tint_color: Some("not a colour".into()),
            voice_speed: 0.8,
            ..Settings::default()
        };
        s.restore(&stored);

        assert_eq!(body_classes(&s), ["dyslexia-font", "bionic-reading", "focus-mode"]);
        assert!(s.document().get_by_id("focus-overlay").is_some());
        assert!(s.document().get_by_id("tint-layer").is_none());
        assert_eq!(s.settings().voice_speed, 0.8);
        assert!(!s.settings().syllable_mode);
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.create_html_element("p", &[]);
        doc.append(root, p);
        let mut s = Session::new(doc, Config::default());
        assert!(matches!(
            s.apply(Message::ToggleDyslexiaMode { value: true }),
            Err(Error::MissingElement(_))
        ));
    }

    #[test]
    fn test_page_elements_sharing_ids_are_left_alone() {
        let mut s = session(
            "<div id=\"focus-overlay\">page widget</div>\
             <div id=\"tint-layer\">site banner</div>\
             <div id=\"reading-ruler\">page ruler</div>\
             <div id=\"speech-player\">podcast</div>",
        )
        .with_hostname("www.youtube.com");
        let widget = s.document().get_by_id("focus-overlay").unwrap();
        let banner = s.document().get_by_id("tint-layer").unwrap();
        let page_ruler = s.document().get_by_id("reading-ruler").unwrap();
        let podcast = s.document().get_by_id("speech-player").unwrap();

        s.apply(Message::SetTintColor { value: "#ff0000".into() }).unwrap();
        s.apply(Message::ToggleReadingRuler { value: true }).unwrap();
        s.move_ruler(10.0, 0.0);
        s.apply(Message::ToggleFocusMode { value: true }).unwrap();
        s.apply(Message::SpeakSelection { text: "hello".into() }).unwrap();
        s.stop_speech();

        let doc = s.document();
        for node in [widget, banner, page_ruler, podcast] {
            assert!(doc.is_attached(node));
            assert_eq!(doc.get_attr(node, "style"), None);
        }
        let layer = doc.get_by_id("tint-layer").unwrap();
        assert_ne!(layer, banner);
        assert_eq!(doc.style(layer, "display").as_deref(), Some("block"));
        let overlay = doc.get_by_id("focus-overlay").unwrap();
        assert_ne!(overlay, widget);
        assert!(doc.text_content(overlay).contains(OVERLAY_TITLE));
        assert_ne!(doc.get_by_id("reading-ruler"), Some(page_ruler));

        s.apply(Message::ToggleFocusMode { value: false }).unwrap();
        let doc = s.document();
        assert!(doc.is_attached(widget));
        assert!(!doc.is_attached(overlay));
        assert_eq!(doc.text_content(widget), "page widget");
    }

    #[test]
    fn test_prefixed_ids() {
        let config = Config {
            class_prefix: "lf-".into(),
            ..Config::default()
        };
        let mut s = Session::new(parse_html("<p>x</p>"), config);
        s.apply(Message::ToggleReadingRuler { value: true }).unwrap();
        assert!(s.document().get_by_id("lf-reading-ruler").is_some());
    }
}
