//! User settings and toolkit configuration.
//!
//! [`Settings`] is the per-user state the popup stores (which aids are on,
//! tint colour, voice speed). [`Config`] is fixed per deployment: class
//! prefix, blocked sites, speech preview length. Both are plain serde types;
//! where they are persisted is up to the caller.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reading-aid toggles as stored by the extension popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub dyslexia_mode: bool,
    pub bionic_mode: bool,
    pub syllable_mode: bool,
    pub focus_mode: bool,
    pub reading_ruler: bool,
    /// Overlay colour as `#rrggbb`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint_color: Option<String>,
    pub voice_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dyslexia_mode: false,
            bionic_mode: false,
            syllable_mode: false,
            focus_mode: false,
            reading_ruler: false,
            tint_color: None,
            voice_speed: 1.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sites where focus mode covers the page.
pub const DEFAULT_BLOCKED_SITES: [&str; 9] = [
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "reddit.com",
    "tiktok.com",
    "netflix.com",
    "twitch.tv",
];

/// Deployment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Prepended to every class and id the toolkit injects.
    pub class_prefix: String,
    /// Host substrings that trigger the focus overlay.
    pub blocked_sites: Vec<String>,
    /// Characters of the spoken text shown in the speech player.
    pub speech_preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class_prefix: String::new(),
            blocked_sites: DEFAULT_BLOCKED_SITES.iter().map(|s| s.to_string()).collect(),
            speech_preview_chars: 50,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn class_names(&self) -> ClassNames {
        ClassNames::with_prefix(&self.class_prefix)
    }

    /// Whether focus mode should cover a page served from `hostname`.
    pub fn is_blocked(&self, hostname: &str) -> bool {
        let hostname = hostname.to_ascii_lowercase();
        self.blocked_sites
            .iter()
            .any(|site| !site.is_empty() && hostname.contains(&site.to_ascii_lowercase()))
    }
}

/// Every class and id the toolkit writes into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub prefix: String,
    /// Marker on bionic word spans.
    pub bionic_word: String,
    /// Marker on syllable word spans.
    pub syllable_word: String,
    /// Body classes switching on the stylesheet rules for each aid.
    pub dyslexia_font: String,
    pub bionic_reading: String,
    pub syllable_mode: String,
    pub focus_mode: String,
    /// Ids of injected elements.
    pub focus_overlay: String,
    pub reading_ruler: String,
    pub tint_layer: String,
    pub speech_player: String,
    pub stop_button: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::with_prefix("")
    }
}

impl ClassNames {
    pub fn with_prefix(prefix: &str) -> Self {
        let name = |base: &str| format!("{prefix}{base}");
        Self {
            prefix: prefix.to_string(),
            bionic_word: name("bionic-word"),
            syllable_word: name("syllable-word"),
            dyslexia_font: name("dyslexia-font"),
            bionic_reading: name("bionic-reading"),
            syllable_mode: name("syllable-mode"),
            focus_mode: name("focus-mode"),
            focus_overlay: name("focus-overlay"),
            reading_ruler: name("reading-ruler"),
            tint_layer: name("tint-layer"),
            speech_player: name("speech-player"),
            stop_button: name("stop-btn"),
        }
    }

    /// Prefix any other class the toolkit writes.
    pub fn name(&self, base: &str) -> String {
        format!("{}{base}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_settings_defaults_for_missing_keys() {
        let settings = Settings::from_json(r#"{"bionicMode": true}"#).unwrap();
        assert!(settings.bionic_mode);
        assert!(!settings.syllable_mode);
        assert_eq!(settings.tint_color, None);
        assert_eq!(settings.voice_speed, 1.0);
    }

    #[test]
    fn test_settings_use_storage_key_names() {
        let json = r##"{
            "dyslexiaMode": true,
            "syllableMode": true,
            "focusMode": false,
            "readingRuler": true,
            "tintColor": "#ffcc00",
            "voiceSpeed": 1.5
        }"##;
        let settings = Settings::from_json(json).unwrap();
        assert!(settings.dyslexia_mode && settings.syllable_mode && settings.reading_ruler);
        assert_eq!(settings.tint_color.as_deref(), Some("#ffcc00"));
        assert_eq!(settings.voice_speed, 1.5);

        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_settings_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"focusMode": true}}"#).unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.focus_mode);
    }

    #[test]
    fn test_settings_load_missing_file() {
        assert!(matches!(
            Settings::load("/nonexistent/settings.json"),
            Err(crate::Error::Io(_))
        ));
    }

    #[test]
    fn test_config_blocklist() {
        let config = Config::default();
        assert!(config.is_blocked("www.youtube.com"));
        assert!(config.is_blocked("m.Reddit.com"));
        assert!(!config.is_blocked("en.wikipedia.org"));
    }

    #[test]
    fn test_config_partial_json() {
        let config = Config::from_json(r#"{"classPrefix": "lock-focus-"}"#).unwrap();
        assert_eq!(config.class_names().bionic_word, "lock-focus-bionic-word");
        assert_eq!(config.blocked_sites.len(), DEFAULT_BLOCKED_SITES.len());
        assert_eq!(config.speech_preview_chars, 50);
    }

    #[test]
    fn test_default_class_names() {
        let classes = ClassNames::default();
        assert_eq!(classes.bionic_word, "bionic-word");
        assert_eq!(classes.syllable_word, "syllable-word");
    }
}
