//! Messages the popup sends to a page.
//!
//! On the wire a message is `{"action": "...", "value": ...}`, or
//! `{"action": "speakSelection", "text": "..."}`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transform::Mode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    ToggleDyslexiaMode { value: bool },
    ToggleBionicMode { value: bool },
    ToggleSyllableMode { value: bool },
    ToggleFocusMode { value: bool },
    ToggleReadingRuler { value: bool },
    SetTintColor { value: String },
    SetVoiceSpeed { value: f32 },
    SpeakSelection { text: String },
}

impl Message {
    /// Decode one message.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Message(e.to_string()))
    }

    /// Decode a JSON array of messages.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| Error::Message(e.to_string()))
    }

    /// The toggle message for a transform mode.
    pub fn toggle(mode: Mode, value: bool) -> Self {
        match mode {
            Mode::Bionic => Message::ToggleBionicMode { value },
            Mode::Syllable => Message::ToggleSyllableMode { value },
        }
    }

    /// The `action` discriminator.
    pub fn action(&self) -> &'static str {
        match self {
            Message::ToggleDyslexiaMode { .. } => "toggleDyslexiaMode",
            Message::ToggleBionicMode { .. } => "toggleBionicMode",
            Message::ToggleSyllableMode { .. } => "toggleSyllableMode",
            Message::ToggleFocusMode { .. } => "toggleFocusMode",
            Message::ToggleReadingRuler { .. } => "toggleReadingRuler",
            Message::SetTintColor { .. } => "setTintColor",
            Message::SetVoiceSpeed { .. } => "setVoiceSpeed",
            Message::SpeakSelection { .. } => "speakSelection",
        }
    }
}
