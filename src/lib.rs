//! # lockfocus
//!
//! Reading aids for HTML pages: bionic reading, syllable splitting, focus
//! mode with a site blocklist, a reading ruler, a colour tint and a
//! read-aloud player.
//!
//! ## Features
//!
//! - Rewrite the text of a page (or selected parts of it) into word spans
//! - Leave scripts, styles and form fields alone, and never wrap a word twice
//! - Drive the page the way the extension popup does, with JSON messages
//! - Parse and serialize with html5ever, so output is what a browser would see
//!
//! ## Quick Start
//!
//! ```
//! use lockfocus::dom::parse_html;
//! use lockfocus::{Mode, Transformer, transform};
//!
//! let mut doc = parse_html("<p>Reading is fun</p>");
//! let body = doc.body().unwrap();
//! let stats = transform(&mut doc, body, Mode::Syllable, &Transformer::default());
//!
//! assert_eq!(stats.words, 3);
//! assert!(doc.to_html().unwrap().contains("Rea•ding"));
//! ```
//!
//! ## Driving a page
//!
//! A [`Session`] owns the page and the user's [`Settings`]:
//!
//! ```
//! use lockfocus::dom::parse_html;
//! use lockfocus::{Config, Session};
//!
//! let mut session = Session::new(parse_html("<p>Stay on task</p>"), Config::default())
//!     .with_hostname("www.reddit.com");
//! session
//!     .apply_json(r#"{"action": "toggleFocusMode", "value": true}"#)
//!     .unwrap();
//!
//! assert!(session.document().get_by_id("focus-overlay").is_some());
//! ```

pub mod dom;
pub mod error;
pub mod message;
pub mod session;
pub mod settings;
pub mod transform;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use dom::{Document, NodeId, Scope, parse_html, parse_html_bytes};
pub use error::{Error, Result};
pub use message::Message;
pub use session::{Session, SpeechRequest};
pub use settings::{ClassNames, Config, Settings};
pub use transform::{
    Mode, SyllableSplitter, TextTree, TransformStats, Transformer, transform, transform_scoped,
};
