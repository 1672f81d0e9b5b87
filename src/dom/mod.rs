//! HTML document model.
//!
//! Pages are parsed with html5ever into an arena-allocated [`Document`],
//! mutated in place, and serialized back with html5ever's serializer.
//!
//! # Example
//!
//! ```
//! use lockfocus::dom::parse_html;
//!
//! let doc = parse_html("<p class='intro'>Welcome!</p>");
//! let p = doc.find_by_tag("p").unwrap();
//! assert!(doc.has_class(p, "intro"));
//! assert_eq!(doc.text_content(p), "Welcome!");
//! ```

mod arena;
mod select;
mod serialize;
mod tree_sink;

pub use arena::{Ancestors, Attribute, Children, Document, Node, NodeData, NodeId, html_name};
pub use select::{ElementRef, PageSelectors, Scope};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DocumentSink;

/// Parse an HTML document.
///
/// Parsing is lenient the way browsers are: missing `<html>`, `<head>` and
/// `<body>` are implied and parse errors are ignored.
pub fn parse_html(html: &str) -> Document {
    let sink = DocumentSink::new();
    parse_document(sink, ParseOpts::default())
        .one(html)
        .into_document()
}

/// Parse HTML bytes, sniffing the character encoding.
///
/// UTF-8 is tried first; otherwise the charset named by a `<meta>` tag or
/// XML declaration, then Windows-1252.
pub fn parse_html_bytes(bytes: &[u8]) -> Document {
    let hint = crate::util::sniff_charset(bytes);
    let html = crate::util::decode_text(bytes, hint);
    parse_html(&html)
}
