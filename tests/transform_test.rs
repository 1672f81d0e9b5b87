//! End-to-end transform tests against a realistic article page.

use lockfocus::dom::NodeData;
use lockfocus::{
    Document, Mode, Scope, Transformer, parse_html, parse_html_bytes, transform, transform_scoped,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(format!("{FIXTURES_DIR}/{name}")).expect("Failed to read fixture")
}

fn article() -> Document {
    parse_html_bytes(&fixture("article.html"))
}

/// Visible text with syllable separators removed.
fn visible_text(doc: &Document) -> String {
    doc.text_content(doc.root()).replace('•', "")
}

fn text_of(doc: &Document, tag: &str) -> String {
    doc.text_content(doc.find_by_tag(tag).expect("tag present"))
}

// ============================================================================
// Whole-page passes
// ============================================================================

#[test]
fn test_bionic_page_keeps_text() {
    let before = article();
    let mut doc = article();
    let body = doc.body().unwrap();
    let stats = transform(&mut doc, body, Mode::Bionic, &Transformer::default());

    assert_eq!(stats.words, 46, "`it\\nimproves` is one word");
    assert_eq!(stats.excluded, 2, "textarea and noscript");
    assert_eq!(
        doc.text_content(doc.root()),
        before.text_content(before.root())
    );
}

#[test]
fn test_syllable_page_keeps_text() {
    let before = article();
    let mut doc = article();
    let body = doc.body().unwrap();
    transform(&mut doc, body, Mode::Syllable, &Transformer::default());

    assert_eq!(visible_text(&doc), visible_text(&before));
    assert!(text_of(&doc, "h1").contains("No•tes"));
}

#[test]
fn test_head_and_form_content_untouched() {
    let mut doc = article();
    let root = doc.root();
    transform(&mut doc, root, Mode::Bionic, &Transformer::default());

    for tag in ["title", "style", "script", "textarea", "noscript"] {
        let el = doc.find_by_tag(tag).unwrap();
        if tag == "title" {
            assert!(doc.children(el).any(|c| !doc.is_text(c)));
        } else {
            assert!(doc.children(el).all(|c| doc.is_text(c)), "{tag} rewritten");
        }
    }
    assert_eq!(text_of(&doc, "textarea"), "Write your own notes here");
}

#[test]
fn test_every_word_span_is_marked() {
    let mut doc = article();
    let body = doc.body().unwrap();
    transform(&mut doc, body, Mode::Bionic, &Transformer::default());

    for id in doc.descendants(body) {
        if let Some(NodeData::Element { name, .. }) = doc.get(id).map(|n| &n.data)
            && name.local.as_ref() == "b"
        {
            let parent = doc.parent(id).unwrap();
            assert!(doc.has_class(parent, "bionic-word"));
            assert!(!doc.text(doc.children(id).next().unwrap()).unwrap().is_empty());
        }
    }
}

#[test]
fn test_repeated_passes_are_stable() {
    let mut doc = article();
    let body = doc.body().unwrap();
    let transformer = Transformer::default();
    transform(&mut doc, body, Mode::Syllable, &transformer);
    let once = doc.to_html().unwrap();

    for _ in 0..3 {
        let stats = transform(&mut doc, body, Mode::Syllable, &transformer);
        assert_eq!(stats.transformed, 0);
    }
    assert_eq!(doc.to_html().unwrap(), once);
}

#[test]
fn test_output_reparses_to_same_text() {
    let mut doc = article();
    let body = doc.body().unwrap();
    transform(&mut doc, body, Mode::Bionic, &Transformer::default());

    let html = doc.to_html().unwrap();
    let reparsed = parse_html(&html);
    assert_eq!(
        reparsed.text_content(reparsed.root()),
        doc.text_content(doc.root())
    );
    assert_eq!(reparsed.to_html().unwrap(), html);
}

// ============================================================================
// Scoped passes
// ============================================================================

#[test]
fn test_scope_leaves_chrome_alone() {
    let mut doc = article();
    let scope = Scope::parse("article p, blockquote").unwrap();
    let stats = transform_scoped(&mut doc, &scope, Mode::Bionic, &Transformer::default());

    // two leaves around the <em>, plus the <em> itself
    assert_eq!(stats.transformed, 5);
    let html = doc.to_html().unwrap();
    assert!(html.contains("<h1>Notes on deep work</h1>"));
    assert!(html.contains("<a href=\"/\">Home</a>"));
    assert!(html.contains("<p>Copyright the authors</p>"));
}

#[test]
fn test_nested_scope_matches_run_once() {
    let mut doc = parse_html("<div class=a><div class=a><p>twice nested</p></div></div>");
    let scope = Scope::parse(".a").unwrap();
    assert_eq!(scope.roots(&doc).len(), 1);

    let stats = transform_scoped(&mut doc, &scope, Mode::Bionic, &Transformer::default());
    assert_eq!(stats.transformed, 1);
    assert_eq!(stats.words, 2);
}

#[test]
fn test_invalid_scope() {
    assert!(matches!(
        Scope::parse("p >"),
        Err(lockfocus::Error::InvalidSelector(_))
    ));
}

// ============================================================================
// Encodings
// ============================================================================

#[test]
fn test_latin1_page() {
    let mut bytes = b"<html><head><meta charset=\"iso-8859-1\"></head><body><p>caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" cr");
    bytes.push(0xE8);
    bytes.extend_from_slice(b"me</p></body></html>");

    let mut doc = parse_html_bytes(&bytes);
    let body = doc.body().unwrap();
    transform(&mut doc, body, Mode::Bionic, &Transformer::default());
    assert_eq!(text_of(&doc, "p"), "café crème");
    assert!(doc.to_html().unwrap().contains("<b>ca</b>fé"));
}
