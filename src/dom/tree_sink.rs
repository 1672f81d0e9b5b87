//! html5ever `TreeSink` that builds a [`Document`].

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::arena::{Attribute, Document, NodeData, NodeId};

/// Handle html5ever uses to reference nodes while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub NodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(NodeId::NONE)
    }
}

/// Parser sink producing a [`Document`].
///
/// `TreeSink` methods take `&self`, so the document sits behind a `RefCell`.
pub struct DocumentSink {
    doc: RefCell<Document>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for DocumentSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink {
    pub fn new() -> Self {
        Self {
            doc: RefCell::new(Document::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    pub fn into_document(self) -> Document {
        self.doc.into_inner()
    }

    fn insert(&self, parent: NodeId, child: NodeOrText<NodeHandle>) {
        let mut doc = self.doc.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => doc.append(parent, node.0),
            NodeOrText::AppendText(text) => doc.append_text(parent, &text),
        }
    }
}

impl TreeSink for DocumentSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        log::trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.doc.borrow().root())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let doc = self.doc.borrow();
        match doc.get(target.0).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => {
                // SAFETY: not checked by the compiler. This relies on
                // html5ever's tree builder dropping the returned name before
                // its next sink call that creates a node; a push can move the
                // arena's storage and leave the reference dangling.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();

        NodeHandle(self.doc.borrow_mut().create_element(name, attrs))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle(self.doc.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        NodeHandle(self.doc.borrow_mut().create_comment(String::new()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.insert(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self.doc.borrow().parent(element.0);
        match parent {
            Some(parent) => self.insert(parent, child),
            None => self.insert(prev_element.0, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut doc = self.doc.borrow_mut();
        let root = doc.root();
        let doctype = doc.create_doctype(
            name.to_string(),
            public_id.to_string(),
            system_id.to_string(),
        );
        doc.append(root, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents are kept inline under the template element.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node.0,
            NodeOrText::AppendText(text) => doc.create_text(text.to_string()),
        };
        doc.insert_before(sibling.0, node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut doc = self.doc.borrow_mut();
        for attr in attrs {
            let name = attr.name.local.to_string();
            if doc.get_attr(target.0, &name).is_none() {
                doc.set_attr(target.0, &name, &attr.value);
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.doc.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut doc = self.doc.borrow_mut();
        let children: Vec<_> = doc.children(node.0).collect();
        for child in children {
            doc.detach(child);
            doc.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_html;

    #[test]
    fn test_basic_parse() {
        let doc = parse_html("<html><body><p>Hello</p></body></html>");

        let p = doc.find_by_tag("p").expect("should find p");
        let text = doc.children(p).next().expect("p should have child");
        assert_eq!(doc.text(text), Some("Hello"));
    }

    #[test]
    fn test_implied_body() {
        let doc = parse_html("<p>No wrapper</p>");
        let body = doc.body().expect("parser inserts body");
        let p = doc.find_by_tag("p").unwrap();
        assert_eq!(doc.parent(p), Some(body));
    }

    #[test]
    fn test_attributes() {
        let doc = parse_html(r#"<div id="main" class="container header">Content</div>"#);

        let div = doc.find_by_tag("div").expect("should find div");
        assert_eq!(doc.element_id(div), Some("main"));
        assert!(doc.has_class(div, "container"));
        assert!(doc.has_class(div, "header"));
    }

    #[test]
    fn test_script_text_is_a_single_leaf() {
        let doc = parse_html("<body><script>if (a < b) { go(); }</script></body>");
        let script = doc.find_by_tag("script").unwrap();
        let leaves = doc.text_leaves(script);
        assert_eq!(leaves.len(), 1);
        assert_eq!(doc.text(leaves[0]), Some("if (a < b) { go(); }"));
    }

    #[test]
    fn test_misnested_formatting_is_repaired() {
        // Adoption agency moves nodes around through reparent/remove calls.
        let doc = parse_html("<p><b>bold <i>both</b> italic</i></p>");
        assert_eq!(doc.text_content(doc.root()), "bold both italic");
    }

    #[test]
    fn test_element_names_survive_arena_growth() {
        // Every repair asks for element names while new nodes keep growing
        // the arena.
        let html = "<p><b>bold <i>both</b> italic</i></p>".repeat(500);
        let doc = parse_html(&html);
        let body = doc.body().unwrap();
        let paragraphs = doc
            .children(body)
            .filter(|&c| doc.element_name(c).is_some_and(|n| n.as_ref() == "p"))
            .count();
        assert_eq!(paragraphs, 500);
        assert_eq!(doc.text_content(body), "bold both italic".repeat(500));
    }
}
