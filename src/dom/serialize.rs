//! Writing a [`Document`] back out as HTML through html5ever's serializer.

use std::io::{self, Write};

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{Document, NodeData, NodeId};
use crate::error::Result;

/// A node borrowed for serialization.
struct SerializableNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(self.doc, self.id, serializer),
            TraversalScope::ChildrenOnly(_) => write_children(self.doc, self.id, serializer),
        }
    }
}

fn write_children<S: Serializer>(doc: &Document, id: NodeId, out: &mut S) -> io::Result<()> {
    for child in doc.children(id) {
        write_node(doc, child, out)?;
    }
    Ok(())
}

fn write_node<S: Serializer>(doc: &Document, id: NodeId, out: &mut S) -> io::Result<()> {
    let Some(node) = doc.get(id) else {
        return Ok(());
    };

    match &node.data {
        NodeData::Document => write_children(doc, id, out),
        NodeData::Element { name, attrs, .. } => {
            out.start_elem(
                name.clone(),
                attrs.iter().map(|a| (&a.name, a.value.as_str())),
            )?;
            write_children(doc, id, out)?;
            out.end_elem(name.clone())
        }
        NodeData::Text(text) => out.write_text(text),
        NodeData::Comment(text) => out.write_comment(text),
        NodeData::Doctype { name, .. } => out.write_doctype(name),
    }
}

impl Document {
    /// Serialize the whole document.
    pub fn write_html<W: Write>(&self, writer: W) -> Result<()> {
        let node = SerializableNode {
            doc: self,
            id: self.root(),
        };
        serialize(writer, &node, SerializeOpts::default())?;
        Ok(())
    }

    /// Serialize the whole document to a string.
    pub fn to_html(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_html(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Serialize one node including its own tags.
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        let node = SerializableNode { doc: self, id };
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..SerializeOpts::default()
        };
        let mut buf = Vec::new();
        serialize(&mut buf, &node, opts)?;
        Ok(String::from_utf8(buf)?)
    }
}
