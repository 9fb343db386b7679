//! rcdom helpers
//!
//! Thin wrappers around html5ever parsing and serialization shared by the
//! render pipeline, the sanitizer, and the inverse converter.

use crate::error::PipelineError;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Parse an HTML string (usually a fragment) into a full DOM. html5ever
/// supplies the html/head/body scaffolding around fragment input.
pub(crate) fn parse_html(html: &str) -> Result<RcDom, PipelineError> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| PipelineError::ParseError(format!("HTML parsing failed: {e}")))
}

/// Locate the `body` element the parser created.
pub(crate) fn find_body(node: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if name.local.as_ref() == "body" {
            return Some(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

/// Serialize every child of `parent` back to an HTML string.
pub(crate) fn serialize_children(parent: &Handle) -> Result<String, PipelineError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in parent.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            PipelineError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| PipelineError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Get an attribute value from an element node, if present.
pub(crate) fn attribute(node: &Handle, name: &str) -> Option<String> {
    if let NodeData::Element { attrs, .. } = &node.data {
        return attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string());
    }
    None
}

/// Concatenated text of a node's descendants, verbatim.
pub(crate) fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, output: &mut String) {
    match &node.data {
        NodeData::Text { contents } => output.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, output);
            }
        }
    }
}
