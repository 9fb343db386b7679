//! Render tree
//!
//! The typed, UI-renderable output of the pipeline. Nodes are a tagged
//! union with a `type` discriminant when serialized, so the UI layer can
//! consume the tree as JSON without inspecting Rust internals.

use markup5ever_rcdom::{Handle, NodeData};
use serde::Serialize;

/// Root of a rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub children: Vec<RenderNode>,
}

/// One node of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<RenderNode>,
    },
    Text {
        value: String,
    },
}

impl RenderTree {
    /// Build a tree from a sanitized `body` element.
    pub(crate) fn from_body(body: &Handle) -> RenderTree {
        RenderTree {
            children: convert_children(body),
        }
    }

    /// Depth-first search for the first element with the given tag.
    /// Convenience for callers (and tests) poking at rendered output.
    pub fn find_element(&self, tag: &str) -> Option<&RenderNode> {
        fn search<'a>(nodes: &'a [RenderNode], tag: &str) -> Option<&'a RenderNode> {
            for node in nodes {
                if let RenderNode::Element { tag: t, children, .. } = node {
                    if t == tag {
                        return Some(node);
                    }
                    if let Some(found) = search(children, tag) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.children, tag)
    }
}

impl RenderNode {
    /// Attribute lookup on element nodes; `None` for text nodes.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            RenderNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            RenderNode::Text { .. } => None,
        }
    }
}

fn convert_children(parent: &Handle) -> Vec<RenderNode> {
    let mut nodes = Vec::new();
    for child in parent.children.borrow().iter() {
        match &child.data {
            NodeData::Element { name, attrs, .. } => {
                nodes.push(RenderNode::Element {
                    tag: name.local.as_ref().to_string(),
                    attrs: attrs
                        .borrow()
                        .iter()
                        .map(|attr| {
                            (
                                attr.name.local.as_ref().to_string(),
                                attr.value.to_string(),
                            )
                        })
                        .collect(),
                    children: convert_children(child),
                });
            }
            NodeData::Text { contents } => {
                nodes.push(RenderNode::Text {
                    value: contents.borrow().to_string(),
                });
            }
            _ => {}
        }
    }
    nodes
}
