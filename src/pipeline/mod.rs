//! Render pipeline (Markdown → render tree / HTML string)
//!
//! One pipeline shape behind two entry points that differ only in the final
//! serialization target:
//!
//! ```text
//! markdown ──comrak parse──▶ tree stages ──comrak html──▶ RcDom ──sanitize──▶ html string
//!            (GFM + front     (fixed order)  (unsafe_,                        │
//!             matter delim)                   merge point)                    └▶ RenderTree
//! ```
//!
//! The comrak render step is the HTML merge point: literal author HTML and
//! Markdown-derived markup become one document there, which is why
//! sanitization always runs after it; sanitizing the Markdown tree alone
//! would miss attacker-supplied literal HTML, the primary threat model.
//!
//! Both entry points are infallible at the boundary. A stage failure is
//! converted into a visible `render-error` placeholder instead of
//! propagating, so the editing surface degrades to an error banner rather
//! than a blank page.

pub(crate) mod dom;
mod fenced;

use crate::error::PipelineError;
use crate::sanitize::{self, SanitizePolicy};
use crate::tree::{RenderNode, RenderTree};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{format_html, parse_document, Arena, ComrakOptions};
use markup5ever_rcdom::{Handle, RcDom};

/// A named tree-transform stage. Stages run in the fixed order below and
/// each exclusively owns the tree for the duration of its call.
type TreeStage = for<'a> fn(&'a AstNode<'a>);

const TREE_STAGES: &[(&str, TreeStage)] = &[
    ("strip-front-matter", strip_front_matter),
    ("rewrite-widget-blocks", fenced::rewrite_widget_blocks),
];

/// The render pipeline, holding the read-only sanitization policy.
///
/// Holds no other state, so one instance can serve concurrent calls.
pub struct Pipeline {
    policy: SanitizePolicy,
}

impl Pipeline {
    pub fn new(policy: SanitizePolicy) -> Self {
        Self { policy }
    }

    /// Render Markdown to a sanitized HTML string (used to hydrate the
    /// rich-text editing surface).
    pub fn render_html(&self, source: &str) -> String {
        match self.run_to_html(source) {
            Ok(html) => html,
            Err(err) => error_placeholder_html(&err),
        }
    }

    /// Render Markdown to the sanitized UI tree.
    pub fn render_tree(&self, source: &str) -> RenderTree {
        match self.run_to_tree(source) {
            Ok(tree) => tree,
            Err(err) => error_placeholder_tree(&err),
        }
    }

    fn run_to_html(&self, source: &str) -> Result<String, PipelineError> {
        let (_dom, body) = self.sanitized_body(source)?;
        dom::serialize_children(&body)
    }

    fn run_to_tree(&self, source: &str) -> Result<RenderTree, PipelineError> {
        let (_dom, body) = self.sanitized_body(source)?;
        Ok(RenderTree::from_body(&body))
    }

    /// Run the shared pipeline through sanitization and return the cleaned
    /// `body` element together with the `RcDom` that owns it. Dropping the
    /// dom tears the whole tree down, so it must outlive every read of
    /// `body`.
    fn sanitized_body(&self, source: &str) -> Result<(RcDom, Handle), PipelineError> {
        // Step 1: parse Markdown with the GFM extensions and the front
        // matter delimiter registered
        let arena = Arena::new();
        let options = comrak_options();
        let root = parse_document(&arena, source, &options);

        // Step 2: tree stages, fixed order
        for (_name, stage) in TREE_STAGES {
            stage(root);
        }

        // Step 3: serialize to HTML with raw HTML passed through (the merge
        // point; safety is step 5's job)
        let mut buffer = Vec::new();
        format_html(root, &options, &mut buffer)
            .map_err(|e| PipelineError::SerializationError(format!("HTML render failed: {e}")))?;
        let merged = String::from_utf8(buffer)
            .map_err(|e| PipelineError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;

        // Step 4: parse the merged HTML into a DOM
        let parsed = dom::parse_html(&merged)?;
        let body = dom::find_body(&parsed.document)
            .ok_or_else(|| PipelineError::ParseError("merged document has no body".to_string()))?;

        // Step 5: sanitize in place
        sanitize::sanitize_children(&body, &self.policy);

        Ok((parsed, body))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new(sanitize::default_policy().clone())
    }
}

fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    // Raw HTML must survive into the merged tree; the sanitizer removes
    // anything unsafe afterwards
    options.render.unsafe_ = true;
    options
}

/// Drop the front-matter node comrak recognized; metadata is not content.
fn strip_front_matter<'a>(root: &'a AstNode<'a>) {
    let front_matter: Vec<&AstNode> = root
        .children()
        .filter(|child| matches!(child.data.borrow().value, NodeValue::FrontMatter(_)))
        .collect();
    for node in front_matter {
        node.detach();
    }
}

fn error_placeholder_html(err: &PipelineError) -> String {
    format!(
        "<pre class=\"render-error\">{}</pre>",
        escape_text(&err.to_string())
    )
}

fn error_placeholder_tree(err: &PipelineError) -> RenderTree {
    RenderTree {
        children: vec![RenderNode::Element {
            tag: "pre".to_string(),
            attrs: vec![("class".to_string(), "render-error".to_string())],
            children: vec![RenderNode::Text {
                value: err.to_string(),
            }],
        }],
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
