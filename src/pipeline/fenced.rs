//! Widget fenced-block rewrite stage
//!
//! Walks the parsed Markdown tree and rewrites every code block whose first
//! line carries a widget token into an inert custom-element marker. The
//! marker travels through HTML merging and sanitization untouched and is
//! interpreted by the UI layer after render; the pipeline itself never
//! executes or deeply validates the payload.
//!
//! A block that does not match (wrong token, invalid JSON, schema
//! violation) is left exactly as parsed and renders as ordinary code.

use crate::widgets::WidgetBlock;
use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};

/// Rewrite matching code blocks in place, depth first.
pub(crate) fn rewrite_widget_blocks<'a>(root: &'a AstNode<'a>) {
    for child in root.children() {
        rewrite_widget_blocks(child);
    }

    let replacement = {
        let data = node_code_block(root);
        data.and_then(|(info, literal)| recognize(&info, &literal))
            .map(|widget| marker_html(&widget))
    };

    if let Some(html) = replacement {
        root.data.borrow_mut().value = NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 6,
            literal: html,
        });
    }
}

fn node_code_block<'a>(node: &'a AstNode<'a>) -> Option<(String, String)> {
    match &node.data.borrow().value {
        NodeValue::CodeBlock(block) => Some((block.info.clone(), block.literal.clone())),
        _ => None,
    }
}

/// The widget token may sit on the fence line (the info string) or, for a
/// bare fence, on the first line of the block body.
fn recognize(info: &str, literal: &str) -> Option<WidgetBlock> {
    let info = info.trim();
    if !info.is_empty() {
        return WidgetBlock::parse(info, literal);
    }

    let (first_line, rest) = match literal.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (literal, ""),
    };
    WidgetBlock::parse(first_line, rest)
}

fn marker_html(widget: &WidgetBlock) -> String {
    match widget {
        WidgetBlock::Card { json } => format!(
            "<studio-card data-json=\"{}\"></studio-card>\n",
            escape_attribute(json)
        ),
        WidgetBlock::Chart { json } => format!(
            "<studio-chart data-json=\"{}\"></studio-chart>\n",
            escape_attribute(json)
        ),
        WidgetBlock::Component {
            component_type,
            json,
        } => format!(
            "<studio-component data-type=\"{}\" data-json=\"{}\"></studio-component>\n",
            escape_attribute(component_type),
            escape_attribute(json)
        ),
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
