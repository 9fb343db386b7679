//! Fenced mini-language descriptors
//!
//! Authors embed structured widgets as fenced code blocks whose first line
//! carries a recognized token: `card {json}`, `chart {json}`, or
//! `component:<type> {json}`. This module turns that first line (plus any
//! remaining body lines) into a typed descriptor, validating card and chart
//! payloads against their schemas. The `component` form is deliberately left
//! unvalidated beyond "is syntactically valid JSON". It is the escape hatch
//! for widget types the editor does not know about yet, and tightening it
//! would break previously authored content.
//!
//! Recognition fails closed: any mismatch (unknown token, invalid JSON,
//! schema violation) yields `None` and the caller leaves the original code
//! block untouched, so a typo degrades to visible code rather than to a
//! parse error or silent loss.
//!
//! The raw JSON text is carried through unmodified. Deep semantic handling
//! of the payload belongs to the UI layer, not the pipeline.

use serde::Deserialize;

/// A recognized widget fenced block.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetBlock {
    Card { json: String },
    Chart { json: String },
    Component { component_type: String, json: String },
}

/// Shape check for `card` payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct CardPayload {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub variant: Option<CardVariant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    Info,
    Warning,
    Success,
}

/// Shape check for `chart` payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(rename = "xKey")]
    pub x_key: String,
    #[serde(rename = "yKeys")]
    pub y_keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Area,
}

impl WidgetBlock {
    /// Try to build a descriptor from a fenced block's first line and the
    /// remaining body lines. The payload may follow the token on the same
    /// line, fill the remaining lines, or both (multi-line JSON).
    pub fn parse(first_line: &str, rest: &str) -> Option<WidgetBlock> {
        if let Some(json) = token_payload(first_line, rest, "card") {
            serde_json::from_str::<CardPayload>(&json).ok()?;
            return Some(WidgetBlock::Card { json });
        }

        if let Some(json) = token_payload(first_line, rest, "chart") {
            serde_json::from_str::<ChartPayload>(&json).ok()?;
            return Some(WidgetBlock::Chart { json });
        }

        if let Some(remainder) = first_line.strip_prefix("component:") {
            let (component_type, payload) = match remainder.split_once(' ') {
                Some((component_type, payload)) => (component_type, payload),
                None => (remainder, ""),
            };
            if component_type.is_empty() {
                return None;
            }
            let json = join_payload(payload, rest);
            if json.is_empty() {
                return None;
            }
            serde_json::from_str::<serde_json::Value>(&json).ok()?;
            return Some(WidgetBlock::Component {
                component_type: component_type.to_string(),
                json,
            });
        }

        None
    }

    /// The raw JSON payload, exactly as authored.
    pub fn json(&self) -> &str {
        match self {
            WidgetBlock::Card { json }
            | WidgetBlock::Chart { json }
            | WidgetBlock::Component { json, .. } => json,
        }
    }
}

/// The payload for a plain token: whatever follows the token on its line,
/// joined with the remaining lines. `None` when the token does not match.
fn token_payload(first_line: &str, rest: &str, token: &str) -> Option<String> {
    let remainder = first_line.strip_prefix(token)?;
    let json = if remainder.is_empty() {
        rest.trim().to_string()
    } else {
        join_payload(remainder.strip_prefix(' ')?, rest)
    };
    if json.is_empty() {
        return None;
    }
    Some(json)
}

fn join_payload(first: &str, rest: &str) -> String {
    let rest = rest.trim_end();
    if rest.is_empty() {
        first.trim().to_string()
    } else {
        format!("{}\n{}", first.trim_start(), rest).trim().to_string()
    }
}
