//! Front-matter value scalars
//!
//! Values keep their declared type across an edit session so that
//! re-serialization does not re-encode them differently. The parsing and
//! serialization rules are deliberately narrow: this codec handles the
//! subset of YAML the studio editor itself writes, nothing more.

use chrono::NaiveDate;

/// A single front-matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Number(f64),
    /// Calendar date, always serialized as `YYYY-MM-DD`
    Date(NaiveDate),
    Array(Vec<Value>),
    /// Non-array structured value, serialized as a JSON blob
    Object(serde_json::Value),
    Null,
}

impl Value {
    /// Parse a raw value string (the text after `key:`) into a typed value.
    pub fn parse(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
            let inner = &trimmed[1..trimmed.len() - 1];
            let items = split_top_level(inner)
                .iter()
                .map(|item| Value::parse_scalar(item))
                .collect();
            return Value::Array(items);
        }
        Value::parse_scalar(trimmed)
    }

    fn parse_scalar(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
            if let Ok(s) = serde_json::from_str::<String>(trimmed) {
                return Value::String(s);
            }
            // Not valid JSON quoting; keep the literal text minus the quotes
            return Value::String(trimmed[1..trimmed.len() - 1].to_string());
        }
        match trimmed {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if trimmed.len() == 10 {
                return Value::Date(date);
            }
        }
        if looks_numeric(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return Value::Number(n);
                }
            }
        }
        Value::String(trimmed.to_string())
    }

    /// Serialize this value to its canonical front-matter form.
    pub fn serialize(&self) -> String {
        match self {
            Value::String(s) => {
                if needs_quoting(s) {
                    serde_json::to_string(s)
                        .unwrap_or_else(|_| format!("\"{}\"", s.replace('"', "\\\"")))
                } else {
                    s.clone()
                }
            }
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Array(items) => {
                let rendered: Vec<String> = items.iter().map(Value::serialize).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Object(v) => serde_json::to_string(v).unwrap_or_default(),
            Value::Null => String::new(),
        }
    }
}

/// Strings containing a newline, a colon, or leading/trailing whitespace
/// need JSON quoting; everything else is emitted bare.
fn needs_quoting(s: &str) -> bool {
    s.contains('\n') || s.contains(':') || s != s.trim()
}

/// Numbers must start with a digit (after an optional sign) so that words
/// like `nan` or `infinity` stay strings.
fn looks_numeric(s: &str) -> bool {
    let rest = s.strip_prefix(['-', '+']).unwrap_or(s);
    rest.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Split array contents on commas, ignoring commas nested inside quotes,
/// brackets, or braces.
fn split_top_level(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in inner.chars() {
        if in_quotes {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            '"' => {
                in_quotes = true;
                current.push(ch);
            }
            '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                items.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        items.push(current.trim().to_string());
    }
    items
}
