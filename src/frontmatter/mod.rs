//! Front-matter codec (extract/assemble)
//!
//! Splits a document into its leading `---`-delimited metadata block and the
//! Markdown body, and puts the two back together on save. Two invariants
//! carry the editor experience:
//!
//! - `assemble(extract(doc)) == doc` byte-for-byte whenever the metadata is
//!   already in this codec's canonical form, and
//! - a document that fails to parse is never destroyed: malformed metadata
//!   degrades to "no front matter, the whole input is the body".
//!
//! Attribute order is insertion order. The serializer never reorders keys
//! and never emits an empty `---\n---\n` block, which is what makes the
//! no-front-matter identity hold.

mod value;

pub use value::Value;

/// The front-matter delimiter line.
pub const DELIMITER: &str = "---";

/// An ordered mapping of front-matter attributes.
///
/// Keys keep the order they were declared in the source document. Mutation
/// through [`FrontMatter::set`] updates a key in place so that editing a
/// value does not move it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatter {
    entries: Vec<(String, Value)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the first value declared under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set `key` to `value`, preserving its position if it already exists
    /// and appending otherwise.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Extract the front-matter block and body from a document.
///
/// Returns an empty mapping and the input unchanged when there is no
/// opening delimiter, no closing delimiter, or the block fails to parse.
pub fn extract(document: &str) -> (FrontMatter, &str) {
    let Some(rest) = document.strip_prefix("---\n") else {
        return (FrontMatter::new(), document);
    };

    let Some((block, body)) = split_at_closing_delimiter(rest) else {
        return (FrontMatter::new(), document);
    };

    match parse_block(block) {
        Some(attributes) => (attributes, body),
        None => (FrontMatter::new(), document),
    }
}

/// Assemble a document from attributes and body.
///
/// An empty mapping returns the body unchanged; otherwise the delimiter,
/// one `key: value` line per attribute in iteration order, the closing
/// delimiter, then the body.
pub fn assemble(attributes: &FrontMatter, body: &str) -> String {
    if attributes.is_empty() {
        return body.to_string();
    }

    let mut out = String::from("---\n");
    for (key, value) in attributes.iter() {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value.serialize());
        out.push('\n');
    }
    out.push_str("---\n");
    out.push_str(body);
    out
}

/// Find the closing `---` line. Returns the raw block text and the body
/// (everything after the closing delimiter and its newline).
fn split_at_closing_delimiter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }
    None
}

/// Parse the block into ordered key/value pairs. Returns `None` for
/// anything this codec does not understand; the caller falls back to
/// treating the whole document as body.
fn parse_block(block: &str) -> Option<FrontMatter> {
    let mut attributes = FrontMatter::new();
    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, raw_value) = line.split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        attributes.entries.push((key.to_string(), Value::parse(raw_value)));
    }
    Some(attributes)
}
