//! Sanitization policy
//!
//! A deny-by-default allow-list over tags, per-tag attributes, and URL
//! schemes, applied to the merged document tree after raw author HTML and
//! Markdown-derived HTML have become one DOM. Anything not explicitly
//! enumerated is removed. The policy is plain read-only data: built once,
//! consulted on every sanitize call, never mutated afterwards, which is
//! what makes concurrent pipeline invocations safe without locking.

mod clean;

pub use clean::sanitize_children;

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Allow-list schema consulted by the sanitizer.
#[derive(Debug, Clone)]
pub struct SanitizePolicy {
    tags: HashSet<String>,
    /// Attributes allowed on specific tags, in addition to `global_attributes`
    tag_attributes: HashMap<String, HashSet<String>>,
    /// Attributes allowed on every surviving tag
    global_attributes: HashSet<String>,
    /// Attributes whose values are URLs and must pass the scheme check
    url_attributes: HashSet<String>,
    schemes: HashSet<String>,
    /// Whether `data:image/*` is acceptable for `img src`
    allow_data_images: bool,
}

impl SanitizePolicy {
    /// The policy used by the studio editor: the GFM output vocabulary plus
    /// the inert widget marker elements.
    pub fn studio_default() -> Self {
        let tags = [
            "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "em", "i", "strong", "b",
            "del", "s", "code", "pre", "blockquote", "ul", "ol", "li", "input", "table",
            "thead", "tbody", "tr", "th", "td", "a", "img", "span", "div", "figure",
            "figcaption", "dl", "dt", "dd", "sup", "sub", "studio-card", "studio-chart",
            "studio-component",
        ];

        let tag_attributes: &[(&str, &[&str])] = &[
            ("a", &["href", "title"]),
            ("img", &["src", "alt", "title", "width", "height"]),
            ("input", &["type", "checked", "disabled"]),
            ("ol", &["start"]),
            ("th", &["align"]),
            ("td", &["align"]),
            ("code", &["class"]),
            ("pre", &["data-language"]),
            ("studio-card", &["data-json"]),
            ("studio-chart", &["data-json"]),
            ("studio-component", &["data-json", "data-type"]),
        ];

        SanitizePolicy {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            tag_attributes: tag_attributes
                .iter()
                .map(|(tag, attrs)| {
                    (
                        tag.to_string(),
                        attrs.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
            global_attributes: ["class", "id"].iter().map(|a| a.to_string()).collect(),
            url_attributes: ["href", "src"].iter().map(|a| a.to_string()).collect(),
            schemes: ["http", "https", "mailto"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allow_data_images: true,
        }
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether `attr` may stay on `tag`. Event-handler attributes are
    /// rejected unconditionally, even if a policy were to list one.
    pub fn allows_attribute(&self, tag: &str, attr: &str) -> bool {
        if attr.starts_with("on") {
            return false;
        }
        if self.global_attributes.contains(attr) {
            return true;
        }
        self.tag_attributes
            .get(tag)
            .is_some_and(|attrs| attrs.contains(attr))
    }

    pub fn is_url_attribute(&self, attr: &str) -> bool {
        self.url_attributes.contains(attr)
    }

    /// Whether a URL value is acceptable for `attr` on `tag`. Relative
    /// references are always acceptable; absolute URLs must use an allowed
    /// scheme. `data:` survives only as `data:image/*` on `img src`.
    pub fn allows_url(&self, tag: &str, attr: &str, value: &str) -> bool {
        match Url::parse(value) {
            Ok(parsed) => {
                if self.schemes.contains(parsed.scheme()) {
                    return true;
                }
                self.allow_data_images
                    && parsed.scheme() == "data"
                    && tag == "img"
                    && attr == "src"
                    && parsed.path().starts_with("image/")
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => true,
            Err(_) => false,
        }
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        SanitizePolicy::studio_default()
    }
}

static DEFAULT_POLICY: Lazy<SanitizePolicy> = Lazy::new(SanitizePolicy::studio_default);

/// Process-wide default policy, built on first use and shared read-only.
pub fn default_policy() -> &'static SanitizePolicy {
    &DEFAULT_POLICY
}
