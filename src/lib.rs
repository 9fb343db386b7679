//! Markdown transformation pipeline for the studio content editor
//!
//!     This crate owns every conversion the editor performs on a document:
//!     parsing and reassembling front matter, rendering Markdown to a
//!     sanitized HTML string or UI render tree, rewriting widget fenced
//!     blocks into inert custom-element markers, and converting edited HTML
//!     back to Markdown when the user leaves the rich-text surface.
//!
//!     TLDR for contributors:
//!         - We never hand-parse Markdown or HTML. comrak parses and renders
//!           Markdown, html5ever parses and serializes HTML. Our code
//!           transforms the trees those libraries hand us.
//!         - The one exception is the HTML -> Markdown serializer in
//!           ./inverse, written by hand because the output style (two-space
//!           hard breaks, `-` bullets, `*` emphasis) must match what the
//!           forward pipeline round-trips cleanly.
//!         - Sanitization always runs after the Markdown-to-HTML merge, on
//!           the full merged document. Never sanitize earlier, it misses
//!           literal author HTML.
//!         - Render entry points are infallible and degrade to a visible
//!           error placeholder. The inverse direction returns Result and
//!           propagates, silently corrupting a document is worse than
//!           surfacing the failure.
//!
//! Architecture
//!
//!     The file structure:
//!     .
//!     ├── error.rs            # PipelineError, the crate-wide error type
//!     ├── frontmatter         # ordered key/value block codec, byte-exact
//!     │   ├── mod.rs          # extract / assemble / FrontMatter
//!     │   └── value.rs        # typed values and their text forms
//!     ├── widgets.rs          # fenced mini-language tokens and payload schemas
//!     ├── pipeline            # Markdown -> sanitized HTML / render tree
//!     │   ├── mod.rs          # the staged pipeline itself
//!     │   ├── fenced.rs       # widget code-block rewrite stage
//!     │   └── dom.rs          # shared rcdom parse/serialize helpers
//!     ├── sanitize            # deny-by-default HTML allow-list
//!     │   ├── mod.rs          # SanitizePolicy and the studio default
//!     │   └── clean.rs        # in-place DOM cleaning
//!     ├── tree.rs             # RenderTree / RenderNode for the UI layer
//!     └── inverse             # HTML -> Markdown
//!         └── mod.rs
//!
//!     This is a pure lib. Nothing here touches the filesystem, environment
//!     or network; callers feed strings in and take strings or trees out,
//!     which keeps every piece testable in isolation.
//!
//! Testing
//!
//!     tests/lib.rs includes the integration suites (rust does not discover
//!     tests in subdirectories by default, so they are declared as modules):
//!     tests
//!     ├── lib.rs
//!     ├── frontmatter/        # codec round trips
//!     ├── render/             # forward pipeline output
//!     ├── sanitize/           # exploit payloads stay out, content stays in
//!     ├── inverse/            # HTML -> Markdown rules
//!     ├── roundtrip/          # cross-stage convergence guarantees
//!     └── fixtures/           # kitchensink documents

pub mod error;
pub mod frontmatter;
pub mod inverse;
pub mod pipeline;
pub mod sanitize;
pub mod tree;
pub mod widgets;

pub use error::PipelineError;
pub use frontmatter::{assemble, extract, FrontMatter, Value};
pub use inverse::{HtmlToMarkdown, MarkdownRules};
pub use pipeline::Pipeline;
pub use sanitize::{default_policy, SanitizePolicy};
pub use tree::{RenderNode, RenderTree};
pub use widgets::WidgetBlock;
