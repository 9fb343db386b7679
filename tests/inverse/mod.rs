//! HTML → Markdown conversion tests

mod conversion;
