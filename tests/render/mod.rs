//! Forward pipeline tests
//!
//! Markdown in, sanitized HTML or render tree out.
