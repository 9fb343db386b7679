//! Sanitization tests
//!
//! Hostile payloads go through the whole pipeline (literal HTML included)
//! and must come out defanged, while ordinary authored content is kept.

mod exploits;
