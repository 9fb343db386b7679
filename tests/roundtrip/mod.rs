//! Round-trip guarantees
//!
//! Two contracts hold the editor together: front matter reassembles byte
//! for byte, and Markdown -> HTML -> Markdown reaches a fixed point within
//! one extra conversion cycle.

mod convergence;
