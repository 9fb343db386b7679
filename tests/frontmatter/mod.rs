//! Front matter codec tests
//!
//! The codec must hold two promises at once: typed access to the values and
//! byte-exact reassembly of documents it did not modify.

mod codec;
mod properties;
