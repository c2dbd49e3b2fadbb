//! Small byte-level utilities shared by the rasterizer crates.
//!
//! This library can be seen as an extension to the rust standard library.

pub mod bytestream;
pub mod writer;
