//! Modules used for compressing/encoding data into the container format.
pub(crate) mod bit_writer;
mod huffman_encoder;
pub use huffman_encoder::*;
