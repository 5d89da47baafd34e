//! Structures and utilities used for decoding containers

pub mod bit_reader;
pub mod errors;

mod container_decoder;
mod huffman_decoder;

pub use container_decoder::*;
pub use errors::DecompressError;
pub use huffman_decoder::HuffmanDecoder;
