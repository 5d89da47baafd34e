//! A static Huffman compressor.
//!
//! The whole input is counted once, a prefix-free code is derived from the
//! per-byte frequencies, and the result is written into a small container that
//! carries enough information to rebuild the exact same code on the way back.
//!
//! ```
//! let container = ruhuff::compress(b"aaabbc").unwrap();
//! assert_eq!(ruhuff::decompress(&container).unwrap(), b"aaabbc");
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod container;
pub mod decoding;
pub mod encoding;
pub mod huff0;
mod tests;

#[cfg(feature = "std")]
pub mod streaming;

pub use container::ContainerHeader;
pub use decoding::{decompress, inspect, ContainerInfo, DecompressError, HuffmanDecoder};
pub use encoding::{compress, CompressError, HuffmanEncoder};
pub use huff0::{Code, Codebook, FrequencyTable, HuffmanTree};
