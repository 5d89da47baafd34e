//! Everything that turns byte counts into a prefix-free code.
//!
//! [`FrequencyTable`] counts the input, [`HuffmanTree`] merges the two rarest
//! nodes until one root is left, and [`Codebook`] reads each symbol's code off
//! the path from the root (left is `0`, right is `1`). The decoder rebuilds the
//! tree from the container header alone, so the same table must always give
//! the same tree.

mod codebook;
mod frequency;
mod tree;

pub use codebook::*;
pub use frequency::*;
pub use tree::*;
