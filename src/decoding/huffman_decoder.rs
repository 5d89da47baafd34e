use super::errors::DecompressError;
use crate::huff0::{HuffmanTree, NodeId};

/// Walks a [`HuffmanTree`] one bit at a time.
///
/// A symbol is reported lazily: the leaf reached by the last bit of a code is
/// only emitted when the next bit arrives (or on [`finish`](Self::finish)), so
/// the walker never needs to know how many bits are still to come.
pub struct HuffmanDecoder<'tree> {
    tree: &'tree HuffmanTree,
    state: NodeId,
    bits_consumed: u64,
}

impl<'t> HuffmanDecoder<'t> {
    pub fn new(tree: &'t HuffmanTree) -> HuffmanDecoder<'t> {
        HuffmanDecoder {
            tree,
            state: tree.root(),
            bits_consumed: 0,
        }
    }

    pub fn bits_consumed(&self) -> u64 {
        self.bits_consumed
    }

    /// Feed one bit. If the walker was sitting on a leaf, that leaf's symbol is
    /// returned and the walk restarts at the root before the bit is applied.
    pub fn push_bit(&mut self, bit: bool) -> Result<Option<u8>, DecompressError> {
        let emitted = self.tree.symbol(self.state);
        if emitted.is_some() {
            self.state = self.tree.root();
        }

        self.state = self
            .tree
            .child(self.state, bit)
            .ok_or(DecompressError::InvalidTreeWalk {
                bits_consumed: self.bits_consumed,
            })?;
        self.bits_consumed += 1;
        Ok(emitted)
    }

    /// Called once every bit has been pushed. Returns the symbol of the leaf the
    /// last bit led to. Ending anywhere else means the data stopped in the
    /// middle of a code.
    pub fn finish(&self) -> Result<u8, DecompressError> {
        self.tree
            .symbol(self.state)
            .ok_or(DecompressError::InvalidTreeWalk {
                bits_consumed: self.bits_consumed,
            })
    }
}
