use super::{HuffmanTree, NodeId, NodeKind};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// A single code: the lowest `len` bits of `bits`, read from the most
/// significant of those down to bit zero. The first bit is the edge taken at
/// the root.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    /// Code length is bounded by tree depth. Frequencies are at most `u32::MAX`
    /// for each of 256 symbols, which keeps any reachable depth well below 64.
    pub const MAX_LEN: u8 = 64;

    fn push(self, bit: bool) -> Code {
        Code {
            bits: (self.bits << 1) | u64::from(bit),
            len: self.len + 1,
        }
    }

    /// Bit `idx` counted from the first bit of the code.
    pub fn bit(&self, idx: u8) -> bool {
        assert!(idx < self.len);
        (self.bits >> (self.len - 1 - idx)) & 1 == 1
    }

    /// True if `other` starts with every bit of `self`. A code is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..self.len {
            f.write_str(if self.bit(idx) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Maps every symbol of a tree to its code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codebook {
    /// Indexed by symbol
    codes: Vec<Option<Code>>,
    len: usize,
}

impl Codebook {
    /// Walk the tree once, depth first. Left edges append a `0`, right edges a `1`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        let mut len = 0;

        let mut pending: Vec<(NodeId, Code)> = Vec::with_capacity(64);
        pending.push((tree.root(), Code { bits: 0, len: 0 }));
        while let Some((id, code)) = pending.pop() {
            match tree.node(id).kind {
                NodeKind::Leaf(symbol) => {
                    tracing::trace!(symbol, %code, "assigned code");
                    codes[symbol as usize] = Some(code);
                    len += 1;
                }
                NodeKind::Internal { left, right } => {
                    if let Some(right) = right {
                        pending.push((right, code.push(true)));
                    }
                    pending.push((left, code.push(false)));
                }
            }
        }

        Codebook { codes, len }
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u8, code)))
    }

    /// Total number of bits needed to encode input with the given counts.
    pub fn encoded_bits(&self, table: &super::FrequencyTable) -> u64 {
        table
            .iter()
            .map(|(symbol, count)| {
                let len = self.get(symbol).map_or(0, |code| code.len);
                count.saturating_mul(u64::from(len))
            })
            .fold(0, u64::saturating_add)
    }
}
