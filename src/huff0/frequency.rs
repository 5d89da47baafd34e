//! Contains [`FrequencyTable`], the per-byte occurrence counts that every
//! Huffman tree in this crate is built from.

use alloc::vec::Vec;

/// Occurrence counts for every byte value that appears in some input.
///
/// Iteration yields values in the order they were first seen (or, for a table
/// read back from a container, in header order). That order feeds the tree
/// builder's tie-break, so two tables with the same counts but a different
/// order may produce different codes.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Indexed by symbol
    counts: [u64; 256],
    /// Symbols with a non-zero count, in insertion order
    order: Vec<u8>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; 256],
            order: Vec::new(),
        }
    }

    /// Count every byte in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.add(byte, 1);
        }
        table
    }

    /// Add `count` occurrences of `symbol`. A symbol's position in the
    /// iteration order is fixed the first time it receives a non-zero count.
    ///
    /// Counts saturate at `u64::MAX`. A container can only record counts up to
    /// `u32::MAX`, see [`ContainerHeader::new`](crate::ContainerHeader::new).
    pub fn add(&mut self, symbol: u8, count: u64) {
        if count == 0 {
            return;
        }
        let slot = &mut self.counts[symbol as usize];
        if *slot == 0 {
            self.order.push(symbol);
        }
        *slot = slot.saturating_add(count);
    }

    /// Occurrences of `symbol`, zero if it never appeared.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts, which is the length of the counted input.
    /// Saturates like [`add`](Self::add).
    pub fn total(&self) -> u64 {
        self.order
            .iter()
            .fold(0, |sum, &s| sum.saturating_add(self.counts[s as usize]))
    }

    /// `(symbol, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.order.iter().map(|&s| (s, self.counts[s as usize]))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
