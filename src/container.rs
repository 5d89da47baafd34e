//! The container header: everything a decoder needs to rebuild the tree.
//!
//! ```text
//! [0..4)         leaf count (u32, big endian)
//! leaf count times:
//!   [k]          symbol (u8)
//!   [k+1..k+5)   frequency (u32, big endian)
//! ```
//!
//! The packed body and the two trailer bytes follow the header, see
//! [`crate::encoding`] and [`crate::decoding`].

use crate::huff0::FrequencyTable;
use alloc::vec::Vec;

/// Size of the leaf count field
pub const LEAF_COUNT_SIZE: usize = 4;
/// Size of one `(symbol, frequency)` record
pub const RECORD_SIZE: usize = 5;
/// More records than this would need a symbol to repeat
pub const MAX_LEAVES: u32 = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub table: FrequencyTable,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("Header is truncated: need {need} bytes but only {got} are available")]
    TruncatedHeader { need: usize, got: usize },
    #[error("Header declares {got} leaves, at most {} are possible", MAX_LEAVES)]
    TooManyLeaves { got: u32 },
    #[error("Header lists symbol {symbol} with a frequency of zero")]
    ZeroFrequency { symbol: u8 },
    #[error("Header lists symbol {symbol} more than once")]
    DuplicateSymbol { symbol: u8 },
    #[error("Symbol {symbol} occurs {count} times, the container can record at most {} occurrences", u32::MAX)]
    FrequencyOverflow { symbol: u8, count: u64 },
}

impl ContainerHeader {
    /// Wrap `table`, checking that every count fits the 32 bit frequency field.
    pub fn new(table: FrequencyTable) -> Result<Self, ContainerError> {
        if let Some((symbol, count)) = table.iter().find(|&(_, c)| c > u64::from(u32::MAX)) {
            return Err(ContainerError::FrequencyOverflow { symbol, count });
        }
        Ok(ContainerHeader { table })
    }

    /// Number of bytes [`write_to`](Self::write_to) appends.
    pub fn encoded_len(&self) -> usize {
        LEAF_COUNT_SIZE + RECORD_SIZE * self.table.len()
    }

    /// Append the header to `target`. Records are written in the table's
    /// iteration order, which is the order the tree builder consumes them in.
    pub fn write_to(&self, target: &mut Vec<u8>) {
        target.reserve(self.encoded_len());
        target.extend_from_slice(&(self.table.len() as u32).to_be_bytes());
        for (symbol, count) in self.table.iter() {
            target.push(symbol);
            // `new` guarantees the count fits
            target.extend_from_slice(&(count as u32).to_be_bytes());
        }
    }

    /// Parse a header from the start of `source`, returning the header and the
    /// number of bytes it occupied.
    pub fn parse(source: &[u8]) -> Result<(Self, usize), ContainerError> {
        use ContainerError as err;

        let Some((count_bytes, mut rest)) = source.split_first_chunk::<LEAF_COUNT_SIZE>() else {
            return Err(err::TruncatedHeader {
                need: LEAF_COUNT_SIZE,
                got: source.len(),
            });
        };
        let leaf_count = u32::from_be_bytes(*count_bytes);
        if leaf_count > MAX_LEAVES {
            return Err(err::TooManyLeaves { got: leaf_count });
        }

        let header_len = LEAF_COUNT_SIZE + RECORD_SIZE * leaf_count as usize;
        if source.len() < header_len {
            return Err(err::TruncatedHeader {
                need: header_len,
                got: source.len(),
            });
        }

        let mut table = FrequencyTable::new();
        for _ in 0..leaf_count {
            let Some((record, tail)) = rest.split_first_chunk::<RECORD_SIZE>() else {
                return Err(err::TruncatedHeader {
                    need: header_len,
                    got: source.len(),
                });
            };
            rest = tail;

            let symbol = record[0];
            let frequency = u32::from_be_bytes([record[1], record[2], record[3], record[4]]);
            if frequency == 0 {
                return Err(err::ZeroFrequency { symbol });
            }
            if table.get(symbol) != 0 {
                return Err(err::DuplicateSymbol { symbol });
            }
            table.add(symbol, u64::from(frequency));
        }

        tracing::debug!(leaf_count, header_len, "parsed container header");
        Ok((ContainerHeader { table }, header_len))
    }
}
