//! Errors that might occur while decoding a container.

use super::bit_reader::GetBitsError;
use crate::container::ContainerError;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error(transparent)]
    GetBits(#[from] GetBitsError),
    #[error("Container body needs at least the two trailer bytes, got {got} bytes")]
    MissingTrailer { got: usize },
    #[error("The last byte can hold at most 8 meaningful bits, but the trailer says {got}")]
    InvalidLeftoverLength { got: u8 },
    #[error("Padding bits of the last byte are not zero. Probably caused by data corruption")]
    NonZeroPadding,
    #[error("Ran out of bits in the middle of a code or followed a missing branch after {bits_consumed} bits. The body is corrupted or truncated")]
    InvalidTreeWalk { bits_consumed: u64 },
    #[error("Container has no symbols but carries {bits} bits of body")]
    UnexpectedBits { bits: u64 },
    #[error("Symbol {symbol} decoded {got} times but the header says {expected}")]
    SymbolCountMismatch { symbol: u8, expected: u64, got: u64 },
}
