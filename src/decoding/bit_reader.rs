/// Reads bits from a byte slice, most significant bit of each byte first.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    source: &'s [u8],
    /// Bits past this index are padding and never handed out
    limit: usize,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GetBitsError {
    #[error("Cant serve this request. The reader is limited to {limit} bits, requested {num_requested_bits} bits")]
    TooManyBits {
        num_requested_bits: usize,
        limit: u8,
    },
    #[error("Can't read {requested} bits, only have {remaining} bits left")]
    NotEnoughRemainingBits { requested: usize, remaining: usize },
    #[error("Reader was asked to cover {num_bits} bits of a {source_len} byte source")]
    LimitPastEnd { num_bits: usize, source_len: usize },
}

impl<'s> BitReader<'s> {
    /// Read every bit of `source`.
    pub fn new(source: &'s [u8]) -> BitReader<'s> {
        BitReader {
            idx: 0,
            source,
            limit: source.len() * 8,
        }
    }

    /// Read only the first `num_bits` bits of `source`.
    pub fn with_limit(source: &'s [u8], num_bits: usize) -> Result<BitReader<'s>, GetBitsError> {
        if num_bits > source.len() * 8 {
            return Err(GetBitsError::LimitPastEnd {
                num_bits,
                source_len: source.len(),
            });
        }
        Ok(BitReader {
            idx: 0,
            source,
            limit: num_bits,
        })
    }

    pub fn bits_left(&self) -> usize {
        self.limit - self.idx
    }

    pub fn get_bit(&mut self) -> Result<bool, GetBitsError> {
        if self.idx >= self.limit {
            return Err(GetBitsError::NotEnoughRemainingBits {
                requested: 1,
                remaining: 0,
            });
        }
        let byte = self.source[self.idx / 8];
        let bit = (byte >> (7 - self.idx % 8)) & 1 == 1;
        self.idx += 1;
        Ok(bit)
    }

    /// Read `n` bits into the low bits of the result. The first bit read ends up
    /// as the most significant of them.
    pub fn get_bits(&mut self, n: usize) -> Result<u64, GetBitsError> {
        if n > 64 {
            return Err(GetBitsError::TooManyBits {
                num_requested_bits: n,
                limit: 64,
            });
        }
        if self.bits_left() < n {
            return Err(GetBitsError::NotEnoughRemainingBits {
                requested: n,
                remaining: self.bits_left(),
            });
        }

        let mut value = 0u64;
        let mut needed = n;
        while needed > 0 {
            let bits_left_in_current_byte = 8 - self.idx % 8;
            let take = bits_left_in_current_byte.min(needed);
            let byte = u64::from(self.source[self.idx / 8]);
            let chunk = (byte >> (bits_left_in_current_byte - take)) & ((1 << take) - 1);
            value = (value << take) | chunk;
            self.idx += take;
            needed -= take;
        }

        Ok(value)
    }

    pub fn reset(&mut self, new_source: &'s [u8]) {
        self.idx = 0;
        self.source = new_source;
        self.limit = new_source.len() * 8;
    }
}
