use alloc::vec::Vec;

/// An interface for writing an arbitrary number of bits into a buffer,
/// most significant bit first.
pub(crate) struct BitWriter {
    /// Completed bytes
    output: Vec<u8>,
    /// Bits that do not make up a full byte yet, right aligned
    pending: u64,
    /// How many of the low bits of `pending` are occupied. Always below 8
    /// between calls.
    pending_bits: u8,
}

/// The unfinished tail left in a writer once all codes have been written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PartialByte {
    /// The leftover bits, left aligned and padded with zeros
    pub byte: u8,
    /// How many leading bits of `byte` are payload, in `0..8`
    pub bits: u8,
}

impl BitWriter {
    /// Initialize a new writer with room for `bytes` completed bytes. Write new
    /// bits into the buffer with `write_bits`, and obtain the output using `finish`
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            pending: 0,
            pending_bits: 0,
        }
    }

    /// Write the lowest `num_bits` bits of `bits`, starting with the most
    /// significant of them.
    pub fn write_bits(&mut self, bits: u64, num_bits: u8) {
        assert!(num_bits <= 64);
        // Keep at most 7 + 32 bits in flight so the accumulator never overflows
        if num_bits > 32 {
            let low = num_bits - 32;
            self.write_bits(bits >> low, 32);
            self.write_bits(bits, low);
            return;
        }
        if num_bits == 0 {
            return;
        }

        let mask = (1u64 << num_bits) - 1;
        self.pending = (self.pending << num_bits) | (bits & mask);
        self.pending_bits += num_bits;

        while self.pending_bits >= 8 {
            self.pending_bits -= 8;
            self.output.push((self.pending >> self.pending_bits) as u8);
        }
        self.pending &= (1u64 << self.pending_bits) - 1;
    }

    /// Number of bits that would need to be added to end on a byte boundary
    pub fn misaligned(&self) -> u8 {
        if self.pending_bits == 0 {
            0
        } else {
            8 - self.pending_bits
        }
    }

    /// Total number of bits written so far
    pub fn bits_written(&self) -> u64 {
        self.output.len() as u64 * 8 + u64::from(self.pending_bits)
    }

    /// Returns the completed bytes and the unfinished last byte.
    ///
    /// This function consumes the writer, so it cannot be used after
    /// finishing
    pub fn finish(self) -> (Vec<u8>, PartialByte) {
        let byte = if self.pending_bits == 0 {
            0
        } else {
            (self.pending << (8 - self.pending_bits)) as u8
        };
        (
            self.output,
            PartialByte {
                byte,
                bits: self.pending_bits,
            },
        )
    }
}
