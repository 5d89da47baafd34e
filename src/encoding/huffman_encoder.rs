//! Utilities and interfaces for encoding an entire container.

use super::bit_writer::BitWriter;
use crate::container::{ContainerError, ContainerHeader};
use crate::huff0::{Codebook, FrequencyTable, HuffmanTree};
use alloc::vec::Vec;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("Symbol {symbol} occurs in the input but has no code")]
    UncodedSymbol { symbol: u8 },
}

/// Holds the input together with the header and codebook derived from it.
pub struct HuffmanEncoder<'input> {
    uncompressed_data: &'input [u8],
    header: ContainerHeader,
    /// `None` only for empty input
    codebook: Option<Codebook>,
}

impl<'input> HuffmanEncoder<'input> {
    /// Count the symbols of `uncompressed_data` and derive its code, but don't
    /// start encoding yet.
    pub fn new(uncompressed_data: &'input [u8]) -> Result<HuffmanEncoder<'input>, CompressError> {
        let header = ContainerHeader::new(FrequencyTable::from_bytes(uncompressed_data))?;
        let codebook = HuffmanTree::build(&header.table).map(|tree| Codebook::from_tree(&tree));
        Ok(Self {
            uncompressed_data,
            header,
            codebook,
        })
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn codebook(&self) -> Option<&Codebook> {
        self.codebook.as_ref()
    }

    /// Size of the container [`encode`](Self::encode) will produce.
    pub fn encoded_len(&self) -> usize {
        let body_bits = self
            .codebook
            .as_ref()
            .map_or(0, |book| book.encoded_bits(&self.header.table));
        self.header.encoded_len() + (body_bits / 8) as usize + 2
    }

    /// Encode the input into a new container.
    pub fn encode(&self) -> Result<Vec<u8>, CompressError> {
        let mut output = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut output)?;
        Ok(output)
    }

    /// Append the container to `output`: the header, every code in input order
    /// packed most significant bit first, then the number of meaningful bits in
    /// the last byte and that last byte padded with zeros.
    ///
    /// `output` is left untouched if some input byte has no code.
    pub fn encode_into(&self, output: &mut Vec<u8>) -> Result<(), CompressError> {
        let mut writer = BitWriter::with_capacity(self.encoded_len() - self.header.encoded_len());
        for &byte in self.uncompressed_data {
            let code = self
                .codebook
                .as_ref()
                .and_then(|codebook| codebook.get(byte))
                .ok_or(CompressError::UncodedSymbol { symbol: byte })?;
            writer.write_bits(code.bits, code.len);
        }

        let start = output.len();
        self.header.write_to(output);

        let bits_written = writer.bits_written();
        let padding = writer.misaligned();
        let (body, rest) = writer.finish();
        output.extend_from_slice(&body);
        output.push(rest.bits);
        output.push(rest.byte);

        tracing::debug!(
            input = self.uncompressed_data.len(),
            leaves = self.header.table.len(),
            bits_written,
            padding,
            container = output.len() - start,
            "encoded container"
        );
        Ok(())
    }
}

/// Compress `input` into a self-describing container.
///
/// Fails only if some byte value occurs more often than the 32 bit frequency
/// field can record.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, CompressError> {
    HuffmanEncoder::new(input)?.encode()
}
