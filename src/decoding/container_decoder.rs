use super::bit_reader::BitReader;
use super::errors::DecompressError;
use super::huffman_decoder::HuffmanDecoder;
use crate::container::ContainerHeader;
use crate::huff0::{Codebook, HuffmanTree};
use alloc::vec::Vec;
use core::slice;

/// What a container says about itself, without decoding the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerInfo {
    pub header: ContainerHeader,
    /// Bytes taken by the header
    pub header_len: usize,
    /// Meaningful bits in the body, trailer excluded
    pub body_bits: u64,
    /// Size of the whole container
    pub container_len: usize,
}

impl ContainerInfo {
    /// Length of the data the container decodes to.
    pub fn original_len(&self) -> u64 {
        self.header.table.total()
    }

    /// The code the body was written with. `None` for an empty container.
    pub fn codebook(&self) -> Option<Codebook> {
        HuffmanTree::build(&self.header.table).map(|tree| Codebook::from_tree(&tree))
    }
}

/// The body split into its parts.
struct Body<'c> {
    /// Whole bytes of packed codes
    packed: &'c [u8],
    /// The final, partially used byte
    last: &'c u8,
    /// Number of leading bits of `last` that carry data, `0..=8`
    last_bits: u8,
}

impl Body<'_> {
    fn bits(&self) -> u64 {
        self.packed.len() as u64 * 8 + u64::from(self.last_bits)
    }
}

/// The trailer is always the last two bytes, so it can be found without
/// looking at the packed codes at all.
fn split_body(body: &[u8]) -> Result<Body<'_>, DecompressError> {
    use DecompressError as err;

    let [packed @ .., marker, last] = body else {
        return Err(err::MissingTrailer { got: body.len() });
    };
    if *marker > 8 {
        return Err(err::InvalidLeftoverLength { got: *marker });
    }
    if *marker < 8 && *last & (0xFF >> *marker) != 0 {
        return Err(err::NonZeroPadding);
    }
    Ok(Body {
        packed,
        last,
        last_bits: *marker,
    })
}

/// Read the header and trailer of `container` without decoding any codes.
pub fn inspect(container: &[u8]) -> Result<ContainerInfo, DecompressError> {
    let (header, header_len) = ContainerHeader::parse(container)?;
    let body = split_body(&container[header_len..])?;
    Ok(ContainerInfo {
        body_bits: body.bits(),
        header,
        header_len,
        container_len: container.len(),
    })
}

/// Decode a container produced by [`compress`](crate::compress).
///
/// Every inconsistency is a hard error: a short header, a broken trailer, a
/// walk that ends between codes, or decoded symbol counts that differ from
/// the header's frequencies. No partial output is returned.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let (header, header_len) = ContainerHeader::parse(container)?;
    let body = split_body(&container[header_len..])?;
    let table = &header.table;

    let Some(tree) = HuffmanTree::build(table) else {
        if body.bits() != 0 {
            return Err(DecompressError::UnexpectedBits { bits: body.bits() });
        }
        tracing::debug!("decoded empty container");
        return Ok(Vec::new());
    };

    // Every code is at least one bit long, so a corrupted header can not make
    // this allocate more than the body could ever produce
    let expected = table.total();
    let mut output = Vec::with_capacity(expected.min(body.bits()) as usize);
    let mut counts = [0u64; 256];
    let mut emit = |symbol: u8, output: &mut Vec<u8>| -> Result<(), DecompressError> {
        let got = &mut counts[symbol as usize];
        *got += 1;
        if *got > table.get(symbol) {
            return Err(DecompressError::SymbolCountMismatch {
                symbol,
                expected: table.get(symbol),
                got: *got,
            });
        }
        output.push(symbol);
        Ok(())
    };

    let mut decoder = HuffmanDecoder::new(&tree);
    let sections = [
        BitReader::new(body.packed),
        BitReader::with_limit(slice::from_ref(body.last), usize::from(body.last_bits))?,
    ];
    for mut reader in sections {
        while reader.bits_left() > 0 {
            if let Some(symbol) = decoder.push_bit(reader.get_bit()?)? {
                emit(symbol, &mut output)?;
            }
        }
    }
    emit(decoder.finish()?, &mut output)?;

    for (symbol, expected) in table.iter() {
        let got = counts[symbol as usize];
        if got != expected {
            return Err(DecompressError::SymbolCountMismatch {
                symbol,
                expected,
                got,
            });
        }
    }

    tracing::debug!(
        leaves = tree.leaf_count(),
        bits = decoder.bits_consumed(),
        output = output.len(),
        "decoded container"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{decompress, inspect};
    use crate::container::ContainerError;
    use crate::decoding::DecompressError;
    use alloc::vec;
    use alloc::vec::Vec;

    const AAABBC: [u8; 22] = [
        0, 0, 0, 3, //
        b'a', 0, 0, 0, 3, //
        b'b', 0, 0, 0, 2, //
        b'c', 0, 0, 0, 1, //
        0b0001_1111,
        1,
        0,
    ];

    #[test]
    fn aaabbc() {
        assert_eq!(decompress(&AAABBC).unwrap(), b"aaabbc");
    }

    #[test]
    fn single_symbol() {
        assert_eq!(
            decompress(&[0, 0, 0, 1, b'A', 0, 0, 0, 4, 4, 0]).unwrap(),
            b"AAAA"
        );
    }

    #[test]
    fn empty() {
        assert_eq!(decompress(&[0, 0, 0, 0, 0, 0]).unwrap(), b"");
        assert_eq!(
            decompress(&[0, 0, 0, 0, 1, 0]),
            Err(DecompressError::UnexpectedBits { bits: 1 })
        );
        assert_eq!(
            decompress(&[0, 0, 0, 0, 0xFF, 0, 0]),
            Err(DecompressError::UnexpectedBits { bits: 8 })
        );
    }

    #[test]
    fn full_last_byte_marker_is_accepted() {
        // Same bits as `abababab`, but the last full byte is kept in the trailer
        let container = [0, 0, 0, 2, b'a', 0, 0, 0, 4, b'b', 0, 0, 0, 4, 8, 0b0101_0101];
        assert_eq!(decompress(&container).unwrap(), b"abababab");
    }

    #[test]
    fn trailer_errors() {
        let header = [0, 0, 0, 1, b'A', 0, 0, 0, 1];
        let with = |tail: &[u8]| {
            let mut container = header.to_vec();
            container.extend_from_slice(tail);
            decompress(&container)
        };

        assert_eq!(with(&[]), Err(DecompressError::MissingTrailer { got: 0 }));
        assert_eq!(with(&[1]), Err(DecompressError::MissingTrailer { got: 1 }));
        assert_eq!(
            with(&[9, 0]),
            Err(DecompressError::InvalidLeftoverLength { got: 9 })
        );
        assert_eq!(with(&[1, 0b0100_0000]), Err(DecompressError::NonZeroPadding));
        assert_eq!(with(&[0, 0b0000_0001]), Err(DecompressError::NonZeroPadding));
        assert_eq!(with(&[1, 0]).unwrap(), b"A");
    }

    #[test]
    fn missing_bits_are_detected() {
        // the header promises one `A` but the body holds no bits at all
        assert_eq!(
            decompress(&[0, 0, 0, 1, b'A', 0, 0, 0, 1, 0, 0]),
            Err(DecompressError::InvalidTreeWalk { bits_consumed: 0 })
        );
    }

    #[test]
    fn code_cut_in_half_is_detected() {
        // a+b merge first, then c joins: c=0 a=10 b=11. The body is a lone `1`
        let container = [
            0, 0, 0, 3, b'a', 0, 0, 0, 1, b'b', 0, 0, 0, 1, b'c', 0, 0, 0, 1, 1, 0b1000_0000,
        ];
        assert_eq!(
            decompress(&container),
            Err(DecompressError::InvalidTreeWalk { bits_consumed: 1 })
        );
    }

    #[test]
    fn counts_must_match_the_header() {
        // header says a:3 b:2 c:1 but the body is `aaaaaaaaa` (nine 0 bits)
        let mut container = AAABBC[..19].to_vec();
        container.extend_from_slice(&[0, 1, 0]);
        assert_eq!(
            decompress(&container),
            Err(DecompressError::SymbolCountMismatch {
                symbol: b'a',
                expected: 3,
                got: 4
            })
        );

        // header says a:3 b:2 c:1 but the body is `aaabb`
        let mut container = AAABBC[..19].to_vec();
        container.extend_from_slice(&[7, 0b0001_1110]);
        assert_eq!(
            decompress(&container),
            Err(DecompressError::SymbolCountMismatch {
                symbol: b'c',
                expected: 1,
                got: 0
            })
        );
    }

    #[test]
    fn header_errors_pass_through() {
        assert_eq!(
            decompress(&[0, 0, 0, 2, b'a', 0, 0, 0, 1]),
            Err(DecompressError::Container(ContainerError::TruncatedHeader {
                need: 14,
                got: 9
            }))
        );
    }

    #[test]
    fn every_truncation_of_aaabbc_fails() {
        for len in 0..AAABBC.len() {
            assert!(
                decompress(&AAABBC[..len]).is_err(),
                "decoding {len} bytes succeeded"
            );
        }
    }

    #[test]
    fn inspect_reports_the_layout() {
        let info = inspect(&AAABBC).unwrap();
        assert_eq!(info.header_len, 19);
        assert_eq!(info.body_bits, 9);
        assert_eq!(info.container_len, 22);
        assert_eq!(info.original_len(), 6);
        assert_eq!(
            info.header.table.iter().collect::<Vec<_>>(),
            vec![(b'a', 3), (b'b', 2), (b'c', 1)]
        );
        assert_eq!(info.codebook().unwrap().len(), 3);

        let empty = inspect(&[0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(empty.original_len(), 0);
        assert!(empty.codebook().is_none());
    }
}
