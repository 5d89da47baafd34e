//! Adapters between the in-memory codec and `std::io` sources and sinks.
//!
//! The codec needs the whole input up front, so both functions read their
//! source to the end before anything is written to the sink. Codec errors are
//! reported as [`std::io::ErrorKind::InvalidData`].

use crate::decoding::decompress;
use crate::encoding::compress;
use std::format;
use std::io::{self, Read, Write};
use std::vec::Vec;

fn invalid_data(context: &str, err: impl core::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("{context}: {err}"))
}

/// Compress everything `source` yields into `sink`. Returns the container size.
pub fn compress_stream<R: Read, W: Write>(mut source: R, mut sink: W) -> io::Result<u64> {
    let mut input = Vec::new();
    source.read_to_end(&mut input)?;
    let container = compress(&input).map_err(|e| invalid_data("Error in the huffman encoder", e))?;
    sink.write_all(&container)?;
    sink.flush()?;
    Ok(container.len() as u64)
}

/// Decompress the container `source` yields into `sink`. Returns the number of
/// bytes written. Nothing is written if the container is corrupted.
pub fn decompress_stream<R: Read, W: Write>(mut source: R, mut sink: W) -> io::Result<u64> {
    let mut container = Vec::new();
    source.read_to_end(&mut container)?;
    let output =
        decompress(&container).map_err(|e| invalid_data("Error in the huffman decoder", e))?;
    sink.write_all(&output)?;
    sink.flush()?;
    Ok(output.len() as u64)
}
