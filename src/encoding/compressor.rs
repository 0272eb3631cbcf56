//! The compressing side of the container format.
//!
//! ```text
//! [symbol count: u32 LE][tree header][payload]
//! ```
//!
//! The payload is the code of every input byte in order, packed MSB first
//! and zero padded to a whole byte. Empty input compresses to empty output.

use alloc::vec::Vec;
use core::convert::TryFrom;

use super::bit_writer::{BitWriter, BitWriterError};
use super::frequency::count_frequencies;
use crate::huffman::{HeaderError, HuffmanError, HuffmanTree};
use crate::io::{Error, Write};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error("Input of {len} bytes is too large, the symbol count has to fit into 32 bits")]
    InputTooLarge { len: usize },
    #[error(transparent)]
    HuffmanError(#[from] HuffmanError),
    #[error(transparent)]
    HeaderError(#[from] HeaderError),
    #[error(transparent)]
    BitWriterError(#[from] BitWriterError),
    #[error("Failed to write compressed data: {0}")]
    WriteError(#[source] Error),
}

/// Compress `source` and write the result into `drain`.
///
/// The data is walked twice: once to count the byte frequencies, once to encode.
///
/// # Examples
/// ```
/// let mut output = Vec::new();
/// hctree::encoding::compress(b"AABCD", &mut output).unwrap();
/// assert_eq!(&output[..4], &5u32.to_le_bytes());
/// ```
pub fn compress<W: Write>(source: &[u8], mut drain: W) -> Result<(), CompressError> {
    let output = compress_to_vec(source)?;
    drain.write_all(&output).map_err(CompressError::WriteError)?;
    drain.flush().map_err(CompressError::WriteError)?;
    Ok(())
}

/// Compress `source` into a new buffer
pub fn compress_to_vec(source: &[u8]) -> Result<Vec<u8>, CompressError> {
    // Special handling for empty input, there is no tree to describe
    if source.is_empty() {
        return Ok(Vec::new());
    }
    let symbol_count = u32::try_from(source.len())
        .map_err(|_| CompressError::InputTooLarge { len: source.len() })?;

    let frequencies = count_frequencies(source);
    let tree = HuffmanTree::build(&frequencies);

    let payload_bits = tree.encoded_bit_len(&frequencies) as usize;
    let header_bytes = tree.num_nodes() + tree.num_leaves();
    let mut writer = BitWriter::with_capacity(4 + header_bytes + (payload_bits + 7) / 8);

    writer.write_u32_le(symbol_count)?;
    tree.write_header(&mut writer)?;
    for &byte in source {
        tree.encode(byte, &mut writer)?;
    }

    vprintln!(
        "Compressed {} bytes: {} header bytes, {} payload bits",
        source.len(),
        header_bytes,
        payload_bits
    );
    Ok(writer.finish())
}
