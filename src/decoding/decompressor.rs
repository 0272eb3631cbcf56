use alloc::vec::Vec;

use super::bit_reader::BitReader;
use crate::huffman::{HeaderError, HuffmanError, HuffmanTree};
use crate::io::{Error, Write};

/// Output is handed to the drain in chunks of this size
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error("Compressed data needs at least 4 bytes for the symbol count, got {got}")]
    MissingSymbolCount { got: usize },
    #[error(transparent)]
    HeaderError(#[from] HeaderError),
    #[error("Failed to decode symbol {index} of {total}: {source}")]
    SymbolError {
        index: u32,
        total: u32,
        #[source]
        source: HuffmanError,
    },
    #[error("Failed to write decompressed data: {0}")]
    WriteError(#[source] Error),
}

/// Decompress `source` and write the original bytes into `drain`.
/// Returns the number of bytes written.
///
/// Padding bits after the last symbol and anything following the payload are ignored.
///
/// # Examples
/// ```
/// let compressed = hctree::encoding::compress_to_vec(b"banana").unwrap();
/// let mut output = Vec::new();
/// let written = hctree::decoding::decompress(&compressed, &mut output).unwrap();
/// assert_eq!(written, 6);
/// assert_eq!(output, b"banana");
/// ```
pub fn decompress<W: Write>(source: &[u8], mut drain: W) -> Result<u64, DecompressError> {
    // Empty input decompresses to empty output
    if source.is_empty() {
        return Ok(0);
    }

    let mut reader = BitReader::new(source);
    let total = reader
        .read_u32_le()
        .map_err(|_| DecompressError::MissingSymbolCount { got: source.len() })?;
    let tree = HuffmanTree::read_header(&mut reader)?;
    vprintln!(
        "Decoding {} symbols with {} distinct values, {} payload bits available",
        total,
        tree.num_leaves(),
        reader.bits_left()
    );

    let mut buffer = Vec::with_capacity(CHUNK_SIZE.min(total as usize));
    for index in 0..total {
        let symbol = tree
            .decode(&mut reader)
            .map_err(|source| DecompressError::SymbolError {
                index,
                total,
                source,
            })?;
        buffer.push(symbol);
        if buffer.len() == CHUNK_SIZE {
            drain
                .write_all(&buffer)
                .map_err(DecompressError::WriteError)?;
            buffer.clear();
        }
    }
    drain
        .write_all(&buffer)
        .map_err(DecompressError::WriteError)?;
    drain.flush().map_err(DecompressError::WriteError)?;

    Ok(u64::from(total))
}

/// Decompress `source` into a new buffer
pub fn decompress_to_vec(source: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let mut output = Vec::new();
    decompress(source, &mut output)?;
    Ok(output)
}
