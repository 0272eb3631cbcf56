//! Huffman coding is a method of encoding where symbols are assigned a code,
//! and more commonly used symbols get shorter codes, and less commonly
//! used symbols get longer codes. Codes are prefix free, meaning no code
//! is the start of another one.
mod code;
mod header;
mod node;
mod tree;

pub use code::{Code, MAX_CODE_LEN};
pub use header::HeaderError;
pub use node::{Node, NodeId};
pub use tree::{HuffmanError, HuffmanTree};

/// Size of the alphabet, every byte value is a symbol
pub const NUM_SYMBOLS: usize = 256;
/// Upper bound of nodes in a tree: every leaf plus one less internal nodes
pub(crate) const MAX_NODES: usize = NUM_SYMBOLS * 2 - 1;

/// Compress `data`, decompress the result and check that it matches.
/// Panics if anything goes wrong.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    let compressed = crate::encoding::compress_to_vec(data).unwrap();
    if data.is_empty() {
        assert!(compressed.is_empty());
    }
    let decompressed = crate::decoding::decompress_to_vec(&compressed).unwrap();
    assert_eq!(data, decompressed.as_slice());
}
