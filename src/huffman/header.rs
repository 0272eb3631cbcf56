//! The tree header: the shape of a [`HuffmanTree`] in pre-order.
//!
//! Every node is one marker byte, `0` for an internal node and `1` for a leaf.
//! A leaf marker is followed by the symbol byte. Internal nodes are followed by
//! their left, then their right subtree. The encoding delimits itself, no
//! length is needed to know where it ends.
//!
//! Both directions use an explicit stack instead of recursion.
use super::node::{Node, NodeId};
use super::tree::HuffmanTree;
use super::NUM_SYMBOLS;
use crate::decoding::bit_reader::BitReader;
use crate::encoding::bit_writer::{BitWriter, BitWriterError};
use alloc::vec::Vec;

const INTERNAL_MARKER: u8 = 0;
const LEAF_MARKER: u8 = 1;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HeaderError {
    #[error("Tree header ended early, after {bytes_read} bytes")]
    TruncatedHeader { bytes_read: usize },
    #[error("Invalid node marker {got} at header byte {offset}, should be 0 (internal) or 1 (leaf)")]
    InvalidMarker { got: u8, offset: usize },
    #[error("Tree header describes more than {NUM_SYMBOLS} leaves")]
    TooManyLeaves,
    #[error("Symbol {symbol:#04x} appears in more than one leaf")]
    DuplicateSymbol { symbol: u8 },
    #[error("Can't write a header for a tree without symbols")]
    EmptyTree,
    #[error(transparent)]
    BitWriterError(#[from] BitWriterError),
}

impl HuffmanTree {
    /// Serialize the shape of the tree into `writer`. The writer has to be byte aligned.
    pub fn write_header(&self, writer: &mut BitWriter) -> Result<(), HeaderError> {
        let root = self.root.ok_or(HeaderError::EmptyTree)?;

        let mut stack = Vec::with_capacity(NUM_SYMBOLS);
        stack.push(root);
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            match node.children {
                None => {
                    writer.write_byte(LEAF_MARKER)?;
                    writer.flush_bitwise();
                    writer.write_byte(node.symbol)?;
                }
                Some([left, right]) => {
                    writer.write_byte(INTERNAL_MARKER)?;
                    // left has to come out first
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        Ok(())
    }

    /// Rebuild a tree from a header written by [`HuffmanTree::write_header`].
    ///
    /// Leaves get a weight of 1, internal nodes the sum of their children.
    /// Only the shape matters for decoding.
    pub fn read_header(reader: &mut BitReader<'_>) -> Result<HuffmanTree, HeaderError> {
        let mut tree = HuffmanTree::empty();
        // internal nodes still waiting for children, with their left child once it is complete
        let mut pending: Vec<Option<NodeId>> = Vec::new();
        let start = reader.bits_read() / 8;

        loop {
            let offset = reader.bits_read() / 8 - start;
            let truncated = HeaderError::TruncatedHeader { bytes_read: offset };
            let marker = reader.read_byte().ok_or(truncated)?;

            let mut complete = match marker {
                INTERNAL_MARKER => {
                    // a full tree with 256 internal nodes would need 257 leaves
                    if pending.len() >= NUM_SYMBOLS - 1 {
                        return Err(HeaderError::TooManyLeaves);
                    }
                    pending.push(None);
                    continue;
                }
                LEAF_MARKER => {
                    let symbol = reader.read_byte().ok_or(HeaderError::TruncatedHeader {
                        bytes_read: offset + 1,
                    })?;
                    if tree.contains(symbol) {
                        return Err(HeaderError::DuplicateSymbol { symbol });
                    }
                    let id = tree.push(Node::leaf(symbol, 1));
                    tree.leaves[usize::from(symbol)] = Some(id);
                    id
                }
                got => return Err(HeaderError::InvalidMarker { got, offset }),
            };

            // hand the finished subtree to its parent, closing every parent that is now complete
            loop {
                match pending.last_mut() {
                    None => {
                        tree.root = Some(complete);
                        vprintln!(
                            "Read tree header of {} bytes with {} leaves",
                            reader.bits_read() / 8 - start,
                            tree.num_leaves()
                        );
                        return Ok(tree);
                    }
                    Some(slot) => match *slot {
                        None => {
                            *slot = Some(complete);
                            break;
                        }
                        Some(left) => {
                            pending.pop();
                            let symbol = tree.node(left).symbol;
                            let weight = tree.node(left).weight + tree.node(complete).weight;
                            complete = tree.join(left, complete, symbol, weight);
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HeaderError;
    use crate::decoding::bit_reader::BitReader;
    use crate::encoding::bit_writer::{BitWriter, BitWriterError};
    use crate::huffman::{HuffmanTree, NUM_SYMBOLS};
    use alloc::vec::Vec;

    fn abcd() -> HuffmanTree {
        let mut freqs = [0; NUM_SYMBOLS];
        freqs[usize::from(b'A')] = 5;
        freqs[usize::from(b'B')] = 2;
        freqs[usize::from(b'C')] = 1;
        freqs[usize::from(b'D')] = 1;
        HuffmanTree::build(&freqs)
    }

    fn header_bytes(tree: &HuffmanTree) -> Vec<u8> {
        let mut writer = BitWriter::new();
        tree.write_header(&mut writer).unwrap();
        writer.dump().unwrap()
    }

    #[test]
    fn abcd_header_bytes() {
        assert_eq!(
            header_bytes(&abcd()),
            [0, 0, 1, b'B', 0, 1, b'C', 1, b'D', 1, b'A']
        );
    }

    #[test]
    fn header_round_trip_keeps_shape() {
        let mut freqs = [0; NUM_SYMBOLS];
        for (idx, freq) in freqs.iter_mut().enumerate() {
            *freq = (idx as u64 % 13) * (idx as u64 % 5);
        }
        let tree = HuffmanTree::build(&freqs);
        let bytes = header_bytes(&tree);

        let mut reader = BitReader::new(&bytes);
        let read = HuffmanTree::read_header(&mut reader).unwrap();
        assert_eq!(reader.bits_left(), 0);
        assert_eq!(read.num_nodes(), tree.num_nodes());
        assert!(read.symbols().eq(tree.symbols()));
        for symbol in tree.symbols() {
            assert_eq!(read.code(symbol), tree.code(symbol));
            assert_eq!(read.weight(symbol), Some(1));
        }
        assert_eq!(read.root_weight(), tree.num_leaves() as u64);
    }

    #[test]
    fn single_leaf_header() {
        let mut freqs = [0; NUM_SYMBOLS];
        freqs[usize::from(b'A')] = 5;
        let tree = HuffmanTree::build(&freqs);
        let bytes = header_bytes(&tree);
        assert_eq!(bytes, [1, b'A']);

        let read = HuffmanTree::read_header(&mut BitReader::new(&bytes)).unwrap();
        assert_eq!(read.num_nodes(), 1);
        assert!(read.code(b'A').unwrap().is_empty());
    }

    #[test]
    fn stops_at_end_of_header() {
        let mut bytes = header_bytes(&abcd());
        bytes.extend_from_slice(&[0xDE, 0xAD]);
        let mut reader = BitReader::new(&bytes);
        HuffmanTree::read_header(&mut reader).unwrap();
        assert_eq!(reader.read_byte(), Some(0xDE));
    }

    #[test]
    fn truncated_header() {
        let bytes = header_bytes(&abcd());
        for len in 0..bytes.len() {
            let result = HuffmanTree::read_header(&mut BitReader::new(&bytes[..len]));
            assert!(
                matches!(result, Err(HeaderError::TruncatedHeader { .. })),
                "len {}: {:?}",
                len,
                result
            );
        }
        assert_eq!(
            HuffmanTree::read_header(&mut BitReader::new(&[0, 1])).unwrap_err(),
            HeaderError::TruncatedHeader { bytes_read: 2 }
        );
    }

    #[test]
    fn bad_headers() {
        assert_eq!(
            HuffmanTree::read_header(&mut BitReader::new(&[0, 2])).unwrap_err(),
            HeaderError::InvalidMarker { got: 2, offset: 1 }
        );
        assert_eq!(
            HuffmanTree::read_header(&mut BitReader::new(&[0, 1, 7, 1, 7])).unwrap_err(),
            HeaderError::DuplicateSymbol { symbol: 7 }
        );
        let zeros = [0u8; 300];
        assert_eq!(
            HuffmanTree::read_header(&mut BitReader::new(&zeros)).unwrap_err(),
            HeaderError::TooManyLeaves
        );
    }

    #[test]
    fn writer_errors() {
        let mut writer = BitWriter::new();
        assert_eq!(
            HuffmanTree::empty().write_header(&mut writer),
            Err(HeaderError::EmptyTree)
        );
        writer.write_bit(true);
        assert_eq!(
            abcd().write_header(&mut writer),
            Err(HeaderError::BitWriterError(BitWriterError::NotByteAligned {
                bits_in_last_byte: 1
            }))
        );
    }
}
