use super::code::{Code, MAX_CODE_LEN};
use super::node::{Node, NodeId};
use super::{MAX_NODES, NUM_SYMBOLS};
use crate::decoding::bit_reader::BitReader;
use crate::encoding::bit_writer::BitWriter;
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;

/// A Huffman tree over the byte alphabet.
///
/// All nodes live in one arena owned by the tree. Besides the root the tree
/// keeps a table from every byte value to its leaf, which is what makes
/// encoding a walk from the leaf up to the root.
///
/// Once built (or read from a header) the tree is never mutated again.
#[derive(Clone, Debug)]
pub struct HuffmanTree {
    pub(super) nodes: Vec<Node>,
    pub(super) root: Option<NodeId>,
    pub(super) leaves: [Option<NodeId>; NUM_SYMBOLS],
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HuffmanError {
    #[error("Symbol {symbol:#04x} is not part of the huffman tree")]
    InvalidSymbol { symbol: u8 },
    #[error("Bit stream ended in the middle of a code, after {bits_read} bits")]
    TruncatedStream { bits_read: usize },
    #[error("The huffman tree does not contain any symbols")]
    EmptyTree,
}

/// Ordering key of the forest during construction. Deriving `Ord` compares
/// the fields in declaration order: weight first, symbol as tie-break. The
/// node id is unique and makes the order total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ForestEntry {
    weight: u64,
    symbol: u8,
    id: NodeId,
}

impl Default for HuffmanTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl HuffmanTree {
    /// A tree without any symbols. Encoding and decoding with it fails with [`HuffmanError::EmptyTree`].
    pub fn empty() -> Self {
        HuffmanTree {
            nodes: Vec::new(),
            root: None,
            leaves: [None; NUM_SYMBOLS],
        }
    }

    /// Build the tree from the frequency of every byte value. Bytes with a
    /// frequency of zero don't get a leaf.
    ///
    /// Nodes are merged lowest `(weight, symbol)` first. The first node taken
    /// from the forest becomes the left child, the second one the right
    /// child, and the new parent inherits the symbol of its left child.
    ///
    /// Internal weights saturate at `u64::MAX`. Frequencies that large give up
    /// optimality between the saturated subtrees, the codes stay prefix free.
    pub fn build(frequencies: &[u64; NUM_SYMBOLS]) -> Self {
        let mut tree = HuffmanTree::empty();
        let mut forest = BinaryHeap::with_capacity(NUM_SYMBOLS);

        for (symbol, &weight) in frequencies.iter().enumerate() {
            if weight == 0 {
                continue;
            }
            let symbol = symbol as u8;
            let id = tree.push(Node::leaf(symbol, weight));
            tree.leaves[usize::from(symbol)] = Some(id);
            forest.push(Reverse(ForestEntry { weight, symbol, id }));
        }

        loop {
            let Reverse(first) = match forest.pop() {
                Some(entry) => entry,
                // no symbols at all, the tree stays empty
                None => break,
            };
            let Reverse(second) = match forest.pop() {
                Some(entry) => entry,
                None => {
                    tree.root = Some(first.id);
                    break;
                }
            };

            let weight = first.weight.saturating_add(second.weight);
            let id = tree.join(first.id, second.id, first.symbol, weight);
            forest.push(Reverse(ForestEntry {
                weight,
                symbol: first.symbol,
                id,
            }));
        }

        vprintln!(
            "Built huffman tree with {} leaves and {} nodes",
            tree.num_leaves(),
            tree.num_nodes()
        );
        tree
    }

    /// Count the bytes in `data` and build a tree for them
    pub fn from_data(data: &[u8]) -> Self {
        Self::build(&crate::encoding::count_frequencies(data))
    }

    pub(super) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a new internal node above `left` and `right` and point both back to it
    pub(super) fn join(&mut self, left: NodeId, right: NodeId, symbol: u8, weight: u64) -> NodeId {
        let parent = self.push(Node::internal(left, right, symbol, weight));
        self.nodes[left.index()].parent = Some(parent);
        self.nodes[right.index()].parent = Some(parent);
        parent
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.leaves.iter().filter(|leaf| leaf.is_some()).count()
    }

    /// Total weight of all symbols. Trees read from a header count every leaf as 1.
    pub fn root_weight(&self) -> u64 {
        self.root.map_or(0, |root| self.node(root).weight)
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.leaves[usize::from(symbol)].is_some()
    }

    /// The symbols that have a leaf, in ascending order
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        self.leaves
            .iter()
            .enumerate()
            .filter(|(_, leaf)| leaf.is_some())
            .map(|(symbol, _)| symbol as u8)
    }

    pub fn weight(&self, symbol: u8) -> Option<u64> {
        self.leaves[usize::from(symbol)].map(|leaf| self.node(leaf).weight)
    }

    fn leaf(&self, symbol: u8) -> Result<NodeId, HuffmanError> {
        if self.is_empty() {
            return Err(HuffmanError::EmptyTree);
        }
        self.leaves[usize::from(symbol)].ok_or(HuffmanError::InvalidSymbol { symbol })
    }

    /// The code of `symbol`, found by walking from its leaf up to the root.
    ///
    /// A tree with a single symbol has no branches, that symbol gets the empty code.
    pub fn code(&self, symbol: u8) -> Result<Code, HuffmanError> {
        let mut current = self.leaf(symbol)?;

        // the walk produces the bits leaf first, collect them and replay in reverse
        let mut path = [false; MAX_CODE_LEN];
        let mut depth = 0;
        while let Some(parent) = self.node(current).parent {
            path[depth] = self.node(parent).is_right_child(current);
            depth += 1;
            current = parent;
        }

        let mut code = Code::empty();
        for &bit in path[..depth].iter().rev() {
            code.push(bit);
        }
        Ok(code)
    }

    /// Length of the code of `symbol`, its depth in the tree
    pub fn code_len(&self, symbol: u8) -> Result<u32, HuffmanError> {
        let mut current = self.leaf(symbol)?;
        let mut depth = 0;
        while let Some(parent) = self.node(current).parent {
            depth += 1;
            current = parent;
        }
        Ok(depth)
    }

    /// Number of payload bits needed to encode data with the given frequencies.
    /// Symbols not in the tree are ignored, the result saturates at `u64::MAX`.
    pub fn encoded_bit_len(&self, frequencies: &[u64; NUM_SYMBOLS]) -> u64 {
        frequencies
            .iter()
            .enumerate()
            .filter_map(|(symbol, &freq)| {
                self.code_len(symbol as u8)
                    .ok()
                    .map(|len| freq.saturating_mul(u64::from(len)))
            })
            .fold(0, u64::saturating_add)
    }

    /// Write the code of `symbol` into `writer`, root side bit first
    pub fn encode(&self, symbol: u8, writer: &mut BitWriter) -> Result<(), HuffmanError> {
        let code = self.code(symbol)?;
        for bit in code.iter() {
            writer.write_bit(bit);
        }
        Ok(())
    }

    /// Read bits from `reader`, descending from the root, until a leaf is reached.
    ///
    /// If the root itself is a leaf no bits are consumed.
    pub fn decode(&self, reader: &mut BitReader<'_>) -> Result<u8, HuffmanError> {
        let mut current = self.root.ok_or(HuffmanError::EmptyTree)?;
        loop {
            let node = self.node(current);
            match node.children {
                None => return Ok(node.symbol),
                Some([left, right]) => {
                    let bit = reader.read_bit().ok_or(HuffmanError::TruncatedStream {
                        bits_read: reader.bits_read(),
                    })?;
                    current = if bit { right } else { left };
                }
            }
        }
    }
}

const _: () = assert!(MAX_NODES <= u16::MAX as usize);
