/// Index of a node inside the arena of a [`HuffmanTree`](super::HuffmanTree).
///
/// A tree never has more than `2 * 256 - 1` nodes, so a `u16` is plenty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u16);

impl NodeId {
    pub(crate) fn new(idx: usize) -> Self {
        debug_assert!(idx < super::MAX_NODES);
        NodeId(idx as u16)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// One vertex of the tree.
///
/// Children and parent are indices into the owning tree's arena. Only the
/// arena owns nodes, the links are plain indices, so there is no ownership
/// cycle between a child and its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Sum of the frequencies of all symbols below this node
    pub weight: u64,
    /// The symbol of a leaf. Internal nodes carry the symbol of their
    /// first extracted child, which only serves as a tie-break key.
    pub symbol: u8,
    pub(crate) children: Option<[NodeId; 2]>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn leaf(symbol: u8, weight: u64) -> Self {
        Node {
            weight,
            symbol,
            children: None,
            parent: None,
        }
    }

    pub(crate) fn internal(left: NodeId, right: NodeId, symbol: u8, weight: u64) -> Self {
        Node {
            weight,
            symbol,
            children: Some([left, right]),
            parent: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|c| c[0])
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|c| c[1])
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether `child` is the right child of this node. Right children are
    /// the `1` branch of a code.
    pub(crate) fn is_right_child(&self, child: NodeId) -> bool {
        self.right() == Some(child)
    }
}
