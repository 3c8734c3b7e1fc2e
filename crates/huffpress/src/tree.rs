//! Huffman code tree construction.
//!
//! The tree is built greedily from a [`FrequencyTable`]: the two lightest
//! nodes are repeatedly merged under a new internal node until one root
//! remains.
//!
//! ## Tie-breaking
//!
//! The priority queue orders nodes by `(weight, sequence)`. Leaves are
//! seeded in ascending symbol order with sequence numbers `0..N`, and each
//! merged node takes the next free sequence number. Equal weights therefore
//! resolve by insertion order, which makes the tree shape a pure function of
//! the frequency table. The first node removed becomes the left child.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use huffpress_core::{Error, Result};
use tracing::debug;

use crate::frequency::FrequencyTable;

/// A node of the code tree.
///
/// Internal nodes own both children exclusively; there is no sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its aggregate frequency.
    Leaf { symbol: u8, weight: u64 },
    /// Sum of both children's weights.
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Aggregate frequency below (and including) this node.
    #[inline]
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Symbol held by a leaf.
    #[inline]
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child selected by `bit` (`false` = left, `true` = right).
    ///
    /// Leaves have no children.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
        }
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Priority queue entry. Ordered by weight, then by insertion sequence.
struct HeapEntry {
    weight: u64,
    sequence: usize,
    node: Node,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A complete Huffman code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    leaves: usize,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// Fails with [`Error::EmptyInput`] when the table has no entries, and
    /// with [`Error::FrequencyOverflow`] when the counts sum past `u64::MAX`.
    /// Every node weight is bounded by that total.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }
        if frequencies.checked_total().is_none() {
            return Err(Error::FrequencyOverflow);
        }

        let leaves = frequencies.len();
        let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::with_capacity(leaves);
        let mut sequence = 0usize;

        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse(HeapEntry {
                weight,
                sequence,
                node: Node::Leaf { symbol, weight },
            }));
            sequence += 1;
        }

        let root = loop {
            let Some(Reverse(first)) = heap.pop() else {
                return Err(Error::EmptyInput);
            };
            let Some(Reverse(second)) = heap.pop() else {
                break first.node;
            };
            let node = Node::merge(first.node, second.node);
            heap.push(Reverse(HeapEntry {
                weight: node.weight(),
                sequence,
                node,
            }));
            sequence += 1;
        };

        let tree = Self { root, leaves };
        debug!(
            leaves = tree.leaves,
            depth = tree.depth(),
            weight = tree.root.weight(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Count `data` and build its tree.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::build(&FrequencyTable::from_bytes(data))
    }

    /// Root node. For a one-symbol alphabet this is itself a leaf.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Number of internal nodes; always `leaf_count() - 1`.
    pub fn internal_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let Node::Internal { left, right, .. } = node {
                count += 1;
                stack.push(left);
                stack.push(right);
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }

    /// True for the degenerate one-symbol tree.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }
}
