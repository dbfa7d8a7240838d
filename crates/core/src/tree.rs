//! Huffman tree construction.
//!
//! # Algorithm
//!
//! A min-priority queue starts with one leaf per symbol. The two lightest
//! nodes are repeatedly extracted and merged under a new internal node whose
//! weight is their sum, until one node (the root) remains.
//!
//! # Tie-break
//!
//! Queue priority is `(weight, creation order)`. Leaves are created in
//! ascending symbol order, and each merged node takes the next order number.
//! Among equal weights the earliest-created node is extracted first. The
//! first node extracted becomes the left (`0`) child, the second the right
//! (`1`) child. Two builds from the same frequency table therefore always
//! produce the same tree and the same codes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// A node of a Huffman tree. Each internal node exclusively owns both
/// children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Total weight of the leaves under this node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    // No overflow: every merged weight is at most the frequency table total,
    // which `FrequencyTable` keeps within u64.
    fn merge(left: HuffmanNode, right: HuffmanNode) -> HuffmanNode {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A queued node with its tie-break order.
#[derive(Debug)]
struct Candidate {
    order: usize,
    node: HuffmanNode,
}

impl Candidate {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.order)
    }
}

// Ordering for the heap (min-heap: lightest, then oldest, first)
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest key
        other.key().cmp(&self.key())
    }
}

/// An immutable Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build a tree from a frequency table.
    ///
    /// # Errors
    /// `HuffmanError::InvalidInput` if the table is empty.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::InvalidInput(
                "cannot build a huffman tree from an empty frequency table".to_string(),
            )
            .into());
        }

        let mut queue = BinaryHeap::with_capacity(frequencies.len());
        let mut next_order = 0;
        for (symbol, weight) in frequencies.iter() {
            queue.push(Candidate {
                order: next_order,
                node: HuffmanNode::Leaf { symbol, weight },
            });
            next_order += 1;
        }

        while queue.len() > 1 {
            let (Some(first), Some(second)) = (queue.pop(), queue.pop()) else {
                break;
            };
            queue.push(Candidate {
                order: next_order,
                node: HuffmanNode::merge(first.node, second.node),
            });
            next_order += 1;
        }

        let root = queue
            .pop()
            .map(|candidate| candidate.node)
            .ok_or_else(|| HuffmanError::InvalidInput("huffman queue drained".to_string()))?;

        Ok(Self { root })
    }

    /// Count `symbols` and build a tree from the result.
    pub fn from_symbols(symbols: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_symbols(symbols))
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 1,
                HuffmanNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Number of nodes, always `2 * leaf_count() - 1`.
    pub fn node_count(&self) -> usize {
        2 * self.leaf_count() - 1
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        fn depth(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 0,
                HuffmanNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }

    /// Recover the frequency table from the leaf weights.
    pub fn frequencies(&self) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                // Leaf weights sum to the root weight
                HuffmanNode::Leaf { symbol, weight } => table.add_bounded(*symbol, *weight),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        table
    }
}
