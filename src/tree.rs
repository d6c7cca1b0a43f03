//! Huffman tree construction
//!
//! Greedy bottom-up merge of the two lightest nodes using a min-heap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyMap;
use crate::symbol::Symbol;

/// A tree vertex. Leaves carry a symbol and no children; internal nodes carry
/// exactly two children and no symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S: Symbol> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S: Symbol> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<S> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Follow one branch: `false` is left, `true` is right. Leaves have no branches.
    pub fn child(&self, bit: bool) -> Option<&Node<S>> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn merge(left: Self, right: Self) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Heap entry. `seq` records insertion order so equal weights always pop in
/// the same order for the same frequency map.
struct Pending<S: Symbol> {
    weight: u64,
    seq: usize,
    node: Node<S>,
}

impl<S: Symbol> Eq for Pending<S> {}
impl<S: Symbol> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl<S: Symbol> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<S: Symbol> Ord for Pending<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (weight, seq)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S: Symbol> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree for `freq`. Returns `None` for an empty map.
    ///
    /// A single-symbol alphabet yields a lone leaf as the root.
    pub fn build(freq: &FrequencyMap<S>) -> Option<Self> {
        let mut heap = BinaryHeap::with_capacity(freq.len());
        for (seq, (symbol, weight)) in freq.iter().enumerate() {
            heap.push(Pending {
                weight,
                seq,
                node: Node::Leaf { symbol, weight },
            });
        }

        let mut seq = heap.len();
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = Node::merge(left.node, right.node);
            heap.push(Pending {
                weight: node.weight(),
                seq,
                node,
            });
            seq += 1;
        }

        let root = heap.pop()?.node;
        let tree = Self { root };
        tracing::debug!(
            root_weight = tree.root.weight(),
            depth = tree.depth(),
            "built huffman tree"
        );
        Some(tree)
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Indented pre-order listing of node weights, one space per level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, &mut out);
        out
    }
}

fn render_node<S: Symbol>(node: &Node<S>, level: usize, out: &mut String) {
    let indent = " ".repeat(level);
    match node {
        Node::Leaf { symbol, weight } => {
            out.push_str(&format!("{}({}) {:?}\n", indent, weight, symbol));
        }
        Node::Internal { weight, left, right } => {
            out.push_str(&format!("{}({})\n", indent, weight));
            render_node(left, level + 1, out);
            render_node(right, level + 1, out);
        }
    }
}
