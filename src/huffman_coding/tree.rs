//! Builds the Huffman merge tree from a frequency table.
//!
//! Nodes live in an arena (a plain Vec) and refer to their children by index. The priority
//! queue only ever holds small (weight, sequence, index) handles, never whole nodes.
//!
//! Tie-break: leaves are seeded in ascending symbol order and every node gets the next
//! sequence number when it is created. The queue pops the lowest weight first and, among equal
//! weights, the lowest sequence number. The first node popped becomes the left child.
//!

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::error::HuffError;
use crate::tools::freq_count::FrequencyTable;

/// Arena index of a node.
pub type NodeId = usize;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NodeData {
    /// Internal node with left and right children.
    Kids(NodeId, NodeId),
    /// Terminal node holding one input byte.
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, node_data: NodeData) -> Node {
        Node { weight, node_data }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// Priority queue handle. BinaryHeap is a max-heap, hence the Reverse wrappers.
type Handle = (Reverse<u64>, Reverse<usize>, NodeId);

/// A complete Huffman tree. Every internal node has exactly two children.
#[derive(Debug, Clone)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl CodeTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    pub fn build(freqs: &FrequencyTable) -> Result<CodeTree, HuffError> {
        if freqs.is_empty() {
            return Err(HuffError::InvalidInput(
                "cannot build a code tree without symbols".to_string(),
            ));
        }

        // A tree with n leaves has 2n - 1 nodes.
        let mut nodes: Vec<Node> = Vec::with_capacity(freqs.len() * 2 - 1);
        let mut heap: BinaryHeap<Handle> = BinaryHeap::with_capacity(freqs.len());

        for (symbol, weight) in freqs.iter() {
            let id = nodes.len();
            nodes.push(Node::new(weight, NodeData::Leaf(symbol)));
            // The arena index doubles as the creation sequence number.
            heap.push((Reverse(weight), Reverse(id), id));
        }

        // ...then pare it down to one single node with child nodes.
        while heap.len() > 1 {
            let (Reverse(left_weight), _, left) = heap.pop().ok_or_else(empty_heap)?;
            let (Reverse(right_weight), _, right) = heap.pop().ok_or_else(empty_heap)?;
            let weight = left_weight + right_weight;
            let id = nodes.len();
            nodes.push(Node::new(weight, NodeData::Kids(left, right)));
            trace!(
                "Merged nodes {} ({}) and {} ({}) into {} ({}).",
                left,
                left_weight,
                right,
                right_weight,
                id,
                weight
            );
            heap.push((Reverse(weight), Reverse(id), id));
        }

        let (_, _, root) = heap.pop().ok_or_else(empty_heap)?;
        debug!(
            "Built code tree with {} nodes, root weight {}.",
            nodes.len(),
            nodes[root].weight
        );
        Ok(CodeTree { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node in the arena.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total weight of the tree (the number of input bytes).
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    /// Number of nodes, leaves and internal nodes together.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }
}

fn empty_heap() -> HuffError {
    HuffError::InvalidInput("code tree priority queue ran dry".to_string())
}

#[cfg(test)]
mod test {
    use super::{CodeTree, NodeData};
    use crate::tools::freq_count::FrequencyTable;

    #[test]
    fn empty_table_is_rejected_test() {
        let freqs = FrequencyTable::from_bytes(&[]);
        assert!(CodeTree::build(&freqs).is_err());
    }

    #[test]
    fn single_symbol_tree_is_one_leaf_test() {
        let freqs = FrequencyTable::from_bytes(&[b'a'; 1000]);
        let tree = CodeTree::build(&freqs).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).node_data, NodeData::Leaf(b'a'));
        assert_eq!(tree.weight(), 1000);
    }

    #[test]
    fn every_internal_node_has_two_kids_test() {
        let freqs = FrequencyTable::from_bytes(b"abracadabra");
        let tree = CodeTree::build(&freqs).unwrap();
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.weight(), 11);
        for id in 0..tree.len() {
            let node = tree.node(id);
            if let NodeData::Kids(l, r) = node.node_data {
                assert_ne!(l, r);
                assert_eq!(node.weight, tree.node(l).weight + tree.node(r).weight);
            }
        }
    }

    #[test]
    fn tie_break_is_by_creation_order_test() {
        // All weights equal: 'a' and 'b' merge first, then 'c' and 'd', then the two pairs.
        let freqs = FrequencyTable::from_bytes(b"abcd");
        let tree = CodeTree::build(&freqs).unwrap();
        assert_eq!(tree.node(4).node_data, NodeData::Kids(0, 1));
        assert_eq!(tree.node(5).node_data, NodeData::Kids(2, 3));
        assert_eq!(tree.node(tree.root()).node_data, NodeData::Kids(4, 5));
    }
}
