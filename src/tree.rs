use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::bitvec::BitVec;
use crate::Error;


/// Occurrence count of every symbol present in some input. Symbols with no occurrence are absent.
pub type FrequencyTable = BTreeMap<u8, usize>;

/// Prefix-free mapping from every encoded symbol to its code.
pub type CodeTable = BTreeMap<u8, BitVec>;


/// Tie keys of leaves are their symbol values, so internal nodes start right after the byte range.
const FIRST_INTERNAL_TIE_KEY: usize = u8::MAX as usize + 1;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Node {

    Leaf { weight: usize, symbol: u8 },
    /// Children are indices into the tree's node arena.
    Internal { weight: usize, left: usize, right: usize },

}

impl Node {

    #[cfg(test)]
    const fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } |
            Node::Internal { weight, .. }
                => *weight
        }
    }

}


/// Huffman tree stored as an arena of nodes. The root is always the last node pushed.
#[derive(Debug, Clone)]
pub struct HuffmanTree {

    nodes: Vec<Node>,
    root: usize

}

impl HuffmanTree {

    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Nodes are ordered by `(weight, tie key)`, where a leaf's tie key is its symbol and an
    /// internal node's tie key grows with its creation order. The order is total, so equal
    /// frequency distributions always produce the same tree. The first node popped becomes the
    /// left child.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self, Error> {

        let mut nodes = Vec::with_capacity(frequencies.len() * 2);
        let mut queue = BinaryHeap::with_capacity(frequencies.len());

        for (&symbol, &weight) in frequencies {
            queue.push(Reverse((weight, symbol as usize, nodes.len())));
            nodes.push(Node::Leaf { weight, symbol });
        }

        let mut next_tie_key = FIRST_INTERNAL_TIE_KEY;

        let root = loop {

            let Reverse((weight, _, left)) = queue.pop().ok_or(Error::EmptyInput)?;

            let Some(Reverse((right_weight, _, right))) = queue.pop() else {
                break left;
            };

            let weight = weight + right_weight;

            queue.push(Reverse((weight, next_tie_key, nodes.len())));
            nodes.push(Node::Internal { weight, left, right });

            next_tie_key += 1;
        };

        log::trace!("Huffman tree: {} leaves, {} nodes", frequencies.len(), nodes.len());

        Ok(Self { nodes, root })
    }


    fn root(&self) -> &Node {
        &self.nodes[self.root]
    }


    #[cfg(test)]
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }


    #[cfg(test)]
    fn leaf_count(&self) -> usize {
        self.nodes.iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }


    /// Derives the code of every leaf: left edges are `0`, right edges `1`.
    /// A tree made of a single leaf assigns it the code `0`.
    pub fn code_table(&self) -> CodeTable {

        let mut table = CodeTable::new();

        match self.root() {
            Node::Leaf { symbol, .. } => {
                table.insert(*symbol, BitVec::new().with_bit(false));
            },
            Node::Internal { .. } => {
                self.assign_codes(self.root, BitVec::new(), &mut table);
            }
        }

        table
    }


    fn assign_codes(&self, index: usize, path: BitVec, table: &mut CodeTable) {

        match self.nodes[index] {

            Node::Leaf { symbol, .. } => {
                table.insert(symbol, path);
            },

            Node::Internal { left, right, .. } => {
                self.assign_codes(left, path.with_bit(false), table);

                let mut path = path;
                path.append_bit(true);
                self.assign_codes(right, path, table);
            }
        }
    }

}
