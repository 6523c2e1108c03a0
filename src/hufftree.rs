use std::cmp::Ordering;
use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        symbol: char,
    },
    Internal {
        weight: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: char, weight: usize) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Joins two subtrees; `a` becomes the left (bit 0) child.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }
}

/// Heap slot ordered by `(weight, seq)`.
///
/// Leaves get `seq` in ascending symbol order and every merged node gets the
/// next unused number, so no two entries ever compare equal and extraction
/// order is fully determined by the frequency table.
#[derive(Debug)]
struct Ranked {
    seq: usize,
    node: HuffNode,
}

impl Ranked {
    fn key(&self) -> (usize, usize) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Binary prefix tree built greedily from a frequency table.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn from_text(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text)?;
        Self::from_frequencies(&frequencies)
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let nodes: Vec<Ranked> = frequencies.iter()
            .enumerate()
            .map(|(seq, (symbol, count))| Ranked { seq, node: HuffNode::new(symbol, count) })
            .collect();

        // A lone symbol stays a bare leaf; the code table gives it "0".
        if nodes.len() == 1 {
            let root = nodes.into_iter()
                .next()
                .map(|ranked| ranked.node)
                .ok_or(HuffmanError::EmptyInput)?;
            return Ok(HuffmanTree { root });
        }

        Self::build_from_heap(MinHeap::build(nodes))
    }

    fn build_from_heap(mut heap: MinHeap<Ranked>) -> Result<Self> {
        let mut next_seq = heap.heap_size();

        while heap.heap_size() > 1 {
            let x = heap.extract_min().ok_or(HuffmanError::EmptyInput)?;
            let y = heap.extract_min().ok_or(HuffmanError::EmptyInput)?;

            heap.insert(Ranked { seq: next_seq, node: HuffNode::merge(x.node, y.node) });
            next_seq += 1;
        }

        let root = heap.extract_min()
            .map(|ranked| ranked.node)
            .ok_or(HuffmanError::EmptyInput)?;

        Ok(HuffmanTree { root })
    }

    /// Sum of all leaf weights, i.e. the number of encoded symbols.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => count += 1,
                HuffNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(&self.root, 0usize, "root")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                HuffNode::Leaf { symbol, weight } => {
                    writeln!(f, "{indent}{label}-> Leaf: {symbol:?} [weight: {weight}]")?;
                }
                HuffNode::Internal { weight, left, right } => {
                    writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                    stack.push((right.as_ref(), depth + 1, "R"));
                    stack.push((left.as_ref(), depth + 1, "L"));
                }
            }
        }
        Ok(())
    }
}
