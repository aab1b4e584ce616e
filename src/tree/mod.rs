use std::fmt;

use crate::{error::Result, frequency::FrequencyTable, priority_queue::MinPriorityQueue};

/// A node of the Huffman merge tree.
///
/// Internal nodes own their two children; the weight of any node is the sum of the weights of
/// the leaves below it.
#[derive(Clone, Debug)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: char, weight: usize) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Joins `left` and `right` under a new internal node.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[inline(always)]
    pub fn weight(&self) -> usize {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

// Nodes are ordered by weight alone, ties are left to the queue.
impl Ord for HuffmanNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl PartialOrd for HuffmanNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HuffmanNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight() == other.weight()
    }
}

impl Eq for HuffmanNode {}

/// The Huffman tree of a text. `root` is `None` only for an empty alphabet.
#[derive(Clone, Debug, Default)]
pub struct HuffmanTree {
    root: Option<HuffmanNode>,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves enter the queue in ascending symbol order and equal weights leave it in insertion
    /// order, so the resulting shape is fully determined by `frequencies`. The first node
    /// extracted becomes the left child of the merge.
    ///
    /// # Examples
    ///
    /// ```
    /// use text_huffman::{frequency::FrequencyTable, tree::HuffmanTree};
    ///
    /// let tree = HuffmanTree::build(&FrequencyTable::from_text("abacabad")).unwrap();
    /// assert_eq!(tree.weight(), 8);
    /// assert_eq!(tree.leaf_count(), 4);
    /// ```
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut queue: MinPriorityQueue<HuffmanNode> = frequencies
            .iter()
            .map(|(symbol, weight)| HuffmanNode::leaf(symbol, weight))
            .collect();

        if queue.is_empty() {
            return Ok(Self::default());
        }

        while queue.len() > 1 {
            let a = queue.extract_min()?;
            let b = queue.extract_min()?;
            queue.insert(HuffmanNode::merge(a, b));
        }

        Ok(Self { root: Some(queue.extract_min()?) })
    }

    pub fn root(&self) -> Option<&HuffmanNode> {
        self.root.as_ref()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total weight of the tree, which is the length of the text it was built from.
    pub fn weight(&self) -> usize {
        self.root.as_ref().map_or(0, HuffmanNode::weight)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(node, _)| node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Pre-order walk yielding every node with its depth, using an explicit stack.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { stack: self.root.iter().map(|root| (root, 0)).collect() }
    }
}

pub struct Nodes<'a> {
    stack: Vec<(&'a HuffmanNode, usize)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (&'a HuffmanNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;

        if let HuffmanNode::Internal { left, right, .. } = node {
            self.stack.push((&**right, depth + 1));
            self.stack.push((&**left, depth + 1));
        }

        Some((node, depth))
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = &self.root else {
            return writeln!(f, "(empty)");
        };

        let mut stack = vec![(root, 0, "root")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                HuffmanNode::Leaf { symbol, weight } => {
                    writeln!(f, "{}{} -> Leaf {:?} [weight: {}]", indent, label, symbol, weight)?;
                }
                HuffmanNode::Internal { weight, left, right } => {
                    writeln!(f, "{}{} -> Internal [weight: {}]", indent, label, weight)?;
                    stack.push((&**right, depth + 1, "R"));
                    stack.push((&**left, depth + 1, "L"));
                }
            }
        }

        Ok(())
    }
}
