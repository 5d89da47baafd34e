use super::FrequencyTable;
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Index of a node inside a [`HuffmanTree`]'s arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(u8),
    /// `right` is only ever `None` for the root of a single-symbol tree,
    /// where every symbol is the one bit `0`.
    Internal { left: NodeId, right: Option<NodeId> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Sum of the frequencies of every leaf below (and including) this node
    pub frequency: u64,
    pub kind: NodeKind,
}

/// A Huffman tree stored as an arena. Leaves occupy the first slots in the
/// order of the [`FrequencyTable`] they were built from, merged nodes follow in
/// the order they were created. Children are always owned by exactly one parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    leaf_count: usize,
}

/// An entry of the builder's priority queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MergeCandidate {
    pub frequency: u64,
    /// Creation order of the node: table order for leaves, then one past the
    /// previous number for each merged node
    pub order: u32,
    pub node: NodeId,
}

/// Decides which of two candidates is merged first: the lower frequency wins,
/// and among equal frequencies the node that was created first wins.
pub fn merge_priority(left: &MergeCandidate, right: &MergeCandidate) -> Ordering {
    match left.frequency.cmp(&right.frequency) {
        Ordering::Equal => left.order.cmp(&right.order),
        other => other,
    }
}

// BinaryHeap pops the greatest element, so the comparison is flipped
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        merge_priority(other, self)
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HuffmanTree {
    /// Build the tree for `table`. Returns `None` if the table is empty, because
    /// there is nothing to build a code for.
    ///
    /// Repeatedly merges the two candidates that [`merge_priority`] orders first.
    /// The first one taken becomes the left child.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        if table.is_empty() {
            return None;
        }
        let leaf_count = table.len();
        let mut nodes = Vec::with_capacity(2 * leaf_count);
        let mut queue = BinaryHeap::with_capacity(leaf_count);

        for (symbol, frequency) in table.iter() {
            let node = NodeId(nodes.len() as u32);
            nodes.push(Node {
                frequency,
                kind: NodeKind::Leaf(symbol),
            });
            queue.push(MergeCandidate {
                frequency,
                order: node.0,
                node,
            });
        }

        if leaf_count == 1 {
            let frequency = nodes[0].frequency;
            nodes.push(Node {
                frequency,
                kind: NodeKind::Internal {
                    left: NodeId(0),
                    right: None,
                },
            });
            tracing::trace!("single symbol tree, synthesized root over the only leaf");
            return Some(HuffmanTree {
                nodes,
                root: NodeId(1),
                leaf_count,
            });
        }

        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
                break;
            };
            let node = NodeId(nodes.len() as u32);
            let frequency = left.frequency.saturating_add(right.frequency);
            nodes.push(Node {
                frequency,
                kind: NodeKind::Internal {
                    left: left.node,
                    right: Some(right.node),
                },
            });
            tracing::trace!(
                left = left.order,
                right = right.order,
                frequency,
                "merged nodes"
            );
            queue.push(MergeCandidate {
                frequency,
                order: node.0,
                node,
            });
        }

        let root = queue.pop()?.node;
        Some(HuffmanTree {
            nodes,
            root,
            leaf_count,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of internal nodes created by merging. `leaf_count - 1` for every
    /// tree with at least two leaves, zero for a single-symbol tree.
    pub fn merge_count(&self) -> usize {
        if self.leaf_count == 1 {
            0
        } else {
            self.nodes.len() - self.leaf_count
        }
    }

    /// Follow one edge down from `from`. `None` if `from` is a leaf or the edge
    /// does not exist.
    pub fn child(&self, from: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(from).kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, right } => {
                if bit {
                    right
                } else {
                    Some(left)
                }
            }
        }
    }

    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.node(id).kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }
}
