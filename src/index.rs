//! Parent-indexed child lookup.
//!
//! Scanning the whole edge table once per visited node makes an expansion
//! cost O(E) per step. [`ChildIndex`] pays one grouping pass up front and
//! serves every later child lookup from a contiguous slice.

use std::iter::Copied;
use std::slice;

use crate::{EdgeTable, NodeId, Topology};

/// Children of every node of an [`EdgeTable`], grouped by parent.
///
/// The index stores one offset per identifier up to the table's node bound
/// and a single children array of length `edge_count`, so a node's children
/// are a slice lookup. The order of children within a parent is the order
/// their edges appear in the table.
///
/// # Example
///
/// ```
/// use clade::{ChildIndex, EdgeTable, NodeId, Topology};
///
/// let table = EdgeTable::new([(5, 4), (4, 1), (4, 2), (4, 3)], 3).unwrap();
/// let index = ChildIndex::new(&table);
///
/// assert_eq!(index.children(NodeId::new(4)), [1, 2, 3].map(NodeId::new));
/// assert_eq!(
///     index.descendants(NodeId::new(5)).unwrap(),
///     [5, 4, 1, 2, 3].map(NodeId::new),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildIndex {
    /// `offsets[id]..offsets[id + 1]` is the slice of `id`'s children.
    offsets: Vec<u32>,
    children: Vec<NodeId>,
    ntip: u32,
}

impl ChildIndex {
    /// Groups the child column of a table by parent.
    ///
    /// Runs in O(E + V): one counting pass over the parent column, a prefix
    /// sum over the identifier range, and one placement pass.
    pub fn new(table: &EdgeTable) -> Self {
        let mut offsets = vec![0u32; table.node_bound() + 2];

        for parent in table.parents() {
            offsets[parent.index() + 1] += 1;
        }

        for node in 1..offsets.len() {
            offsets[node] += offsets[node - 1];
        }

        let mut children = vec![NodeId::default(); table.edge_count()];
        let mut cursor = offsets.clone();

        for (parent, &child) in table.parents().iter().zip(table.children()) {
            let slot = cursor[parent.index()] as usize;
            children[slot] = child;
            cursor[parent.index()] += 1;
        }

        Self {
            offsets,
            children,
            ntip: table.tip_count(),
        }
    }

    /// The children of a node, in edge-table order.
    ///
    /// Identifiers beyond the indexed bound yield the empty slice.
    #[inline]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.offsets.get(node.index()..node.index() + 2) {
            Some(&[start, end]) => &self.children[start as usize..end as usize],
            _ => &[],
        }
    }

    /// The number of children of a node.
    #[inline]
    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }
}

impl Topology for ChildIndex {
    type Children<'a> = Copied<slice::Iter<'a, NodeId>>;

    #[inline]
    fn children_of(&self, node: NodeId) -> Self::Children<'_> {
        self.children(node).iter().copied()
    }

    #[inline]
    fn tip_count(&self) -> u32 {
        self.ntip
    }

    #[inline]
    fn node_bound(&self) -> usize {
        self.offsets.len() - 2
    }
}
