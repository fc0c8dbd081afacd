//! The edge table: a validated (parent, child) column store.
//!
//! Tables keep the edges in the exact order the caller supplied them in and
//! are never sorted or re-grouped. Child lookups therefore scan the parent
//! column; build a [`ChildIndex`](crate::ChildIndex) when the same table is
//! expanded repeatedly.

use std::iter::FusedIterator;

use thiserror::Error;

use crate::{NodeId, Topology};

/// An edge-list encoding of a rooted tree or forest.
///
/// The table holds two parallel columns of equal length: the parent and the
/// child of every edge. Identifiers are validated on construction to be
/// positive; nothing else is checked. In particular the table may encode a
/// cyclic or otherwise malformed topology, which is only detected when a
/// traversal revisits a node.
///
/// # Example
///
/// ```
/// use clade::{EdgeTable, NodeId};
///
/// let table = EdgeTable::new([(4, 1), (4, 2), (4, 3)], 3).unwrap();
///
/// assert_eq!(table.edge_count(), 3);
/// assert_eq!(table.tip_count(), 3);
/// assert!(table.children_of(NodeId::new(4)).eq([1, 2, 3].map(NodeId::new)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeTable {
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
    ntip: u32,
    bound: u32,
}

impl EdgeTable {
    /// Creates a table from `(parent, child)` pairs in traversal order.
    ///
    /// `ntip` is the number of tip nodes; identifiers `1..=ntip` are treated
    /// as leaves during traversal.
    ///
    /// # Errors
    ///
    /// Fails with [`EdgeTableError::NodeOutOfRange`] when an edge references
    /// the identifier `0`.
    pub fn new(
        edges: impl IntoIterator<Item = (u32, u32)>,
        ntip: u32,
    ) -> Result<Self, EdgeTableError> {
        let edges = edges.into_iter();
        let (size_hint, _) = edges.size_hint();

        let mut parents = Vec::with_capacity(size_hint);
        let mut children = Vec::with_capacity(size_hint);
        let mut bound = ntip;

        for (edge, (parent, child)) in edges.enumerate() {
            for node in [parent, child] {
                if node == 0 {
                    return Err(EdgeTableError::NodeOutOfRange {
                        edge,
                        node: node as i64,
                    });
                }
                bound = bound.max(node);
            }

            parents.push(NodeId::new(parent));
            children.push(NodeId::new(child));
        }

        Ok(Self {
            parents,
            children,
            ntip,
            bound,
        })
    }

    /// Creates a table from a column-major buffer, the layout in which host
    /// environments hand over an edge matrix.
    ///
    /// The buffer has length `2 * E`: the first half is the parent column
    /// and the second half the child column.
    ///
    /// # Errors
    ///
    ///  - [`EdgeTableError::ColumnMismatch`] when the buffer length is odd.
    ///  - [`EdgeTableError::NodeOutOfRange`] when a value is not a positive
    ///    integer representable as `u32`.
    ///
    /// # Example
    ///
    /// ```
    /// use clade::EdgeTable;
    ///
    /// let table = EdgeTable::from_columns(&[4, 4, 4, 1, 2, 3], 3).unwrap();
    /// assert_eq!(table, EdgeTable::new([(4, 1), (4, 2), (4, 3)], 3).unwrap());
    /// ```
    pub fn from_columns(buffer: &[i64], ntip: u32) -> Result<Self, EdgeTableError> {
        if buffer.len() % 2 != 0 {
            return Err(EdgeTableError::ColumnMismatch);
        }

        let num_edges = buffer.len() / 2;
        let (parents, children) = buffer.split_at(num_edges);

        let column = |column: &[i64]| -> Result<Vec<NodeId>, EdgeTableError> {
            column
                .iter()
                .enumerate()
                .map(|(edge, &node)| {
                    u32::try_from(node)
                        .ok()
                        .filter(|&id| id > 0)
                        .map(NodeId::new)
                        .ok_or(EdgeTableError::NodeOutOfRange { edge, node })
                })
                .collect()
        };

        let parents = column(parents)?;
        let children = column(children)?;

        let bound = parents
            .iter()
            .chain(&children)
            .map(|node| node.get())
            .fold(ntip, u32::max);

        Ok(Self {
            parents,
            children,
            ntip,
            bound,
        })
    }

    /// Returns the number of edges in the table.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.parents.len()
    }

    /// Returns the number of tip nodes declared for the table.
    #[inline]
    pub fn tip_count(&self) -> u32 {
        self.ntip
    }

    /// Whether the table contains no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// The parent column, in table order.
    #[inline]
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// The child column, in table order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The highest node identifier referenced by the table, or `ntip` for
    /// an empty table. Identifiers above this bound belong to no edge.
    #[inline]
    pub fn node_bound(&self) -> usize {
        self.bound as usize
    }

    /// Iterates over the children of a node by scanning the parent column.
    ///
    /// Children are yielded in the order their edges appear in the table,
    /// which is not necessarily numeric order. A node that appears in no
    /// edge yields nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use clade::{EdgeTable, NodeId};
    ///
    /// let table = EdgeTable::new([(4, 3), (5, 4), (4, 1), (4, 2)], 3).unwrap();
    ///
    /// assert!(table.children_of(NodeId::new(4)).eq([3, 1, 2].map(NodeId::new)));
    /// assert_eq!(table.children_of(NodeId::new(1)).count(), 0);
    /// ```
    #[inline]
    pub fn children_of(&self, node: NodeId) -> ChildrenOf<'_> {
        ChildrenOf {
            parents: &self.parents,
            children: &self.children,
            node,
            next: 0,
        }
    }
}

impl Topology for EdgeTable {
    type Children<'a> = ChildrenOf<'a>;

    #[inline]
    fn children_of(&self, node: NodeId) -> ChildrenOf<'_> {
        self.children_of(node)
    }

    #[inline]
    fn tip_count(&self) -> u32 {
        self.ntip
    }

    #[inline]
    fn node_bound(&self) -> usize {
        self.node_bound()
    }
}

/// Iterator created by [`EdgeTable::children_of`].
#[derive(Clone)]
pub struct ChildrenOf<'a> {
    parents: &'a [NodeId],
    children: &'a [NodeId],
    node: NodeId,
    next: usize,
}

impl<'a> Iterator for ChildrenOf<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.parents.len() {
            let edge = self.next;
            self.next += 1;

            if self.parents[edge] == self.node {
                return Some(self.children[edge]);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.parents.len() - self.next))
    }
}

impl<'a> FusedIterator for ChildrenOf<'a> {}

/// Error returned when constructing an [`EdgeTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeTableError {
    #[error("parent and child columns differ in length")]
    ColumnMismatch,
    #[error("edge {edge} references node {node}, which is not a valid identifier")]
    NodeOutOfRange { edge: usize, node: i64 },
}
