//! Descendant expansion over edge-list encoded phylogenetic trees.
//!
//! A rooted tree (or forest) is described by a table of `(parent, child)`
//! edges in which node identifiers follow the numbering convention of
//! phylogenetic software: tips (leaves) occupy `1..=ntip` and internal nodes
//! sit above `ntip`. [`EdgeTable`] stores such a table after validating the
//! identifiers, and [`Topology::descendants`] expands a node into the
//! pre-order sequence of the clade rooted at it.
//!
//! The expansion is available in two flavours. [`EdgeTable`] itself answers
//! child lookups by scanning the parent column, which keeps the table in the
//! exact shape the caller supplied it in. [`ChildIndex`] groups the child
//! column by parent once, so that repeated expansions over the same table
//! run in time linear in the subtree instead of linear in the whole table
//! per visited node.
//!
//! ```
//! use clade::{EdgeTable, NodeId, Topology};
//!
//! let table = EdgeTable::new([(5, 4), (4, 1), (4, 2), (4, 3)], 3).unwrap();
//! let nodes = table.descendants(NodeId::new(5)).unwrap();
//!
//! assert_eq!(nodes, [5, 4, 1, 2, 3].map(NodeId::new));
//! ```

use std::fmt;

pub mod edges;
pub mod index;
pub mod traverse;

#[cfg(feature = "pyo3")]
pub mod python;

pub use crate::edges::{ChildrenOf, EdgeTable, EdgeTableError};
pub use crate::index::ChildIndex;
pub use crate::traverse::{Topology, TraverseError};

/// Identifier of a node in an edge table.
///
/// Identifiers are 1-based: `1..=ntip` name the tips of the tree and
/// anything above `ntip` names an internal node. The value `0` is never
/// produced by a validated [`EdgeTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node identifier from its raw 1-based value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw 1-based identifier.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the identifier as a `usize`, for indexing per-node storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
