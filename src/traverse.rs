//! Pre-order expansion of a node into its clade.
//!
//! The traversal is defined once on the [`Topology`] trait so that it runs
//! unchanged on top of any child-lookup strategy: the linear scan of
//! [`EdgeTable`](crate::EdgeTable) or the grouped slices of
//! [`ChildIndex`](crate::ChildIndex).

use bitvec::prelude::*;
use thiserror::Error;

use crate::NodeId;

/// Child lookup over an edge-list encoded tree.
///
/// Implementors only answer local questions: the children of a node, the
/// tip threshold, and an upper bound on the identifiers in play. The clade
/// expansion itself is a provided method.
pub trait Topology {
    /// Iterator over the children of a node, in edge-table order.
    type Children<'a>: Iterator<Item = NodeId>
    where
        Self: 'a;

    /// Iterates over the children of a node in edge-table order.
    fn children_of(&self, node: NodeId) -> Self::Children<'_>;

    /// The number of tip nodes; identifiers `1..=tip_count` are leaves.
    fn tip_count(&self) -> u32;

    /// The highest node identifier referenced by the topology.
    fn node_bound(&self) -> usize;

    /// Whether a node is a tip. Tips are never expanded during traversal.
    #[inline]
    fn is_tip(&self, node: NodeId) -> bool {
        node.get() <= self.tip_count()
    }

    /// Expands a node into the pre-order sequence of its clade.
    ///
    /// The first element is `node` itself; the remaining elements are all
    /// strict descendants. Children follow their parent in edge-table
    /// order and each child's subtree is spliced in immediately after the
    /// child, before any of its later siblings. The queried node is always
    /// expanded, even when it is a tip; tips encountered below it are not.
    ///
    /// A node that appears in no edge produces the singleton sequence
    /// holding just the node, which doubles as the answer for tips and for
    /// identifiers absent from the table altogether.
    ///
    /// # Errors
    ///
    /// Fails with [`TraverseError::Cycle`] when a node is reached twice.
    /// This guards the traversal against cyclic edge tables, which would
    /// otherwise never terminate, and also fires when two nodes of the
    /// table share a child.
    ///
    /// # Example
    ///
    /// ```
    /// use clade::{EdgeTable, NodeId, Topology};
    ///
    /// let table = EdgeTable::new([(4, 1), (4, 2), (4, 3)], 3).unwrap();
    ///
    /// let clade = table.descendants(NodeId::new(4)).unwrap();
    /// assert_eq!(clade, [4, 1, 2, 3].map(NodeId::new));
    ///
    /// let tip = table.descendants(NodeId::new(1)).unwrap();
    /// assert_eq!(tip, [NodeId::new(1)]);
    /// ```
    fn descendants(&self, node: NodeId) -> Result<Vec<NodeId>, TraverseError> {
        let bound = self.node_bound().max(node.index());
        let mut visited = bitvec![0; bound + 1];
        visited.set(node.index(), true);

        let mut nodes = vec![node];
        let mut stack: Vec<NodeId> = self.children_of(node).collect();
        stack.reverse();

        while let Some(next) = stack.pop() {
            if visited.replace(next.index(), true) {
                return Err(TraverseError::Cycle(next));
            }

            nodes.push(next);

            if !self.is_tip(next) {
                let mark = stack.len();
                stack.extend(self.children_of(next));
                stack[mark..].reverse();
            }
        }

        Ok(nodes)
    }
}

/// Error returned by [`Topology::descendants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraverseError {
    #[error("node {0} was reached twice; the edge table does not encode a tree")]
    Cycle(NodeId),
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{ChildIndex, EdgeTable};

    fn table(edges: &[(u32, u32)], ntip: u32) -> EdgeTable {
        EdgeTable::new(edges.iter().copied(), ntip).unwrap()
    }

    #[rstest]
    #[case(&[(4, 1), (4, 2), (4, 3)], 3, 4, &[4, 1, 2, 3])]
    #[case(&[(5, 4), (4, 1), (4, 2), (4, 3)], 3, 5, &[5, 4, 1, 2, 3])]
    #[case(&[(5, 4), (4, 1), (4, 2), (4, 3)], 3, 4, &[4, 1, 2, 3])]
    #[case(&[(5, 4), (4, 1), (4, 2), (4, 3)], 3, 1, &[1])]
    #[case(&[(4, 3), (4, 1), (4, 2)], 3, 4, &[4, 3, 1, 2])]
    #[case(&[(6, 5), (6, 3), (5, 1), (5, 2)], 3, 6, &[6, 5, 1, 2, 3])]
    fn expands_clade(
        #[case] edges: &[(u32, u32)],
        #[case] ntip: u32,
        #[case] node: u32,
        #[case] expect: &[u32],
    ) {
        let table = table(edges, ntip);
        let expect: Vec<_> = expect.iter().copied().map(NodeId::new).collect();

        assert_eq!(table.descendants(NodeId::new(node)).unwrap(), expect);
        assert_eq!(
            ChildIndex::new(&table).descendants(NodeId::new(node)).unwrap(),
            expect
        );
    }

    #[test]
    fn isolated_node_is_a_singleton() {
        let table = table(&[(4, 1), (4, 2), (4, 3)], 3);

        let nodes = table.descendants(NodeId::new(9)).unwrap();
        assert_eq!(nodes, [NodeId::new(9)]);
    }

    #[test]
    fn subtree_follows_child_before_later_siblings() {
        // 7 -> (5, 6), 5 -> (1, 2), 6 -> (3, 4); edges deliberately unsorted.
        let table = table(&[(7, 5), (6, 3), (5, 1), (7, 6), (5, 2), (6, 4)], 4);

        let nodes = table.descendants(NodeId::new(7)).unwrap();
        assert_eq!(nodes, [7, 5, 1, 2, 6, 3, 4].map(NodeId::new));
    }

    #[test]
    fn two_node_cycle_is_reported() {
        let table = table(&[(4, 5), (5, 4)], 3);

        let result = table.descendants(NodeId::new(4));
        assert_eq!(result, Err(TraverseError::Cycle(NodeId::new(4))));
    }

    #[test]
    fn self_loop_is_reported() {
        let table = table(&[(4, 4)], 3);

        let result = table.descendants(NodeId::new(4));
        assert_eq!(result, Err(TraverseError::Cycle(NodeId::new(4))));
    }

    #[test]
    fn shared_child_is_reported() {
        // Both 5 and 4 claim child 3; the revisit trips the guard.
        let table = table(&[(5, 4), (5, 3), (4, 3)], 3);

        let result = table.descendants(NodeId::new(5));
        assert_eq!(result, Err(TraverseError::Cycle(NodeId::new(3))));
    }

    #[test]
    fn cycle_outside_the_queried_clade_is_not_visited() {
        let table = table(&[(4, 1), (6, 7), (7, 6)], 3);

        let nodes = table.descendants(NodeId::new(4)).unwrap();
        assert_eq!(nodes, [4, 1].map(NodeId::new));
    }

    /// A random rooted tree with tips `1..=ntip` and internal nodes
    /// `ntip+1..=ntip+internals`, rooted at `ntip + 1`. Every non-root node
    /// picks a parent among the internal nodes closer to the root, so the
    /// result is acyclic by construction; the edges are then shuffled.
    fn arb_tree() -> impl Strategy<Value = (EdgeTable, NodeId)> {
        (1u32..8, 2u32..8)
            .prop_flat_map(|(ntip, internals)| {
                let picks = prop::collection::vec(any::<prop::sample::Index>(), ntip as usize);
                (Just(ntip), Just(internals), picks)
            })
            .prop_flat_map(|(ntip, internals, tip_picks)| {
                let root = ntip + 1;
                let mut edges = Vec::new();

                for (tip, pick) in (1..=ntip).zip(&tip_picks) {
                    let parent = root + pick.index(internals as usize) as u32;
                    edges.push((parent, tip));
                }

                for internal in root + 1..=ntip + internals {
                    edges.push((internal - 1, internal));
                }

                (Just(ntip), Just(root), Just(edges).prop_shuffle())
            })
            .prop_map(|(ntip, root, edges)| {
                let table = EdgeTable::new(edges, ntip).unwrap();
                (table, NodeId::new(root))
            })
    }

    proptest! {
        #[test]
        fn root_expansion_covers_every_edge((table, root) in arb_tree()) {
            let nodes = table.descendants(root).unwrap();

            prop_assert_eq!(nodes.len(), table.edge_count() + 1);
            prop_assert_eq!(nodes[0], root);

            let mut sorted = nodes.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), nodes.len());
        }

        #[test]
        fn scan_and_index_agree((table, _root) in arb_tree()) {
            let index = ChildIndex::new(&table);

            for id in 1..=table.node_bound() as u32 {
                let node = NodeId::new(id);
                prop_assert_eq!(table.descendants(node), index.descendants(node));
            }
        }

        #[test]
        fn expansion_is_pure((table, root) in arb_tree()) {
            prop_assert_eq!(table.descendants(root), table.descendants(root));
        }
    }
}
