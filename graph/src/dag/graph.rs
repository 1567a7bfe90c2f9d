use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};
use txgraph_core::tx::{Transaction, TransactionId, TransactionOutpoint, TransactionView};

use super::node::{Node, NodeArena};

/// Dependency graph over transactions: an edge A -> B means B spends an output of A.
///
/// Transactions can be inserted in any order. Inputs that reference transactions
/// not inserted yet create stub nodes, promoted in place once their transaction arrives.
#[derive(Debug, Clone)]
pub struct TxGraph<T = Transaction> {
    pub(crate) arena: NodeArena<T>,
}

impl<T> Default for TxGraph<T> {
    fn default() -> Self {
        Self { arena: NodeArena::new() }
    }
}

impl<T: TransactionView> TxGraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `tx`, or refreshes the payload of the node already carrying its id.
    ///
    /// A refreshed payload that no longer spends an output its predecessor edges
    /// point at has those edges dropped before the new inputs are linked.
    pub fn insert(&mut self, tx: T) {
        let id = tx.id();
        let outpoints: Vec<TransactionOutpoint> = tx.outpoints().collect();

        for predecessor in self.stale_predecessors(id, &outpoints) {
            warn!("{} was re-inserted without spending from {}, dropping the old edges", id, predecessor);
            self.arena.unlink(predecessor, id);
        }

        let node = self.arena.get_or_insert(id);
        let promoted = node.is_stub() && !node.is_head();
        node.set_tx(tx);

        for outpoint in &outpoints {
            self.arena.get_or_insert(outpoint.transaction_id);
        }
        for outpoint in &outpoints {
            self.arena.link(outpoint.transaction_id, id, outpoint.index);
        }

        debug!("inserted {} ({} inputs{})", id, outpoints.len(), if promoted { ", promoted from stub" } else { "" });
    }

    fn stale_predecessors(&self, id: TransactionId, outpoints: &[TransactionOutpoint]) -> Vec<TransactionId> {
        let Some(node) = self.arena.get(&id) else {
            return Vec::new();
        };
        node.predecessors()
            .iter()
            .copied()
            .filter(|predecessor| {
                self.arena.get(predecessor).is_some_and(|pred| {
                    pred.successors()
                        .iter()
                        .any(|(index, succ)| *succ == id && !outpoints.contains(&TransactionOutpoint::new(*predecessor, *index)))
                })
            })
            .collect()
    }

    pub fn find_node(&self, id: &TransactionId) -> Option<&Node<T>> {
        self.arena.get(id)
    }

    pub fn find_tx(&self, id: &TransactionId) -> Option<&T> {
        self.arena.get(id).and_then(Node::tx)
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.arena.contains(id)
    }

    /// Number of nodes, stubs included
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn head_ids(&self) -> &[TransactionId] {
        self.arena.heads()
    }

    /// Nodes with no known successor, in the order they became heads
    pub fn heads(&self) -> Vec<&Node<T>> {
        self.arena.heads().iter().filter_map(|id| self.arena.get(id)).collect()
    }

    /// Every node reachable from the heads, each once
    pub fn all_nodes(&self) -> Vec<&Node<T>> {
        self.ancestry(self.arena.heads().iter().copied())
    }

    /// Nodes with no known predecessor: the funding boundary of the graph
    pub fn tails(&self) -> Vec<&Node<T>> {
        self.all_nodes().into_iter().filter(|node| node.is_tail()).collect()
    }

    /// Removes the edges from `predecessor` to `successor`, if any
    pub fn remove_edge(&mut self, predecessor: TransactionId, successor: TransactionId) {
        self.arena.unlink(predecessor, successor);
    }

    /// Breadth-first walk through predecessor edges, tier by tier, starting at `start`
    pub(crate) fn ancestry(&self, start: impl IntoIterator<Item = TransactionId>) -> Vec<&Node<T>> {
        let mut visited = HashSet::new();
        let mut queue: VecDeque<TransactionId> = start.into_iter().collect();
        let mut result = Vec::new();

        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = self.arena.get(&id) else {
                continue;
            };
            queue.extend(node.predecessors().iter().filter(|p| !visited.contains(*p)));
            result.push(node);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_invariants, fake_tx_id, TestTx};

    #[test]
    fn test_insert_single_transaction() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::new(0, &[]));

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.head_ids(), &[fake_tx_id(0)]);
        assert_eq!(graph.find_tx(&fake_tx_id(0)).map(|tx| tx.id), Some(fake_tx_id(0)));
        assert_invariants(&graph);
    }

    #[test]
    fn test_insert_creates_stub_predecessors() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::new(0, &[(1, 0), (2, 1)]));

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.head_ids(), &[fake_tx_id(0)]);
        let stub = graph.find_node(&fake_tx_id(2)).unwrap();
        assert!(stub.is_stub());
        assert_eq!(stub.successors().get(&1), Some(&fake_tx_id(0)));
        assert!(graph.find_tx(&fake_tx_id(2)).is_none());
        assert!(graph.contains(&fake_tx_id(2)));
        assert_invariants(&graph);
    }

    #[test]
    fn test_stub_promoted_in_place() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::new(0, &[(1, 0)]));
        graph.insert(TestTx::new(1, &[]));

        assert_eq!(graph.len(), 2);
        let node = graph.find_node(&fake_tx_id(1)).unwrap();
        assert!(!node.is_stub());
        assert_eq!(node.successor_ids(), vec![fake_tx_id(0)]);
        assert_eq!(graph.head_ids(), &[fake_tx_id(0)]);
        assert_invariants(&graph);
    }

    #[test]
    fn test_reinsert_is_idempotent() {
        let mut graph = TxGraph::new();
        let tx = TestTx::new(0, &[(1, 0), (1, 1)]);
        graph.insert(tx.clone());
        graph.insert(TestTx::new(1, &[]));
        let nodes = graph.all_nodes().len();

        graph.insert(tx);

        assert_eq!(graph.all_nodes().len(), nodes);
        assert_eq!(graph.find_node(&fake_tx_id(0)).unwrap().predecessors(), &[fake_tx_id(1)]);
        assert_eq!(graph.find_node(&fake_tx_id(1)).unwrap().successors().len(), 2);
        assert_eq!(graph.head_ids(), &[fake_tx_id(0)]);
        assert_invariants(&graph);
    }

    #[test]
    fn test_reinsert_with_other_inputs_replaces_edges() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::new(1, &[]));
        graph.insert(TestTx::new(2, &[]));
        graph.insert(TestTx::new(0, &[(1, 0), (2, 1)]));

        graph.insert(TestTx::new(0, &[(2, 0)]));

        assert_eq!(graph.find_node(&fake_tx_id(0)).unwrap().predecessors(), &[fake_tx_id(2)]);
        assert!(graph.find_node(&fake_tx_id(1)).unwrap().is_head());
        let spent: Vec<_> = graph.find_node(&fake_tx_id(2)).unwrap().successors().keys().copied().collect();
        assert_eq!(spent, vec![0]);
        assert_eq!(graph.head_ids(), &[fake_tx_id(0), fake_tx_id(1)]);
        assert_invariants(&graph);
    }

    #[test]
    fn test_scenario_three_transactions() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::new(0, &[(1, 0), (2, 1)]));
        assert_invariants(&graph);
        graph.insert(TestTx::new(1, &[]));
        assert_invariants(&graph);
        graph.insert(TestTx::new(2, &[]));
        assert_invariants(&graph);

        assert_eq!(graph.head_ids(), &[fake_tx_id(0)]);
        let mut tails: Vec<_> = graph.tails().iter().map(|n| n.id()).collect();
        tails.sort();
        assert_eq!(tails, vec![fake_tx_id(1), fake_tx_id(2)]);
        assert!(graph.tails().iter().all(|n| !n.is_stub()));
    }

    #[test]
    fn test_remove_edge_restores_head() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::new(0, &[(1, 0)]));
        graph.insert(TestTx::new(1, &[]));

        graph.remove_edge(fake_tx_id(1), fake_tx_id(0));

        assert_eq!(graph.head_ids(), &[fake_tx_id(0), fake_tx_id(1)]);
        assert!(graph.find_node(&fake_tx_id(0)).unwrap().is_tail());
        assert_invariants(&graph);
    }

    #[test]
    fn test_all_nodes_includes_stubs() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::new(0, &[(1, 0)]));
        graph.insert(TestTx::new(5, &[(1, 1)]));

        let mut ids: Vec<_> = graph.all_nodes().iter().map(|n| n.id()).collect();
        ids.sort();
        assert_eq!(ids, vec![fake_tx_id(0), fake_tx_id(1), fake_tx_id(5)]);
    }

    #[test]
    fn test_empty_graph() {
        let graph: TxGraph<TestTx> = TxGraph::new();
        assert!(graph.is_empty());
        assert!(graph.heads().is_empty());
        assert!(graph.tails().is_empty());
        assert!(graph.find_node(&fake_tx_id(0)).is_none());
    }
}
