//! Lightweight transactions with chosen ids, for building graphs in tests.

use std::collections::HashSet;
use txgraph_core::tx::{ScriptPublicKey, TransactionId, TransactionOutpoint, TransactionOutput, TransactionView};
use txgraph_core::Hash;

use crate::dag::TxGraph;

pub(crate) fn fake_tx_id(i: u64) -> TransactionId {
    Hash::from_u64_word(i)
}

pub(crate) fn p2pkh_output(value: u64, key: u8) -> TransactionOutput {
    TransactionOutput::new(value, ScriptPublicKey::p2pkh(&[key; 20]))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TestTx {
    pub id: TransactionId,
    pub outpoints: Vec<TransactionOutpoint>,
    pub outputs: Vec<TransactionOutput>,
}

impl TestTx {
    /// Transaction `i` spending `(tx, output index)` pairs, with three unwatched outputs
    pub fn new(i: u64, spends: &[(u64, u32)]) -> Self {
        Self::paying(i, spends, (0..3).map(|_| p2pkh_output(1000, 0)).collect())
    }

    pub fn paying(i: u64, spends: &[(u64, u32)], outputs: Vec<TransactionOutput>) -> Self {
        let outpoints = spends.iter().map(|(tx, index)| TransactionOutpoint::new(fake_tx_id(*tx), *index)).collect();
        Self { id: fake_tx_id(i), outpoints, outputs }
    }
}

impl TransactionView for TestTx {
    fn id(&self) -> TransactionId {
        self.id
    }

    fn outpoints(&self) -> impl Iterator<Item = TransactionOutpoint> + '_ {
        self.outpoints.iter().copied()
    }

    fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }
}

/// Checks that every edge is mirrored on both sides and that the head list is
/// exactly the set of nodes without successors.
pub(crate) fn assert_invariants<T: TransactionView>(graph: &TxGraph<T>) {
    let nodes = graph.all_nodes();
    assert_eq!(nodes.len(), graph.len(), "every node must be reachable from the heads");

    for node in &nodes {
        let distinct: HashSet<_> = node.predecessors().iter().collect();
        assert_eq!(distinct.len(), node.predecessors().len(), "duplicate predecessor on {}", node.id());

        for (index, successor) in node.successors() {
            let succ = graph.find_node(successor).expect("successor must exist");
            let count = succ.predecessors().iter().filter(|p| **p == node.id()).count();
            assert_eq!(count, 1, "{} spends output {} of {} but lists it {} times", successor, index, node.id(), count);
        }
        for predecessor in node.predecessors() {
            let pred = graph.find_node(predecessor).expect("predecessor must exist");
            assert!(
                pred.successors().values().any(|s| *s == node.id()),
                "{} lists {} as predecessor without a mirrored successor edge",
                node.id(),
                predecessor
            );
        }
    }

    let heads: HashSet<_> = graph.head_ids().iter().copied().collect();
    assert_eq!(heads.len(), graph.head_ids().len(), "duplicate head");
    let expected: HashSet<_> = nodes.iter().filter(|n| n.is_head()).map(|n| n.id()).collect();
    assert_eq!(heads, expected);
}

/// Seventeen transactions, ids 0..=16. Tails are 1, 11, 12 and 13; heads are 0, 3, 4, 15 and 16.
pub(crate) fn fixture_txs() -> Vec<TestTx> {
    vec![
        TestTx::new(0, &[(13, 0)]),
        TestTx::new(1, &[]),
        TestTx::new(2, &[(1, 0), (10, 0)]),
        TestTx::new(3, &[(2, 1), (5, 0), (7, 0)]),
        TestTx::new(4, &[(7, 1)]),
        TestTx::new(5, &[(6, 0)]),
        TestTx::new(6, &[(8, 0), (9, 0)]),
        TestTx::new(7, &[(6, 1)]),
        TestTx::new(8, &[(10, 1)]),
        TestTx::new(9, &[(10, 2), (12, 0)]),
        TestTx::new(10, &[(11, 0)]),
        TestTx::new(11, &[]),
        TestTx::new(12, &[]),
        TestTx::new(13, &[]),
        TestTx::new(14, &[(2, 0)]),
        TestTx::new(15, &[(14, 0)]),
        TestTx::new(16, &[(14, 1)]),
    ]
}
