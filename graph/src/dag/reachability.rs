use std::cmp::Ordering;
use std::collections::HashSet;
use txgraph_core::tx::{TransactionId, TransactionView};

use super::graph::TxGraph;

impl<T: TransactionView> TxGraph<T> {
    /// True if `ancestor` is reachable from `descendant` through predecessor edges
    pub fn is_ancestor_of(&self, ancestor: &TransactionId, descendant: &TransactionId) -> bool {
        let Some(start) = self.arena.get(descendant) else {
            return false;
        };

        let mut visited = HashSet::new();
        let mut stack: Vec<TransactionId> = start.predecessors().to_vec();
        while let Some(current) = stack.pop() {
            if current == *ancestor {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(node) = self.arena.get(&current) {
                stack.extend(node.predecessors().iter().filter(|p| !visited.contains(*p)));
            }
        }

        false
    }

    /// Orders two transactions by dependency.
    ///
    /// `Less` when `a` must be processed before `b` (it is one of `b`'s ancestors),
    /// `Greater` for the reverse, `Equal` when neither depends on the other.
    pub fn compare_nodes(&self, a: &TransactionId, b: &TransactionId) -> Ordering {
        if a == b {
            Ordering::Equal
        } else if self.is_ancestor_of(a, b) {
            Ordering::Less
        } else if self.is_ancestor_of(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
