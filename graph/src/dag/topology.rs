use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{trace, warn};
use txgraph_core::tx::{TransactionId, TransactionView};

use super::graph::TxGraph;

impl<T: TransactionView> TxGraph<T> {
    /// Layer index of every node: 0 without predecessors, otherwise one past the
    /// deepest predecessor (longest-path layering). Stubs are included.
    pub fn layer_indices(&self) -> HashMap<TransactionId, usize> {
        let mut layers: HashMap<TransactionId, usize> = HashMap::with_capacity(self.len());
        let mut visiting = HashSet::new();
        let mut stack: Vec<(TransactionId, bool)> = self.head_ids().iter().rev().map(|id| (*id, false)).collect();

        while let Some((id, expanded)) = stack.pop() {
            if layers.contains_key(&id) {
                continue;
            }
            let Some(node) = self.arena.get(&id) else {
                continue;
            };

            if expanded {
                let layer = node.predecessors().iter().filter_map(|p| layers.get(p)).map(|l| l + 1).max().unwrap_or(0);
                layers.insert(id, layer);
                continue;
            }

            if !visiting.insert(id) {
                warn!("{} reached again before its layer was known, skipping cycle", id);
                continue;
            }
            stack.push((id, true));
            stack.extend(node.predecessors().iter().filter(|p| !layers.contains_key(*p)).map(|p| (*p, false)));
        }

        layers
    }

    /// Transactions grouped so that every transaction comes in a strictly later
    /// group than the transactions it spends from. Stubs shape the layering but are
    /// left out, and groups left empty are dropped. Each group is ordered by id.
    pub fn topological_layers(&self) -> Vec<Vec<&T>> {
        let mut grouped: BTreeMap<usize, Vec<(TransactionId, &T)>> = BTreeMap::new();
        for (id, layer) in self.layer_indices() {
            if let Some(tx) = self.find_tx(&id) {
                grouped.entry(layer).or_default().push((id, tx));
            }
        }

        let layers: Vec<Vec<&T>> = grouped
            .into_values()
            .map(|mut group| {
                group.sort_by_key(|(id, _)| *id);
                group.into_iter().map(|(_, tx)| tx).collect()
            })
            .collect();
        trace!("computed {} layers", layers.len());
        layers
    }

    /// The layers flattened into a single processing order
    pub fn in_order_txs(&self) -> Vec<&T> {
        self.topological_layers().into_iter().flatten().collect()
    }
}
