use std::collections::{BTreeMap, HashMap};
use tracing::warn;
use txgraph_core::tx::{TransactionId, TransactionIndexType};

/// A graph vertex keyed by transaction id.
///
/// A node without a payload is a stub: it exists because another transaction
/// spends one of its outputs, but its own transaction has not been inserted.
#[derive(Debug, Clone)]
pub struct Node<T> {
    id: TransactionId,
    tx: Option<T>,
    predecessors: Vec<TransactionId>,
    successors: BTreeMap<TransactionIndexType, TransactionId>,
}

impl<T> Node<T> {
    pub fn new(id: TransactionId) -> Self {
        Self { id, tx: None, predecessors: Vec::new(), successors: BTreeMap::new() }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn tx(&self) -> Option<&T> {
        self.tx.as_ref()
    }

    pub fn is_stub(&self) -> bool {
        self.tx.is_none()
    }

    /// Transactions this one spends from, distinct, in first-input order
    pub fn predecessors(&self) -> &[TransactionId] {
        &self.predecessors
    }

    /// Spending transaction per output index; unspent outputs are absent
    pub fn successors(&self) -> &BTreeMap<TransactionIndexType, TransactionId> {
        &self.successors
    }

    /// Distinct spending transactions ordered by the lowest output index they spend
    pub fn successor_ids(&self) -> Vec<TransactionId> {
        let mut ids: Vec<TransactionId> = Vec::with_capacity(self.successors.len());
        for id in self.successors.values() {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    pub fn is_head(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn is_tail(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub(crate) fn set_tx(&mut self, tx: T) {
        self.tx = Some(tx);
    }
}

/// Owns every node and keeps both sides of each edge in step.
///
/// The head list is a derived index: it holds exactly the nodes whose successor
/// map is empty, in the order they became heads.
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    nodes: HashMap<TransactionId, Node<T>>,
    heads: Vec<TransactionId>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self { nodes: HashMap::new(), heads: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn heads(&self) -> &[TransactionId] {
        &self.heads
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.values()
    }

    /// Returns the node for `id`, creating a stub if none exists yet. New nodes start as heads.
    pub fn get_or_insert(&mut self, id: TransactionId) -> &mut Node<T> {
        let heads = &mut self.heads;
        self.nodes.entry(id).or_insert_with(|| {
            heads.push(id);
            Node::new(id)
        })
    }

    /// Registers `successor` as the spender of output `index` of `predecessor`.
    ///
    /// Idempotent. An output already spent by a different transaction keeps its
    /// first-seen spender and the later spender gets no edge at all. That spender
    /// then reads as a tail holding a payload, lands in layer 0, and makes fee
    /// computation fail with `FundedTail`.
    pub fn link(&mut self, predecessor: TransactionId, successor: TransactionId, index: TransactionIndexType) {
        if !self.nodes.contains_key(&successor) {
            warn!("cannot link {} -> {}: successor is not in the graph", predecessor, successor);
            return;
        }
        let Some(pred_node) = self.nodes.get_mut(&predecessor) else {
            warn!("cannot link {} -> {}: predecessor is not in the graph", predecessor, successor);
            return;
        };

        match pred_node.successors.get(&index) {
            Some(existing) if *existing == successor => return,
            Some(existing) => {
                warn!("output {} of {} is already spent by {}, ignoring spend by {}", index, predecessor, existing, successor);
                return;
            }
            None => {}
        }

        let already_linked = pred_node.successors.values().any(|s| *s == successor);
        let was_head = pred_node.successors.is_empty();
        pred_node.successors.insert(index, successor);
        if was_head {
            self.heads.retain(|h| *h != predecessor);
        }

        if let Some(succ_node) = self.nodes.get_mut(&successor) {
            if succ_node.predecessors.contains(&predecessor) {
                // Expected when the successor spends several outputs of the same predecessor
                if !already_linked {
                    warn!("{} already contains {} in predecessors", successor, predecessor);
                }
            } else {
                succ_node.predecessors.push(predecessor);
            }
        }
    }

    /// Removes every edge from `predecessor` to `successor`. No-op if there is none.
    pub fn unlink(&mut self, predecessor: TransactionId, successor: TransactionId) {
        let Some(pred_node) = self.nodes.get_mut(&predecessor) else {
            return;
        };

        let before = pred_node.successors.len();
        pred_node.successors.retain(|_, s| *s != successor);
        if pred_node.successors.len() == before {
            return;
        }
        if pred_node.successors.is_empty() {
            self.heads.push(predecessor);
        }

        match self.nodes.get_mut(&successor) {
            Some(succ_node) => match succ_node.predecessors.iter().position(|p| *p == predecessor) {
                Some(pos) => {
                    succ_node.predecessors.remove(pos);
                }
                None => warn!("{} does not contain {} in predecessors", successor, predecessor),
            },
            None => warn!("{} spent from {} but is not in the graph", successor, predecessor),
        }
    }
}
