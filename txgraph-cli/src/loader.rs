use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use txgraph::{Transaction, TxGraph};

use crate::error::{CliError, CliResult};

/// Reads a JSON array of transactions. Ids are recomputed from content, never taken from the file.
pub fn load_transactions(path: &Path) -> CliResult<Vec<Transaction>> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let txs: Vec<Transaction> = serde_json::from_str(&content)?;
    for tx in txs.iter().filter(|tx| tx.is_coinbase()) {
        warn!("{} has no inputs, fee computation will reject it as a funded tail", tx.id());
    }
    debug!("loaded {} transactions from {}", txs.len(), path.display());
    Ok(txs)
}

pub fn build_graph(txs: Vec<Transaction>) -> TxGraph {
    let mut graph = TxGraph::new();
    let count = txs.len();
    for tx in txs {
        graph.insert(tx);
    }
    info!("built graph of {} nodes from {} transactions", graph.len(), count);
    graph
}
