use serde::Serialize;
use std::collections::BTreeMap;
use txgraph::{FeeAndValue, TransactionId, TxGraph};

use crate::cli::Command;
use crate::config::Config;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
struct TailEntry {
    id: TransactionId,
    stub: bool,
}

/// Renders the output of `command` over `graph` as pretty JSON
pub fn render(command: &Command, graph: &TxGraph, config: &Config) -> CliResult<String> {
    let json = match command {
        Command::Layers { .. } => {
            let layers: Vec<Vec<TransactionId>> =
                graph.topological_layers().iter().map(|layer| layer.iter().map(|tx| tx.id()).collect()).collect();
            serde_json::to_string_pretty(&layers)?
        }
        Command::Heads { .. } => serde_json::to_string_pretty(graph.head_ids())?,
        Command::Tails { .. } => {
            let mut tails: Vec<TailEntry> =
                graph.tails().iter().map(|node| TailEntry { id: node.id(), stub: node.is_stub() }).collect();
            tails.sort_by_key(|entry| entry.id);
            serde_json::to_string_pretty(&tails)?
        }
        Command::Fees { .. } => {
            config.validate()?;
            let fees: BTreeMap<TransactionId, FeeAndValue> = graph.calculate_fees_and_values(&config.fees)?.into_iter().collect();
            serde_json::to_string_pretty(&fees)?
        }
    };
    Ok(json)
}
