//! txgraph - command line front end for the transaction dependency graph
//!
//! Loads a JSON array of transactions, builds the graph and prints its layers,
//! heads, tails or per-transaction fees as JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;

pub use cli::{Args, Command};
pub use config::Config;
pub use error::{CliError, CliResult};

/// Runs `args` against an already resolved configuration and returns the rendered report
pub fn execute(args: &Args, config: &Config) -> CliResult<String> {
    let txs = loader::load_transactions(args.command.input())?;
    let graph = loader::build_graph(txs);
    report::render(&args.command, &graph, config)
}
