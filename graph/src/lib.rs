//! In-memory dependency graph over transactions.
//!
//! Transactions are inserted in any order; inputs referencing unknown
//! transactions become stub nodes until those transactions arrive. The graph
//! answers ancestor queries, groups transactions into dependency respecting
//! layers, and propagates fees and watched-address values from its leaves.

pub mod config;
pub mod dag;
pub mod errors;
pub mod fees;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::FeeConfig;
pub use dag::{Node, NodeArena, TxGraph};
pub use errors::{GraphError, GraphResult};
pub use fees::FeeAndValue;
pub use txgraph_core::{Hash, NetworkType, Transaction, TransactionId};
