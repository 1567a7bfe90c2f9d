//! Transaction primitives consumed by the transaction graph.
//!
//! This crate provides:
//! - The [`tx::Transaction`] model and the [`tx::TransactionView`] trait the graph is generic over
//! - Locking scripts ([`tx::ScriptPublicKey`]) and their address rendering ([`address`])
//! - Network selection for address encoding ([`network::NetworkType`])

pub mod address;
pub mod errors;
pub mod hashing;
pub mod network;
pub mod tx;

pub use txgraph_hashes::Hash;

pub use address::{AddressResolver, StandardAddressResolver};
pub use errors::{CoreError, CoreResult};
pub use network::NetworkType;
pub use tx::{
    ScriptPublicKey, Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput, TransactionView,
};
