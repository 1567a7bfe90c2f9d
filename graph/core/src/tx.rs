//!
//! # Transaction
//!
//! This module implements the [`Transaction`] structure and the [`TransactionView`]
//! trait through which the graph reads transactions.
//!

mod script_public_key;

use borsh::{BorshDeserialize, BorshSerialize};
pub use script_public_key::{ScriptClass, ScriptPublicKey, ScriptPublicKeyVersion};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::hashing;
use crate::Hash;

/// A 32-byte transaction identifier.
pub type TransactionId = Hash;

pub type TransactionIndexType = u32;

/// Represents a transaction outpoint
#[derive(Eq, Default, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize, BorshSerialize, BorshDeserialize, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: TransactionIndexType,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}

/// Represents a transaction input
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    #[serde(with = "hex::serde", default)]
    pub signature_script: Vec<u8>,
    #[serde(default)]
    pub sequence: u64,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Vec<u8>, sequence: u64) -> Self {
        Self { previous_outpoint, signature_script, sequence }
    }
}

impl std::fmt::Debug for TransactionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionInput")
            .field("previous_outpoint", &self.previous_outpoint)
            .field("signature_script", &hex::encode(&self.signature_script))
            .field("sequence", &self.sequence)
            .finish()
    }
}

/// Represents a transaction output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: ScriptPublicKey,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: ScriptPublicKey) -> Self {
        Self { value, script_public_key }
    }
}

/// Represents a transaction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase", from = "TransactionData")]
pub struct Transaction {
    pub version: u16,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u64,

    // A field that is used to cache the transaction ID.
    // Always use the corresponding self.id() instead of accessing this field directly
    #[borsh(skip)]
    id: TransactionId,
}

/// Wire shape of a transaction; deserializing goes through here so the cached id is always computed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionData {
    #[serde(default = "default_version")]
    version: u16,
    #[serde(default)]
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    #[serde(default)]
    lock_time: u64,
}

fn default_version() -> u16 {
    1
}

impl From<TransactionData> for Transaction {
    fn from(data: TransactionData) -> Self {
        Transaction::new(data.version, data.inputs, data.outputs, data.lock_time)
    }
}

impl Transaction {
    pub fn new(version: u16, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u64) -> Self {
        let mut tx = Self { version, inputs, outputs, lock_time, id: Default::default() };
        tx.finalize();
        tx
    }

    /// Recompute and finalize the tx id based on updated tx fields
    pub fn finalize(&mut self) {
        self.id = hashing::tx::calc_transaction_id(self);
    }

    /// Returns the transaction ID
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// A transaction with no inputs mints new coins; it has no predecessor in any graph.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Read access the transaction graph needs from a transaction payload
pub trait TransactionView {
    fn id(&self) -> TransactionId;

    /// The outpoints spent by this transaction, in input order
    fn outpoints(&self) -> impl Iterator<Item = TransactionOutpoint> + '_;

    fn outputs(&self) -> &[TransactionOutput];

    fn output(&self, index: TransactionIndexType) -> Option<&TransactionOutput> {
        self.outputs().get(index as usize)
    }
}

impl TransactionView for Transaction {
    fn id(&self) -> TransactionId {
        self.id
    }

    fn outpoints(&self) -> impl Iterator<Item = TransactionOutpoint> + '_ {
        self.inputs.iter().map(|input| input.previous_outpoint)
    }

    fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }
}
