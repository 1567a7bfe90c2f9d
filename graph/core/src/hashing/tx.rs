use borsh::BorshSerialize;
use txgraph_hashes::HashWriter;

use crate::tx::{Transaction, TransactionId};

/// Transaction id: SHA256(SHA256(borsh encoding)). The cached id field itself is not part of the encoding.
pub fn calc_transaction_id(tx: &Transaction) -> TransactionId {
    let mut writer = HashWriter::new();
    tx.serialize(&mut writer).expect("writing into a hasher cannot fail");
    writer.finalize()
}
