use thiserror::Error;
use txgraph_core::tx::{TransactionId, TransactionIndexType};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Tail {0} carries a transaction, the funding boundary must only hold stubs")]
    FundedTail(TransactionId),

    #[error("Output {index} of {tx} pays a watched address directly from the funding boundary")]
    WatchedFundingOutput { tx: TransactionId, index: TransactionIndexType },
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
