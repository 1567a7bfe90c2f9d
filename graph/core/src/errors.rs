use thiserror::Error;
use txgraph_hashes::HashError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid hash: {0}")]
    InvalidHash(#[from] HashError),

    #[error("Invalid base58 address {0}")]
    InvalidAddress(String),

    #[error("Address checksum mismatch for {0}")]
    ChecksumMismatch(String),

    #[error("Address {address} does not belong to network {network}")]
    WrongNetwork { address: String, network: String },

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
