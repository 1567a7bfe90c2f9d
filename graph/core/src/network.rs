use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Network type selects the address encoding rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Main network
    #[default]
    Mainnet,
    /// Test network
    Testnet,
    /// Development network
    Devnet,
    /// Simnet for testing
    Simnet,
}

impl NetworkType {
    /// Returns an iterator over all NetworkType variants
    pub fn iter() -> impl Iterator<Item = NetworkType> {
        [NetworkType::Mainnet, NetworkType::Testnet, NetworkType::Devnet, NetworkType::Simnet].into_iter()
    }

    /// Base58check version byte of pay-to-pubkey-hash addresses
    pub fn pubkey_hash_prefix(&self) -> u8 {
        match self {
            NetworkType::Mainnet => 0x00,
            NetworkType::Testnet | NetworkType::Devnet | NetworkType::Simnet => 0x6f,
        }
    }

    /// Base58check version byte of pay-to-script-hash addresses
    pub fn script_hash_prefix(&self) -> u8 {
        match self {
            NetworkType::Mainnet => 0x05,
            NetworkType::Testnet | NetworkType::Devnet | NetworkType::Simnet => 0xc4,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "mainnet"),
            NetworkType::Testnet => write!(f, "testnet"),
            NetworkType::Devnet => write!(f, "devnet"),
            NetworkType::Simnet => write!(f, "simnet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkType::iter()
            .find(|network| network.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownNetwork(s.to_string()))
    }
}
