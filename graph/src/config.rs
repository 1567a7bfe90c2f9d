use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use txgraph_core::NetworkType;

/// Parameters of fee and value computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Addresses whose net inflow is reported as the transaction value
    pub watched_addresses: HashSet<String>,
    /// Encoding rules used to render output scripts as addresses
    pub network: NetworkType,
}

impl FeeConfig {
    pub fn new(network: NetworkType) -> Self {
        Self { watched_addresses: HashSet::new(), network }
    }

    pub fn watch(mut self, address: impl Into<String>) -> Self {
        self.watched_addresses.insert(address.into());
        self
    }

    pub fn watch_all<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watched_addresses.extend(addresses.into_iter().map(Into::into));
        self
    }

    pub fn is_watched(&self, address: &str) -> bool {
        self.watched_addresses.contains(address)
    }
}
