use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use txgraph::{FeeConfig, NetworkType};
use txgraph_core::address::address_to_script;

use crate::cli::Args;
use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fees: FeeConfig,
    pub log_level: String,
}

impl Config {
    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
        Ok(toml::from_str(&content)?)
    }

    /// Override config with CLI arguments
    pub fn apply_cli_overrides(&mut self, args: &Args) -> CliResult<()> {
        if let Some(network) = &args.network {
            self.fees.network = network.parse::<NetworkType>()?;
        }

        self.fees.watched_addresses.extend(args.watch.iter().cloned());

        if let Some(log_level) = &args.log_level {
            self.log_level = log_level.clone();
        }

        Ok(())
    }

    /// Fails on a watched address that is not a valid address of the configured network
    pub fn validate(&self) -> CliResult<()> {
        for address in &self.fees.watched_addresses {
            address_to_script(address, self.fees.network)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { fees: FeeConfig::default(), log_level: "info".to_string() }
    }
}
