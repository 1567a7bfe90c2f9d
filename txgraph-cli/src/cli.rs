use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "txgraph")]
#[command(about = "Inspect the dependency graph of a set of transactions", long_about = None)]
pub struct Args {
    /// Path to configuration file (optional, uses defaults if not provided)
    #[arg(short, long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Network used to render addresses (mainnet, testnet, devnet, simnet)
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// Watched address, may be repeated
    #[arg(short, long = "watch", global = true)]
    pub watch: Vec<String>,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Transactions grouped into dependency layers
    Layers {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Transactions nothing else spends from
    Heads {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Funding boundary of the graph
    Tails {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Fee and watched value of every transaction
    Fees {
        #[arg(short, long)]
        input: PathBuf,
    },
}

impl Command {
    pub fn input(&self) -> &Path {
        match self {
            Command::Layers { input } | Command::Heads { input } | Command::Tails { input } | Command::Fees { input } => input,
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
