use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vinewater",
    version,
    about = "Vineyard irrigation scheduling metrics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vineyard config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute irrigation metrics for a moisture snapshot
    Compute {
        /// Snapshot file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Fail on the first metric that cannot be computed
        #[arg(long)]
        strict: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Validate the vineyard config
    Check,
    /// Interactive setup of a new vineyard config
    Init,
}
