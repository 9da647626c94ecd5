use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "knights")]
#[command(about = "Shortest knight walk that visits every piece on a board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Solve one or more board files and print a CSV row per board
    Solve(SolveArgs),
    /// Serve as a farm worker over stdin/stdout (spawned by `--regime processes`)
    Worker {
        /// Board file; every worker loads its own copy
        board: PathBuf,
    },
}

#[derive(clap::Args)]
pub struct SolveArgs {
    /// Board files in the `<dimension> <upper bound>` + grid format
    #[arg(required = true)]
    pub boards: Vec<PathBuf>,

    #[arg(long, value_enum)]
    pub regime: Option<Regime>,

    /// Worker agents for the farm regimes
    #[arg(short = 'n', long)]
    pub workers: Option<usize>,

    /// Rayon threads for the parallel regime (0 = one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Target frontier size before work is split up
    #[arg(long)]
    pub frontier: Option<usize>,

    /// JSON file with defaults; explicit flags win
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print one JSON report per line instead of CSV
    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub no_header: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Sequential,
    #[default]
    Parallel,
    /// Coordinator plus worker threads
    Farm,
    /// Coordinator plus worker processes
    Processes,
}
