use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-swarm",
    version,
    about = "Particle swarm search over repository-quality metrics"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search metric space for the best-scoring profile
    Optimize(OptimizeCommand),
    /// Print the per-metric (min, max) ranges of the dataset
    Ranges(RangesCommand),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Directory holding repo-swarm.toml
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Metrics JSON file; overrides data.path from config
    #[arg(long)]
    pub data: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct OptimizeCommand {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub population: Option<usize>,
    #[arg(long)]
    pub iterations: Option<usize>,
}

#[derive(Args)]
pub struct RangesCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}
