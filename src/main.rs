mod cli;
mod config;
mod data;
mod error;
mod pso;
mod report;
mod reward;
mod types;

use crate::data::Dataset;
use crate::error::SwarmError;
use crate::types::config::SwarmConfig;
use crate::types::metrics::MetricRanges;
use crate::types::report::{OptimizationReport, RangesReport, RunContext};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NO_DATA: i32 = 1;
    pub const INVALID_CONFIG: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct Source {
    config: SwarmConfig,
    data_path: PathBuf,
    dataset: Dataset,
}

fn load_config(args: &cli::SourceArgs) -> Result<SwarmConfig, SwarmError> {
    Ok(config::load_config(&args.root)?.unwrap_or_default())
}

fn load_source(args: &cli::SourceArgs, config: SwarmConfig) -> Result<Source, SwarmError> {
    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| args.root.join(config.data_path()));
    info!(path = %data_path.display(), "loading repository metrics");
    let dataset = data::discover(&data_path)?;
    Ok(Source {
        config,
        data_path,
        dataset,
    })
}

fn require_ranges(source: &Source) -> Option<&MetricRanges> {
    let ranges = source.dataset.ranges.as_ref();
    if ranges.is_none() {
        eprintln!(
            "warning: no records loaded from {}",
            source.data_path.display()
        );
    }
    ranges
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Text => report::OutputFormat::Text,
        cli::ReportFormat::Json => report::OutputFormat::Json,
    }
}

fn run() -> Result<i32, SwarmError> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    info!("repo-swarm v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        cli::Commands::Optimize(cmd) => {
            let mut config = load_config(&cmd.source)?;
            config.apply_overrides(cmd.population, cmd.iterations, cmd.seed)?;
            let source = load_source(&cmd.source, config)?;
            let Some(ranges) = require_ranges(&source) else {
                return Ok(exit_code::NO_DATA);
            };

            let mut params = source.config.pso_params();
            let seed = params.seed.unwrap_or_else(rand::random);
            params.seed = Some(seed);

            let reward =
                reward::build(&source.config.reward, &source.dataset.metrics, ranges)?;
            let bounds = ranges.to_bounds();
            info!(
                seed,
                reward = reward.name(),
                dimensions = bounds.len(),
                records = source.dataset.metrics.len(),
                "starting swarm"
            );
            let outcome = params.optimize(bounds.len(), &bounds, |position| {
                reward.evaluate(position)
            })?;

            let data_file = source.data_path.display().to_string();
            let report = OptimizationReport::new(
                RunContext {
                    data_file: &data_file,
                    data_sha256: source.dataset.sha256.clone().unwrap_or_default(),
                    records: source.dataset.metrics.len(),
                    reward: reward.name(),
                    objective: params.objective,
                    seed: params.seed,
                },
                outcome,
            );
            let rendered = report::render(&report, output_format(cmd.source.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Ranges(cmd) => {
            let config = load_config(&cmd.source)?;
            let source = load_source(&cmd.source, config)?;
            let Some(ranges) = require_ranges(&source) else {
                return Ok(exit_code::NO_DATA);
            };

            let data_file = source.data_path.display().to_string();
            let report = RangesReport::new(&data_file, source.dataset.metrics.len(), ranges);
            let rendered = report::render_ranges(&report, output_format(cmd.source.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = match e {
                SwarmError::ConfigParse(_) | SwarmError::Toml(_) => exit_code::INVALID_CONFIG,
                _ => exit_code::RUNTIME_FAILURE,
            };
            std::process::exit(code);
        }
    }
}
