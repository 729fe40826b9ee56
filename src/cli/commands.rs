// src/cli/commands.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Proof-of-work miner CLI
#[derive(Parser, Debug)]
#[command(name = "pow-miner-rs")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (mine, run a benchmark, or generate config)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands for the miner application
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Mine one block header and print `nonce attempts hash`
    Mine(MineOptions),

    /// Measure the hashrate over an unsatisfiable target
    Benchmark(BenchmarkOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options for a mining run
#[derive(Parser, Debug)]
pub struct MineOptions {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of worker threads, 0 = all cores (overrides config)
    #[arg(short, long, allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Difficulty as a decimal integer (overrides config)
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Fixed seed for starting nonces (overrides config)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Log session statistics every N seconds (N >= 1)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub report_interval: Option<u64>,

    /// Give up after N seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Options for running the hashrate benchmark
#[derive(Parser, Debug)]
pub struct BenchmarkOptions {
    /// Duration of benchmark in seconds
    #[arg(short, long, default_value_t = 10)]
    pub duration: u64,

    /// Number of threads to use
    #[arg(short, long, default_value_t = num_cpus::get() as i64, allow_negative_numbers = true)]
    pub threads: i64,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,
}
