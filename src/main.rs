// src/main.rs
use clap::Parser;
use crossbeam_channel::bounded;
use num_bigint::BigUint;
use num_traits::One;
use pow_miner_rs::utils::logging::init_bench_logging;
use pow_miner_rs::{self, *};
use std::time::Duration;

/// Main entry point for the proof-of-work miner
///
/// # Returns
/// - `Ok(())` on successful execution
/// - `Err(MinerError)` if any operation fails
fn main() -> Result<(), MinerError> {
    let cli = cli::Commands::parse();

    match cli.action {
        cli::Action::Mine(opts) => mine(opts),
        cli::Action::Benchmark(opts) => run_benchmark(opts),
        cli::Action::Config(opts) => generate_config(opts),
    }
}

/// Mines one block header and prints `nonce attempts hash`
///
/// # Operations
/// 1. Initializes logging
/// 2. Loads configuration and applies CLI overrides
/// 3. Dispatches a mining session
/// 4. Waits for the result, cancelling the session on timeout
fn mine(opts: cli::MineOptions) -> Result<(), MinerError> {
    utils::init_logging();

    let mut config = match &opts.config {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };
    if let Some(threads) = opts.threads {
        config.threads = threads;
    }
    if let Some(difficulty) = opts.difficulty {
        config.difficulty = difficulty;
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }

    let block = Block::new(config.header()?);
    let mut coordinator = Coordinator::from_config(&config)?;

    let (result_sender, result_receiver) = bounded(1);
    let session = coordinator.work(&block, result_sender)?;
    log::info!(
        "Mining with {} threads at difficulty {}",
        session.threads(),
        block.header.difficulty()
    );

    let reporting = opts
        .report_interval
        .map(|secs| session.reporter().start_reporting(Duration::from_secs(secs)));

    let received = match opts.timeout {
        Some(secs) => result_receiver.recv_timeout(Duration::from_secs(secs)).ok(),
        None => result_receiver.recv().ok(),
    };
    let result = match received {
        Some(result) => Some(result),
        // A worker may have claimed the win just before the deadline.
        None if !session.cancel() => result_receiver.recv().ok(),
        None => None,
    };

    let summary = session.join()?;
    if let Some(handle) = reporting {
        let _ = handle.join();
    }

    match result {
        Some(result) => {
            log::info!(
                "Solution found by thread {:?} after {} total attempts ({:.2} H/s)",
                summary.winner(),
                summary.stats.attempts_total,
                summary.stats.avg_hashrate
            );
            println!("{}", result);
        }
        None => log::warn!(
            "No solution found after {} attempts",
            summary.stats.attempts_total
        ),
    }

    Ok(())
}

/// Runs the hashrate benchmark
///
/// Mines at a difficulty no hash can satisfy, then stops the session through
/// its cancel handle after the requested duration.
fn run_benchmark(opts: cli::BenchmarkOptions) -> Result<(), MinerError> {
    init_bench_logging();

    // target = 2^256 / 2^257 = 0
    let header = Header::new(BigUint::one() << 257u32)?;
    let mut coordinator = Coordinator::builder().threads(opts.threads).build()?;

    let (result_sender, _result_receiver) = bounded(1);
    let session = coordinator.work(&Block::new(header), result_sender)?;

    log::info!(
        "Starting benchmark on {} threads for {} seconds",
        session.threads(),
        opts.duration
    );
    std::thread::sleep(Duration::from_secs(opts.duration));
    session.cancel();

    let summary = session.join()?;
    log::info!("Benchmark results:");
    log::info!("Total hashes: {}", summary.stats.attempts_total);
    log::info!("Average hashrate: {:.2} H/s", summary.stats.avg_hashrate);
    log::logger().flush();

    Ok(())
}

/// Writes the configuration template to the requested path
fn generate_config(opts: cli::ConfigOptions) -> Result<(), MinerError> {
    std::fs::write(&opts.output, config::generate_template())?;
    println!("Wrote configuration template to {}", opts.output.display());
    Ok(())
}
