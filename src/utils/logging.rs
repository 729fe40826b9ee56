// src/utils/logging.rs
//! Logging configuration and utilities
//!
//! This module handles logging for the miner, including:
//! - Standard and benchmark logging setup for the binary
//! - The [`ProgressLogger`] sink that search workers report progress to
//!
//! Uses `env_logger` under the hood; lines carry the emitting thread's name
//! and the miner's own modules can be raised to Debug on their own.

use env_logger::fmt::Formatter;
use env_logger::{Builder, Target};
use log::{LevelFilter, Record};
use std::env;
use std::fmt;
use std::io::{self, Write};
use std::thread;

/// Sink for progress lines emitted by search workers
///
/// Workers call [`ProgressLogger::log`] with pre-formatted arguments such as
/// `thread 3: attempted 1000000, current hash 0x...`. The method returns
/// nothing, so a failing sink can never abort a mining session.
pub trait ProgressLogger: Send + Sync {
    /// Consume one formatted progress line
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Default sink: forwards progress lines to the `log` facade at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogForwarder;

impl ProgressLogger for LogForwarder {
    fn log(&self, args: fmt::Arguments<'_>) {
        log::debug!("{}", args);
    }
}

/// Sink that drops every progress line
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl ProgressLogger for NoopLogger {
    fn log(&self, _args: fmt::Arguments<'_>) {}
}

/// Module prefix shared by the library and the binary
const CRATE_TARGET: &str = "pow_miner_rs";

/// Initializes the logging subsystem for mining runs
///
/// # Configuration
/// - Logs to stdout, one `[ts level thread target] msg` line per record
/// - Default log level: Info everywhere
/// - `RUST_LOG`, when set, replaces the defaults
pub fn init_logging() {
    let rust_log = env::var("RUST_LOG").ok();
    filtered_builder(LevelFilter::Info, rust_log.as_deref()).init();
}

/// Configures benchmark logging
///
/// Without `RUST_LOG`, the miner's own modules log at Debug so per-thread
/// progress lines are visible, while dependencies stay at Info.
pub fn init_bench_logging() {
    let rust_log = env::var("RUST_LOG").ok();
    filtered_builder(LevelFilter::Debug, rust_log.as_deref()).init();
}

/// Builder with the miner's format and filters
///
/// `crate_level` applies to the `pow_miner_rs` modules only; everything else
/// logs at Info. An explicit filter string overrides both.
fn filtered_builder(crate_level: LevelFilter, rust_log: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    builder.format(format_record).target(Target::Stdout);

    match rust_log {
        Some(filters) => builder.parse_filters(filters),
        None => builder
            .filter_level(LevelFilter::Info)
            .filter_module(CRATE_TARGET, crate_level),
    };
    builder
}

/// Writes `[ts level thread target] msg`
///
/// Worker threads are named `pow-worker-N`, so the thread column tells
/// which worker a line came from.
fn format_record(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let ts = buf.timestamp_millis();
    let current = thread::current();
    writeln!(
        buf,
        "[{} {:<5} {} {}] {}",
        ts,
        record.level(),
        current.name().unwrap_or("-"),
        record.target(),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(logger: &env_logger::Logger, level: Level, target: &str) -> bool {
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn test_bench_filter_raises_only_miner_modules() {
        let logger = filtered_builder(LevelFilter::Debug, None).build();
        assert!(enabled(&logger, Level::Debug, "pow_miner_rs::miner::worker"));
        assert!(enabled(&logger, Level::Debug, "pow_miner_rs"));
        assert!(!enabled(&logger, Level::Debug, "crossbeam_channel"));
        assert!(enabled(&logger, Level::Info, "crossbeam_channel"));
    }

    #[test]
    fn test_default_filter_hides_progress_lines() {
        let logger = filtered_builder(LevelFilter::Info, None).build();
        assert!(!enabled(&logger, Level::Debug, "pow_miner_rs::utils::logging"));
        assert!(enabled(&logger, Level::Info, "pow_miner_rs::stats::reporter"));
    }

    #[test]
    fn test_rust_log_overrides_defaults() {
        let logger = filtered_builder(LevelFilter::Debug, Some("warn")).build();
        assert!(!enabled(&logger, Level::Debug, "pow_miner_rs::miner::worker"));
        assert!(!enabled(&logger, Level::Info, "pow_miner_rs"));
        assert!(enabled(&logger, Level::Warn, "pow_miner_rs"));
    }

    #[test]
    fn test_noop_logger_accepts_lines() {
        let logger = NoopLogger;
        logger.log(format_args!("thread {} started", 0));
    }

    #[test]
    fn test_forwarder_is_usable_as_trait_object() {
        let logger: Box<dyn ProgressLogger> = Box::new(LogForwarder);
        logger.log(format_args!("thread {}: found", 1));
    }
}
