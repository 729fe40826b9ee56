//! Parallel proof-of-work miner
//!
//! Given a block header and a difficulty, finds a nonce such that
//! `sha256(sha256(header) || nonce_be)`, read as a big-endian integer, is at
//! or below `2^256 / difficulty`. The search runs on a pool of worker threads
//! that race over independently seeded nonce ranges; exactly one result is
//! delivered per session.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Mining engine: hashing, target, workers and coordinator
pub mod miner;

/// Session statistics collection and reporting
pub mod stats;

/// Error handling and logging
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Block, header and result types
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use miner::{Coordinator, MiningSession, SessionSummary, Target, WorkerOutcome};
pub use stats::{MiningStats, StatsReporter};
pub use types::{Block, Body, Header, MiningResult};
pub use utils::{MinerError, ProgressLogger, init_logging};
