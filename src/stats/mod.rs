//! Statistics collection and reporting module
//!
//! Tracks the work done by a mining session: total attempts across all
//! workers, how many workers are still running and the resulting hashrate.
//! [`StatsReporter`] can log these periodically until the session's workers
//! have all exited.

/// Session counters and the reporter built on top of them
pub mod reporter;

// Re-export main components
pub use reporter::{MiningStats, SessionCounters, StatsReporter};
