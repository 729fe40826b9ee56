// src/utils/mod.rs
//! Utilities module for common functionality
//!
//! Error handling and logging infrastructure shared by the mining engine
//! and the command-line binary.

/// Error types and handling utilities
///
/// Contains the [`MinerError`] enum which defines all possible error conditions
/// for the miner, along with conversion implementations.
pub mod error;

/// Logging configuration and the worker progress sink
pub mod logging;

// Re-export for easier access
pub use error::MinerError;
pub use logging::{LogForwarder, NoopLogger, ProgressLogger, init_logging};
