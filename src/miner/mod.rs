// src/miner/mod.rs
//! Core mining functionality
//!
//! This module contains all components of a proof-of-work session:
//! - Target calculation and SHA-256 candidate hashing
//! - The brute-force search worker
//! - The coordinator that spawns workers and arbitrates the single winner

/// SHA-256 digests of headers and nonce candidates
pub mod hasher;

/// `floor(2^256 / difficulty)` and the hash comparison against it
pub mod target;

/// Search worker thread logic
pub mod worker;

/// Claim/cancellation state and the caller's session handle
pub mod session;

/// Worker lifecycle and session dispatch
pub mod coordinator;

// Re-export main components for cleaner imports
pub use self::coordinator::{Coordinator, CoordinatorBuilder};
pub use self::hasher::{HeaderDigest, candidate_hash, digest, header_digest};
pub use self::session::{MiningSession, SessionSummary};
pub use self::target::Target;
pub use self::worker::{DEFAULT_PROGRESS_INTERVAL, WorkerOutcome};
