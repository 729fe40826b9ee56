// src/miner/worker.rs
//! Search worker implementation
//!
//! Each worker owns a private nonce counter and attempt counter and
//! brute-forces `sha256(header_digest || nonce)` until it finds a hash at or
//! below the target or sees the session's cancellation signal.

use crate::miner::hasher::{CandidateHasher, HeaderDigest};
use crate::miner::session::SessionState;
use crate::miner::target::Target;
use crate::types::MiningResult;
use crate::utils::logging::ProgressLogger;
use crossbeam_channel::Sender;
use std::sync::Arc;

/// Default number of attempts between progress lines
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Attempts a worker accumulates locally before adding them to the session counters
pub(crate) const STATS_FLUSH_BATCH: u64 = 1 << 16;

/// How a worker's search loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// Won the claim and published the result
    Reported,
    /// Found a valid nonce but another party had already claimed the session
    Discarded,
    /// Observed the cancellation signal before finding a valid nonce
    Cancelled,
    /// Wrapped around the whole 64-bit nonce space without a valid hash
    Exhausted,
}

/// Read-only inputs shared by every worker of a session
#[derive(Clone)]
pub(crate) struct MiningJob {
    pub(crate) header_digest: HeaderDigest,
    pub(crate) target: Target,
    pub(crate) progress_interval: u64,
    pub(crate) state: Arc<SessionState>,
    pub(crate) results: Sender<MiningResult>,
    pub(crate) logger: Arc<dyn ProgressLogger>,
}

/// Brute-force search worker
///
/// Never reads or writes another worker's counters; the only shared state it
/// touches is the session's claim and cancellation flags.
pub(crate) struct Worker {
    id: usize,
    job: MiningJob,
    hasher: CandidateHasher,
    nonce: u64,
    /// Nonce at which the search gives up; the start nonce for a full 2^64 cycle
    stop_nonce: u64,
    attempts: u64,
}

impl Worker {
    /// Creates a worker that starts searching at `start_nonce`
    ///
    /// # Arguments
    /// * `id` - Worker index, used in progress lines
    /// * `job` - Session inputs shared by all workers
    /// * `start_nonce` - First nonce to try
    pub(crate) fn new(id: usize, job: MiningJob, start_nonce: u64) -> Self {
        let hasher = CandidateHasher::new(&job.header_digest);
        Worker {
            id,
            job,
            hasher,
            nonce: start_nonce,
            stop_nonce: start_nonce,
            attempts: 0,
        }
    }

    /// Limits the search to `span` nonces starting at the start nonce
    #[cfg(test)]
    pub(crate) fn with_nonce_span(mut self, span: u64) -> Self {
        self.stop_nonce = self.nonce.wrapping_add(span);
        self
    }

    /// Runs the search loop until the worker wins, loses, is cancelled or
    /// exhausts the nonce space
    pub(crate) fn run(mut self) -> WorkerOutcome {
        let id = self.id;
        let interval = self.job.progress_interval;
        let mut unflushed = 0u64;

        self.job.logger.log(format_args!("thread {} started", id));

        let outcome = loop {
            if self.job.state.is_cancelled() {
                self.job.logger.log(format_args!("thread {}: cancelled", id));
                break WorkerOutcome::Cancelled;
            }

            let hash = self.hasher.hash(self.nonce);
            self.attempts += 1;
            unflushed += 1;

            if interval > 0 && self.attempts % interval == 0 {
                self.job.logger.log(format_args!(
                    "thread {}: attempted {}, current hash 0x{}",
                    id,
                    self.attempts,
                    hex::encode(hash)
                ));
            }

            if unflushed >= STATS_FLUSH_BATCH {
                self.job.state.counters.add_attempts(unflushed);
                unflushed = 0;
            }

            if self.job.target.is_met_by(&hash) {
                break self.report(hash);
            }

            self.nonce = self.nonce.wrapping_add(1);
            if self.nonce == self.stop_nonce {
                self.job
                    .logger
                    .log(format_args!("thread {}: nonce space exhausted", id));
                break WorkerOutcome::Exhausted;
            }
        };

        self.job.state.counters.add_attempts(unflushed);
        self.job.state.counters.worker_exited();
        outcome
    }

    /// Claims the session and publishes the result, or discards it if
    /// another party claimed first
    fn report(&self, hash: [u8; 32]) -> WorkerOutcome {
        if !self.job.state.try_claim() {
            self.job
                .logger
                .log(format_args!("thread {}: discarded", self.id));
            return WorkerOutcome::Discarded;
        }

        // Signal before the handoff: the send may block on a rendezvous sink.
        self.job.state.cancel();

        let result = MiningResult {
            nonce: self.nonce,
            attempts: self.attempts,
            hash,
        };
        if self.job.results.send(result).is_err() {
            log::warn!("thread {}: result receiver dropped, solution lost", self.id);
        }
        self.job.logger.log(format_args!("thread {}: found", self.id));
        WorkerOutcome::Reported
    }
}
