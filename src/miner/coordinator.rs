// src/miner/coordinator.rs
//! Mining coordinator implementation
//!
//! Spawns the search workers of a session, each on its own OS thread with an
//! independently drawn starting nonce, and hands the caller a
//! [`MiningSession`] to control them. Exactly one [`MiningResult`] is ever
//! published per session; see [`crate::miner::session`] for the claim
//! protocol.

use crate::config::Config;
use crate::miner::hasher;
use crate::miner::session::{MiningSession, SessionState};
use crate::miner::target::Target;
use crate::miner::worker::{DEFAULT_PROGRESS_INTERVAL, MiningJob, Worker};
use crate::types::{Block, MiningResult};
use crate::utils::error::MinerError;
use crate::utils::logging::{LogForwarder, ProgressLogger};
use crossbeam_channel::Sender;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use std::thread;

/// Coordinates proof-of-work sessions across worker threads
pub struct Coordinator {
    /// Requested worker count (0 = one per available CPU)
    threads: i64,
    /// Source of each worker's starting nonce
    rng: Box<dyn RngCore + Send>,
    /// Sink for per-thread progress lines
    logger: Arc<dyn ProgressLogger>,
    /// Attempts between progress lines (0 disables them)
    progress_interval: u64,
}

/// Builder for [`Coordinator`]
///
/// Every option has a default: one thread per CPU, an OS-seeded random
/// source, progress forwarded to the `log` crate every million attempts.
pub struct CoordinatorBuilder {
    threads: Option<i64>,
    rng: Option<Box<dyn RngCore + Send>>,
    logger: Option<Arc<dyn ProgressLogger>>,
    progress_interval: u64,
}

impl CoordinatorBuilder {
    /// Number of worker threads; 0 means one per available CPU
    ///
    /// Negative values are accepted here and rejected by
    /// [`Coordinator::work`].
    pub fn threads(mut self, threads: i64) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Random source for starting nonces
    pub fn rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Deterministic random source seeded with `seed`
    pub fn seed(self, seed: u64) -> Self {
        self.rng(StdRng::seed_from_u64(seed))
    }

    /// Progress sink
    pub fn logger(mut self, logger: Arc<dyn ProgressLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Attempts between progress lines; 0 disables them
    pub fn progress_interval(mut self, attempts: u64) -> Self {
        self.progress_interval = attempts;
        self
    }

    /// Builds the coordinator
    ///
    /// # Returns
    /// * `Ok(Coordinator)` - Ready to dispatch sessions
    /// * `Err(MinerError::InitializationError)` - If no random source was
    ///   given and the operating system entropy source failed
    pub fn build(self) -> Result<Coordinator, MinerError> {
        let rng: Box<dyn RngCore + Send> = match self.rng {
            Some(rng) => rng,
            None => Box::new(seeded_from(OsRng)?),
        };

        Ok(Coordinator {
            threads: self.threads.unwrap_or_else(|| num_cpus::get() as i64),
            rng,
            logger: self.logger.unwrap_or_else(|| Arc::new(LogForwarder)),
            progress_interval: self.progress_interval,
        })
    }
}

/// Seeds the nonce generator from `source`, failing if the source cannot
/// supply entropy
fn seeded_from<R: RngCore>(source: R) -> Result<StdRng, MinerError> {
    Ok(StdRng::from_rng(source)?)
}

impl Coordinator {
    /// Starts building a coordinator
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder {
            threads: None,
            rng: None,
            logger: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Coordinator with every option at its default
    pub fn new() -> Result<Self, MinerError> {
        Self::builder().build()
    }

    /// Coordinator configured from a loaded [`Config`]
    ///
    /// A configured `seed` makes starting nonces reproducible; without one
    /// the random source is seeded from the operating system.
    pub fn from_config(config: &Config) -> Result<Self, MinerError> {
        let mut builder = Self::builder()
            .threads(config.threads)
            .progress_interval(config.progress_interval);
        if let Some(seed) = config.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    /// Configured worker count, as given (0 = auto)
    pub fn threads(&self) -> i64 {
        self.threads
    }

    /// Resolves the configured thread count to the number of workers to spawn
    fn worker_count(&self) -> Result<usize, MinerError> {
        match self.threads {
            t if t < 0 => Err(MinerError::ConfigError(format!(
                "threads must be >= 0, got {}",
                t
            ))),
            0 => Ok(num_cpus::get()),
            t => usize::try_from(t)
                .map_err(|_| MinerError::ConfigError(format!("threads out of range: {}", t))),
        }
    }

    /// Starts a mining session for `block`
    ///
    /// Validates the configuration, computes the header digest and target
    /// once, spawns the workers and returns without waiting for them. The
    /// single result of the session is sent on `results`.
    ///
    /// # Arguments
    /// * `block` - Block whose header is mined
    /// * `results` - Sink for the session's result
    ///
    /// # Returns
    /// * `Ok(MiningSession)` - Handle to the running workers
    /// * `Err(MinerError::ConfigError)` - Negative thread count or zero
    ///   difficulty; no worker was spawned
    /// * `Err(MinerError::ThreadError)` - The OS refused to spawn a thread;
    ///   workers already spawned are cancelled
    pub fn work(
        &mut self,
        block: &Block,
        results: Sender<MiningResult>,
    ) -> Result<MiningSession, MinerError> {
        let workers = self.worker_count()?;
        let target = Target::from_difficulty(block.header.difficulty())?;
        let header_digest = hasher::header_digest(&block.header);

        let state = Arc::new(SessionState::new());
        let job = MiningJob {
            header_digest,
            target,
            progress_interval: self.progress_interval,
            state: state.clone(),
            results,
            logger: self.logger.clone(),
        };

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let start_nonce = self.rng.next_u64();
            self.logger
                .log(format_args!("thread {}: initial nonce {}", id, start_nonce));

            let worker = Worker::new(id, job.clone(), start_nonce);
            state.counters.worker_started();
            let spawned = thread::Builder::new()
                .name(format!("pow-worker-{}", id))
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    state.counters.worker_exited();
                    MiningSession::new(state, handles).cancel();
                    return Err(MinerError::ThreadError(format!(
                        "failed to spawn worker {}: {}",
                        id, e
                    )));
                }
            }
        }

        log::debug!(
            "Dispatched {} workers for difficulty {}",
            workers,
            block.header.difficulty()
        );
        Ok(MiningSession::new(state, handles))
    }
}
