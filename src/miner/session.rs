// src/miner/session.rs
//! Shared state and caller handle of one mining session
//!
//! A session owns two one-shot flags:
//! - `claimed`: set by exactly one compare-and-swap. Whoever wins it is the
//!   only party allowed to publish (or, for [`MiningSession::cancel`], to
//!   suppress) the result.
//! - `cancelled`: polled by every worker each iteration. Setting it more than
//!   once is harmless.

use crate::miner::worker::WorkerOutcome;
use crate::stats::{MiningStats, SessionCounters, StatsReporter};
use crate::utils::error::MinerError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

/// State shared by the coordinator, its workers and the caller's handle
#[derive(Debug)]
pub(crate) struct SessionState {
    cancelled: AtomicBool,
    claimed: AtomicBool,
    pub(crate) counters: Arc<SessionCounters>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        SessionState {
            cancelled: AtomicBool::new(false),
            claimed: AtomicBool::new(false),
            counters: Arc::new(SessionCounters::new()),
        }
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Atomically flips `claimed` from false to true; `true` for the single winner
    pub(crate) fn try_claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}

/// Handle to a running mining session
///
/// Returned by [`Coordinator::work`](crate::miner::Coordinator::work). The
/// result itself arrives on the caller's result channel; this handle only
/// controls and observes the workers. Dropping it leaves the workers running
/// until one of them wins.
pub struct MiningSession {
    state: Arc<SessionState>,
    handles: Vec<JoinHandle<WorkerOutcome>>,
}

/// Outcome of a joined session
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Outcome of each worker, indexed by worker id
    pub outcomes: Vec<WorkerOutcome>,
    /// Counters after every worker exited
    pub stats: MiningStats,
}

impl SessionSummary {
    /// Id of the worker that published the result, if any
    pub fn winner(&self) -> Option<usize> {
        self.outcomes
            .iter()
            .position(|outcome| *outcome == WorkerOutcome::Reported)
    }
}

impl MiningSession {
    pub(crate) fn new(state: Arc<SessionState>, handles: Vec<JoinHandle<WorkerOutcome>>) -> Self {
        MiningSession { state, handles }
    }

    /// Number of worker threads in this session
    pub fn threads(&self) -> usize {
        self.handles.len()
    }

    /// Stops the session from the caller's side
    ///
    /// Claims the session on behalf of nobody, then signals every worker to
    /// stop. Once this returns no result will be published unless a worker
    /// had already won.
    ///
    /// # Returns
    /// `true` if the cancellation prevented a result, `false` if a worker had
    /// already claimed the win.
    pub fn cancel(&self) -> bool {
        let suppressed = self.state.try_claim();
        self.state.cancel();
        if suppressed {
            log::debug!("Mining session cancelled by caller");
        }
        suppressed
    }

    /// Whether the cancellation signal has been raised, by a winner or the caller
    pub fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }

    /// Whether a worker or the caller has claimed the session
    pub fn is_claimed(&self) -> bool {
        self.state.is_claimed()
    }

    /// Returns `true` once every worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(|handle| handle.is_finished())
    }

    /// Reporter over this session's live counters
    pub fn reporter(&self) -> StatsReporter {
        StatsReporter::new(self.state.counters.clone())
    }

    /// Current statistics snapshot
    pub fn stats(&self) -> MiningStats {
        self.reporter().get_stats()
    }

    /// Waits for every worker thread to exit
    ///
    /// Blocks until the session ends; call [`cancel`](Self::cancel) first to
    /// stop a session that has not found a result.
    ///
    /// # Returns
    /// * `Ok(SessionSummary)` - Per-worker outcomes and final counters
    /// * `Err(MinerError::ThreadError)` - If a worker thread panicked
    pub fn join(self) -> Result<SessionSummary, MinerError> {
        let reporter = self.reporter();
        let mut outcomes = Vec::with_capacity(self.handles.len());

        for (id, handle) in self.handles.into_iter().enumerate() {
            let outcome = handle
                .join()
                .map_err(|_| MinerError::ThreadError(format!("worker {} panicked", id)))?;
            outcomes.push(outcome);
        }

        Ok(SessionSummary {
            outcomes,
            stats: reporter.get_stats(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_succeeds_once() {
        let state = SessionState::new();
        assert!(!state.is_claimed());
        assert!(state.try_claim());
        assert!(!state.try_claim());
        assert!(state.is_claimed());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let state = SessionState::new();
        assert!(!state.is_cancelled());
        state.cancel();
        state.cancel();
        assert!(state.is_cancelled());
    }

    #[test]
    fn test_claim_race_has_single_winner() {
        let state = Arc::new(SessionState::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || state.try_claim())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn test_caller_cancel_after_claim_reports_false() {
        let state = Arc::new(SessionState::new());
        assert!(state.try_claim());
        let session = MiningSession::new(state, Vec::new());
        assert!(!session.cancel());
        assert!(session.is_cancelled());
        assert!(session.is_finished());
    }

    #[test]
    fn test_summary_winner() {
        let summary = SessionSummary {
            outcomes: vec![
                WorkerOutcome::Cancelled,
                WorkerOutcome::Reported,
                WorkerOutcome::Discarded,
            ],
            stats: MiningStats::default(),
        };
        assert_eq!(summary.winner(), Some(1));
    }
}
