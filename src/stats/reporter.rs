// src/stats/reporter.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Shortest reporting period; also the reporter's polling tick
pub const MIN_REPORT_INTERVAL: Duration = Duration::from_millis(100);

/// Snapshot of a mining session's statistics
#[derive(Debug, Clone, Default)]
pub struct MiningStats {
    /// Hashes computed across all workers so far
    pub attempts_total: u64,
    /// Workers that have not yet exited their search loop
    pub active_workers: usize,
    /// Time since the session was dispatched
    pub elapsed: Duration,
    /// Average hashrate since dispatch (hashes per second)
    pub avg_hashrate: f64,
}

/// Atomic counters shared by the workers of one session
///
/// Workers keep their own attempt counter and flush it here in batches,
/// so the hot loop never touches shared memory.
#[derive(Debug)]
pub struct SessionCounters {
    attempts: AtomicU64,
    active_workers: AtomicUsize,
    start_time: Instant,
}

impl SessionCounters {
    pub(crate) fn new() -> Self {
        SessionCounters {
            attempts: AtomicU64::new(0),
            active_workers: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub(crate) fn add_attempts(&self, count: u64) {
        if count > 0 {
            self.attempts.fetch_add(count, Ordering::Relaxed);
        }
    }

    pub(crate) fn worker_started(&self) {
        self.active_workers.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn worker_exited(&self) {
        self.active_workers.fetch_sub(1, Ordering::AcqRel);
    }

    /// Number of workers still inside their search loop
    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::Acquire)
    }
}

/// Reads and periodically logs the statistics of a mining session
#[derive(Clone)]
pub struct StatsReporter {
    counters: Arc<SessionCounters>,
}

impl StatsReporter {
    /// Creates a reporter over a session's counters
    pub fn new(counters: Arc<SessionCounters>) -> Self {
        StatsReporter { counters }
    }

    /// Gets the current mining statistics
    ///
    /// # Returns
    /// A snapshot of the session counters
    pub fn get_stats(&self) -> MiningStats {
        let elapsed = self.counters.start_time.elapsed();
        let attempts_total = self.counters.attempts.load(Ordering::Relaxed);
        let secs = elapsed.as_secs_f64();

        MiningStats {
            attempts_total,
            active_workers: self.counters.active_workers(),
            elapsed,
            avg_hashrate: if secs > 0.0 {
                attempts_total as f64 / secs
            } else {
                0.0
            },
        }
    }

    /// Starts the periodic reporting of statistics
    ///
    /// Spawns a background thread that logs a line every `interval` and
    /// returns once every worker of the session has exited. Intervals
    /// shorter than [`MIN_REPORT_INTERVAL`] are raised to it.
    pub fn start_reporting(&self, interval: Duration) -> thread::JoinHandle<()> {
        let reporter = self.clone();
        let (interval, tick) = report_period(interval);

        thread::spawn(move || {
            let mut last_report = Instant::now();

            while reporter.counters.active_workers() > 0 {
                thread::sleep(tick);
                if last_report.elapsed() < interval {
                    continue;
                }
                last_report = Instant::now();

                let stats = reporter.get_stats();
                log::info!(
                    "Hashrate: {:.2} H/s | Attempts: {} | Active workers: {}",
                    stats.avg_hashrate,
                    stats.attempts_total,
                    stats.active_workers
                );
            }
        })
    }
}

/// Effective `(interval, tick)` for a requested reporting interval
fn report_period(requested: Duration) -> (Duration, Duration) {
    let interval = requested.max(MIN_REPORT_INTERVAL);
    (interval, interval.min(MIN_REPORT_INTERVAL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let counters = Arc::new(SessionCounters::new());
        counters.worker_started();
        counters.worker_started();
        counters.add_attempts(1_000);
        counters.add_attempts(0);
        counters.add_attempts(24);
        counters.worker_exited();

        let stats = StatsReporter::new(counters).get_stats();
        assert_eq!(stats.attempts_total, 1_024);
        assert_eq!(stats.active_workers, 1);
    }

    #[test]
    fn test_reporting_thread_stops_when_workers_exit() {
        let counters = Arc::new(SessionCounters::new());
        counters.worker_started();
        let reporter = StatsReporter::new(counters.clone());
        let handle = reporter.start_reporting(Duration::from_millis(10));

        thread::sleep(Duration::from_millis(30));
        counters.worker_exited();
        handle.join().unwrap();
        assert_eq!(reporter.get_stats().active_workers, 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        assert_eq!(
            report_period(Duration::ZERO),
            (MIN_REPORT_INTERVAL, MIN_REPORT_INTERVAL)
        );
        assert_eq!(
            report_period(Duration::from_secs(5)),
            (Duration::from_secs(5), MIN_REPORT_INTERVAL)
        );
    }

    #[test]
    fn test_zero_interval_reporting_still_stops() {
        let counters = Arc::new(SessionCounters::new());
        counters.worker_started();
        let handle = StatsReporter::new(counters.clone()).start_reporting(Duration::ZERO);

        thread::sleep(Duration::from_millis(250));
        counters.worker_exited();
        handle.join().unwrap();
    }
}
