//! Multi-threaded CPU mining
//!
//! A [`Miner`] splits a job's nonce range into contiguous, disjoint
//! sub-ranges and runs one scanning thread per sub-range. All threads share
//! one read-only [`HashChain`]; each owns its header copy, its stop flag and
//! its hash counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use x15_core::{Digest, HashChain, Header, NonceRange, ScanOutcome, Target, scan};

use crate::config::MinerConfig;
use crate::error::{MinerError, Result};

/// One unit of work: a header template, its target and the nonces to try
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub header: Header,
    pub target: Target,
    pub range: NonceRange,
}

/// A nonce whose digest meets the job target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Worker that found it
    pub thread_id: usize,
    /// Job header with the winning nonce in place
    pub header: Header,
    pub digest: Digest,
    pub nonce: u32,
}

impl Solution {
    /// Serializable record for handing the solution to a pool or node
    pub fn submission(&self) -> Submission {
        Submission {
            thread_id: self.thread_id,
            nonce: self.nonce,
            nonce_hex: hex::encode(self.nonce.to_be_bytes()),
            header: hex::encode(self.header.to_be_bytes()),
            digest: self.digest.to_string(),
        }
    }
}

/// Solution in wire form; byte fields are lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub thread_id: usize,
    pub nonce: u32,
    /// Nonce as it appears in the serialized header (big-endian)
    pub nonce_hex: String,
    /// 80-byte serialized header
    pub header: String,
    /// 32-byte digest
    pub digest: String,
}

/// Why a worker stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// Found a solution and stopped the session
    Solved,
    /// Tried every nonce in its sub-range
    Exhausted,
    /// Stopped by the session or by another worker's solution
    Cancelled,
}

/// Final state of one worker
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub thread_id: usize,
    pub range: NonceRange,
    pub hashes_done: u64,
    pub last_nonce: u32,
    pub exit: WorkerExit,
    pub solutions: Vec<Solution>,
}

/// Outcome of a finished session
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Reports ordered by thread id
    pub workers: Vec<WorkerReport>,
    pub hashes_done: u64,
    pub elapsed: Duration,
    /// Every solution found, ordered by thread id then nonce
    pub solutions: Vec<Solution>,
}

impl SessionSummary {
    /// Average hashes per second over the whole session
    pub fn hashrate(&self) -> f64 {
        compute_hash_rate(self.hashes_done, self.elapsed)
    }
}

fn compute_hash_rate(hashes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { hashes as f64 / secs } else { 0.0 }
}

/// Split `range` into at most `workers` contiguous, disjoint sub-ranges
/// covering exactly the same nonces.
///
/// An empty range yields a single empty sub-range so one worker still
/// reports it as exhausted.
pub fn split_range(range: NonceRange, workers: usize) -> Vec<NonceRange> {
    let len = range.len();
    if len == 0 {
        return vec![range];
    }
    let workers = (workers.max(1) as u64).min(len);
    let base = u64::from(range.start);
    (0..workers)
        .map(|i| {
            let lo = base + len * i / workers;
            let hi = base + len * (i + 1) / workers;
            NonceRange::new(lo as u32, hi as u32)
        })
        .collect()
}

/// State shared between a session and its workers
struct Shared {
    stop: Vec<AtomicBool>,
    hashes: Vec<AtomicU64>,
}

impl Shared {
    fn new(workers: usize) -> Self {
        Self {
            stop: (0..workers).map(|_| AtomicBool::new(false)).collect(),
            hashes: (0..workers).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    fn stop_all(&self) {
        for flag in &self.stop {
            flag.store(true, Ordering::Relaxed);
        }
    }

    fn hashes_done(&self) -> u64 {
        self.hashes.iter().map(|h| h.load(Ordering::Relaxed)).sum()
    }
}

/// Thread pool front end over a shared [`HashChain`]
#[derive(Debug, Clone)]
pub struct Miner {
    chain: Arc<HashChain>,
    config: MinerConfig,
}

impl Miner {
    pub fn new(chain: Arc<HashChain>, config: MinerConfig) -> Self {
        Self { chain, config }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    pub fn chain(&self) -> &Arc<HashChain> {
        &self.chain
    }

    /// Spawn the workers for `job` and return immediately
    pub fn start(&self, job: Job) -> Result<MiningSession> {
        self.config.validate()?;

        let ranges = split_range(job.range, self.config.worker_threads());
        let shared = Arc::new(Shared::new(ranges.len()));
        let (solution_tx, solution_rx) = channel::unbounded();

        info!(
            "Starting X15 session: {} workers, nonces {}..={}, target high word {:#010x}",
            ranges.len(),
            job.range.start.saturating_add(1),
            job.range.max,
            job.target.high_word()
        );
        for (algorithm, backend) in self.chain.template().selection() {
            debug!("Stage {} using {} backend", algorithm, backend);
        }

        let mut handles = Vec::with_capacity(ranges.len());
        for (thread_id, range) in ranges.into_iter().enumerate() {
            let worker = Worker {
                thread_id,
                chain: Arc::clone(&self.chain),
                shared: Arc::clone(&shared),
                header: job.header,
                target: job.target,
                range,
                scan_chunk: self.config.scan_chunk,
                stop_on_solution: self.config.stop_on_solution,
                solution_tx: solution_tx.clone(),
            };
            let spawned = thread::Builder::new()
                .name(format!("x15-worker-{}", thread_id))
                .spawn(move || worker.run());
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    warn!("Failed to spawn worker {}: {}", thread_id, e);
                    shared.stop_all();
                    return Err(MinerError::Spawn(e));
                }
            }
        }

        Ok(MiningSession {
            handles,
            shared,
            solutions: solution_rx,
            started: Instant::now(),
        })
    }
}

struct Worker {
    thread_id: usize,
    chain: Arc<HashChain>,
    shared: Arc<Shared>,
    header: Header,
    target: Target,
    range: NonceRange,
    scan_chunk: u32,
    stop_on_solution: bool,
    solution_tx: Sender<Solution>,
}

impl Worker {
    fn run(mut self) -> WorkerReport {
        let id = self.thread_id;
        let stop = &self.shared.stop[id];
        let counter = &self.shared.hashes[id];
        let mut solutions = Vec::new();
        let mut hashes_done = 0u64;
        let mut nonce = self.range.start;
        self.header.set_nonce(nonce);

        debug!("Worker {} scanning nonces {}..={}", id, nonce.saturating_add(1), self.range.max);

        let exit = loop {
            if nonce >= self.range.max {
                break WorkerExit::Exhausted;
            }

            let pass = NonceRange::new(nonce, nonce.saturating_add(self.scan_chunk).min(self.range.max));
            let pass_start = Instant::now();
            let report = scan(&self.chain, &mut self.header, &self.target, pass, stop);

            counter.fetch_add(report.hashes_done, Ordering::Relaxed);
            hashes_done += report.hashes_done;
            nonce = report.last_nonce;

            match report.outcome {
                ScanOutcome::Found(digest) => {
                    info!("Solution found by worker {} with nonce {} ({})", id, nonce, digest);
                    let solution = Solution {
                        thread_id: id,
                        header: self.header,
                        digest,
                        nonce,
                    };
                    // The session may already be gone; the report still carries it
                    let _ = self.solution_tx.send(solution.clone());
                    solutions.push(solution);

                    if self.stop_on_solution {
                        self.shared.stop_all();
                        break WorkerExit::Solved;
                    }
                }
                ScanOutcome::Cancelled => break WorkerExit::Cancelled,
                ScanOutcome::Exhausted => {
                    debug!(
                        "Worker {} at nonce {}: {} hashes, {:.2} H/s",
                        id,
                        nonce,
                        hashes_done,
                        compute_hash_rate(report.hashes_done, pass_start.elapsed())
                    );
                }
            }
        };

        debug!("Worker {} finished ({:?}) after {} hashes", id, exit, hashes_done);

        WorkerReport {
            thread_id: id,
            range: self.range,
            hashes_done,
            last_nonce: nonce,
            exit,
            solutions,
        }
    }
}

/// Handle to a running set of workers.
///
/// Dropping the session stops the workers without waiting for them.
pub struct MiningSession {
    handles: Vec<JoinHandle<WorkerReport>>,
    shared: Arc<Shared>,
    solutions: Receiver<Solution>,
    started: Instant,
}

impl MiningSession {
    /// Live solution feed; disconnects once every worker has exited
    pub fn solutions(&self) -> &Receiver<Solution> {
        &self.solutions
    }

    /// Ask every worker to stop; each exits within one hash evaluation
    pub fn stop(&self) {
        self.shared.stop_all();
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Hashes completed so far, summed over workers.
    ///
    /// Counters advance once per scan pass, so this trails the true count
    /// by at most one pass per worker.
    pub fn hashes_done(&self) -> u64 {
        self.shared.hashes_done()
    }

    /// Average hashes per second since the session started
    pub fn hashrate(&self) -> f64 {
        compute_hash_rate(self.hashes_done(), self.started.elapsed())
    }

    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(|h| h.is_finished())
    }

    /// Wait for every worker and collect their reports
    pub fn join(mut self) -> Result<SessionSummary> {
        let mut workers = Vec::with_capacity(self.handles.len());
        let mut panicked = None;

        for (thread_id, handle) in std::mem::take(&mut self.handles).into_iter().enumerate() {
            match handle.join() {
                Ok(report) => workers.push(report),
                Err(_) => {
                    warn!("Worker {} panicked", thread_id);
                    self.shared.stop_all();
                    panicked.get_or_insert(thread_id);
                }
            }
        }
        if let Some(thread_id) = panicked {
            return Err(MinerError::WorkerPanicked(thread_id));
        }

        let elapsed = self.started.elapsed();
        let hashes_done = workers.iter().map(|w| w.hashes_done).sum();
        let solutions: Vec<Solution> = workers
            .iter()
            .flat_map(|w| w.solutions.iter().cloned())
            .collect();

        info!(
            "Session finished: {} hashes in {:.2}s ({:.2} H/s), {} solutions",
            hashes_done,
            elapsed.as_secs_f64(),
            compute_hash_rate(hashes_done, elapsed),
            solutions.len()
        );

        Ok(SessionSummary {
            workers,
            hashes_done,
            elapsed,
            solutions,
        })
    }
}

impl Drop for MiningSession {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            self.shared.stop_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(ranges: &[NonceRange]) -> u64 {
        ranges.iter().map(|r| r.len()).sum()
    }

    #[test]
    fn test_split_is_contiguous_and_complete() {
        let range = NonceRange::new(10, 1010);
        let parts = split_range(range, 3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].start, 10);
        assert_eq!(parts[2].max, 1010);
        for pair in parts.windows(2) {
            assert_eq!(pair[0].max, pair[1].start);
        }
        assert_eq!(covered(&parts), 1000);
    }

    #[test]
    fn test_split_never_exceeds_range_len() {
        let parts = split_range(NonceRange::new(0, 3), 8);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|r| r.len() == 1));
    }

    #[test]
    fn test_split_full_nonce_space() {
        let parts = split_range(NonceRange::new(0, u32::MAX), 7);
        assert_eq!(parts.len(), 7);
        assert_eq!(parts[6].max, u32::MAX);
        assert_eq!(covered(&parts), u64::from(u32::MAX));
    }

    #[test]
    fn test_split_empty_range() {
        let range = NonceRange::new(5, 5);
        assert_eq!(split_range(range, 4), vec![range]);
        assert_eq!(split_range(NonceRange::new(9, 2), 4).len(), 1);
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        assert_eq!(split_range(NonceRange::new(0, 100), 0).len(), 1);
    }

    #[test]
    fn test_hash_rate_of_zero_elapsed() {
        assert_eq!(compute_hash_rate(100, Duration::ZERO), 0.0);
        assert_eq!(compute_hash_rate(100, Duration::from_secs(2)), 50.0);
    }
}
