//! The worker pool.
//!
//! One main worker and zero or more helpers implement Lazy SMP: every
//! worker runs its own iterative deepening on a private copy of the root
//! position and cooperates only through the shared transposition table.
//! Workers block on a condition variable between searches; the UCI
//! thread hands them a job and returns to reading stdin.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use crate::board::Position;
use crate::search::{SearchLimits, Searcher};
use crate::tt::TranspositionTable;
use crate::uci;

/// A search assignment handed to one worker.
struct Job {
    pos: Position,
    limits: SearchLimits,
    tt: Arc<TranspositionTable>,
    stop: Arc<AtomicBool>,
    nodes: Arc<AtomicU64>,
    is_main: bool,
}

#[derive(Default)]
struct GateState {
    job: Option<Job>,
    searching: bool,
    quit: bool,
}

/// The condvar-gated mailbox each worker blocks on.
#[derive(Default)]
struct Gate {
    state: Mutex<GateState>,
    cv: Condvar,
}

struct Worker {
    gate: Arc<Gate>,
    handle: Option<JoinHandle<()>>,
}

pub struct ThreadPool {
    workers: Vec<Worker>,
    stop: Arc<AtomicBool>,
    tt: Arc<TranspositionTable>,
}

impl ThreadPool {
    #[must_use]
    pub fn new(threads: usize, hash_mb: usize) -> ThreadPool {
        let mut pool = ThreadPool {
            workers: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
            tt: Arc::new(TranspositionTable::new(hash_mb)),
        };
        pool.spawn_workers(threads.max(1));
        pool
    }

    fn spawn_workers(&mut self, count: usize) {
        for _ in 0..count {
            let gate = Arc::new(Gate::default());
            let worker_gate = Arc::clone(&gate);
            let handle = std::thread::Builder::new()
                .name("search-worker".to_string())
                .spawn(move || worker_loop(&worker_gate))
                .expect("failed to spawn search worker");
            self.workers.push(Worker {
                gate,
                handle: Some(handle),
            });
        }
    }

    /// Number of workers.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Replace the worker set. Only callable while idle.
    pub fn set_threads(&mut self, count: usize) {
        self.wait_idle();
        self.shutdown_workers();
        self.spawn_workers(count.max(1));
    }

    /// Swap in a table of the given size, keeping entries that still
    /// resolve. Only callable while idle.
    pub fn resize_hash(&mut self, mb: usize) {
        self.wait_idle();
        self.tt = Arc::new(self.tt.resized(mb));
    }

    /// Zero the shared table.
    pub fn clear_hash(&self) {
        self.tt.clear();
    }

    /// Kick off a search on every worker. Worker 0 watches the clock and
    /// owns the reporting.
    pub fn start_search(&mut self, pos: &Position, limits: &SearchLimits) {
        self.wait_idle();
        self.stop.store(false, Ordering::Release);
        self.tt.new_generation();

        let shared_nodes = Arc::new(AtomicU64::new(0));
        for (idx, worker) in self.workers.iter().enumerate() {
            let job = Job {
                pos: pos.clone(),
                limits: limits.clone(),
                tt: Arc::clone(&self.tt),
                stop: Arc::clone(&self.stop),
                nodes: Arc::clone(&shared_nodes),
                is_main: idx == 0,
            };
            let mut state = worker.gate.state.lock();
            state.job = Some(job);
            state.searching = true;
            worker.gate.cv.notify_all();
        }
    }

    /// Raise the stop flag; workers observe it within 2048 nodes.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Block until every worker is back on its condition variable.
    pub fn wait_idle(&self) {
        for worker in &self.workers {
            let mut state = worker.gate.state.lock();
            while state.searching {
                worker.gate.cv.wait(&mut state);
            }
        }
    }

    fn shutdown_workers(&mut self) {
        for worker in &mut self.workers {
            {
                let mut state = worker.gate.state.lock();
                state.quit = true;
                worker.gate.cv.notify_all();
            }
            if let Some(handle) = worker.handle.take() {
                let _ = handle.join();
            }
        }
        self.workers.clear();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.stop();
        self.wait_idle();
        self.shutdown_workers();
    }
}

fn worker_loop(gate: &Gate) {
    loop {
        let job = {
            let mut state = gate.state.lock();
            loop {
                if state.quit {
                    return;
                }
                if let Some(job) = state.job.take() {
                    break job;
                }
                gate.cv.wait(&mut state);
            }
        };

        let is_main = job.is_main;
        let stop = Arc::clone(&job.stop);
        let mut searcher = Searcher::new(
            job.pos, job.tt, job.stop, job.nodes, job.limits, is_main,
        );
        let result = searcher.run();

        if is_main {
            // The main worker owns the authoritative best move; raising
            // stop here winds the helpers down promptly.
            stop.store(true, Ordering::Release);
            let line = format!("bestmove {}", result.best_move);
            println!("{line}");
            uci::debug_log(&line);
        }

        let mut state = gate.state.lock();
        state.searching = false;
        gate.cv.notify_all();
    }
}
