//! Iterative-deepening alpha-beta search.
//!
//! One [`Searcher`] per worker thread: it owns its position, killer and
//! history tables, and cooperates with the other workers only through
//! the shared transposition table and the atomic stop flag.

mod alphabeta;
mod iterative;
mod move_order;
mod quiescence;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::{Color, Move, Position, Value, MAX_PLY};
use crate::tt::TranspositionTable;

/// How often the clock and stop flag are polled, in nodes.
const STOP_CHECK_INTERVAL: u64 = 2048;

/// Depth searched when none is requested.
pub const DEFAULT_MAX_DEPTH: i32 = 64;

/// Everything a `go` command constrains about the next search.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    /// Remaining clock time per color, in ms.
    pub time: [u64; 2],
    /// Increment per color, in ms.
    pub inc: [u64; 2],
    pub movestogo: Option<u32>,
    pub movetime: Option<u64>,
    pub depth: Option<i32>,
    pub nodes: Option<u64>,
    /// Stop early once a mate in at most this many moves is found.
    pub mate: Option<i32>,
    pub infinite: bool,
}

impl SearchLimits {
    /// Time budget for this search in milliseconds.
    ///
    /// `movetime` is taken verbatim; with clock information the budget
    /// is a twentieth of the remaining time plus half the increment;
    /// analysis gets an effectively unlimited window.
    #[must_use]
    pub fn allocation(&self, us: Color) -> u64 {
        if let Some(movetime) = self.movetime {
            return movetime;
        }
        let time = self.time[us.index()];
        let inc = self.inc[us.index()];
        if self.infinite || (time == 0 && inc == 0) {
            return 1_000_000;
        }
        (time / 20 + inc / 2).max(50)
    }
}

/// Outcome of one worker's search.
#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub value: Value,
    /// Deepest fully completed iteration.
    pub depth: i32,
    pub nodes: u64,
}

/// A single search worker.
pub struct Searcher {
    pub(crate) pos: Position,
    pub(crate) tt: Arc<TranspositionTable>,
    stop: Arc<AtomicBool>,
    /// Node total across all workers, for info lines and the node cap.
    shared_nodes: Arc<AtomicU64>,
    pub(crate) limits: SearchLimits,
    allocated_ms: u64,
    start: Instant,
    pub(crate) nodes: u64,
    pub(crate) killers: [[Move; 2]; MAX_PLY],
    /// History scores indexed by (packed piece, destination square).
    pub(crate) history: [[i32; 64]; 16],
    /// Only the main worker watches the clock and reports.
    is_main: bool,
    report: bool,
    stopped: bool,
}

impl Searcher {
    #[must_use]
    pub fn new(
        pos: Position,
        tt: Arc<TranspositionTable>,
        stop: Arc<AtomicBool>,
        shared_nodes: Arc<AtomicU64>,
        limits: SearchLimits,
        is_main: bool,
    ) -> Searcher {
        let allocated_ms = limits.allocation(pos.side_to_move());
        Searcher {
            pos,
            tt,
            stop,
            shared_nodes,
            limits,
            allocated_ms,
            start: Instant::now(),
            nodes: 0,
            killers: [[Move::NONE; 2]; MAX_PLY],
            history: [[0; 64]; 16],
            is_main,
            report: is_main,
            stopped: false,
        }
    }

    /// Disable info/bestmove reporting; used by tests and helpers.
    pub fn set_report(&mut self, report: bool) {
        self.report = report;
    }

    pub(crate) fn reporting(&self) -> bool {
        self.report
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub(crate) fn total_nodes(&self) -> u64 {
        self.shared_nodes.load(Ordering::Relaxed) + self.nodes % STOP_CHECK_INTERVAL
    }

    /// Count one node and, every 2048 nodes, poll the stop flag, the
    /// clock and the node cap.
    pub(crate) fn visit_node(&mut self) {
        self.nodes += 1;
        if self.nodes % STOP_CHECK_INTERVAL != 0 {
            return;
        }
        self.shared_nodes
            .fetch_add(STOP_CHECK_INTERVAL, Ordering::Relaxed);
        if self.stop.load(Ordering::Acquire) {
            self.stopped = true;
            return;
        }
        if self.is_main {
            let out_of_time = self.elapsed_ms() > self.allocated_ms;
            let out_of_nodes = self
                .limits
                .nodes
                .is_some_and(|cap| self.shared_nodes.load(Ordering::Relaxed) >= cap);
            if out_of_time || out_of_nodes {
                self.stop.store(true, Ordering::Release);
                self.stopped = true;
            }
        }
    }

    /// True once the stop flag has been observed; partial results above
    /// the abort return `VALUE_ZERO` and are discarded by the root loop.
    #[inline]
    pub(crate) fn aborted(&self) -> bool {
        self.stopped
    }

    /// Flush the node remainder into the shared counter at search end.
    pub(crate) fn flush_nodes(&mut self) {
        self.shared_nodes
            .fetch_add(self.nodes % STOP_CHECK_INTERVAL, Ordering::Relaxed);
    }
}

/// Run a depth-limited search on a copy of `pos` with a private table.
/// Convenience entry point for tests and tools; the engine proper drives
/// [`Searcher`] through the thread pool.
#[must_use]
pub fn search_to_depth(pos: &Position, depth: i32) -> SearchResult {
    let limits = SearchLimits {
        depth: Some(depth),
        ..SearchLimits::default()
    };
    let mut searcher = Searcher::new(
        pos.clone(),
        Arc::new(TranspositionTable::new(16)),
        Arc::new(AtomicBool::new(false)),
        Arc::new(AtomicU64::new(0)),
        limits,
        true,
    );
    searcher.set_report(false);
    searcher.run()
}
