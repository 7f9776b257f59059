//! Root iterative deepening.
//!
//! Each iteration re-searches the whole tree one ply deeper, seeding the
//! move ordering with the previous iteration's best move. A stop signal
//! discards the unfinished iteration and the last completed one stands.

use crate::board::{
    to_centipawns, Move, Value, MAX_PLY, VALUE_DRAW, VALUE_INFINITE, VALUE_MATE,
    VALUE_MATE_IN_MAX_PLY, VALUE_ZERO,
};
use crate::tt::{value_to_tt, Bound};

use super::{SearchResult, Searcher, DEFAULT_MAX_DEPTH};

impl Searcher {
    /// Run the full search and return the best move of the deepest
    /// completed iteration.
    pub fn run(&mut self) -> SearchResult {
        self.killers = [[Move::NONE; 2]; MAX_PLY];
        self.history = [[0; 64]; 16];

        let root_moves = self.pos.generate_moves();
        if root_moves.is_empty() {
            let value = if self.pos.in_check() {
                -VALUE_MATE
            } else {
                VALUE_DRAW
            };
            self.flush_nodes();
            return SearchResult {
                best_move: Move::NONE,
                value,
                depth: 0,
                nodes: self.nodes,
            };
        }

        let max_depth = self.limits.depth.unwrap_or(DEFAULT_MAX_DEPTH).max(1);
        let mut best_move = Move::NONE;
        let mut best_value = VALUE_ZERO;
        let mut completed_depth = 0;
        let mut previous_best = Move::NONE;

        for depth in 1..=max_depth {
            let mut iteration_best = Move::NONE;
            let mut iteration_value = -VALUE_INFINITE;
            let mut alpha = -VALUE_INFINITE;
            let beta = VALUE_INFINITE;

            let mut scored = self.score_moves(&root_moves, previous_best, 0);
            let mut idx = 0;
            while let Some(scored_move) = scored.pick_best(idx) {
                idx += 1;
                let m = scored_move.mv;
                self.pos.do_move(m);
                let value = -self.alphabeta(-beta, -alpha, depth - 1, 1);
                self.pos.undo_move();
                if self.aborted() {
                    break;
                }
                if value > iteration_value {
                    iteration_value = value;
                    iteration_best = m;
                    if value > alpha {
                        alpha = value;
                    }
                }
            }

            if self.aborted() {
                break;
            }

            best_move = iteration_best;
            best_value = iteration_value;
            completed_depth = depth;
            previous_best = iteration_best;

            self.tt.store(
                self.pos.key(),
                best_move,
                value_to_tt(best_value, 0),
                self.pos.evaluate(),
                depth,
                Bound::Exact,
                true,
            );

            if self.reporting() {
                self.report_iteration(depth, best_value, best_move);
            }

            // A `go mate N` request is satisfied as soon as a mate
            // within N moves is proven.
            if let Some(mate) = self.limits.mate {
                if best_value >= VALUE_MATE - 2 * mate {
                    break;
                }
            }
            if self.elapsed_ms() > self.allocated_ms {
                break;
            }
        }

        // Stopped before depth 1 completed: any legal move beats none.
        if !best_move.is_real() {
            best_move = root_moves[0];
        }

        self.flush_nodes();
        SearchResult {
            best_move,
            value: best_value,
            depth: completed_depth,
            nodes: self.nodes,
        }
    }

    fn report_iteration(&mut self, depth: i32, value: Value, best_move: Move) {
        let score = if value.abs() >= VALUE_MATE_IN_MAX_PLY {
            let plies = VALUE_MATE - value.abs();
            let moves = (plies + 1) / 2;
            if value > 0 {
                format!("mate {moves}")
            } else {
                format!("mate -{moves}")
            }
        } else {
            format!("cp {}", to_centipawns(value))
        };

        let mut pv = self.extract_pv(depth as usize);
        if pv.is_empty() && best_move.is_real() {
            pv.push(best_move);
        }
        let pv_str = pv
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        println!(
            "info depth {depth} score {score} nodes {} time {} pv {pv_str}",
            self.total_nodes(),
            self.elapsed_ms(),
        );
    }

    /// Walk the transposition table from the root to recover the
    /// principal variation, guarding against cycles and stale moves.
    fn extract_pv(&mut self, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut seen_keys = Vec::with_capacity(max_len);

        while pv.len() < max_len {
            let key = self.pos.key();
            if seen_keys.contains(&key) {
                break;
            }
            seen_keys.push(key);

            let Some(entry) = self.tt.probe(key) else { break };
            let m = entry.mv;
            if !m.is_real() || !self.pos.generate_moves().contains(m) {
                break;
            }
            self.pos.do_move(m);
            pv.push(m);
        }

        for _ in 0..pv.len() {
            self.pos.undo_move();
        }
        pv
    }
}
