//! The negamax alpha-beta node.

use crate::board::{
    mate_in, mated_in, Move, Value, MAX_PLY, VALUE_DRAW, VALUE_INFINITE, VALUE_MATE_IN_MAX_PLY,
    VALUE_ZERO,
};
use crate::tt::{value_from_tt, value_to_tt, Bound};

use super::Searcher;

const NULL_MOVE_MIN_DEPTH: i32 = 3;
/// Futility pruning applies below this depth.
const FUTILITY_MAX_DEPTH: i32 = 4;
const FUTILITY_MARGIN_PER_PLY: Value = 128;

impl Searcher {
    /// Search one interior node to `depth` with window `[alpha, beta]`.
    /// `ply` is the distance from the search root.
    pub(crate) fn alphabeta(
        &mut self,
        mut alpha: Value,
        mut beta: Value,
        mut depth: i32,
        ply: usize,
    ) -> Value {
        self.visit_node();
        if self.aborted() {
            return VALUE_ZERO;
        }
        if ply >= MAX_PLY {
            return self.pos.evaluate();
        }

        if self.pos.is_draw() {
            return VALUE_DRAW;
        }

        // Mate-distance pruning: a shorter mate is already known, so
        // clamp the window to what this node could still prove.
        alpha = alpha.max(mated_in(ply));
        beta = beta.min(mate_in(ply + 1));
        if alpha >= beta {
            return alpha;
        }

        let key = self.pos.key();
        let mut tt_move = Move::NONE;
        let mut tt_pv = false;
        if let Some(entry) = self.tt.probe(key) {
            tt_move = entry.mv;
            tt_pv = entry.pv;
            if entry.depth >= depth {
                let value = value_from_tt(entry.value, ply);
                match entry.bound {
                    Bound::Exact => return value,
                    Bound::Lower if value >= beta => return value,
                    Bound::Upper if value <= alpha => return value,
                    _ => {}
                }
            }
        }

        let in_check = self.pos.in_check();
        if in_check {
            depth += 1;
        }
        if depth <= 0 && !in_check {
            return self.qsearch(alpha, beta, ply);
        }

        let is_pv = beta - alpha > 1;
        let static_eval = self.pos.evaluate();

        // Null-move pruning: hand the opponent a free move; if the
        // reduced search still fails high, a real move will too. Needs
        // pieces on the board or zugzwang refutes it.
        if !in_check
            && depth >= NULL_MOVE_MIN_DEPTH
            && self.pos.last_move() != Move::NULL
            && self.pos.non_pawn_material(self.pos.side_to_move()) > 0
        {
            let reduction = if depth > 6 { 3 } else { 2 };
            self.pos.do_null_move();
            let value = -self.alphabeta(-beta, -beta + 1, depth - 1 - reduction, ply + 1);
            self.pos.undo_null_move();
            if self.aborted() {
                return VALUE_ZERO;
            }
            if value >= beta && value < VALUE_MATE_IN_MAX_PLY {
                return value;
            }
        }

        // Futility: a shallow node whose static eval trails alpha by
        // more than a per-ply margin is resolved tactically only.
        if !in_check
            && depth < FUTILITY_MAX_DEPTH
            && alpha.abs() < VALUE_MATE_IN_MAX_PLY
            && static_eval + FUTILITY_MARGIN_PER_PLY * depth < alpha
        {
            return self.qsearch(alpha, beta, ply);
        }

        let moves = self.pos.generate_moves();
        if moves.is_empty() {
            return if in_check { mated_in(ply) } else { VALUE_DRAW };
        }

        let mut scored = self.score_moves(&moves, tt_move, ply);
        let mut best_value = -VALUE_INFINITE;
        let mut best_move = Move::NONE;
        let mut bound = Bound::Upper;

        let mut idx = 0;
        while let Some(scored_move) = scored.pick_best(idx) {
            let m = scored_move.mv;
            let move_index = idx;
            idx += 1;
            let quiet = self.is_quiet(m);

            self.pos.do_move(m);
            let mut value;
            if move_index == 0 {
                value = -self.alphabeta(-beta, -alpha, depth - 1, ply + 1);
            } else {
                // Late quiet moves get a reduced zero-window probe
                // first, widening only on evidence they are better than
                // their ordering suggests.
                let mut reduction = 0;
                if depth >= 3 && move_index > 3 && quiet && !in_check {
                    reduction = if move_index > 8 { 2 } else { 1 };
                    if depth > 8 {
                        reduction += 1;
                    }
                }
                value = -self.alphabeta(-alpha - 1, -alpha, depth - 1 - reduction, ply + 1);
                if value > alpha && reduction > 0 {
                    value = -self.alphabeta(-alpha - 1, -alpha, depth - 1, ply + 1);
                }
                if value > alpha && value < beta {
                    value = -self.alphabeta(-beta, -alpha, depth - 1, ply + 1);
                }
            }
            self.pos.undo_move();
            if self.aborted() {
                return VALUE_ZERO;
            }

            if value > best_value {
                best_value = value;
                best_move = m;
                if value > alpha {
                    alpha = value;
                    bound = Bound::Exact;
                }
            }
            if alpha >= beta {
                bound = Bound::Lower;
                if quiet {
                    self.record_cutoff(m, ply, depth);
                }
                break;
            }
        }

        self.tt.store(
            key,
            best_move,
            value_to_tt(best_value, ply),
            static_eval,
            depth,
            bound,
            is_pv || tt_pv,
        );
        best_value
    }
}
