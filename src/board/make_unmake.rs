//! Incremental move making and unmaking.
//!
//! `do_move` pushes a fresh state frame and applies the move to the
//! board, the bitboard caches and the Zobrist key in place; `undo_move`
//! pops the frame and reverses the placements without recomputing
//! anything. The key invariant — the incremental key always equals
//! [`Position::compute_key`] — is exercised heavily by the tests.

use super::state::Position;
use super::types::{Color, Move, MoveKind, Piece, PieceType, Square};
use crate::zobrist::ZOBRIST;

impl Position {
    /// Compute the Zobrist key of the current position from scratch.
    /// Used when setting up from FEN and by consistency tests; play
    /// paths rely on the incremental updates.
    pub(crate) fn compute_key(&self) -> u64 {
        let mut key = 0u64;
        for idx in 0..64 {
            let piece = self.board[idx];
            if piece.is_some() {
                key ^= ZOBRIST.piece(piece, Square::from_index(idx));
            }
        }
        key ^= ZOBRIST.castling(self.castling_rights());
        if let Some(ep) = self.ep_square() {
            key ^= ZOBRIST.en_passant_file(ep.file());
        }
        if self.side == Color::Black {
            key ^= ZOBRIST.side();
        }
        key
    }

    /// Apply `m`, which must be legal in the current position.
    pub fn do_move(&mut self, m: Move) {
        let us = self.side;
        let them = us.opponent();
        let from = m.from();
        let to = m.to();

        let mut st = *self.top();
        st.last_move = m;
        st.captured = Piece::NONE;
        st.rule50 += 1;

        let mut key = st.key ^ ZOBRIST.side();
        if let Some(ep) = st.ep_square {
            key ^= ZOBRIST.en_passant_file(ep.file());
            st.ep_square = None;
        }

        let moving = self.piece_on(from);
        debug_assert!(moving.is_some() && moving.color() == us);
        debug_assert!(from != to);

        match m.kind() {
            MoveKind::Castling => {
                // King two squares toward the rook, rook to the square
                // the king crossed. Standard rook files only.
                let rank = from.rank();
                let (rook_from, rook_to) = if to.file() == 6 {
                    (Square::new(rank, 7), Square::new(rank, 5))
                } else {
                    (Square::new(rank, 0), Square::new(rank, 3))
                };
                let rook = self.piece_on(rook_from);
                debug_assert!(rook.is_some() && rook.piece_type() == PieceType::Rook);

                self.remove_piece(from);
                self.set_piece(to, moving);
                self.remove_piece(rook_from);
                self.set_piece(rook_to, rook);

                key ^= ZOBRIST.piece(moving, from) ^ ZOBRIST.piece(moving, to);
                key ^= ZOBRIST.piece(rook, rook_from) ^ ZOBRIST.piece(rook, rook_to);
            }
            MoveKind::EnPassant => {
                // The captured pawn sits beside the capturer, one rank
                // behind the destination square.
                let capture_sq = Square::new(from.rank(), to.file());
                let victim = self.piece_on(capture_sq);
                debug_assert!(victim.is_some() && victim.piece_type() == PieceType::Pawn);

                st.captured = victim;
                st.rule50 = 0;
                self.remove_piece(capture_sq);
                self.remove_piece(from);
                self.set_piece(to, moving);

                key ^= ZOBRIST.piece(victim, capture_sq);
                key ^= ZOBRIST.piece(moving, from) ^ ZOBRIST.piece(moving, to);
            }
            MoveKind::Promotion => {
                let victim = self.piece_on(to);
                if victim.is_some() {
                    st.captured = victim;
                    self.remove_piece(to);
                    key ^= ZOBRIST.piece(victim, to);
                }
                let promoted = Piece::new(
                    us,
                    m.promotion_type().expect("promotion move carries a piece"),
                );
                st.rule50 = 0;
                self.remove_piece(from);
                self.set_piece(to, promoted);

                key ^= ZOBRIST.piece(moving, from) ^ ZOBRIST.piece(promoted, to);
            }
            MoveKind::Normal => {
                let victim = self.piece_on(to);
                if victim.is_some() {
                    st.captured = victim;
                    st.rule50 = 0;
                    self.remove_piece(to);
                    key ^= ZOBRIST.piece(victim, to);
                }

                self.remove_piece(from);
                self.set_piece(to, moving);
                key ^= ZOBRIST.piece(moving, from) ^ ZOBRIST.piece(moving, to);

                if moving.piece_type() == PieceType::Pawn {
                    st.rule50 = 0;
                    let dist = to.index() as i32 - from.index() as i32;
                    if dist.abs() == 16 {
                        let ep = Square::from_index((from.index() + to.index()) / 2);
                        st.ep_square = Some(ep);
                        key ^= ZOBRIST.en_passant_file(ep.file());
                    }
                }
            }
        }

        let new_castling = st.castling.after_touch(from).after_touch(to);
        key ^= ZOBRIST.castling(st.castling) ^ ZOBRIST.castling(new_castling);
        st.castling = new_castling;

        st.key = key;
        self.side = them;
        self.game_ply += 1;
        self.states.push(st);
    }

    /// Undo the last `do_move`.
    pub fn undo_move(&mut self) {
        debug_assert!(self.states.len() > 1);
        let st = self.states.pop().expect("undo without a frame");
        let m = st.last_move;
        self.side = self.side.opponent();
        self.game_ply -= 1;

        let us = self.side;
        let from = m.from();
        let to = m.to();

        match m.kind() {
            MoveKind::Castling => {
                let rank = from.rank();
                let (rook_from, rook_to) = if to.file() == 6 {
                    (Square::new(rank, 7), Square::new(rank, 5))
                } else {
                    (Square::new(rank, 0), Square::new(rank, 3))
                };
                let king = self.piece_on(to);
                let rook = self.piece_on(rook_to);
                self.remove_piece(to);
                self.set_piece(from, king);
                self.remove_piece(rook_to);
                self.set_piece(rook_from, rook);
            }
            MoveKind::EnPassant => {
                let pawn = self.piece_on(to);
                self.remove_piece(to);
                self.set_piece(from, pawn);
                self.set_piece(Square::new(from.rank(), to.file()), st.captured);
            }
            MoveKind::Promotion => {
                self.remove_piece(to);
                self.set_piece(from, Piece::new(us, PieceType::Pawn));
                if st.captured.is_some() {
                    self.set_piece(to, st.captured);
                }
            }
            MoveKind::Normal => {
                let moved = self.piece_on(to);
                self.remove_piece(to);
                self.set_piece(from, moved);
                if st.captured.is_some() {
                    self.set_piece(to, st.captured);
                }
            }
        }
    }

    /// Pass the turn: flip the side to move and clear the en-passant
    /// square. Used by null-move pruning only.
    pub fn do_null_move(&mut self) {
        let mut st = *self.top();
        st.last_move = Move::NULL;
        st.captured = Piece::NONE;
        st.rule50 += 1;

        let mut key = st.key ^ ZOBRIST.side();
        if let Some(ep) = st.ep_square {
            key ^= ZOBRIST.en_passant_file(ep.file());
            st.ep_square = None;
        }
        st.key = key;

        self.side = self.side.opponent();
        self.game_ply += 1;
        self.states.push(st);
    }

    /// Undo the last `do_null_move`.
    pub fn undo_null_move(&mut self) {
        debug_assert!(self.states.len() > 1);
        debug_assert!(self.top().last_move == Move::NULL);
        self.states.pop();
        self.side = self.side.opponent();
        self.game_ply -= 1;
    }
}
