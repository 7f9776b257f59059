//! Pawn move generation: pushes, double pushes, captures, promotions
//! and en passant.

use super::super::attack_tables::pawn_attacks;
use super::super::state::Position;
use super::super::types::{Color, Move, MoveList, PieceType, Square};

const PROMOTION_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

impl Position {
    pub(super) fn pawn_moves(&self, from: Square, captures_only: bool, moves: &mut MoveList) {
        let us = self.side;
        let up: i32 = if us == Color::White { 8 } else { -8 };
        let rel_rank = from.relative_rank(us);
        let promoting = rel_rank == 6;

        // Pushes. Promotions count as tactical, so a push to the last
        // rank is generated even in captures-only mode.
        let push_sq = Square::from_index((from.index() as i32 + up) as usize);
        if self.piece_on(push_sq).is_none() {
            if promoting {
                for pt in PROMOTION_PIECES {
                    moves.push(Move::promotion(from, push_sq, pt));
                }
            } else if !captures_only {
                moves.push(Move::new(from, push_sq));
                if rel_rank == 1 {
                    let double_sq = Square::from_index((from.index() as i32 + 2 * up) as usize);
                    if self.piece_on(double_sq).is_none() {
                        moves.push(Move::new(from, double_sq));
                    }
                }
            }
        }

        // Diagonal captures.
        let attacks = pawn_attacks(us, from);
        for to in (attacks & self.their_pieces()).iter() {
            if promoting {
                for pt in PROMOTION_PIECES {
                    moves.push(Move::promotion(from, to, pt));
                }
            } else {
                moves.push(Move::new(from, to));
            }
        }

        // En passant. Legality against a discovered check on the vacated
        // rank is handled by the post-filter.
        if let Some(ep) = self.ep_square() {
            if attacks.contains(ep) {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }
}
