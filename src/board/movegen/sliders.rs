//! Bishop, rook and queen move generation by ray walking.

use super::super::attack_tables::piece_attacks;
use super::super::state::Position;
use super::super::types::{Bitboard, Move, MoveList, PieceType, Square};

impl Position {
    pub(super) fn slider_moves(
        &self,
        from: Square,
        pt: PieceType,
        targets: Bitboard,
        moves: &mut MoveList,
    ) {
        let attacks = piece_attacks(pt, from, self.occupied());
        for to in (attacks & targets).iter() {
            moves.push(Move::new(from, to));
        }
    }
}
