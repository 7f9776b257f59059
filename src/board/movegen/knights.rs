//! Knight move generation.

use super::super::attack_tables::knight_attacks;
use super::super::state::Position;
use super::super::types::{Bitboard, Move, MoveList, Square};

impl Position {
    pub(super) fn knight_moves(&self, from: Square, targets: Bitboard, moves: &mut MoveList) {
        for to in (knight_attacks(from) & targets).iter() {
            moves.push(Move::new(from, to));
        }
    }
}
