//! King move and castling generation.

use super::super::attack_tables::king_attacks;
use super::super::state::Position;
use super::super::types::{path_bb, Bitboard, CastlingRights, Color, Move, MoveList, Square};

impl Position {
    pub(super) fn king_moves(&self, from: Square, targets: Bitboard, moves: &mut MoveList) {
        for to in (king_attacks(from) & targets).iter() {
            moves.push(Move::new(from, to));
        }
    }

    /// Castling: the right must be held, the squares between king and
    /// rook empty, and none of the king's path squares (origin, crossed,
    /// destination) attacked.
    pub(super) fn castling_moves(&self, king: Square, moves: &mut MoveList) {
        let us = self.side;
        let them = us.opponent();
        let rank = if us == Color::White { 0 } else { 7 };
        if king != Square::new(rank, 4) {
            return;
        }

        if self.castling_rights().has(CastlingRights::kingside(us)) {
            let between = path_bb(Square::new(rank, 5), Square::new(rank, 6));
            let king_path = [Square::new(rank, 5), Square::new(rank, 6)];
            if (between & self.occupied()).is_empty()
                && !self.square_attacked(king, them)
                && king_path.iter().all(|&sq| !self.square_attacked(sq, them))
            {
                moves.push(Move::castling(king, Square::new(rank, 6)));
            }
        }

        if self.castling_rights().has(CastlingRights::queenside(us)) {
            let between = path_bb(Square::new(rank, 1), Square::new(rank, 3));
            let king_path = [Square::new(rank, 3), Square::new(rank, 2)];
            if (between & self.occupied()).is_empty()
                && !self.square_attacked(king, them)
                && king_path.iter().all(|&sq| !self.square_attacked(sq, them))
            {
                moves.push(Move::castling(king, Square::new(rank, 2)));
            }
        }
    }
}
