//! Static evaluation.
//!
//! A tapered score: every term is accumulated per side as a packed
//! (middlegame, endgame) pair, the sides are subtracted, and the two
//! halves are blended by a phase factor derived from the non-pawn
//! material on the board. The result is from the side-to-move's point
//! of view, positive meaning the mover stands better.

use super::attack_tables::{
    bishop_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
use super::pst::{piece_value, psq, ENDGAME_LIMIT, MIDGAME_LIMIT};
use super::state::Position;
use super::types::{Bitboard, Color, PieceType, Score, Square, Value};

/// Small bonus for having the move.
const TEMPO: Value = 20;

const ISOLATED_PAWN: Score = Score::make(-13, -18);
/// Applied per extra pawn stacked on a file.
const DOUBLED_PAWN: Score = Score::make(-14, -28);
/// Passed-pawn bonus by relative rank.
const PASSED_RANK: [Score; 8] = [
    Score::ZERO,
    Score::make(5, 18),
    Score::make(12, 23),
    Score::make(10, 31),
    Score::make(57, 62),
    Score::make(163, 167),
    Score::make(271, 250),
    Score::ZERO,
];

const ROOK_OPEN_FILE: Score = Score::make(48, 28);
const ROOK_SEMIOPEN_FILE: Score = Score::make(20, 12);
const ROOK_ON_SEVENTH: Score = Score::make(40, 22);
const BISHOP_PAIR: Score = Score::make(55, 70);
const KNIGHT_ON_RIM: Score = Score::make(-29, -22);
const KNIGHT_OUTPOST: Score = Score::make(54, 34);
/// Per minor piece still at home while the queen has wandered out.
const QUEEN_EARLY_SORTIE: Score = Score::make(-14, 0);

/// Per safe destination square, indexed by piece type.
const MOBILITY: [Score; 7] = [
    Score::ZERO,
    Score::ZERO,
    Score::make(10, 8), // knight
    Score::make(8, 6),  // bishop
    Score::make(5, 7),  // rook
    Score::make(3, 5),  // queen
    Score::ZERO,
];

const CASTLED_KING: Score = Score::make(45, 0);
const PAWN_SHIELD_FULL: Score = Score::make(36, 0);
const PAWN_SHIELD_BROKEN: Score = Score::make(-32, 0);

/// Material lead required before the mop-up term kicks in. Low enough
/// that a bare rook ahead qualifies, so K+R vs K makes progress.
const MOPUP_MARGIN: Value = 1200;

impl Position {
    /// Evaluate the position from the side-to-move's perspective.
    #[must_use]
    pub fn evaluate(&self) -> Value {
        let white_material = self.material_score(Color::White);
        let black_material = self.material_score(Color::Black);

        let mut total = self.side_score(Color::White) - self.side_score(Color::Black);

        // With a crushing material lead the tables alone can wander in
        // pawnless endings; steer the winning side toward the mate.
        let lead = white_material - black_material;
        if lead.mg() > MOPUP_MARGIN && lead.eg() > MOPUP_MARGIN {
            total += Score::make(0, self.mop_up(Color::White));
        } else if -lead.mg() > MOPUP_MARGIN && -lead.eg() > MOPUP_MARGIN {
            total -= Score::make(0, self.mop_up(Color::Black));
        }

        let npm = (self.non_pawn_material(Color::White) + self.non_pawn_material(Color::Black))
            .clamp(ENDGAME_LIMIT, MIDGAME_LIMIT);
        let phase = (npm - ENDGAME_LIMIT) * 128 / (MIDGAME_LIMIT - ENDGAME_LIMIT);
        let blended = (total.mg() * phase + total.eg() * (128 - phase)) / 128;

        let signed = match self.side_to_move() {
            Color::White => blended,
            Color::Black => -blended,
        };
        signed + TEMPO
    }

    fn material_score(&self, color: Color) -> Score {
        let mut score = Score::ZERO;
        for pt in PieceType::ALL {
            score += piece_value(pt) * self.pieces(color, pt).popcount() as Value;
        }
        score
    }

    fn side_score(&self, color: Color) -> Score {
        let mut score = Score::ZERO;
        for pt in PieceType::ALL {
            for sq in self.pieces(color, pt).iter() {
                score += piece_value(pt) + psq(self.piece_on(sq), sq);
            }
        }
        score += self.pawn_structure(color);
        score += self.piece_activity(color);
        score += self.king_safety(color);
        score
    }

    fn pawn_structure(&self, color: Color) -> Score {
        let mut score = Score::ZERO;
        let our_pawns = self.pieces(color, PieceType::Pawn);
        let their_pawns = self.pieces(color.opponent(), PieceType::Pawn);

        for sq in our_pawns.iter() {
            let file = sq.file();
            if (adjacent_files(file) & our_pawns).is_empty() {
                score += ISOLATED_PAWN;
            }
            let front =
                (adjacent_files(file) | Bitboard::file_mask(file)) & forward_ranks(color, sq);
            if (front & their_pawns).is_empty() {
                score += PASSED_RANK[sq.relative_rank(color)];
            }
        }

        for file in 0..8 {
            let stacked = (Bitboard::file_mask(file) & our_pawns).popcount();
            if stacked > 1 {
                score += DOUBLED_PAWN * (stacked - 1) as Value;
            }
        }

        score
    }

    fn piece_activity(&self, color: Color) -> Score {
        let mut score = Score::ZERO;
        let occupied = self.occupied();
        let our_pawns = self.pieces(color, PieceType::Pawn);
        let their_pawns = self.pieces(color.opponent(), PieceType::Pawn);
        // Destinations blocked by an own pawn are never useful.
        let safe = !our_pawns;

        for sq in self.pieces(color, PieceType::Knight).iter() {
            let moves = knight_attacks(sq) & safe;
            score += MOBILITY[PieceType::Knight.index()] * moves.popcount() as Value;
            if sq.file() == 0 || sq.file() == 7 {
                score += KNIGHT_ON_RIM;
            }
            let supported = (pawn_attacks(color.opponent(), sq) & our_pawns).any();
            if (3..=5).contains(&sq.relative_rank(color)) && supported {
                score += KNIGHT_OUTPOST;
            }
        }

        let bishops = self.pieces(color, PieceType::Bishop);
        for sq in bishops.iter() {
            let moves = bishop_attacks(sq, occupied) & safe;
            score += MOBILITY[PieceType::Bishop.index()] * moves.popcount() as Value;
        }
        if bishops.popcount() >= 2 {
            score += BISHOP_PAIR;
        }

        for sq in self.pieces(color, PieceType::Rook).iter() {
            let moves = rook_attacks(sq, occupied) & safe;
            score += MOBILITY[PieceType::Rook.index()] * moves.popcount() as Value;
            let file = Bitboard::file_mask(sq.file());
            if ((our_pawns | their_pawns) & file).is_empty() {
                score += ROOK_OPEN_FILE;
            } else if (our_pawns & file).is_empty() {
                score += ROOK_SEMIOPEN_FILE;
            }
            if sq.relative_rank(color) == 6 {
                score += ROOK_ON_SEVENTH;
            }
        }

        let queens = self.pieces(color, PieceType::Queen);
        for sq in queens.iter() {
            let moves = queen_attacks(sq, occupied) & safe;
            score += MOBILITY[PieceType::Queen.index()] * moves.popcount() as Value;
        }
        let back_rank = if color == Color::White { 0 } else { 7 };
        let queen_home = Square::new(back_rank, 3);
        if queens.any() && !queens.contains(queen_home) {
            let minors_at_home = ((self.pieces(color, PieceType::Knight)
                | self.pieces(color, PieceType::Bishop))
                & Bitboard::rank_mask(back_rank))
            .popcount();
            score += QUEEN_EARLY_SORTIE * minors_at_home as Value;
        }

        score
    }

    fn king_safety(&self, color: Color) -> Score {
        let mut score = Score::ZERO;
        let ksq = self.king_square(color);
        let our_pawns = self.pieces(color, PieceType::Pawn);

        if ksq.relative_rank(color) == 0 && matches!(ksq.file(), 1 | 2 | 6) {
            score += CASTLED_KING;
        }

        let ahead = forward_ranks(color, ksq);
        let low = ksq.file().saturating_sub(1);
        let high = (ksq.file() + 1).min(7);
        let mut shielded_files = 0;
        for file in low..=high {
            if (Bitboard::file_mask(file) & ahead & our_pawns).any() {
                shielded_files += 1;
            }
        }
        if shielded_files == 3 {
            score += PAWN_SHIELD_FULL;
        } else if shielded_files < 2 {
            score += PAWN_SHIELD_BROKEN;
        }

        score
    }

    /// Endgame steering for a won position: drive the defending king to
    /// the edge and bring the attacking king up.
    fn mop_up(&self, winner: Color) -> Value {
        let winner_king = self.king_square(winner);
        let loser_king = self.king_square(winner.opponent());
        (3 - loser_king.edge_distance()) * 40 + (7 - winner_king.distance(loser_king)) * 25
    }
}

/// Convert an internal-scale value to centipawns for UCI output.
#[must_use]
pub fn to_centipawns(v: Value) -> Value {
    v * 100 / piece_value(PieceType::Pawn).eg()
}

fn adjacent_files(file: usize) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    if file > 0 {
        bb |= Bitboard::file_mask(file - 1);
    }
    if file < 7 {
        bb |= Bitboard::file_mask(file + 1);
    }
    bb
}

/// All squares strictly ahead of `sq` from `color`'s point of view.
fn forward_ranks(color: Color, sq: Square) -> Bitboard {
    match color {
        Color::White => {
            if sq.rank() == 7 {
                Bitboard::EMPTY
            } else {
                Bitboard(!0u64 << (8 * (sq.rank() + 1)))
            }
        }
        Color::Black => Bitboard((1u64 << (8 * sq.rank())) - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_ranks_direction() {
        let sq = Square::new(3, 4); // e4
        let white = forward_ranks(Color::White, sq);
        assert!(white.contains(Square::new(4, 4)));
        assert!(!white.contains(Square::new(3, 0)));
        assert!(!white.contains(Square::new(2, 4)));

        let black = forward_ranks(Color::Black, sq);
        assert!(black.contains(Square::new(2, 4)));
        assert!(!black.contains(Square::new(4, 4)));
    }

    #[test]
    fn adjacent_files_clip_at_edges() {
        assert_eq!(adjacent_files(0), Bitboard::file_mask(1));
        assert_eq!(
            adjacent_files(4),
            Bitboard::file_mask(3) | Bitboard::file_mask(5)
        );
        assert_eq!(adjacent_files(7), Bitboard::file_mask(6));
    }
}
