//! Attack lookups.
//!
//! Knight, king and pawn attacks come from tables filled once at startup
//! by stepping each offset clipped to the board. Slider attacks are
//! computed on demand by walking rays against the occupancy.

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, PieceType, Square};

static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    leaper_table(&[
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ])
});

static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    leaper_table(&[
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ])
});

static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(1, -1), (1, 1)]),
        leaper_table(&[(-1, -1), (-1, 1)]),
    ]
});

fn leaper_table(deltas: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for (idx, slot) in table.iter_mut().enumerate() {
        let rank = (idx / 8) as isize;
        let file = (idx % 8) as isize;
        let mut mask = Bitboard::EMPTY;
        for &(dr, df) in deltas {
            let (nr, nf) = (rank + dr, file + df);
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= Bitboard::from_square(Square::new(nr as usize, nf as usize));
            }
        }
        *slot = mask;
    }
    table
}

/// Destinations of a knight on `sq`, ignoring occupancy.
#[inline]
pub(crate) fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

/// Destinations of a king on `sq`, ignoring occupancy.
#[inline]
pub(crate) fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Diagonal capture targets of a `color` pawn on `sq`.
#[inline]
pub(crate) fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// Walk one ray from `sq`, adding every square until (and including) the
/// first occupied one.
fn ray(sq: Square, dr: isize, df: isize, occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let mut rank = sq.rank() as isize + dr;
    let mut file = sq.file() as isize + df;
    while (0..8).contains(&rank) && (0..8).contains(&file) {
        let target = Square::new(rank as usize, file as usize);
        attacks |= Bitboard::from_square(target);
        if occupied.contains(target) {
            break;
        }
        rank += dr;
        file += df;
    }
    attacks
}

/// Bishop attacks from `sq` with the given occupancy.
pub(crate) fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray(sq, 1, 1, occupied)
        | ray(sq, 1, -1, occupied)
        | ray(sq, -1, 1, occupied)
        | ray(sq, -1, -1, occupied)
}

/// Rook attacks from `sq` with the given occupancy.
pub(crate) fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray(sq, 1, 0, occupied)
        | ray(sq, -1, 0, occupied)
        | ray(sq, 0, 1, occupied)
        | ray(sq, 0, -1, occupied)
}

/// Queen attacks from `sq` with the given occupancy.
pub(crate) fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Attacks of a non-pawn piece type from `sq`.
pub(crate) fn piece_attacks(pt: PieceType, sq: Square, occupied: Bitboard) -> Bitboard {
    match pt {
        PieceType::Knight => knight_attacks(sq),
        PieceType::Bishop => bishop_attacks(sq, occupied),
        PieceType::Rook => rook_attacks(sq, occupied),
        PieceType::Queen => queen_attacks(sq, occupied),
        PieceType::King => king_attacks(sq),
        PieceType::Pawn => unreachable!("pawn attacks depend on color"),
    }
}
