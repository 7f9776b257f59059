//! Zobrist hashing.
//!
//! One 64-bit random value per (piece, square), per en-passant file, per
//! castling-rights subset and one for the side to move. XORing the values
//! of a position's features yields its key, which `do_move`/`undo_move`
//! maintain incrementally.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Piece, Square};

pub(crate) struct ZobristKeys {
    /// Indexed by the packed piece byte (0-15); only the twelve real
    /// pieces are ever looked up.
    pieces: [[u64; 64]; 16],
    en_passant: [u64; 8],
    castling: [u64; 16],
    side: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed so keys (and therefore hashes in tests) are reproducible.
        let mut rng = StdRng::seed_from_u64(0x1C39_59F2_A07B_6D14);
        let mut pieces = [[0u64; 64]; 16];
        for piece in &mut pieces {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }
        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = rng.gen();
        }
        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.gen();
        }
        ZobristKeys {
            pieces,
            en_passant,
            castling,
            side: rng.gen(),
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn en_passant_file(&self, file: usize) -> u64 {
        self.en_passant[file]
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.index()]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.side
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
