//! Property tests: random playouts must keep every incremental
//! structure consistent with a from-scratch recomputation.

use proptest::prelude::*;

use crate::board::Position;

const PLAYOUT_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_playout_round_trips(
        fen_idx in 0..PLAYOUT_FENS.len(),
        choices in proptest::collection::vec(any::<u16>(), 1..60),
    ) {
        let mut pos = Position::try_from_fen(PLAYOUT_FENS[fen_idx]).unwrap();
        let initial_fen = pos.to_fen();
        let initial_key = pos.key();

        let mut played = 0;
        for choice in choices {
            let moves = pos.generate_moves();
            if moves.is_empty() {
                break;
            }
            let m = moves[choice as usize % moves.len()];
            pos.do_move(m);
            played += 1;

            // Incremental key equals the from-scratch key at every step.
            prop_assert_eq!(pos.key(), pos.compute_key());
            pos.assert_caches_consistent();
        }

        for _ in 0..played {
            pos.undo_move();
        }
        prop_assert_eq!(pos.to_fen(), initial_fen);
        prop_assert_eq!(pos.key(), initial_key);
        pos.assert_caches_consistent();
    }

    #[test]
    fn generated_moves_are_legal(
        fen_idx in 0..PLAYOUT_FENS.len(),
        choices in proptest::collection::vec(any::<u16>(), 0..20),
    ) {
        let mut pos = Position::try_from_fen(PLAYOUT_FENS[fen_idx]).unwrap();
        // Walk a few random plies, then check the legality invariant.
        for choice in choices {
            let moves = pos.generate_moves();
            if moves.is_empty() {
                break;
            }
            pos.do_move(moves[choice as usize % moves.len()]);
        }

        let us = pos.side_to_move();
        let moves = pos.generate_moves();
        for &m in &moves {
            pos.do_move(m);
            prop_assert!(!pos.square_attacked(pos.king_square(us), us.opponent()));
            pos.undo_move();
        }
    }
}
