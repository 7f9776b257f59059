//! Perft counts for move-generator correctness.

use crate::board::Position;

struct PerftPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(usize, u64)],
}

const QUICK_POSITIONS: &[PerftPosition] = &[
    PerftPosition {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281)],
    },
    PerftPosition {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(1, 48), (2, 2039), (3, 97_862)],
    },
    PerftPosition {
        name: "position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depths: &[(1, 14), (2, 191), (3, 2812), (4, 43_238)],
    },
    PerftPosition {
        name: "position 5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        depths: &[(4, 62_379)],
    },
    PerftPosition {
        name: "position 6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        depths: &[(4, 89_890)],
    },
    PerftPosition {
        name: "en passant",
        fen: "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        depths: &[(1, 31), (2, 707), (3, 21_637)],
    },
    PerftPosition {
        name: "promotion rack",
        fen: "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
        depths: &[(1, 24), (2, 496), (3, 9483)],
    },
    PerftPosition {
        name: "castling rack",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        depths: &[(1, 26), (2, 568), (3, 13_744)],
    },
];

const DEEP_POSITIONS: &[PerftPosition] = &[
    PerftPosition {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(5, 4_865_609)],
    },
    PerftPosition {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(4, 4_085_603)],
    },
    PerftPosition {
        name: "position 5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        depths: &[(5, 2_103_487)],
    },
    PerftPosition {
        name: "position 6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        depths: &[(5, 3_894_594)],
    },
];

fn run_suite(positions: &[PerftPosition]) {
    for position in positions {
        let mut pos = Position::try_from_fen(position.fen).expect("valid test FEN");
        for &(depth, expected) in position.depths {
            let nodes = pos.perft(depth);
            assert_eq!(
                nodes, expected,
                "perft({depth}) mismatch for {}: expected {expected}, got {nodes}",
                position.name
            );
        }
    }
}

#[test]
fn perft_quick_suite() {
    run_suite(QUICK_POSITIONS);
}

#[test]
#[ignore = "several million nodes; run with --ignored for the full check"]
fn perft_deep_suite() {
    run_suite(DEEP_POSITIONS);
}
