//! Evaluation sanity and symmetry.

use crate::board::{Color, Position};

/// Mirror a FEN: flip ranks, swap piece colors, flip side to move,
/// castling rights and the en-passant square.
fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let placement = fields[0]
        .split('/')
        .rev()
        .map(|rank| {
            rank.chars()
                .map(|c| {
                    if c.is_ascii_alphabetic() {
                        if c.is_ascii_uppercase() {
                            c.to_ascii_lowercase()
                        } else {
                            c.to_ascii_uppercase()
                        }
                    } else {
                        c
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/");
    let side = if fields[1] == "w" { "b" } else { "w" };
    let castling: String = if fields[2] == "-" {
        "-".to_string()
    } else {
        let mut swapped: Vec<char> = fields[2]
            .chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();
        swapped.sort_by_key(|c| match c {
            'K' => 0,
            'Q' => 1,
            'k' => 2,
            'q' => 3,
            _ => 4,
        });
        swapped.into_iter().collect()
    };
    let ep = if fields[3] == "-" {
        "-".to_string()
    } else {
        let file = &fields[3][0..1];
        let rank: u32 = fields[3][1..2].parse().unwrap();
        format!("{file}{}", 9 - rank)
    };
    format!("{placement} {side} {castling} {ep} {} {}", fields[4], fields[5])
}

const SAMPLE_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    "8/5pk1/6p1/8/8/6P1/5PK1/8 b - - 0 40",
];

#[test]
fn evaluation_is_color_symmetric() {
    for fen in SAMPLE_FENS {
        let pos = Position::try_from_fen(fen).unwrap();
        let mirrored = Position::try_from_fen(&mirror_fen(fen)).unwrap();
        assert_eq!(
            pos.evaluate(),
            mirrored.evaluate(),
            "mirror of {fen} evaluates differently"
        );
    }
}

#[test]
fn startpos_is_roughly_balanced() {
    let pos = Position::startpos();
    let v = pos.evaluate();
    assert!(v.abs() < 100, "startpos eval {v} is not near zero");
}

#[test]
fn extra_queen_dominates() {
    let with_queen =
        Position::try_from_fen("4k3/8/8/8/8/8/4P3/3QK3 w - - 0 1").unwrap();
    assert!(with_queen.evaluate() > 1500);
    // From the defender's point of view it is just as bad.
    let defender_view =
        Position::try_from_fen("4k3/8/8/8/8/8/4P3/3QK3 b - - 0 1").unwrap();
    assert!(defender_view.evaluate() < -1500);
}

#[test]
fn mop_up_rewards_cornering_the_bare_king() {
    // King and rook vs king: defending king in the corner scores better
    // for the attacker than one in the middle.
    let centre =
        Position::try_from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 0 1").unwrap();
    let corner =
        Position::try_from_fen("k7/8/1K6/8/8/8/8/R7 w - - 0 1").unwrap();
    assert!(
        corner.evaluate() > centre.evaluate(),
        "cornered defender should score higher for the winning side"
    );
}

#[test]
fn passed_pawn_is_worth_more_advanced() {
    let on_fourth =
        Position::try_from_fen("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1").unwrap();
    let on_seventh =
        Position::try_from_fen("4k3/3P4/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(on_seventh.evaluate() > on_fourth.evaluate());
}

#[test]
fn tempo_bonus_goes_to_the_mover() {
    let pos = Position::startpos();
    assert_eq!(pos.side_to_move(), Color::White);
    // Symmetric position: the whole signed evaluation is the tempo term.
    assert!(pos.evaluate() > 0);
}
