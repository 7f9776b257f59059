//! Draw detection.

use crate::board::Position;

fn play(pos: &mut Position, moves: &[&str]) {
    for notation in moves {
        let m = pos.parse_uci_move(notation).expect("legal move");
        pos.do_move(m);
    }
}

#[test]
fn fresh_position_is_not_a_draw() {
    let pos = Position::startpos();
    assert!(!pos.is_draw());
}

#[test]
fn rule50_at_hundred_is_a_draw() {
    let pos = Position::try_from_fen("4k3/8/8/8/8/8/8/4K2R w - - 99 80").unwrap();
    assert!(!pos.is_draw());
    let pos = Position::try_from_fen("4k3/8/8/8/8/8/8/4K2R w - - 100 80").unwrap();
    assert!(pos.is_draw());
}

#[test]
fn first_repetition_counts_as_draw() {
    let mut pos = Position::startpos();
    // Knights out and back: the starting position recurs once.
    play(&mut pos, &["g1f3", "g8f6", "f3g1"]);
    assert!(!pos.is_draw());
    play(&mut pos, &["f6g8"]);
    assert!(pos.is_draw());
}

#[test]
fn pawn_move_resets_the_repetition_window() {
    let mut pos = Position::startpos();
    play(&mut pos, &["e2e4", "e7e5", "g1f3", "g8f6", "f3g1", "f6g8"]);
    // The post-e5 position recurs, inside the window.
    assert!(pos.is_draw());

    let mut pos = Position::startpos();
    play(&mut pos, &["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"]);
    // The pawn push resets rule50; nothing before it can repeat.
    assert!(!pos.is_draw());
}

#[test]
fn repetition_requires_same_side_to_move() {
    let mut pos = Position::startpos();
    play(&mut pos, &["g1f3", "g8f6", "f3g1"]);
    // Same piece placement as after 1.Nf3 Ng8... but wrong side to move
    // anywhere earlier; only the fourth reversal closes the loop.
    assert!(!pos.is_draw());
}

#[test]
fn bare_kings_are_not_special_cased() {
    // Insufficient material is deliberately not detected; the search
    // relies on the evaluation staying flat instead.
    let pos = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(!pos.is_draw());
}
