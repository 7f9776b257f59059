//! Targeted move-generation cases.

use crate::board::{MoveKind, Position, Square};

#[test]
fn startpos_has_twenty_moves() {
    let mut pos = Position::startpos();
    let moves = pos.generate_moves();
    assert_eq!(moves.len(), 20);
}

#[test]
fn generated_moves_never_leave_king_in_check() {
    let mut pos = Position::try_from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let us = pos.side_to_move();
    let moves = pos.generate_moves();
    for &m in &moves {
        pos.do_move(m);
        assert!(
            !pos.square_attacked(pos.king_square(us), us.opponent()),
            "{m} leaves the king attacked"
        );
        pos.undo_move();
    }
}

#[test]
fn stalemate_has_no_moves_and_no_check() {
    let mut pos = Position::try_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(pos.generate_moves().is_empty());
    assert!(!pos.in_check());
}

#[test]
fn checkmate_has_no_moves_and_check() {
    let mut pos = Position::try_from_fen("7k/5Q1K/8/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(pos.generate_moves().is_empty());
    assert!(pos.in_check());
}

#[test]
fn castling_blocked_through_attacked_square() {
    // Black rook on f8 covers f1; kingside castling is out, queenside fine.
    let mut pos = Position::try_from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = pos.generate_moves();
    assert!(!moves.iter().any(|m| m.kind() == MoveKind::Castling && m.to() == Square::G1));
    assert!(moves.iter().any(|m| m.kind() == MoveKind::Castling && m.to() == Square::C1));
}

#[test]
fn castling_blocked_by_occupied_path() {
    let mut pos = Position::try_from_fen("4k3/8/8/8/8/8/8/R2QK2R w KQ - 0 1").unwrap();
    let moves = pos.generate_moves();
    // The queen on d1 blocks queenside; kingside is clear.
    assert!(!moves.iter().any(|m| m.kind() == MoveKind::Castling && m.to() == Square::C1));
    assert!(moves.iter().any(|m| m.kind() == MoveKind::Castling && m.to() == Square::G1));
}

#[test]
fn no_castling_while_in_check() {
    let mut pos = Position::try_from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = pos.generate_moves();
    assert!(!moves.iter().any(|m| m.kind() == MoveKind::Castling));
}

#[test]
fn en_passant_discovered_check_is_filtered() {
    // Capturing en passant would expose the white king on the fifth rank
    // to the black rook.
    let mut pos = Position::try_from_fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1").unwrap();
    let moves = pos.generate_moves();
    assert!(!moves.iter().any(|m| m.kind() == MoveKind::EnPassant));
}

#[test]
fn en_passant_capture_is_generated_when_legal() {
    let mut pos =
        Position::try_from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    let moves = pos.generate_moves();
    assert!(moves.iter().any(|m| m.kind() == MoveKind::EnPassant));
}

#[test]
fn captures_only_generation_is_a_subset() {
    let mut pos = Position::try_from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let all = pos.generate_moves();
    let captures = pos.generate_captures();
    assert!(!captures.is_empty());
    for &m in &captures {
        assert!(all.contains(m), "{m} missing from the full move list");
        let takes = pos.piece_on(m.to()).is_some()
            || m.kind() == MoveKind::EnPassant
            || m.kind() == MoveKind::Promotion;
        assert!(takes, "{m} is not tactical");
    }
}

#[test]
fn pinned_piece_cannot_move_away() {
    // The d2 knight is pinned to the king by the d8 rook.
    let mut pos = Position::try_from_fen("3r2k1/8/8/8/8/8/3N4/3K4 w - - 0 1").unwrap();
    let moves = pos.generate_moves();
    assert!(!moves.iter().any(|m| m.from() == Square::new(1, 3)));
}
