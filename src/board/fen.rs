//! FEN parsing and formatting, plus UCI move-string lookup.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::state::Position;
use super::types::{CastlingRights, Color, Move, Piece, PieceType, Square};

impl Position {
    /// Parse a position from a six-field FEN string. The two numeric
    /// fields are optional, as some GUIs omit them.
    ///
    /// On error the position under construction is discarded; callers
    /// keep whatever position they had.
    pub fn try_from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::TooFewFields {
                found: fields.len(),
            });
        }

        let mut pos = Position::empty();

        // Piece placement, rank 8 first.
        for (rank_idx, rank_str) in fields[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::TooManyRanks);
            }
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for ch in rank_str.chars() {
                if let Some(run) = ch.to_digit(10) {
                    file += run as usize;
                } else {
                    let piece =
                        Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece { ch })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles { rank });
                    }
                    pos.set_piece(Square::new(rank, file), piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::TooManyFiles { rank });
            }
        }

        let white_kings = pos.pieces(Color::White, PieceType::King).popcount();
        let black_kings = pos.pieces(Color::Black, PieceType::King).popcount();
        if white_kings != 1 || black_kings != 1 {
            return Err(FenError::BadKingCount {
                white: white_kings,
                black: black_kings,
            });
        }

        pos.side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::NONE;
        for ch in fields[2].chars() {
            match ch {
                'K' => castling.insert(CastlingRights::WHITE_KING),
                'Q' => castling.insert(CastlingRights::WHITE_QUEEN),
                'k' => castling.insert(CastlingRights::BLACK_KING),
                'q' => castling.insert(CastlingRights::BLACK_QUEEN),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { ch }),
            }
        }

        let ep_square = if fields[3] == "-" {
            None
        } else {
            Some(fields[3].parse::<Square>().map_err(|_| {
                FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                }
            })?)
        };

        let rule50 = fields
            .get(4)
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);
        let fullmove = fields
            .get(5)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(1)
            .max(1);
        pos.game_ply =
            (fullmove - 1) * 2 + if pos.side == Color::Black { 1 } else { 0 };

        {
            let root = pos
                .states
                .last_mut()
                .expect("state stack is never empty");
            root.castling = castling;
            root.ep_square = ep_square;
            root.rule50 = rule50;
        }
        let key = pos.compute_key();
        if let Some(root) = pos.states.last_mut() {
            root.key = key;
        }

        Ok(pos)
    }

    /// The current position in FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                let piece = self.piece_on(Square::new(rank, file));
                if piece.is_none() {
                    empty_run += 1;
                } else {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece.to_fen_char());
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = if self.side == Color::White { "w" } else { "b" };
        let ep = self
            .ep_square()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        let fullmove = self.game_ply / 2 + 1;

        format!(
            "{placement} {side} {} {ep} {} {fullmove}",
            self.castling_rights(),
            self.rule50(),
        )
    }

    /// Find the legal move matching a UCI long-algebraic string such as
    /// `e2e4` or `e7e8q`.
    pub fn parse_uci_move(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        if notation.len() < 4 || notation.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                len: notation.len(),
            });
        }

        let from = notation[0..2]
            .parse::<Square>()
            .map_err(|_| MoveParseError::InvalidSquare {
                notation: notation.to_string(),
            })?;
        let to = notation[2..4]
            .parse::<Square>()
            .map_err(|_| MoveParseError::InvalidSquare {
                notation: notation.to_string(),
            })?;

        let promotion = match notation.chars().nth(4) {
            None => None,
            Some(ch) => {
                let pt = PieceType::from_char(ch)
                    .filter(|&pt| {
                        matches!(
                            pt,
                            PieceType::Knight
                                | PieceType::Bishop
                                | PieceType::Rook
                                | PieceType::Queen
                        )
                    })
                    .ok_or(MoveParseError::InvalidPromotion { ch })?;
                Some(pt)
            }
        };

        let legal = self.generate_moves();
        legal
            .iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to && m.promotion_type() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}
