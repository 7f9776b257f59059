//! Error types for position and move parsing.

use std::fmt;

/// Why a FEN string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four mandatory fields.
    TooFewFields { found: usize },
    /// Unknown character in the piece placement field.
    InvalidPiece { ch: char },
    /// A rank describes more than eight files.
    TooManyFiles { rank: usize },
    /// More than eight ranks in the placement field.
    TooManyRanks,
    /// Side-to-move field is neither `w` nor `b`.
    InvalidSideToMove { found: String },
    /// Unknown character in the castling field.
    InvalidCastling { ch: char },
    /// Malformed en-passant square.
    InvalidEnPassant { found: String },
    /// Each side needs exactly one king.
    BadKingCount { white: u32, black: u32 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN needs at least 4 fields, found {found}")
            }
            FenError::InvalidPiece { ch } => write!(f, "invalid piece character '{ch}'"),
            FenError::TooManyFiles { rank } => write!(f, "rank {rank} has more than 8 files"),
            FenError::TooManyRanks => write!(f, "more than 8 ranks in placement field"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { ch } => write!(f, "invalid castling character '{ch}'"),
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::BadKingCount { white, black } => {
                write!(f, "expected one king per side, found {white} white / {black} black")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Why a UCI move string could not be applied to the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move strings are 4 or 5 characters.
    InvalidLength { len: usize },
    /// One of the squares is not on the board.
    InvalidSquare { notation: String },
    /// Promotion letter is not one of `nbrq`.
    InvalidPromotion { ch: char },
    /// The move is syntactically fine but not legal here.
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in move '{notation}'")
            }
            MoveParseError::InvalidPromotion { ch } => {
                write!(f, "invalid promotion piece '{ch}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "move '{notation}' is not legal in this position")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// A malformed algebraic square such as `i9`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareParseError {
    pub notation: String,
}

impl fmt::Display for SquareParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid square '{}'", self.notation)
    }
}

impl std::error::Error for SquareParseError {}
