//! Error types for the parts of the crate that parse or apply text.
//!
//! The move core itself signals failure through `Option`; these errors are
//! for FEN parsing, notation decoding, setup generation and the game layer.

use thiserror::Error;

/// Error reading a FEN string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank `{0}` does not describe 8 squares")]
    RankWidth(String),
    #[error("invalid piece character `{0}`")]
    PieceChar(char),
    #[error("invalid active color `{0}`")]
    ActiveColor(String),
    #[error("invalid castling field `{0}`")]
    Castling(String),
    #[error("invalid en passant square `{0}`")]
    EnPassant(String),
    #[error("invalid move counter `{0}`")]
    Counter(String),
    #[error("each side needs exactly one king")]
    KingCount,
}

/// Error turning coordinate notation into a move.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("move `{0}` must be 4 or 5 characters long")]
    Length(String),
    #[error("invalid square `{0}`")]
    InvalidSquare(String),
    #[error("invalid promotion piece `{0}`")]
    InvalidPromotion(char),
    #[error("no piece on {0}")]
    EmptyOrigin(String),
}

/// Error playing a move in a [`crate::game::Game`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("cannot read move: {0}")]
    Notation(#[from] NotationError),
    #[error("illegal move `{0}`")]
    Illegal(String),
}

/// Error building a Chess960 starting position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("Chess960 index {0} is out of range 0..960")]
    IndexOutOfRange(u16),
    #[error("generated setup is not a valid position: {0}")]
    Fen(#[from] FenError),
}
