//! Chess move model with Chess960 castling.
//!
//! Moves carry [`MoveTag`] flags (castle side, capture, en passant, check).
//! Castles are written king-onto-rook, so the same move text can mean a
//! castle or an ordinary king move in Chess960; the castle normalizer tags
//! castles from the pre-move board, and [`MoveList::find`] uses the tag to
//! pick the move the player meant.

pub mod board;
pub mod castling;
pub mod chess960;
pub mod chess_move;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen_tables;
pub mod movegeneration;
pub mod movelist;
pub mod notation;
pub mod perft;
pub mod piece;
pub mod position;
pub mod rayattacks;
pub mod square;
pub mod utils;

pub use board::{Board, PieceAt};
pub use castling::{normalize_960_castle, CastlingRights, CastlingSide};
pub use chess_move::{Move, MoveBuilder, MoveTag};
pub use config::GameOptions;
pub use error::{FenError, MoveError, NotationError, SetupError};
pub use game::{Game, GameStatus};
pub use movegeneration::legal_moves;
pub use movelist::{MatchPolicy, MoveList};
pub use notation::UciNotation;
pub use perft::Perft;
pub use piece::{Color, Piece, PieceType};
pub use position::{Position, START_FEN};
pub use square::Square;
