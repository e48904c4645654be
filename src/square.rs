//! Board squares.
//!
//! A square is stored as its index 0..63 with a1 = 0, h1 = 7 and h8 = 63,
//! so `index = rank * 8 + file`.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::utils::Bitboard;

static COL_MAP: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// One of the 64 cells of the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Builds a square from a zero based file (0 = a) and rank (0 = rank 1).
    ///
    /// Returns `None` when either coordinate is off the board.
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Builds a square from its index, `None` when the index is not 0..63.
    pub fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero based file, 0 for the a-file.
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero based rank, 0 for the first rank.
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// The single-bit bitboard for this square.
    pub fn bit(self) -> Bitboard {
        1u64 << self.0
    }

    /// Returns the square on the same rank with the given file.
    pub fn with_file(self, file: u8) -> Option<Square> {
        Square::new(file, self.rank())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COL_MAP[self.file() as usize], self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(NotationError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| NotationError::InvalidSquare(s.to_string()))
    }
}
