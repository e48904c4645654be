//! Piece placement.
//!
//! [`Board`] keeps a mailbox for square lookups and bitboards per colour and
//! piece type for move generation. The [`PieceAt`] trait is the read-only
//! capability the castle normalizer needs, so it can be driven by any board
//! representation.

use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;
use crate::utils::Bitboard;

/// Read access to the occupant of a square.
pub trait PieceAt {
    fn piece_at(&self, square: Square) -> Option<Piece>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    by_color: [Bitboard; 2],
    by_type: [Bitboard; 6],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            by_color: [0; 2],
            by_type: [0; 6],
        }
    }

    /// Places `piece` on `square`, returning whatever stood there before.
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let previous = self.remove(square);
        self.squares[square.index()] = Some(piece);
        self.by_color[piece.color.index()] |= square.bit();
        self.by_type[piece.piece_type.index()] |= square.bit();
        previous
    }

    /// Clears `square`, returning the piece that stood there.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let previous = self.squares[square.index()].take();
        if let Some(piece) = previous {
            self.by_color[piece.color.index()] &= !square.bit();
            self.by_type[piece.piece_type.index()] &= !square.bit();
        }
        previous
    }

    pub fn occupancy(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.by_color[color.index()]
    }

    /// Squares holding `piece_type` pieces of `color`.
    pub fn pieces(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.by_type[piece_type.index()] & self.by_color[color.index()]
    }

    /// Square of `color`'s king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(PieceType::King, color);
        Square::from_index(kings.trailing_zeros() as usize)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl PieceAt for Board {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn put_and_remove_keep_bitboards_in_sync() {
        let mut board = Board::empty();
        let white_rook = Piece::new(PieceType::Rook, Color::White);
        assert_eq!(board.put(sq("a1"), white_rook), None);
        assert_eq!(board.piece_at(sq("a1")), Some(white_rook));
        assert_eq!(board.pieces(PieceType::Rook, Color::White), 1);
        assert_eq!(board.occupancy(), 1);

        let black_knight = Piece::new(PieceType::Knight, Color::Black);
        assert_eq!(board.put(sq("a1"), black_knight), Some(white_rook));
        assert_eq!(board.pieces(PieceType::Rook, Color::White), 0);
        assert_eq!(board.color_occupancy(Color::Black), 1);

        assert_eq!(board.remove(sq("a1")), Some(black_knight));
        assert_eq!(board.occupancy(), 0);
        assert_eq!(board.remove(sq("a1")), None);
    }

    #[test]
    fn king_square_lookup() {
        let mut board = Board::empty();
        assert_eq!(board.king_square(Color::White), None);
        board.put(sq("g1"), Piece::new(PieceType::King, Color::White));
        assert_eq!(board.king_square(Color::White), Some(sq("g1")));
        assert_eq!(board.king_square(Color::Black), None);
    }
}
