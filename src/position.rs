//! Chess positions.
//!
//! A [`Position`] holds piece placement, the side to move, castling rights
//! (with the file of each castling rook, so Chess960 setups work), the en
//! passant target and the move counters. Positions are values: applying a
//! move returns a new position.

use std::fmt;

use crate::board::{Board, PieceAt};
use crate::castling::{castle_destinations, CastlingRights, CastlingSide};
use crate::chess_move::Move;
use crate::error::FenError;
use crate::movegen_tables::TABLES;
use crate::piece::{Color, Piece, PieceType};
use crate::rayattacks::RAYS;
use crate::square::Square;
use crate::utils::{split_on, Bitboard};

/// FEN of the classical starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Represents a complete chess position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    /// The color to move next
    active_color: Color,
    /// Current castling rights for both colors
    castling_rights: CastlingRights,
    /// Castling rook file indexed by [color][side], meaningful only while the
    /// matching right is held
    castling_rook_files: [[u8; 2]; 2],
    /// Square a pawn may capture onto en passant, if any
    en_passant: Option<Square>,
    /// Number of halfmoves since last pawn advance or capture
    halfmove_clock: u32,
    /// Number of completed full moves
    fullmove_number: u32,
}

impl Position {
    /// The classical starting position.
    pub fn standard() -> Position {
        // START_FEN is a constant known to parse
        Position::from_fen(START_FEN).unwrap_or_else(|_| unreachable!("START_FEN is valid"))
    }

    /// Reads a position from Forsyth-Edwards Notation.
    ///
    /// The castling field accepts `KQkq` (outermost rook on that side of the
    /// king), Shredder/X-FEN rook files `A`-`H` / `a`-`h`, or `-`.
    ///
    /// # Arguments
    ///
    /// * `fen` - A FEN string with all six fields
    ///
    /// # Returns
    ///
    /// * The position, or the first problem found in the string
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let board = parse_placement(parts[0])?;
        for color in [Color::White, Color::Black] {
            if board.pieces(PieceType::King, color).count_ones() != 1 {
                return Err(FenError::KingCount);
            }
        }

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::ActiveColor(other.to_string())),
        };

        let mut position = Position {
            board,
            active_color,
            castling_rights: CastlingRights::NONE,
            castling_rook_files: [[7, 0], [7, 0]],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };
        position.parse_castling(parts[2])?;

        position.en_passant = match parts[3] {
            "-" => None,
            square => Some(
                square
                    .parse::<Square>()
                    .map_err(|_| FenError::EnPassant(square.to_string()))?,
            ),
        };

        position.halfmove_clock = parts[4]
            .parse()
            .map_err(|_| FenError::Counter(parts[4].to_string()))?;
        position.fullmove_number = parts[5]
            .parse()
            .map_err(|_| FenError::Counter(parts[5].to_string()))?;

        Ok(position)
    }

    fn parse_castling(&mut self, field: &str) -> Result<(), FenError> {
        if field == "-" {
            return Ok(());
        }
        let invalid = || FenError::Castling(field.to_string());

        for c in field.chars() {
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let king = self
                .board
                .king_square(color)
                .filter(|king| king.rank() == color.back_rank())
                .ok_or_else(invalid)?;
            let rook = Piece::new(PieceType::Rook, color);
            let is_rook = |file: &u8| {
                king.with_file(*file)
                    .map_or(false, |square| self.board.piece_at(square) == Some(rook))
            };

            let (side, file) = match c.to_ascii_lowercase() {
                'k' => {
                    let file = (king.file() + 1..8).rev().find(is_rook).ok_or_else(invalid)?;
                    (CastlingSide::Kingside, file)
                }
                'q' => {
                    let file = (0..king.file()).find(is_rook).ok_or_else(invalid)?;
                    (CastlingSide::Queenside, file)
                }
                letter @ 'a'..='h' => {
                    let file = letter as u8 - b'a';
                    if file == king.file() || !is_rook(&file) {
                        return Err(invalid());
                    }
                    (CastlingSide::of_rook(king.file(), file), file)
                }
                _ => return Err(invalid()),
            };
            self.castling_rights |= CastlingRights::of(color, side);
            self.castling_rook_files[color.index()][side.index()] = file;
        }
        Ok(())
    }

    /// Renders the position as FEN.
    ///
    /// Castling rights use `KQkq` when the castling rook is the outermost rook
    /// on its side of the king and the rook's file letter otherwise.
    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match Square::new(file, rank).and_then(|square| self.board.piece_at(square)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let active = match self.active_color {
            Color::White => "w",
            Color::Black => "b",
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |square| square.to_string());

        format!(
            "{} {} {} {} {} {}",
            placement,
            active,
            self.castling_field(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn castling_field(&self) -> String {
        let mut field = String::new();
        for color in [Color::White, Color::Black] {
            for side in CastlingSide::BOTH {
                let Some(rook) = self.castling_rook(color, side) else {
                    continue;
                };
                let outermost = self.is_outermost_rook(color, side, rook);
                let c = match (outermost, side) {
                    (true, CastlingSide::Kingside) => 'k',
                    (true, CastlingSide::Queenside) => 'q',
                    (false, _) => (b'a' + rook.file()) as char,
                };
                field.push(match color {
                    Color::White => c.to_ascii_uppercase(),
                    Color::Black => c,
                });
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }

    fn is_outermost_rook(&self, color: Color, side: CastlingSide, rook: Square) -> bool {
        let rook_piece = Some(Piece::new(PieceType::Rook, color));
        let outer_files: Vec<u8> = match side {
            CastlingSide::Kingside => (rook.file() + 1..8).collect(),
            CastlingSide::Queenside => (0..rook.file()).collect(),
        };
        !outer_files.into_iter().any(|file| {
            rook.with_file(file)
                .map_or(false, |square| self.board.piece_at(square) == rook_piece)
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square of the rook `color` may castle with on `side`, if the right is held.
    pub fn castling_rook(&self, color: Color, side: CastlingSide) -> Option<Square> {
        if !self.castling_rights.contains(CastlingRights::of(color, side)) {
            return None;
        }
        let file = self.castling_rook_files[color.index()][side.index()];
        Square::new(file, color.back_rank())
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the position after `mv`.
    ///
    /// `mv` is assumed legal here; castles must carry their castle tag and be
    /// written king-onto-rook, as every move in a generated list is.
    pub fn apply(&self, mv: &Move) -> Position {
        let mut next = self.clone();
        let color = self.active_color;
        let origin = mv.origin();
        let destination = mv.destination();
        let moving = self.board.piece_at(origin);
        let is_pawn = moving.map_or(false, |p| p.piece_type == PieceType::Pawn);
        let mut captured = false;

        if let Some(side) = castle_side(mv) {
            next.board.remove(origin);
            next.board.remove(destination);
            if let Some((king_to, rook_to)) = castle_destinations(color.back_rank(), side) {
                next.board.put(king_to, Piece::new(PieceType::King, color));
                next.board.put(rook_to, Piece::new(PieceType::Rook, color));
            }
        } else {
            let en_passant_capture = is_pawn
                && origin.file() != destination.file()
                && self.en_passant == Some(destination)
                && self.board.piece_at(destination).is_none();
            if en_passant_capture {
                if let Some(victim) = Square::new(destination.file(), origin.rank()) {
                    next.board.remove(victim);
                }
                captured = true;
            }
            captured |= next.board.remove(destination).is_some();
            if let Some(piece) = next.board.remove(origin) {
                let placed = mv
                    .promotion()
                    .map_or(piece, |promotion| Piece::new(promotion, color));
                next.board.put(destination, placed);
            }
        }

        if moving.map_or(false, |p| p.piece_type == PieceType::King) {
            next.castling_rights.remove(CastlingRights::of_color(color));
        }
        for rook_color in [Color::White, Color::Black] {
            for side in CastlingSide::BOTH {
                if let Some(rook) = self.castling_rook(rook_color, side) {
                    if rook == origin || rook == destination {
                        next.castling_rights.remove(CastlingRights::of(rook_color, side));
                    }
                }
            }
        }

        next.en_passant = None;
        if is_pawn && origin.rank().abs_diff(destination.rank()) == 2 {
            next.en_passant = Square::new(origin.file(), (origin.rank() + destination.rank()) / 2);
        }

        if is_pawn || captured {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.active_color = color.other();
        next
    }

    /// Returns true if any piece of `by` attacks `square`.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        attackers(&self.board, square, by, self.board.occupancy()) != 0
    }

    /// Returns true if `color`'s king is attacked.
    pub fn king_in_check(&self, color: Color) -> bool {
        self.board
            .king_square(color)
            .map_or(false, |king| self.is_square_attacked(king, color.other()))
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.king_in_check(self.active_color)
    }

    /// Human readable board, rank 8 at the top, `.` for empty squares.
    pub fn diagram(&self) -> String {
        let mut board = String::with_capacity(8 * 17);
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = Square::new(file, rank)
                    .and_then(|square| self.board.piece_at(square))
                    .map_or('.', Piece::to_fen_char);
                board.push(c);
                board.push(if file < 7 { ' ' } else { '\n' });
            }
        }
        board
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::standard()
    }
}

impl PieceAt for Position {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

fn castle_side(mv: &Move) -> Option<CastlingSide> {
    match mv.castle_tag() {
        Some(tag) if tag == CastlingSide::Kingside.tag() => Some(CastlingSide::Kingside),
        Some(_) => Some(CastlingSide::Queenside),
        None => None,
    }
}

/// Pieces of `by` attacking `square`, with sliders blocked by `occupancy`.
pub(crate) fn attackers(board: &Board, square: Square, by: Color, occupancy: Bitboard) -> Bitboard {
    let index = square.index();
    let queens = board.pieces(PieceType::Queen, by);
    let rook_like = board.pieces(PieceType::Rook, by) | queens;
    let bishop_like = board.pieces(PieceType::Bishop, by) | queens;

    (TABLES.pawn_attacks[by.other().index()][index] & board.pieces(PieceType::Pawn, by))
        | (TABLES.knight_attacks[index] & board.pieces(PieceType::Knight, by))
        | (TABLES.king_attacks[index] & board.pieces(PieceType::King, by))
        | (RAYS.get_rook_attacks(index, occupancy) & rook_like)
        | (RAYS.get_bishop_attacks(index, occupancy) & bishop_like)
}

/// Parses the piece placement field, rank 8 first.
fn parse_placement(field: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    let rank_count = field.split('/').count();
    if rank_count != 8 {
        return Err(FenError::RankCount(rank_count));
    }

    let mut rest = field;
    for rank in (0..8u8).rev() {
        let (row, remainder) = split_on(rest, '/');
        rest = remainder;
        let mut file = 0u8;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as u8;
            } else {
                let piece = Piece::from_fen_char(c).ok_or(FenError::PieceChar(c))?;
                let square = Square::new(file, rank).ok_or_else(|| FenError::RankWidth(row.to_string()))?;
                board.put(square, piece);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth(row.to_string()));
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth(row.to_string()));
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::{MoveBuilder, MoveTag};

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_read_fen_initial_position() {
        let position = Position::standard();
        assert_eq!(position.active_color(), Color::White);
        assert_eq!(position.castling_rights(), CastlingRights::ALL);
        assert_eq!(position.en_passant(), None);
        assert_eq!(position.board().occupancy().count_ones(), 32);
        assert_eq!(
            position.piece_at(sq("e1")),
            Some(Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(position.castling_rook(Color::White, CastlingSide::Kingside), Some(sq("h1")));
        assert_eq!(position.castling_rook(Color::Black, CastlingSide::Queenside), Some(sq("a8")));
        assert_eq!(position.to_fen(), START_FEN);
    }

    #[test]
    fn test_read_fen_black_active() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(position.active_color(), Color::Black);
        assert_eq!(position.en_passant(), Some(sq("e3")));
    }

    #[test]
    fn test_read_fen_no_castling() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 12 40").unwrap();
        assert_eq!(position.castling_rights(), CastlingRights::NONE);
        assert_eq!(position.halfmove_clock(), 12);
        assert_eq!(position.fullmove_number(), 40);
        assert_eq!(position.castling_rook(Color::White, CastlingSide::Kingside), None);
    }

    #[test]
    fn chess960_castling_field_finds_outermost_rooks() {
        let position =
            Position::from_fen("qrbnkbrn/pppppppp/8/8/8/8/PPPPPPPP/NNRQKBBR w KQkq - 0 1").unwrap();
        assert_eq!(position.castling_rook(Color::White, CastlingSide::Queenside), Some(sq("c1")));
        assert_eq!(position.castling_rook(Color::White, CastlingSide::Kingside), Some(sq("h1")));
        assert_eq!(position.castling_rook(Color::Black, CastlingSide::Queenside), Some(sq("b8")));
        assert_eq!(position.castling_rook(Color::Black, CastlingSide::Kingside), Some(sq("g8")));
        assert_eq!(
            position.to_fen(),
            "qrbnkbrn/pppppppp/8/8/8/8/PPPPPPPP/NNRQKBBR w KQkq - 0 1"
        );
    }

    #[test]
    fn shredder_castling_field() {
        let fen = "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9";
        let position = Position::from_fen(fen).unwrap();
        assert_eq!(position.castling_rook(Color::White, CastlingSide::Kingside), Some(sq("h1")));
        assert_eq!(position.castling_rook(Color::White, CastlingSide::Queenside), Some(sq("f1")));
        // Both rooks are outermost on their side, so KQkq is the canonical spelling
        assert_eq!(
            position.to_fen(),
            "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w KQkq - 2 9"
        );
    }

    #[test]
    fn inner_rook_keeps_its_file_letter() {
        // Two white rooks on the queenside; castling uses the inner one on c1
        let fen = "4k3/8/8/8/8/8/8/R1R1K3 w C - 0 1";
        let position = Position::from_fen(fen).unwrap();
        assert_eq!(position.castling_rook(Color::White, CastlingSide::Queenside), Some(sq("c1")));
        assert_eq!(position.to_fen(), fen);
    }

    #[test]
    fn fen_errors() {
        assert_eq!(Position::from_fen("8/8/8 w - - 0 1"), Err(FenError::RankCount(3)));
        assert_eq!(Position::from_fen("only two"), Err(FenError::FieldCount(2)));
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::ActiveColor("x".to_string()))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2 w - - 0 1"),
            Err(FenError::RankWidth("4K2".to_string()))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1"),
            Err(FenError::Castling("K".to_string()))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::KingCount)
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4X3 w - - 0 1"),
            Err(FenError::PieceChar('X'))
        );
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
            Err(FenError::EnPassant(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::Counter(_))
        ));
    }

    #[test]
    fn apply_updates_clocks_and_en_passant() {
        let start = Position::standard();
        let after = start.apply(&Move::new(sq("e2"), sq("e4"), None));
        assert_eq!(after.en_passant(), Some(sq("e3")));
        assert_eq!(after.active_color(), Color::Black);
        assert_eq!(after.halfmove_clock(), 0);
        assert_eq!(after.fullmove_number(), 1);

        let after = after.apply(&Move::new(sq("g8"), sq("f6"), None));
        assert_eq!(after.en_passant(), None);
        assert_eq!(after.halfmove_clock(), 1);
        assert_eq!(after.fullmove_number(), 2);
    }

    #[test]
    fn apply_en_passant_removes_the_pawn() {
        let position =
            Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let mv = MoveBuilder::new(sq("e5"), sq("d6"), None)
            .with_tag(MoveTag::EN_PASSANT | MoveTag::CAPTURE)
            .build();
        let after = position.apply(&mv);
        assert_eq!(after.piece_at(sq("d5")), None);
        assert_eq!(after.piece_at(sq("d6")), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(after.halfmove_clock(), 0);
    }

    #[test]
    fn apply_king_onto_rook_castle() {
        let position =
            Position::from_fen("qrbnkbrn/pppppppp/8/8/8/8/PPPPPPPP/NNR1K1BR w KQkq - 0 1").unwrap();
        let castle = MoveBuilder::new(sq("e1"), sq("c1"), None)
            .with_tag(MoveTag::QUEEN_SIDE_CASTLE)
            .build();
        let after = position.apply(&castle);
        assert_eq!(after.piece_at(sq("c1")), Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(after.piece_at(sq("d1")), Some(Piece::new(PieceType::Rook, Color::White)));
        assert_eq!(after.piece_at(sq("e1")), None);
        assert_eq!(after.castling_rights(), CastlingRights::BLACKKINGSIDE | CastlingRights::BLACKQUEENSIDE);
    }

    #[test]
    fn apply_promotion_and_rook_capture_clears_rights() {
        let position = Position::from_fen("r3k2r/1P6/8/8/8/8/8/4K3 w kq - 0 1").unwrap();
        let mv = Move::new(sq("b7"), sq("a8"), Some(PieceType::Queen));
        let after = position.apply(&mv);
        assert_eq!(after.piece_at(sq("a8")), Some(Piece::new(PieceType::Queen, Color::White)));
        assert_eq!(after.castling_rights(), CastlingRights::BLACKKINGSIDE);
    }

    #[test]
    fn attacks_and_check() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(position.in_check());
        assert!(position.is_square_attacked(sq("d1"), Color::Black));
        assert!(!position.is_square_attacked(sq("d2"), Color::Black));
        assert!(!position.king_in_check(Color::Black));
    }

    #[test]
    fn pawn_attacks_point_forward() {
        let position = Position::from_fen("4k3/8/8/8/3p4/8/8/4K3 w - - 0 1").unwrap();
        assert!(position.is_square_attacked(sq("c3"), Color::Black));
        assert!(position.is_square_attacked(sq("e3"), Color::Black));
        assert!(!position.is_square_attacked(sq("c5"), Color::Black));
    }

    #[test]
    fn diagram_shows_rank_eight_first() {
        let diagram = Position::standard().diagram();
        assert_eq!(diagram.lines().next(), Some("r n b q k b n r"));
        assert_eq!(diagram.lines().last(), Some("R N B Q K B N R"));
    }

    #[test]
    fn counters_saturate_at_their_limit() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 4294967295 4294967295").unwrap();
        let after = position.apply(&Move::new(sq("e8"), sq("d8"), None));
        assert_eq!(after.halfmove_clock(), u32::MAX);
        assert_eq!(after.fullmove_number(), u32::MAX);
        assert_eq!(after.active_color(), Color::White);
    }
}
