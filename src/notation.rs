//! UCI coordinate notation.
//!
//! Text such as `e2e4` or `a7a8q` is decoded into a candidate [`Move`] for
//! the matcher. Castles may be typed either king-onto-rook (`e1h1`, the
//! Chess960 convention) or classically as the king's landing square
//! (`e1g1`); both decode to the king-onto-rook form with a castle tag.

use crate::board::PieceAt;
use crate::castling::{castle_destinations, tag_960_castle, CastlingSide};
use crate::chess_move::{Move, MoveBuilder};
use crate::error::NotationError;
use crate::piece::{Color, PieceType};
use crate::position::Position;
use crate::square::Square;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UciNotation {
    /// Encode castles king-onto-rook instead of with the king's landing square.
    pub chess960: bool,
}

impl UciNotation {
    pub fn new(chess960: bool) -> Self {
        UciNotation { chess960 }
    }

    /// Decodes `text` against `position` into a candidate move.
    ///
    /// The candidate carries a castle tag when the text names a castle;
    /// capture and check tags are left for the matched legal move to supply.
    ///
    /// # Arguments
    ///
    /// * `position` - Position the move is played in
    /// * `text` - Four characters, or five with a promotion letter
    ///
    /// # Returns
    ///
    /// * The candidate move, or why the text could not be read
    pub fn decode(&self, position: &Position, text: &str) -> Result<Move, NotationError> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(NotationError::Length(text.to_string()));
        }
        let origin: Square = text[0..2].parse()?;
        let destination: Square = text[2..4].parse()?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PieceType::from_letter(c)
                    .filter(|piece| PieceType::PROMOTIONS.contains(piece))
                    .ok_or(NotationError::InvalidPromotion(c))?,
            ),
        };

        let piece = position
            .piece_at(origin)
            .ok_or_else(|| NotationError::EmptyOrigin(origin.to_string()))?;

        let mut candidate = MoveBuilder::new(origin, destination, promotion);
        if piece.piece_type == PieceType::King && promotion.is_none() {
            if let Some(rook) = classical_castle_rook(position, piece.color, origin, destination) {
                candidate.set_destination(rook);
            }
        }
        tag_960_castle(position, &mut candidate);
        Ok(candidate.build())
    }

    /// Renders `mv` as UCI text.
    ///
    /// Outside Chess960 mode a castle is written with the king's landing
    /// square (`e1g1`), otherwise the move's own text is used.
    pub fn encode(&self, mv: &Move) -> String {
        if self.chess960 {
            return mv.to_string();
        }
        let side = match mv.castle_tag() {
            Some(tag) if tag == CastlingSide::Kingside.tag() => CastlingSide::Kingside,
            Some(_) => CastlingSide::Queenside,
            None => return mv.to_string(),
        };
        match castle_destinations(mv.origin().rank(), side) {
            Some((king_to, _)) => format!("{}{}", mv.origin(), king_to),
            None => mv.to_string(),
        }
    }
}

/// Recognises a castle typed with the king's landing square.
///
/// The king must leave its square on its back rank for the g- or c-file,
/// at least two files away, while the matching castling right is held. A
/// one-file step stays an ordinary king move.
fn classical_castle_rook(position: &Position, color: Color, origin: Square, destination: Square) -> Option<Square> {
    if origin.rank() != color.back_rank() || destination.rank() != origin.rank() {
        return None;
    }
    if origin.file().abs_diff(destination.file()) < 2 {
        return None;
    }
    let side = CastlingSide::of_rook(origin.file(), destination.file());
    if destination.file() != side.king_destination_file() {
        return None;
    }
    position.castling_rook(color, side)
}
