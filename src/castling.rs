//! Castling: rights, geometry and Chess960 castle detection.
//!
//! In Chess960 the king and rook start files vary per game, so a castle is
//! written king-onto-rook and recognised by what stands on the destination
//! square, not by how far the king travels.

use bitflags::bitflags;

use crate::board::PieceAt;
use crate::chess_move::{MoveBuilder, MoveTag};
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    pub fn index(self) -> usize {
        match self {
            CastlingSide::Kingside => 0,
            CastlingSide::Queenside => 1,
        }
    }

    /// File the king ends on, g or c.
    pub fn king_destination_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }

    /// File the rook ends on, f or d.
    pub fn rook_destination_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }

    /// The move tag for castling on this side.
    pub fn tag(self) -> MoveTag {
        match self {
            CastlingSide::Kingside => MoveTag::KING_SIDE_CASTLE,
            CastlingSide::Queenside => MoveTag::QUEEN_SIDE_CASTLE,
        }
    }

    /// Side of the king that `rook_file` lies on.
    pub fn of_rook(king_file: u8, rook_file: u8) -> CastlingSide {
        if rook_file > king_file {
            CastlingSide::Kingside
        } else {
            CastlingSide::Queenside
        }
    }
}

bitflags! {
    pub struct CastlingRights: u8 {
        const NONE = 0;
        const WHITEKINGSIDE = 1 << 0;
        const WHITEQUEENSIDE = 1 << 1;
        const BLACKKINGSIDE = 1 << 2;
        const BLACKQUEENSIDE = 1 << 3;
        const ALL =
            Self::WHITEKINGSIDE.bits
            | Self::WHITEQUEENSIDE.bits
            | Self::BLACKKINGSIDE.bits
            | Self::BLACKQUEENSIDE.bits;
    }
}

impl CastlingRights {
    /// The single right for `color` castling on `side`.
    pub fn of(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => CastlingRights::WHITEKINGSIDE,
            (Color::White, CastlingSide::Queenside) => CastlingRights::WHITEQUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => CastlingRights::BLACKKINGSIDE,
            (Color::Black, CastlingSide::Queenside) => CastlingRights::BLACKQUEENSIDE,
        }
    }

    /// Both rights of `color`.
    pub fn of_color(color: Color) -> CastlingRights {
        CastlingRights::of(color, CastlingSide::Kingside) | CastlingRights::of(color, CastlingSide::Queenside)
    }
}

/// Tags a king-onto-own-rook move as a castle.
///
/// Returns the candidate with `KING_SIDE_CASTLE` added when the rook stands
/// on a higher file than the king, `QUEEN_SIDE_CASTLE` otherwise. Candidates
/// whose origin holds no king, or whose destination holds anything but a rook
/// of the king's colour, come back unchanged; so does an absent candidate.
///
/// `board` must be the position *before* the move. Running the normalizer
/// twice gives the same tags as running it once.
///
/// # Arguments
///
/// * `board` - Pre-move board, read only
/// * `candidate` - Move under construction
///
/// # Returns
///
/// * The same candidate, possibly with a castle tag added
pub fn normalize_960_castle<B>(board: &B, candidate: Option<MoveBuilder>) -> Option<MoveBuilder>
where
    B: PieceAt + ?Sized,
{
    candidate.map(|mut candidate| {
        tag_960_castle(board, &mut candidate);
        candidate
    })
}

/// In-place form of [`normalize_960_castle`] for builders already in hand.
pub(crate) fn tag_960_castle<B>(board: &B, candidate: &mut MoveBuilder)
where
    B: PieceAt + ?Sized,
{
    let king = match board.piece_at(candidate.origin()) {
        Some(piece) if piece.piece_type == PieceType::King => piece,
        _ => return,
    };
    let rook = Piece::new(PieceType::Rook, king.color);
    if board.piece_at(candidate.destination()) != Some(rook) {
        return;
    }
    let side = CastlingSide::of_rook(candidate.origin().file(), candidate.destination().file());
    candidate.add_tag(side.tag());
}

/// Where king and rook end up after castling on `side` from `back_rank`.
pub fn castle_destinations(back_rank: u8, side: CastlingSide) -> Option<(Square, Square)> {
    let king = Square::new(side.king_destination_file(), back_rank)?;
    let rook = Square::new(side.rook_destination_file(), back_rank)?;
    Some((king, rook))
}
