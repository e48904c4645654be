//! The move value and its tags.
//!
//! A [`Move`] is a single ply: origin, destination, optional promotion piece
//! and a set of [`MoveTag`]s describing its consequences. Moves are frozen
//! values; tags are accumulated on a [`MoveBuilder`] and the builder is turned
//! into a `Move` before the move is published into any [`crate::movelist::MoveList`].

use std::fmt;

use bitflags::bitflags;

use crate::piece::PieceType;
use crate::square::Square;

bitflags! {
    /// Notable consequences of a move. Several tags may be set at once
    /// (a capture that gives check carries both).
    pub struct MoveTag: u16 {
        const KING_SIDE_CASTLE = 1 << 0;
        const QUEEN_SIDE_CASTLE = 1 << 1;
        const CAPTURE = 1 << 2;
        const EN_PASSANT = 1 << 3;
        const CHECK = 1 << 4;
        /// Set during legality filtering on moves that leave the mover's own
        /// king attacked. Such moves are dropped and never published.
        #[doc(hidden)]
        const INVALIDATES_OWN_KING = 1 << 5;
        const CASTLE = Self::KING_SIDE_CASTLE.bits | Self::QUEEN_SIDE_CASTLE.bits;
    }
}

impl MoveTag {
    /// Tags a caller may see or set.
    pub fn public() -> MoveTag {
        MoveTag::all() - MoveTag::INVALIDATES_OWN_KING
    }
}

/// A single ply.
///
/// Castling is expressed king-onto-rook: the destination is the square of the
/// castling rook, and the move carries `KING_SIDE_CASTLE` or `QUEEN_SIDE_CASTLE`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    origin: Square,
    destination: Square,
    promotion: Option<PieceType>,
    tags: MoveTag,
}

impl Move {
    /// An untagged move. Use [`MoveBuilder`] when tags are needed.
    pub fn new(origin: Square, destination: Square, promotion: Option<PieceType>) -> Move {
        Move {
            origin,
            destination,
            promotion,
            tags: MoveTag::empty(),
        }
    }

    pub fn origin(&self) -> Square {
        self.origin
    }

    pub fn destination(&self) -> Square {
        self.destination
    }

    pub fn promotion(&self) -> Option<PieceType> {
        self.promotion
    }

    pub fn tags(&self) -> MoveTag {
        self.tags & MoveTag::public()
    }

    /// Returns true if any flag in `tag` is set on this move.
    ///
    /// Pass a single flag for an unambiguous answer; a combined value such as
    /// [`MoveTag::CASTLE`] asks whether *any* of its flags is present.
    pub fn has_tag(&self, tag: MoveTag) -> bool {
        self.tags.intersects(tag)
    }

    /// The castle flag this move carries, if any.
    pub fn castle_tag(&self) -> Option<MoveTag> {
        if self.has_tag(MoveTag::KING_SIDE_CASTLE) {
            Some(MoveTag::KING_SIDE_CASTLE)
        } else if self.has_tag(MoveTag::QUEEN_SIDE_CASTLE) {
            Some(MoveTag::QUEEN_SIDE_CASTLE)
        } else {
            None
        }
    }

    /// True when both moves render to the same text, whatever their tags.
    pub fn same_text(&self, other: &Move) -> bool {
        self.origin == other.origin
            && self.destination == other.destination
            && self.promotion == other.promotion
    }
}

/// Origin, destination and promotion letter; tags are never part of the text.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion)?;
        }
        Ok(())
    }
}

/// A move under construction.
///
/// Tags only grow while a builder is alive, except that a castle flag
/// replaces the opposite one (see [`MoveBuilder::add_tag`]).
/// [`MoveBuilder::build`] freezes the result into a `Move`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveBuilder {
    mv: Move,
}

impl MoveBuilder {
    pub fn new(origin: Square, destination: Square, promotion: Option<PieceType>) -> MoveBuilder {
        MoveBuilder {
            mv: Move::new(origin, destination, promotion),
        }
    }

    /// Adds caller-visible tags, for decoders outside this crate.
    ///
    /// The internal legality marker cannot be set this way.
    pub fn with_tag(mut self, tag: MoveTag) -> MoveBuilder {
        self.add_tag(tag & MoveTag::public());
        self
    }

    /// ORs `tag` into the move.
    ///
    /// Tags only grow, with one exception: a castle flag clears the opposite
    /// castle flag, so a move never carries both. This is the only case
    /// where a bit is removed.
    pub(crate) fn add_tag(&mut self, tag: MoveTag) {
        if tag.contains(MoveTag::KING_SIDE_CASTLE) {
            self.mv.tags.remove(MoveTag::QUEEN_SIDE_CASTLE);
        } else if tag.contains(MoveTag::QUEEN_SIDE_CASTLE) {
            self.mv.tags.remove(MoveTag::KING_SIDE_CASTLE);
        }
        let castle = tag & MoveTag::CASTLE;
        let tag = if castle == MoveTag::CASTLE {
            tag - MoveTag::QUEEN_SIDE_CASTLE
        } else {
            tag
        };
        self.mv.tags.insert(tag);
    }

    pub fn origin(&self) -> Square {
        self.mv.origin
    }

    pub fn destination(&self) -> Square {
        self.mv.destination
    }

    pub fn promotion(&self) -> Option<PieceType> {
        self.mv.promotion
    }

    pub fn has_tag(&self, tag: MoveTag) -> bool {
        self.mv.has_tag(tag)
    }

    /// Rewrites the destination. Used when classical castling text is turned
    /// into the king-onto-rook form before any tag is inferred.
    pub(crate) fn set_destination(&mut self, destination: Square) {
        self.mv.destination = destination;
    }

    pub fn build(self) -> Move {
        self.mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn renders_without_tags() {
        let plain = Move::new(sq("e1"), sq("h1"), None);
        let castle = MoveBuilder::new(sq("e1"), sq("h1"), None)
            .with_tag(MoveTag::KING_SIDE_CASTLE)
            .build();
        assert_eq!(plain.to_string(), "e1h1");
        assert_eq!(castle.to_string(), "e1h1");
        assert_ne!(plain, castle);
        assert!(plain.same_text(&castle));
    }

    #[test]
    fn renders_promotion_letter() {
        let promotion = Move::new(sq("a7"), sq("b8"), Some(PieceType::Knight));
        assert_eq!(promotion.to_string(), "a7b8n");
        assert!(!promotion.same_text(&Move::new(sq("a7"), sq("b8"), Some(PieceType::Queen))));
    }

    #[test]
    fn has_tag_uses_any_bit_semantics() {
        let mv = MoveBuilder::new(sq("d4"), sq("e5"), None)
            .with_tag(MoveTag::CAPTURE | MoveTag::CHECK)
            .build();
        assert!(mv.has_tag(MoveTag::CAPTURE));
        assert!(mv.has_tag(MoveTag::CHECK));
        assert!(!mv.has_tag(MoveTag::EN_PASSANT));
        assert!(mv.has_tag(MoveTag::CAPTURE | MoveTag::EN_PASSANT));
        assert!(!mv.has_tag(MoveTag::CASTLE));
        assert_eq!(mv.castle_tag(), None);
    }

    #[test]
    fn castle_flags_are_exclusive() {
        let mut builder = MoveBuilder::new(sq("e1"), sq("a1"), None);
        builder.add_tag(MoveTag::KING_SIDE_CASTLE);
        builder.add_tag(MoveTag::QUEEN_SIDE_CASTLE);
        let mv = builder.build();
        assert!(mv.has_tag(MoveTag::QUEEN_SIDE_CASTLE));
        assert!(!mv.has_tag(MoveTag::KING_SIDE_CASTLE));

        let both = MoveBuilder::new(sq("e1"), sq("h1"), None)
            .with_tag(MoveTag::CASTLE)
            .build();
        assert_eq!(both.castle_tag(), Some(MoveTag::KING_SIDE_CASTLE));
        assert!(!both.has_tag(MoveTag::QUEEN_SIDE_CASTLE));
    }

    #[test]
    fn internal_marker_is_not_public() {
        let external = MoveBuilder::new(sq("e2"), sq("e4"), None)
            .with_tag(MoveTag::INVALIDATES_OWN_KING)
            .build();
        assert!(!external.has_tag(MoveTag::INVALIDATES_OWN_KING));

        let mut internal = MoveBuilder::new(sq("e2"), sq("e4"), None);
        internal.add_tag(MoveTag::INVALIDATES_OWN_KING);
        let mv = internal.build();
        assert!(mv.has_tag(MoveTag::INVALIDATES_OWN_KING));
        assert_eq!(mv.tags(), MoveTag::empty());
    }

    #[test]
    fn tags_only_accumulate() {
        let mut builder = MoveBuilder::new(sq("e5"), sq("d6"), None);
        builder.add_tag(MoveTag::EN_PASSANT);
        builder.add_tag(MoveTag::CAPTURE);
        builder.add_tag(MoveTag::CAPTURE);
        assert_eq!(builder.build().tags(), MoveTag::EN_PASSANT | MoveTag::CAPTURE);
    }
}
