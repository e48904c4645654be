//! Ordered lists of legal moves and matching a requested move against them.

use std::ops::Index;
use std::slice;

use crate::chess_move::Move;

/// How [`MoveList::find_with`] treats a requested castle that no legal move
/// carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Fall back to the first move with the same text, whatever its tags.
    #[default]
    Lenient,
    /// A requested castle only matches a move tagged with the same castle.
    Strict,
}

/// Legal moves in generation order. Moves are frozen once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        MoveList { moves: Vec::with_capacity(48) }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Finds the legal move the caller meant by `candidate`, leniently.
    ///
    /// See [`MoveList::find_with`].
    pub fn find(&self, candidate: Option<&Move>) -> Option<&Move> {
        self.find_with(candidate, MatchPolicy::Lenient)
    }

    /// Finds the legal move the caller meant by `candidate`.
    ///
    /// Moves are compared by their text (origin, destination, promotion). If
    /// the candidate carries a castle tag, the first move with the same text
    /// and the same castle tag wins outright. Otherwise the first move with
    /// the same text is returned, unless `policy` is [`MatchPolicy::Strict`]
    /// and a castle was asked for.
    ///
    /// # Arguments
    ///
    /// * `candidate` - The requested move, typically decoded from text
    /// * `policy` - Whether a requested castle may fall back to an untagged match
    ///
    /// # Returns
    ///
    /// * The matching legal move, or `None` when nothing matches
    pub fn find_with(&self, candidate: Option<&Move>, policy: MatchPolicy) -> Option<&Move> {
        let candidate = candidate?;
        let wanted_castle = candidate.castle_tag();

        let mut fallback = None;
        for mv in self.moves.iter().filter(|mv| mv.same_text(candidate)) {
            match wanted_castle {
                Some(castle) if mv.has_tag(castle) => return Some(mv),
                _ => {
                    if fallback.is_none() {
                        fallback = Some(mv);
                    }
                }
            }
        }

        match (policy, wanted_castle) {
            (MatchPolicy::Strict, Some(_)) => None,
            _ => fallback,
        }
    }
}

impl From<Vec<Move>> for MoveList {
    fn from(moves: Vec<Move>) -> Self {
        MoveList { moves }
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::{MoveBuilder, MoveTag};
    use crate::piece::PieceType;
    use crate::square::Square;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn tagged(from: &str, to: &str, tag: MoveTag) -> Move {
        MoveBuilder::new(sq(from), sq(to), None).with_tag(tag).build()
    }

    fn plain(from: &str, to: &str) -> Move {
        Move::new(sq(from), sq(to), None)
    }

    #[test]
    fn absent_candidate_matches_nothing() {
        let list = MoveList::from(vec![plain("e2", "e4")]);
        assert_eq!(list.find(None), None);
        assert_eq!(list.find_with(None, MatchPolicy::Strict), None);
    }

    #[test]
    fn castle_intent_beats_earlier_text_match() {
        let king_step = plain("f1", "g1");
        let castle = tagged("f1", "g1", MoveTag::KING_SIDE_CASTLE);
        let list = MoveList::from(vec![plain("a2", "a3"), king_step, castle]);

        let wanted = tagged("f1", "g1", MoveTag::KING_SIDE_CASTLE);
        assert_eq!(list.find(Some(&wanted)), Some(&castle));
    }

    #[test]
    fn no_intent_takes_first_text_match() {
        let king_step = plain("f1", "g1");
        let castle = tagged("f1", "g1", MoveTag::KING_SIDE_CASTLE);
        let list = MoveList::from(vec![king_step, castle]);

        assert_eq!(list.find(Some(&plain("f1", "g1"))), Some(&king_step));

        let reversed = MoveList::from(vec![castle, king_step]);
        assert_eq!(reversed.find(Some(&plain("f1", "g1"))), Some(&castle));
    }

    #[test]
    fn untagged_fallback_matches() {
        let step = plain("e1", "f1");
        let list = MoveList::from(vec![plain("e2", "e4"), step]);
        assert_eq!(list.find(Some(&plain("e1", "f1"))), Some(&step));
    }

    #[test]
    fn tags_other_than_castles_do_not_matter() {
        let capture = tagged("d4", "e5", MoveTag::CAPTURE | MoveTag::CHECK);
        let list = MoveList::from(vec![capture]);
        assert_eq!(list.find(Some(&plain("d4", "e5"))), Some(&capture));
    }

    #[test]
    fn no_text_match_gives_none() {
        let list = MoveList::from(vec![plain("e2", "e4"), plain("g1", "f3")]);
        assert_eq!(list.find(Some(&plain("e2", "e3"))), None);
        assert_eq!(MoveList::new().find(Some(&plain("e2", "e4"))), None);
    }

    #[test]
    fn promotion_is_part_of_the_text() {
        let queen = Move::new(sq("b7"), sq("b8"), Some(PieceType::Queen));
        let knight = Move::new(sq("b7"), sq("b8"), Some(PieceType::Knight));
        let list = MoveList::from(vec![queen, knight]);
        assert_eq!(list.find(Some(&knight)), Some(&knight));
        assert_eq!(list.find(Some(&plain("b7", "b8"))), None);
    }

    #[test]
    fn missing_castle_falls_back_leniently() {
        let step = plain("e1", "d1");
        let list = MoveList::from(vec![step]);
        let wanted = tagged("e1", "d1", MoveTag::QUEEN_SIDE_CASTLE);
        assert_eq!(list.find(Some(&wanted)), Some(&step));
    }

    #[test]
    fn strict_policy_refuses_mismatched_castle() {
        let step = plain("e1", "d1");
        let wrong_side = tagged("e1", "d1", MoveTag::KING_SIDE_CASTLE);
        let list = MoveList::from(vec![step, wrong_side]);
        let wanted = tagged("e1", "d1", MoveTag::QUEEN_SIDE_CASTLE);
        assert_eq!(list.find_with(Some(&wanted), MatchPolicy::Strict), None);

        // Without castle intent strict behaves like lenient
        assert_eq!(list.find_with(Some(&step), MatchPolicy::Strict), Some(&step));
    }

    #[test]
    fn strict_policy_accepts_matching_castle() {
        let castle = tagged("b1", "a1", MoveTag::QUEEN_SIDE_CASTLE);
        let list = MoveList::from(vec![castle]);
        let wanted = tagged("b1", "a1", MoveTag::QUEEN_SIDE_CASTLE);
        assert_eq!(list.find_with(Some(&wanted), MatchPolicy::Strict), Some(&castle));
    }

    #[test]
    fn first_of_several_tagged_matches_wins() {
        let first = tagged("e1", "h1", MoveTag::KING_SIDE_CASTLE);
        let second = tagged("e1", "h1", MoveTag::KING_SIDE_CASTLE | MoveTag::CHECK);
        let list: MoveList = vec![first, second].into_iter().collect();
        assert_eq!(list.find(Some(&first)), Some(&first));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], second);
    }
}
