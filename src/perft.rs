//! Performance test: counts the leaves of the legal move tree.
//!
//! Leaf statistics are read straight off the move tags, which makes perft a
//! check on the tagging as well as on move generation.

use crate::chess_move::{Move, MoveTag};
use crate::movegeneration::legal_moves;
use crate::position::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Perft {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl Perft {
    pub fn new() -> Self {
        Perft::default()
    }

    /// Counts the leaf nodes `depth` plies below `position`.
    ///
    /// Counters accumulate across calls.
    ///
    /// # Arguments
    ///
    /// * `position` - Root position
    /// * `depth` - Plies to search; depth 0 counts the root itself
    ///
    /// # Returns
    ///
    /// * The number of leaf nodes found by this call
    pub fn run(&mut self, position: &Position, depth: u32) -> u64 {
        if depth == 0 {
            self.nodes += 1;
            return 1;
        }
        let moves = legal_moves(position);
        if depth == 1 {
            for mv in &moves {
                self.record_leaf(mv);
            }
            return moves.len() as u64;
        }
        moves
            .iter()
            .map(|mv| self.run(&position.apply(mv), depth - 1))
            .sum()
    }

    /// Leaf counts below each root move, in generation order.
    pub fn divide(&mut self, position: &Position, depth: u32) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        legal_moves(position)
            .iter()
            .map(|mv| (*mv, self.run(&position.apply(mv), depth - 1)))
            .collect()
    }

    fn record_leaf(&mut self, mv: &Move) {
        self.nodes += 1;
        if mv.has_tag(MoveTag::CAPTURE) {
            self.captures += 1;
        }
        if mv.has_tag(MoveTag::EN_PASSANT) {
            self.en_passants += 1;
        }
        if mv.has_tag(MoveTag::CASTLE) {
            self.castles += 1;
        }
        if mv.promotion().is_some() {
            self.promotions += 1;
        }
        if mv.has_tag(MoveTag::CHECK) {
            self.checks += 1;
        }
    }
}
