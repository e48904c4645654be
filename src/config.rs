//! Configuration for a game.

use crate::movelist::MatchPolicy;
use crate::notation::UciNotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Write castles king-onto-rook when encoding moves.
    pub chess960: bool,
    /// How requested castles are matched against legal moves.
    pub match_policy: MatchPolicy,
}

impl GameOptions {
    pub fn notation(&self) -> UciNotation {
        UciNotation::new(self.chess960)
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            chess960: false,
            match_policy: MatchPolicy::Lenient,
        }
    }
}
