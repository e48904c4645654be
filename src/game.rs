//! A game in progress: the current position, the moves played and the
//! legal replies, with moves requested as text or as [`Move`] values.

use crate::chess960;
use crate::chess_move::Move;
use crate::config::GameOptions;
use crate::error::{FenError, MoveError, SetupError};
use crate::movegeneration::legal_moves;
use crate::movelist::MoveList;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    /// Moves played so far, as matched from the legal list
    moves: Vec<Move>,
    options: GameOptions,
    /// Legal moves in `position`, regenerated after every move
    legal: MoveList,
}

impl Game {
    /// Creates a game from the classical starting position.
    pub fn new(options: GameOptions) -> Game {
        Game::from_position(Position::standard(), options)
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str, options: GameOptions) -> Result<Game, FenError> {
        Ok(Game::from_position(Position::from_fen(fen)?, options))
    }

    /// Creates a game from Chess960 setup `index`.
    pub fn chess960(index: u16, options: GameOptions) -> Result<Game, SetupError> {
        Ok(Game::from_position(chess960::start_position(index)?, options))
    }

    pub fn from_position(position: Position, options: GameOptions) -> Game {
        let legal = legal_moves(&position);
        Game {
            position,
            moves: Vec::new(),
            options,
            legal,
        }
    }

    /// Plays a move given in UCI notation.
    ///
    /// # Arguments
    ///
    /// * `text` - e.g. `e2e4`, `e7e8q`, `e1h1` or classical `e1g1`
    ///
    /// # Returns
    ///
    /// * The legal move that was played, with all its tags
    pub fn move_str(&mut self, text: &str) -> Result<Move, MoveError> {
        let candidate = self.options.notation().decode(&self.position, text)?;
        self.make_move(&candidate)
    }

    /// Plays the legal move matching `candidate` under the game's match policy.
    ///
    /// A castle tag on the candidate picks the castle over a same-text
    /// ordinary move; other tags are ignored.
    pub fn make_move(&mut self, candidate: &Move) -> Result<Move, MoveError> {
        let mv = *self
            .legal
            .find_with(Some(candidate), self.options.match_policy)
            .ok_or_else(|| MoveError::Illegal(candidate.to_string()))?;
        self.position = self.position.apply(&mv);
        self.legal = legal_moves(&self.position);
        self.moves.push(mv);
        Ok(mv)
    }

    pub fn valid_moves(&self) -> &MoveList {
        &self.legal
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn status(&self) -> GameStatus {
        if !self.legal.is_empty() {
            GameStatus::Ongoing
        } else if self.position.in_check() {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }

    /// `mv` in the game's UCI notation.
    pub fn move_text(&self, mv: &Move) -> String {
        self.options.notation().encode(mv)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(GameOptions::default())
    }
}
