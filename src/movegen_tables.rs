//! Move generation lookup tables for the leaping pieces.
//!
//! Knight, king and pawn capture patterns depend only on the origin square,
//! so they are computed once and shared through [`TABLES`].

use once_cell::sync::Lazy;

use crate::piece::Color;
use crate::utils::{set_bit, Bitboard};

/// Shared, lazily built lookup tables.
pub static TABLES: Lazy<MoveGenTables> = Lazy::new(MoveGenTables::new);

/// A collection of pre-computed attack patterns indexed by square.
#[derive(Debug, Clone)]
pub struct MoveGenTables {
    /// Pawn capture patterns indexed by [color][square].
    /// The first dimension represents the color (0 = white, 1 = black).
    pub pawn_attacks: [[Bitboard; 64]; 2],

    /// Knight attack patterns indexed by square (0-63).
    pub knight_attacks: [Bitboard; 64],

    /// King attack patterns indexed by square (0-63).
    pub king_attacks: [Bitboard; 64],
}

impl MoveGenTables {
    /// Creates a new instance of MoveGenTables with all lookup tables initialized.
    ///
    /// # Returns
    ///
    /// * A new `MoveGenTables` instance with all tables initialized
    pub fn new() -> Self {
        let mut tables = Self {
            pawn_attacks: [[0; 64]; 2],
            knight_attacks: [0; 64],
            king_attacks: [0; 64],
        };

        for square in 0..64 {
            tables.knight_attacks[square] = generate_knight_attacks(square);
            tables.king_attacks[square] = generate_king_attacks(square);
            tables.pawn_attacks[Color::White.index()][square] =
                generate_pawn_attacks(square, Color::White);
            tables.pawn_attacks[Color::Black.index()][square] =
                generate_pawn_attacks(square, Color::Black);
        }

        tables
    }
}

impl Default for MoveGenTables {
    fn default() -> Self {
        Self::new()
    }
}

fn leaper_attacks(square: usize, offsets: &[(i32, i32)]) -> Bitboard {
    let row = (square / 8 + 1) as i32;
    let col = (square % 8 + 1) as i32;
    offsets
        .iter()
        .fold(0, |attacks, (dr, dc)| attacks | set_bit(row + dr, col + dc))
}

/// Generates a bitboard of all squares a king can attack from a given square.
///
/// # Arguments
///
/// * `square` - The square index (0-63) from which to generate attacks
///
/// # Returns
///
/// * A bitboard representing all squares the king can attack
fn generate_king_attacks(square: usize) -> Bitboard {
    let directions = [
        (1, 0), (1, 1), (0, 1), (-1, 1),
        (-1, 0), (-1, -1), (0, -1), (1, -1),
    ];
    leaper_attacks(square, &directions)
}

/// Generates a bitboard of all squares a knight can attack from a given square.
fn generate_knight_attacks(square: usize) -> Bitboard {
    let moves = [
        (2, 1), (2, -1), (-2, 1), (-2, -1),
        (1, 2), (1, -2), (-1, 2), (-1, -2),
    ];
    leaper_attacks(square, &moves)
}

/// Diagonal capture squares of a pawn of `color` standing on `square`.
fn generate_pawn_attacks(square: usize, color: Color) -> Bitboard {
    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    leaper_attacks(square, &[(forward, -1), (forward, 1)])
}
