//! Ray attack generation for sliding pieces.
//!
//! Rays are pre-computed in all eight directions. Attacks with blockers are
//! found by cutting each ray at its first occupied square, which is included
//! in the result so the caller decides between capture and blocked.

use once_cell::sync::Lazy;

use crate::utils::{bit_scan, bit_scan_backward, Bitboard};

/// Shared, lazily built ray tables.
pub static RAYS: Lazy<Rays> = Lazy::new(Rays::new);

/// A structure containing pre-computed ray attacks in all eight directions.
///
/// North, east, north-east and north-west rays run towards higher square
/// indices; the other four run towards lower ones. That decides whether the
/// nearest blocker is the lowest or the highest set bit.
#[derive(Debug, Clone)]
pub struct Rays {
    /// North-directed rays from each square
    pub n_rays: Vec<Bitboard>,
    /// East-directed rays from each square
    pub e_rays: Vec<Bitboard>,
    /// South-directed rays from each square
    pub s_rays: Vec<Bitboard>,
    /// West-directed rays from each square
    pub w_rays: Vec<Bitboard>,
    /// Northeast-directed rays from each square
    pub ne_rays: Vec<Bitboard>,
    /// Southeast-directed rays from each square
    pub se_rays: Vec<Bitboard>,
    /// Northwest-directed rays from each square
    pub nw_rays: Vec<Bitboard>,
    /// Southwest-directed rays from each square
    pub sw_rays: Vec<Bitboard>,
}

impl Rays {
    /// Creates a new instance with pre-computed ray attacks for all squares.
    ///
    /// # Returns
    ///
    /// * A new `Rays` instance with all ray attacks pre-computed
    pub fn new() -> Self {
        let mut rays = Self {
            n_rays: Vec::with_capacity(64),
            e_rays: Vec::with_capacity(64),
            s_rays: Vec::with_capacity(64),
            w_rays: Vec::with_capacity(64),
            ne_rays: Vec::with_capacity(64),
            se_rays: Vec::with_capacity(64),
            nw_rays: Vec::with_capacity(64),
            sw_rays: Vec::with_capacity(64),
        };

        for square in 0..64 {
            let row = (square / 8 + 1) as i64;
            let col = (square % 8 + 1) as i64;
            rays.n_rays.push(n_ray(row, col));
            rays.e_rays.push(e_ray(row, col));
            rays.s_rays.push(s_ray(row, col));
            rays.w_rays.push(w_ray(row, col));
            rays.ne_rays.push(ne_ray(row, col));
            rays.se_rays.push(se_ray(row, col));
            rays.nw_rays.push(nw_ray(row, col));
            rays.sw_rays.push(sw_ray(row, col));
        }
        rays
    }

    /// Calculates bishop attacks from a given square considering occupied squares.
    ///
    /// # Arguments
    ///
    /// * `square` - The square index (0-63) from which to generate attacks
    /// * `occupancy` - A bitboard representing all occupied squares
    ///
    /// # Returns
    ///
    /// * A bitboard of every reachable square, first blocker on each ray included
    pub fn get_bishop_attacks(&self, square: usize, occupancy: Bitboard) -> Bitboard {
        positive_ray(&self.ne_rays, square, occupancy)
            | positive_ray(&self.nw_rays, square, occupancy)
            | negative_ray(&self.se_rays, square, occupancy)
            | negative_ray(&self.sw_rays, square, occupancy)
    }

    /// Calculates rook attacks from a given square considering occupied squares.
    ///
    /// # Arguments
    ///
    /// * `square` - The square index (0-63) from which to generate attacks
    /// * `occupancy` - A bitboard representing all occupied squares
    ///
    /// # Returns
    ///
    /// * A bitboard of every reachable square, first blocker on each ray included
    pub fn get_rook_attacks(&self, square: usize, occupancy: Bitboard) -> Bitboard {
        positive_ray(&self.n_rays, square, occupancy)
            | positive_ray(&self.e_rays, square, occupancy)
            | negative_ray(&self.s_rays, square, occupancy)
            | negative_ray(&self.w_rays, square, occupancy)
    }

    /// Queen attacks are the union of bishop and rook attacks.
    pub fn get_queen_attacks(&self, square: usize, occupancy: Bitboard) -> Bitboard {
        self.get_bishop_attacks(square, occupancy) | self.get_rook_attacks(square, occupancy)
    }
}

impl Default for Rays {
    fn default() -> Self {
        Self::new()
    }
}

/// Ray towards higher indices, cut after its lowest blocker.
fn positive_ray(rays: &[Bitboard], square: usize, occupancy: Bitboard) -> Bitboard {
    let ray = rays[square];
    match bit_scan(ray & occupancy) {
        Some(blocker) => ray & !rays[blocker],
        None => ray,
    }
}

/// Ray towards lower indices, cut after its highest blocker.
fn negative_ray(rays: &[Bitboard], square: usize, occupancy: Bitboard) -> Bitboard {
    let ray = rays[square];
    match bit_scan_backward(ray & occupancy) {
        Some(blocker) => ray & !rays[blocker],
        None => ray,
    }
}

/// Generates the ray function for one direction from a (row, col) step.
macro_rules! define_ray {
    ($name:ident, $d_row:expr, $d_col:expr) => {
        fn $name(row: i64, col: i64) -> Bitboard {
            let mut bitboard = 0;
            for offset in 1..8 {
                bitboard = set_bit(bitboard, (row + $d_row * offset, col + $d_col * offset));
            }
            bitboard
        }
    };
}

define_ray!(n_ray, 1, 0);
define_ray!(e_ray, 0, 1);
define_ray!(s_ray, -1, 0);
define_ray!(w_ray, 0, -1);
define_ray!(ne_ray, 1, 1);
define_ray!(nw_ray, 1, -1);
define_ray!(se_ray, -1, 1);
define_ray!(sw_ray, -1, -1);

/// Sets the bit for (row, col), both 1-8, leaving off-board coordinates out.
fn set_bit(bitboard: Bitboard, row_col: (i64, i64)) -> Bitboard {
    let (row, col) = row_col;
    if row < 1 || row > 8 || col < 1 || col > 8 {
        return bitboard;
    }
    bitboard | (1 << ((col - 1) + (row - 1) * 8))
}
