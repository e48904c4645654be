//! Chess960 starting positions.
//!
//! The 960 back ranks are numbered with the Scharnagl scheme, where index 518
//! is the classical setup. Black mirrors White.

use rand::Rng;

use crate::error::SetupError;
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

/// Number of distinct Chess960 setups.
pub const SETUP_COUNT: u16 = 960;

/// Index of the classical setup `RNBQKBNR`.
pub const STANDARD_INDEX: u16 = 518;

/// Knight placements over the five squares left after bishops and queen.
const KNIGHT_TABLE: [(usize, usize); 10] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 2),
    (1, 3),
    (1, 4),
    (2, 3),
    (2, 4),
    (3, 4),
];

/// Back rank of setup `index`, from the a-file to the h-file.
///
/// # Arguments
///
/// * `index` - Scharnagl number in `0..960`
///
/// # Returns
///
/// * The eight piece types, or `IndexOutOfRange`
pub fn back_rank(index: u16) -> Result<[PieceType; 8], SetupError> {
    if index >= SETUP_COUNT {
        return Err(SetupError::IndexOutOfRange(index));
    }
    let mut rank: [Option<PieceType>; 8] = [None; 8];
    let mut n = index as usize;

    rank[2 * (n % 4) + 1] = Some(PieceType::Bishop);
    n /= 4;
    rank[2 * (n % 4)] = Some(PieceType::Bishop);
    n /= 4;

    let queen = n % 6;
    n /= 6;
    place_on_empty(&mut rank, queen, PieceType::Queen);

    // Second knight goes in after the first, so its slot shifts down by one
    let (first, second) = KNIGHT_TABLE[n];
    place_on_empty(&mut rank, first, PieceType::Knight);
    place_on_empty(&mut rank, second - 1, PieceType::Knight);

    for piece in [PieceType::Rook, PieceType::King, PieceType::Rook] {
        place_on_empty(&mut rank, 0, piece);
    }

    let mut pieces = [PieceType::Pawn; 8];
    for (slot, piece) in pieces.iter_mut().zip(rank) {
        *slot = piece.ok_or(SetupError::IndexOutOfRange(index))?;
    }
    Ok(pieces)
}

fn place_on_empty(rank: &mut [Option<PieceType>; 8], nth: usize, piece: PieceType) {
    if let Some(slot) = rank.iter_mut().filter(|slot| slot.is_none()).nth(nth) {
        *slot = Some(piece);
    }
}

/// Starting position of setup `index`, White to move with full castling rights.
pub fn start_position(index: u16) -> Result<Position, SetupError> {
    let rank = back_rank(index)?;
    let white: String = rank
        .iter()
        .map(|&piece_type| Piece::new(piece_type, Color::White).to_fen_char())
        .collect();
    let fen = format!(
        "{}/pppppppp/8/8/8/8/PPPPPPPP/{} w KQkq - 0 1",
        white.to_ascii_lowercase(),
        white
    );
    Ok(Position::from_fen(&fen)?)
}

/// Picks a setup index uniformly at random.
pub fn random_index<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(0..SETUP_COUNT)
}

/// Starting position of a uniformly random setup.
pub fn random_start_position<R: Rng + ?Sized>(rng: &mut R) -> Result<Position, SetupError> {
    start_position(random_index(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::START_FEN;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn letters(index: u16) -> String {
        back_rank(index)
            .unwrap()
            .iter()
            .map(|piece| piece.letter().to_ascii_uppercase())
            .collect()
    }

    /// Tests that index 518 is the classical setup.
    #[test]
    fn standard_index_is_classical() {
        assert_eq!(letters(STANDARD_INDEX), "RNBQKBNR");
        assert_eq!(start_position(STANDARD_INDEX).unwrap().to_fen(), START_FEN);
    }

    #[test]
    fn known_setups() {
        assert_eq!(letters(0), "BBQNNRKR");
        assert_eq!(letters(959), "RKRNNQBB");
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(back_rank(960), Err(SetupError::IndexOutOfRange(960)));
        assert!(start_position(u16::MAX).is_err());
    }

    /// Tests that every setup has bishops on opposite colours and the king
    /// between the rooks.
    #[test]
    fn every_setup_is_well_formed() {
        for index in 0..SETUP_COUNT {
            let rank = back_rank(index).unwrap();
            let files = |wanted: PieceType| -> Vec<usize> {
                rank.iter()
                    .enumerate()
                    .filter(|(_, piece)| **piece == wanted)
                    .map(|(file, _)| file)
                    .collect()
            };
            let bishops = files(PieceType::Bishop);
            let rooks = files(PieceType::Rook);
            let king = files(PieceType::King);
            assert_eq!(bishops.len(), 2);
            assert_ne!(bishops[0] % 2, bishops[1] % 2, "index {}", index);
            assert_eq!(rooks.len(), 2);
            assert_eq!(king.len(), 1);
            assert!(rooks[0] < king[0] && king[0] < rooks[1], "index {}", index);
            assert_eq!(files(PieceType::Knight).len(), 2);
            assert_eq!(files(PieceType::Queen).len(), 1);
        }
    }

    #[test]
    fn random_setups_are_in_range() {
        let mut rng = StdRng::seed_from_u64(960);
        for _ in 0..100 {
            let index = random_index(&mut rng);
            assert!(index < SETUP_COUNT);
            assert!(start_position(index).is_ok());
        }

        let position = random_start_position(&mut rng).unwrap();
        let fen = position.to_fen();
        assert!(fen.ends_with(" w KQkq - 0 1"), "{}", fen);
    }
}
