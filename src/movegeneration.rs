//! Legal move generation.
//!
//! Every piece of the side to move produces pseudo-legal candidates as
//! [`MoveBuilder`]s. Captures and en passant are tagged from the board,
//! castles are emitted king-onto-rook and tagged by the castle normalizer.
//! Each candidate is then played out: moves that leave the mover's king
//! attacked are marked `INVALIDATES_OWN_KING` and dropped, moves that attack
//! the opponent's king are tagged `CHECK`. Only then is a move frozen and
//! published into the [`MoveList`].

use crate::board::PieceAt;
use crate::castling::{castle_destinations, tag_960_castle, CastlingSide};
use crate::chess_move::{MoveBuilder, MoveTag};
use crate::movegen_tables::TABLES;
use crate::movelist::MoveList;
use crate::piece::{Color, PieceType};
use crate::position::Position;
use crate::rayattacks::RAYS;
use crate::square::Square;
use crate::utils::{extract_bits, Bitboard};

/// Generates all legal moves for the side to move, in a stable order.
///
/// # Arguments
///
/// * `position` - The position to generate moves for
///
/// # Returns
///
/// * The legal moves, fully tagged
pub fn legal_moves(position: &Position) -> MoveList {
    pseudo_legal_moves(position)
        .into_iter()
        .map(|candidate| tag_consequences(position, candidate))
        .filter(|candidate| !candidate.has_tag(MoveTag::INVALIDATES_OWN_KING))
        .map(MoveBuilder::build)
        .collect()
}

/// Plays `candidate` and tags what it does to either king.
fn tag_consequences(position: &Position, mut candidate: MoveBuilder) -> MoveBuilder {
    let us = position.active_color();
    let next = position.apply(&candidate.build());
    if next.king_in_check(us) {
        candidate.add_tag(MoveTag::INVALIDATES_OWN_KING);
    }
    if next.king_in_check(us.other()) {
        candidate.add_tag(MoveTag::CHECK);
    }
    candidate
}

fn pseudo_legal_moves(position: &Position) -> Vec<MoveBuilder> {
    let mut moves = Vec::with_capacity(64);
    let board = position.board();
    let color = position.active_color();
    let own_occupancy = board.color_occupancy(color);
    let all_occupancy = board.occupancy();

    generate_pawn_moves(position, &mut moves);

    for piece_type in [PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen, PieceType::King] {
        for origin in extract_bits(board.pieces(piece_type, color)) {
            let attacks = match piece_type {
                PieceType::Knight => TABLES.knight_attacks[origin],
                PieceType::Bishop => RAYS.get_bishop_attacks(origin, all_occupancy),
                PieceType::Rook => RAYS.get_rook_attacks(origin, all_occupancy),
                PieceType::Queen => RAYS.get_queen_attacks(origin, all_occupancy),
                _ => TABLES.king_attacks[origin],
            };
            push_targets(position, origin, attacks & !own_occupancy, &mut moves);
        }
    }

    for side in CastlingSide::BOTH {
        if let Some(rook) = castling_rook_if_legal(position, color, side) {
            if let Some(king) = board.king_square(color) {
                let mut castle = MoveBuilder::new(king, rook, None);
                tag_960_castle(position, &mut castle);
                moves.push(castle);
            }
        }
    }

    moves
}

/// Adds one candidate per target square, tagging captures.
fn push_targets(position: &Position, origin: usize, targets: Bitboard, moves: &mut Vec<MoveBuilder>) {
    let Some(origin) = Square::from_index(origin) else {
        return;
    };
    for target in extract_bits(targets).into_iter().filter_map(Square::from_index) {
        moves.push(quiet_or_capture(position, origin, target, None));
    }
}

fn quiet_or_capture(position: &Position, origin: Square, target: Square, promotion: Option<PieceType>) -> MoveBuilder {
    let mut builder = MoveBuilder::new(origin, target, promotion);
    if position.piece_at(target).is_some() {
        builder.add_tag(MoveTag::CAPTURE);
    }
    builder
}

/// Generates pawn pushes, double pushes, captures, en passant and promotions.
///
/// Promotions produce one candidate per promotion piece.
fn generate_pawn_moves(position: &Position, moves: &mut Vec<MoveBuilder>) {
    let board = position.board();
    let color = position.active_color();
    let enemy_occupancy = board.color_occupancy(color.other());
    let all_occupancy = board.occupancy();
    let (forward, start_rank, last_rank): (i8, u8, u8) = match color {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    for origin in extract_bits(board.pieces(PieceType::Pawn, color)).into_iter().filter_map(Square::from_index) {
        let mut push = |target: Square, tag: MoveTag| {
            let promotions: &[PieceType] = if target.rank() == last_rank { &PieceType::PROMOTIONS } else { &[] };
            if promotions.is_empty() {
                let mut builder = quiet_or_capture(position, origin, target, None);
                builder.add_tag(tag);
                moves.push(builder);
            }
            for promotion in promotions {
                let mut builder = quiet_or_capture(position, origin, target, Some(*promotion));
                builder.add_tag(tag);
                moves.push(builder);
            }
        };

        let one_step = Square::new(origin.file(), (origin.rank() as i8 + forward) as u8);
        if let Some(single) = one_step.filter(|s| s.bit() & all_occupancy == 0) {
            push(single, MoveTag::empty());
            if origin.rank() == start_rank {
                let two_step = Square::new(origin.file(), (origin.rank() as i8 + 2 * forward) as u8);
                if let Some(double) = two_step.filter(|s| s.bit() & all_occupancy == 0) {
                    push(double, MoveTag::empty());
                }
            }
        }

        let attacks = TABLES.pawn_attacks[color.index()][origin.index()];
        for target in extract_bits(attacks & enemy_occupancy).into_iter().filter_map(Square::from_index) {
            push(target, MoveTag::empty());
        }

        if let Some(en_passant) = position.en_passant() {
            let victim = Square::new(en_passant.file(), origin.rank()).and_then(|s| position.piece_at(s));
            let enemy_pawn = victim.map_or(false, |p| p.piece_type == PieceType::Pawn && p.color != color);
            if attacks & en_passant.bit() != 0 && enemy_pawn && position.piece_at(en_passant).is_none() {
                push(en_passant, MoveTag::EN_PASSANT | MoveTag::CAPTURE);
            }
        }
    }
}

/// Checks if `color` may castle on `side` right now.
///
/// Chess960 rules: the right must be held, every square the king or the rook
/// crosses (destinations included) must be empty apart from those two
/// pieces, and no square the king stands on or crosses may be attacked.
/// Whether the king is attacked on arrival is left to the own-king filter.
///
/// # Returns
///
/// * The castling rook's square when castling is allowed
pub fn castling_rook_if_legal(position: &Position, color: Color, side: CastlingSide) -> Option<Square> {
    let board = position.board();
    let king = board.king_square(color)?;
    let rook = position.castling_rook(color, side)?;
    if king.rank() != color.back_rank() || board.piece_at(rook).map(|p| (p.piece_type, p.color)) != Some((PieceType::Rook, color)) {
        return None;
    }
    let (king_to, rook_to) = castle_destinations(color.back_rank(), side)?;

    let king_path = rank_span(king, king_to);
    let rook_path = rank_span(rook, rook_to);
    let blockers = board.occupancy() & !king.bit() & !rook.bit();
    if (king_path | rook_path) & blockers != 0 {
        return None;
    }

    let attacked = extract_bits(king_path)
        .into_iter()
        .filter_map(Square::from_index)
        .any(|square| position.is_square_attacked(square, color.other()));
    if attacked {
        return None;
    }
    Some(rook)
}

/// Squares between `a` and `b` on their rank, both ends included.
fn rank_span(a: Square, b: Square) -> Bitboard {
    let (low, high) = if a.file() <= b.file() { (a, b) } else { (b, a) };
    (low.file()..=high.file())
        .filter_map(|file| low.with_file(file))
        .fold(0, |span, square| span | square.bit())
}
