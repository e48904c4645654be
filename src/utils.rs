//! Utility functions for bitboard and string handling.
//!
//! Bitboards index squares a1 = bit 0 through h8 = bit 63, the same
//! layout [`crate::square::Square`] uses.

/// Type alias for a 64-bit integer representing a chess board
pub type Bitboard = u64;

/// Sets a bit in a bitboard based on chess board coordinates.
///
/// This function takes chess board coordinates (1-8 for both row and column)
/// and returns a bitboard with only that square set. Coordinates outside the
/// board give an empty bitboard.
///
/// # Arguments
///
/// * `row` - The row number (1-8)
/// * `col` - The column number (1-8)
///
/// # Returns
///
/// * A bitboard with the specified bit set
pub fn set_bit(row: i32, col: i32) -> Bitboard {
    if row < 1 || row > 8 || col < 1 || col > 8 {
        return 0;
    }
    let bit_index = (col - 1) + (row - 1) * 8;
    1 << bit_index
}

/// Splits a string on the first occurrence of a delimiter.
///
/// # Arguments
///
/// * `s` - The string to split
/// * `delimiter` - The character to split on
///
/// # Returns
///
/// * A tuple containing the part before the delimiter and the part after
pub fn split_on(s: &str, delimiter: char) -> (&str, &str) {
    match s.find(delimiter) {
        None => (s, ""),
        Some(index) => (&s[..index], &s[index + delimiter.len_utf8()..]),
    }
}

/// Finds the index of the least significant set bit, if any.
pub fn bit_scan(bitboard: Bitboard) -> Option<usize> {
    if bitboard == 0 {
        None
    } else {
        Some(bitboard.trailing_zeros() as usize)
    }
}

/// Finds the index of the most significant set bit, if any.
pub fn bit_scan_backward(bitboard: Bitboard) -> Option<usize> {
    if bitboard == 0 {
        None
    } else {
        Some((63 - bitboard.leading_zeros()) as usize)
    }
}

/// Extracts all set bits from a bitboard into a vector.
///
/// The indices come out in ascending order, which keeps move generation
/// deterministic.
///
/// # Arguments
///
/// * `bitboard` - The bitboard to extract bits from
///
/// # Returns
///
/// * A vector containing the indices of all set bits
pub fn extract_bits(mut bitboard: Bitboard) -> Vec<usize> {
    let mut bits = Vec::with_capacity(bitboard.count_ones() as usize);
    while let Some(lsb) = bit_scan(bitboard) {
        bits.push(lsb);
        bitboard &= bitboard - 1;
    }
    bits
}

/// Renders a bitboard as an 8x8 grid of 1s and 0s, rank 8 first.
pub fn bitboard_to_string(bitboard: Bitboard) -> String {
    let mut out = String::with_capacity(8 * 17);
    for rank in (0..8).rev() {
        for file in 0..8 {
            let bit = (bitboard >> (rank * 8 + file)) & 1;
            out.push(if bit == 1 { '1' } else { '0' });
            if file < 7 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}
