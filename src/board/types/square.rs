//! Square indexing helpers.
//!
//! Squares use the mailbox index `10 * rank + file` with rank 0 = white's
//! back rank, giving values 0..=77 with gaps at files 8 and 9. The gap
//! columns and everything outside the playable window hold the border
//! sentinel, so sliding generators never need an explicit bounds check.

/// Out-of-board sentinel used for "no en-passant target".
pub(crate) const NO_SQUARE: u8 = 79;

#[inline]
pub(crate) const fn square(rank: usize, file: usize) -> u8 {
    (10 * rank + file) as u8
}

/// Rank (0-7) of a mailbox square index.
#[inline]
#[must_use]
pub const fn rank_of(sq: u8) -> usize {
    (sq / 10) as usize
}

/// File (0-7) of a mailbox square index.
#[inline]
#[must_use]
pub const fn file_of(sq: u8) -> usize {
    (sq % 10) as usize
}

/// Parse an algebraic square such as `e4` from two characters.
pub(crate) fn parse_square(file_ch: char, rank_ch: char) -> Option<u8> {
    if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
        return None;
    }
    let file = file_ch as usize - 'a' as usize;
    let rank = rank_ch as usize - '1' as usize;
    Some(square(rank, file))
}

/// Algebraic name of a square, e.g. `e4`.
pub(crate) fn square_str(sq: u8) -> String {
    let file = (b'a' + (sq % 10)) as char;
    let rank = (b'1' + (sq / 10)) as char;
    format!("{file}{rank}")
}
