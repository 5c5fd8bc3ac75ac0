//! Position evaluation.
//!
//! Internally scores are black-positive (the material table gives white
//! pieces negative values); the queried side's perspective is applied at the
//! exits. The lazy window exit keeps the full positional scan off the hot
//! path when the material sum alone already busts the (α, β) window.

use super::state::PLAYABLE_AREA;
use super::types::{
    Color, BLACK, B_KING, B_PAWN, KING, PIECE_VALUE, TYPE_MASK, WHITE, W_KING, W_PAWN,
};
use super::Board;

/// Widest remaining positional swing once material is known; roughly two
/// pawns, so a material score this far outside the window cannot come back.
const LAZY_MARGIN: i32 = 170;

/// Own piece parked directly in front of an own pawn.
const PAWN_BLOCK_PENALTY: i32 = 9;

/// Below this many pieces the endgame terms switch on.
const ENDGAME_PIECES: i32 = 24;

// Center-occupation bonuses, per square, one table per color. Pawn cells on
// the own back rank carry small negative values to keep the minor pieces'
// exits open. Kings are skipped entirely during the middlegame scan.
#[rustfmt::skip]
const BLACK_POS_BONUS: [i32; PLAYABLE_AREA + 2] = [
    0,  0,  0,  0,  0,  0, 0, 0, 0, 0,
    0,  0,  0,  0,  0,  0, 0, 0, 0, 0,
    0,  0,  2,  2,  2,  2, 0, 0, 0, 0,
    0,  0,  2,  4,  4,  2, 0, 0, 0, 0,
    0,  0,  4, 15, 15,  4, 0, 0, 0, 0,
    0,  0, 10,  8,  8, 10, 0, 0, 0, 0,
    0,  0,  0,  0,  0,  0, 0, 0, 0, 0,
    0, -5, -2,  0,  0,  0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const WHITE_POS_BONUS: [i32; PLAYABLE_AREA + 2] = [
    0, -5, -2,  0,  0,  0, 0, 0, 0, 0,
    0,  0,  0,  0,  0,  0, 0, 0, 0, 0,
    0,  0, 10,  8,  8, 10, 0, 0, 0, 0,
    0,  0,  4, 15, 15,  4, 0, 0, 0, 0,
    0,  0,  2,  4,  4,  2, 0, 0, 0, 0,
    0,  0,  2,  2,  2,  2, 0, 0, 0, 0,
    0,  0,  0,  0,  0,  0, 0, 0, 0, 0,
    0,  0,  0,  0,  0,  0, 0, 0, 0, 0,
];

// Endgame king placement: corners lose, the center ring is safe.
#[rustfmt::skip]
const KING_CORNER_MALUS: [i32; PLAYABLE_AREA + 2] = [
    14, 12, 10,  8,  8, 10, 12, 14, 0, 0,
    12,  9,  7,  6,  6,  7,  9, 12, 0, 0,
    10,  7,  4,  2,  2,  4,  7, 10, 0, 0,
     8,  6,  2,  0,  0,  2,  6,  8, 0, 0,
     8,  6,  2,  0,  0,  2,  6,  8, 0, 0,
    10,  7,  4,  2,  2,  4,  7, 10, 0, 0,
    12,  9,  7,  6,  6,  7,  9, 12, 0, 0,
    14, 12, 10,  8,  8, 10, 12, 14, 0, 0,
];

impl Board {
    /// Centipawn score of the current position from `side`'s perspective.
    ///
    /// With an unbounded window the lazy exit never fires and the full
    /// evaluation is returned.
    #[must_use]
    pub fn evaluate(&self, side: Color, alpha: i32, beta: i32) -> i32 {
        self.evaluate_bits(side.bits(), alpha, beta)
    }

    pub(crate) fn evaluate_bits(&self, side: u8, a: i32, b: i32) -> i32 {
        let ply = self.ply;
        let mut res = self.material[ply];

        // A capture sitting right at the horizon is optimistic: the capturer
        // may fall one ply past the search. Charge it half its own value.
        if ply > 0 {
            let last = self.moved[ply - 1];
            if last.captured() != 0 {
                res -= PIECE_VALUE[self.at(i32::from(last.to())) as usize] / 2;
            }
        }

        if side == BLACK {
            if res > b + LAZY_MARGIN || res < a - LAZY_MARGIN {
                return res;
            }
        } else if -res > b + LAZY_MARGIN || -res < a - LAZY_MARGIN {
            return -res;
        }

        for sq in 0..PLAYABLE_AREA as i32 {
            let piece = self.at(sq);
            if piece & TYPE_MASK == KING {
                continue;
            }
            if piece & BLACK != 0 {
                res += BLACK_POS_BONUS[sq as usize];
                // Black pawns advance downwards; sq - 10 is in front.
                if piece == B_PAWN && self.at(sq - 10) & BLACK != 0 {
                    res -= PAWN_BLOCK_PENALTY;
                }
            } else if piece & WHITE != 0 {
                res -= WHITE_POS_BONUS[sq as usize];
                if piece == W_PAWN && self.at(sq + 10) & WHITE != 0 {
                    res += PAWN_BLOCK_PENALTY;
                }
            }
        }

        if self.piece_count[ply] < ENDGAME_PIECES {
            for sq in 0..PLAYABLE_AREA as i32 {
                let piece = self.at(sq);
                // Run the pawns in, keep the kings out of the corners.
                if piece == W_PAWN {
                    res -= (sq / 10) << 3;
                } else if piece == B_PAWN {
                    res += (7 - sq / 10) << 3;
                } else if piece == W_KING {
                    res += KING_CORNER_MALUS[sq as usize];
                } else if piece == B_KING {
                    res -= KING_CORNER_MALUS[sq as usize];
                }
            }
        }

        if side == BLACK {
            res
        } else {
            -res
        }
    }
}
