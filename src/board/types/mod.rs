//! Core value types: piece encoding, squares, moves, game states.

mod moves;
mod piece;
mod square;

pub use moves::{Move, MoveList};
pub use piece::Color;
pub use square::{file_of, rank_of};

pub(crate) use moves::{
    B_PAWN2, BL_CASTLE, BR_CASTLE, EN_PASSANT, L_ROOK, PROMOTE, R_ROOK, W_PAWN2, WL_CASTLE,
    WR_CASTLE,
};
pub(crate) use piece::{
    piece_from_char, piece_to_char, B_KING, B_PAWN, B_ROOK, BISHOP, BLACK, COLORS, EMPTY, KING,
    KNIGHT, PAWN, PIECE_VALUE, QUEEN, ROOK, STOP, TYPE_MASK, W_KING, W_PAWN, W_ROOK, WHITE,
};
pub(crate) use square::{parse_square, square, square_str, NO_SQUARE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a position from one side's point of view.
///
/// `Mate` after an engine move means the opponent is mated; `Lost` means the
/// engine itself was already mated when asked to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameState {
    Normal,
    Check,
    Mate,
    Lost,
    Stalemate,
}
