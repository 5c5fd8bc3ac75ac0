//! Move make/unmake and the confirmed-history operations.

use super::state::{BOARD_AREA, BOARD_STRIDE, LEFT_CASTLE, MAX_GAME_PLY, RIGHT_CASTLE};
use super::types::{
    Move, B_PAWN2, B_ROOK, BL_CASTLE, BR_CASTLE, EMPTY, EN_PASSANT, KING, L_ROOK, NO_SQUARE, PAWN,
    PIECE_VALUE, PROMOTE, QUEEN, R_ROOK, TYPE_MASK, WL_CASTLE, WR_CASTLE, W_PAWN, W_PAWN2, W_ROOK,
};
use super::Board;

impl Board {
    /// Apply a move. The previous snapshot stays intact in its slot, so
    /// `unmake` needs no work beyond stepping the ply back.
    ///
    /// Legality is the caller's concern; the search pairs every `make` with
    /// an `unmake` and filters self-check afterwards.
    pub(crate) fn make(&mut self, m: Move) {
        debug_assert!(self.ply + 2 < super::state::MAX_PLY);

        let slot = self.base();
        self.cells.copy_within(slot..slot + BOARD_AREA, slot + BOARD_STRIDE);

        let from = i32::from(m.from());
        let to = i32::from(m.to());
        let piece = self.at(from);
        let ply = self.ply;

        // A king move relocates the tracked king and burns both castle
        // rights; anything else carries the previous entry forward.
        let is_king = piece & TYPE_MASK == KING;
        self.king_pos[ply + 2] = if is_king { m.to() } else { self.king_pos[ply] };
        self.castles[ply + 2] = if is_king { 0 } else { self.castles[ply] };

        self.moved[ply] = m;
        self.ply += 1;
        let ply = self.ply;
        self.en_passant[ply] = NO_SQUARE;

        self.put(from, EMPTY);
        self.put(to, piece);

        self.material[ply] = self.material[ply - 1];
        self.piece_count[ply] = self.piece_count[ply - 1];
        if m.captured() != 0 {
            self.material[ply] -= PIECE_VALUE[m.captured() as usize];
            self.piece_count[ply] -= 1;
        }

        match m.special() {
            WR_CASTLE => {
                self.put(7, EMPTY);
                self.put(5, W_ROOK);
            }
            WL_CASTLE => {
                self.put(0, EMPTY);
                self.put(3, W_ROOK);
            }
            BR_CASTLE => {
                self.put(77, EMPTY);
                self.put(75, B_ROOK);
            }
            BL_CASTLE => {
                self.put(70, EMPTY);
                self.put(73, B_ROOK);
            }
            PROMOTE => {
                self.put(to, piece | QUEEN);
                self.material[ply] +=
                    PIECE_VALUE[(piece | QUEEN) as usize] - PIECE_VALUE[piece as usize];
            }
            W_PAWN2 => {
                self.en_passant[ply] = (from + 10) as u8;
            }
            B_PAWN2 => {
                self.en_passant[ply] = (from - 10) as u8;
            }
            EN_PASSANT => {
                // The victim pawn sits behind the destination square. A pawn
                // of the opposite color has the exact opposite value, which
                // collapses the material correction to one addition.
                if piece == W_PAWN {
                    self.put(to - 10, EMPTY);
                } else {
                    self.put(to + 10, EMPTY);
                }
                self.material[ply] += PIECE_VALUE[piece as usize];
                self.piece_count[ply] -= 1;
            }
            L_ROOK => {
                self.castles[ply + 1] &= !LEFT_CASTLE;
            }
            R_ROOK => {
                self.castles[ply + 1] &= !RIGHT_CASTLE;
            }
            _ => {}
        }
    }

    /// Revert the last `make`. The per-ply records are only overwritten by
    /// the next make, so repeated undo/redo is free.
    #[inline]
    pub(crate) fn unmake(&mut self) {
        self.ply -= 1;
    }

    /// Step one confirmed ply back, if any.
    pub fn user_undo(&mut self) {
        if self.ply > 0 {
            self.ply -= 1;
        }
    }

    /// Step one confirmed ply forward, up to the end of the recorded game.
    pub fn user_redo(&mut self) {
        if self.ply < self.confirmed {
            self.ply += 1;
        }
    }

    /// Apply a move only if it is legal for `side`, confirming it into the
    /// game history and updating the sterile-move counter. Refuses moves
    /// that would leave `side`'s king attacked or overrun the ply buffer.
    pub(crate) fn try_move(&mut self, m: Move, side: u8) -> bool {
        if self.ply >= MAX_GAME_PLY {
            return false;
        }
        let piece_type = self.at(i32::from(m.from())) & TYPE_MASK;

        self.make(m);
        if self.is_attacked_bits(side, i32::from(self.king_pos[self.ply + 1])) {
            self.unmake();
            return false;
        }

        self.confirmed = self.ply;
        self.sterile = if piece_type == PAWN || m.captured() != 0 {
            0
        } else {
            self.sterile + 1
        };
        true
    }
}
