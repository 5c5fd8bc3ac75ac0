//! FEN input, the test-facing FEN serializer, and move-string parsing.

use super::error::FenError;
use super::state::{LEFT_CASTLE, MAX_GAME_PLY, RIGHT_CASTLE};
use super::types::{
    parse_square, Move, B_PAWN2, BLACK, BL_CASTLE, BR_CASTLE, EN_PASSANT, KING, L_ROOK, NO_SQUARE,
    PAWN, PROMOTE, ROOK, R_ROOK, TYPE_MASK, WHITE, WL_CASTLE, WR_CASTLE, W_PAWN2,
};
use super::Board;

/// Standard initial position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Load a position from a FEN string, or the initial position for
    /// `None`. On error the board is left cleared; callers that need a
    /// playable board afterwards reload the default position.
    ///
    /// Fields five and six are optional (half-move clock and full-move
    /// number default to 0 and 1). The full-move number and active color
    /// convert to the ply counter as `2 * (fm - 1) + (black ? 1 : 0)`.
    pub fn reset(&mut self, fen: Option<&str>) -> Result<(), FenError> {
        let fen = fen.unwrap_or(START_FEN);
        self.wipe();

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let black_to_move = match parts[1] {
            "w" => false,
            "b" => true,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut white_rights = 0u8;
        let mut black_rights = 0u8;
        for c in parts[2].chars() {
            match c {
                'K' => white_rights |= RIGHT_CASTLE,
                'Q' => white_rights |= LEFT_CASTLE,
                'k' => black_rights |= RIGHT_CASTLE,
                'q' => black_rights |= LEFT_CASTLE,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        let ep = if parts[3] == "-" {
            NO_SQUARE
        } else {
            let chars: Vec<char> = parts[3].chars().collect();
            let sq = (chars.len() == 2)
                .then(|| parse_square(chars[0], chars[1]))
                .flatten();
            sq.ok_or_else(|| FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            })?
        };

        let halfmove: u32 = parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        let full_moves: usize = parts.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        let ply = 2 * full_moves.saturating_sub(1) + usize::from(black_to_move);
        if ply >= MAX_GAME_PLY {
            return Err(FenError::MoveNumberOutOfRange { full_moves });
        }
        self.ply = ply;
        self.confirmed = ply;
        self.sterile = halfmove;

        // Open the playable window of the selected slot before placing.
        for rank in 0..8 {
            for file in 0..8 {
                self.set_piece(' ', rank, file);
            }
        }

        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    if !self.set_piece(c, 7 - rank_idx, file) {
                        return Err(FenError::InvalidPiece { char: c });
                    }
                    file += 1;
                }
            }
        }

        // Parity-indexed: entry `ply` belongs to the side on the move.
        let (stm_rights, other_rights) = if black_to_move {
            (black_rights, white_rights)
        } else {
            (white_rights, black_rights)
        };
        self.castles[ply] = stm_rights;
        self.castles[ply + 1] = other_rights;
        self.en_passant[ply] = ep;
        Ok(())
    }

    /// Serialize the current position to FEN. The board core never consumes
    /// this; it exists for round-trip tests and host display.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let ch = self.get_piece(rank, file);
                if ch == ' ' {
                    empty += 1;
                } else {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(ch);
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.ply & 1 == 0 { "w" } else { "b" };

        let white = self.castle_rights_bits(WHITE);
        let black = self.castle_rights_bits(BLACK);
        let mut castling = String::new();
        if white & RIGHT_CASTLE != 0 {
            castling.push('K');
        }
        if white & LEFT_CASTLE != 0 {
            castling.push('Q');
        }
        if black & RIGHT_CASTLE != 0 {
            castling.push('k');
        }
        if black & LEFT_CASTLE != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = match self.en_passant[self.ply] {
            NO_SQUARE => "-".to_string(),
            sq => super::types::square_str(sq),
        };

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.sterile,
            self.ply / 2 + 1
        )
    }

    /// Parse a long-algebraic move string (`e2e4`, `e7e8q`, `e1g1`) against
    /// the current position, rebuilding the captured cell and the special
    /// tag. Returns `None` on malformed input; legality is not checked.
    pub(crate) fn parse_move_str(&self, s: &str) -> Option<Move> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return None;
        }
        if chars.len() == 5 && chars[4] != 'q' {
            return None;
        }
        let from = i32::from(parse_square(chars[0], chars[1])?);
        let to = i32::from(parse_square(chars[2], chars[3])?);
        let captured = self.at(to);

        let piece_type = self.at(from) & TYPE_MASK;
        let mut special = 0u8;
        if piece_type == KING {
            if from == 4 && to == 6 {
                special = WR_CASTLE;
            } else if from == 4 && to == 2 {
                special = WL_CASTLE;
            } else if from == 74 && to == 76 {
                special = BR_CASTLE;
            } else if from == 74 && to == 72 {
                special = BL_CASTLE;
            }
        } else if piece_type <= PAWN {
            if to <= 7 || to >= 70 {
                special = PROMOTE;
            } else if to - from == 20 {
                special = W_PAWN2;
            } else if from - to == 20 {
                special = B_PAWN2;
            } else if captured == 0 && to % 10 != from % 10 {
                special = EN_PASSANT;
            }
        } else if piece_type == ROOK {
            if from == 0 || from == 70 {
                special = L_ROOK;
            } else if from == 7 || from == 77 {
                special = R_ROOK;
            }
        }

        Some(Move::new(from as u8, to as u8, captured, special))
    }
}
