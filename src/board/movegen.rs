//! Pseudo-legal move generation, attack detection and the check oracle.
//!
//! Generation is pseudo-legal: moves may leave the own king attacked. The
//! search filters self-check cheaply through `list_king_protectors`; the
//! slow path (make, probe, unmake) is only taken for king moves, moves from
//! protector squares, and everything while in check.

use super::state::{LEFT_CASTLE, PLAYABLE_AREA, RIGHT_CASTLE};
use super::types::{
    Color, GameState, Move, MoveList, B_KING, B_PAWN, B_PAWN2, B_ROOK, BISHOP, BLACK, BL_CASTLE,
    BR_CASTLE, COLORS, EMPTY, EN_PASSANT, KING, KNIGHT, L_ROOK, PAWN, PROMOTE, QUEEN, ROOK,
    R_ROOK, STOP, TYPE_MASK, W_KING, W_PAWN, W_PAWN2, W_ROOK, WHITE, WL_CASTLE, WR_CASTLE,
};
use super::Board;

/// Diagonal ray steps (queen/bishop).
const QB_DIRS: [i32; 4] = [9, 11, -9, -11];
/// Orthogonal ray steps (queen/rook).
const QR_DIRS: [i32; 4] = [10, 1, -10, -1];
const KNIGHT_JUMPS: [i32; 8] = [21, 19, 12, 8, -8, -12, -19, -21];
const KING_STEPS: [i32; 8] = [-11, -10, -9, 9, 10, 11, -1, 1];

/// Upper bound on king-protector entries: the king itself plus one per ray.
pub(crate) const MAX_PROTECTORS: usize = 9;

impl Board {
    // =======================================================================
    // Attack detection
    // =======================================================================

    /// Would a king of `side` standing on `pos` be in check?
    pub(crate) fn is_attacked_bits(&self, side: u8, pos: i32) -> bool {
        let fwd = if side == WHITE { 10 } else { -10 };
        let other = COLORS ^ side;

        // Enemy pawn or king on the two forward diagonals: PAWN and KING are
        // the two smallest type codes, so one compare covers both.
        if self.at(pos + fwd - 1) ^ other <= KING {
            return true;
        }
        if self.at(pos + fwd + 1) ^ other <= KING {
            return true;
        }

        // Enemy king on the six remaining adjacent squares.
        if self.at(pos - fwd + 1) ^ other == KING {
            return true;
        }
        if self.at(pos - fwd - 1) ^ other == KING {
            return true;
        }
        if self.at(pos + 1) ^ other == KING {
            return true;
        }
        if self.at(pos - 1) ^ other == KING {
            return true;
        }
        if self.at(pos + 10) ^ other == KING {
            return true;
        }
        if self.at(pos - 10) ^ other == KING {
            return true;
        }

        // Sliders: walk each ray to the first non-empty cell; border cells
        // are non-empty by construction so the walk always terminates.
        for dir in QB_DIRS {
            let mut p = pos + dir;
            while self.at(p) == EMPTY {
                p += dir;
            }
            let hit = self.at(p) ^ other;
            if hit == QUEEN || hit == BISHOP {
                return true;
            }
        }
        for dir in QR_DIRS {
            let mut p = pos + dir;
            while self.at(p) == EMPTY {
                p += dir;
            }
            let hit = self.at(p) ^ other;
            if hit == QUEEN || hit == ROOK {
                return true;
            }
        }

        for jump in KNIGHT_JUMPS {
            if self.at(pos + jump) ^ other == KNIGHT {
                return true;
            }
        }

        false
    }

    /// Public wrapper of the attack probe: is the square attacked by the
    /// opponent of `side` (i.e. would `side`'s king be in check there)?
    #[must_use]
    pub fn is_attacked(&self, side: Color, rank: usize, file: usize) -> bool {
        if rank > 7 || file > 7 {
            return false;
        }
        self.is_attacked_bits(side.bits(), i32::from(super::types::square(rank, file)))
    }

    /// Own squares whose movement could uncover a check on `side`'s king:
    /// for each ray from the king holding exactly one own piece before an
    /// enemy slider of the matching kind, that piece's square. The king's
    /// own square always leads the list, since a king move also needs a
    /// fresh check probe.
    pub(crate) fn list_king_protectors(&self, side: u8, out: &mut [i32; MAX_PROTECTORS]) -> usize {
        let other = side ^ COLORS;
        let k_pos = self.king_square_bits(side);

        out[0] = k_pos;
        let mut count = 1;

        for dir in QB_DIRS {
            let mut p = k_pos + dir;
            while self.at(p) == EMPTY {
                p += dir;
            }
            if self.at(p) & COLORS == side {
                out[count] = p;
                let mut q = p + dir;
                while self.at(q) == EMPTY {
                    q += dir;
                }
                let hit = self.at(q) ^ other;
                if hit == QUEEN || hit == BISHOP {
                    count += 1;
                }
            }
        }
        for dir in QR_DIRS {
            let mut p = k_pos + dir;
            while self.at(p) == EMPTY {
                p += dir;
            }
            if self.at(p) & COLORS == side {
                out[count] = p;
                let mut q = p + dir;
                while self.at(q) == EMPTY {
                    q += dir;
                }
                let hit = self.at(q) ^ other;
                if hit == QUEEN || hit == ROOK {
                    count += 1;
                }
            }
        }
        count
    }

    // =======================================================================
    // Pseudo-legal generation
    // =======================================================================

    #[inline]
    fn add_move(&self, list: &mut MoveList, from: i32, to: i32, special: u8) {
        list.push(Move::new(from as u8, to as u8, self.at(to), special));
    }

    /// One sliding step: blocked cells (own color or border) end the ray
    /// without a move; enemy cells end it with a capture.
    #[inline]
    fn slide_step(&self, list: &mut MoveList, blocking: u8, from: i32, to: i32) -> bool {
        if self.at(to) & blocking != 0 {
            return false;
        }
        self.add_move(list, from, to, 0);
        self.at(to) == EMPTY
    }

    #[inline]
    fn crawler_step(&self, list: &mut MoveList, blocking: u8, from: i32, to: i32) {
        if self.at(to) & blocking == 0 {
            self.add_move(list, from, to, 0);
        }
    }

    /// Rook sliding step; moves leaving a home corner are tagged so the
    /// matching castle right dies on make.
    #[inline]
    fn rook_step(&self, list: &mut MoveList, blocking: u8, from: i32, to: i32) -> bool {
        let special = match from {
            0 | 70 => L_ROOK,
            7 | 77 => R_ROOK,
            _ => 0,
        };
        if self.at(to) & blocking != 0 {
            return false;
        }
        self.add_move(list, from, to, special);
        self.at(to) == EMPTY
    }

    /// Forward pawn step onto an empty square; landing on a back rank
    /// upgrades the tag to promotion.
    #[inline]
    fn pawn_push(&self, list: &mut MoveList, from: i32, to: i32, special: u8) -> bool {
        if self.at(to) != EMPTY {
            return false;
        }
        let special = if !(8..70).contains(&to) { PROMOTE } else { special };
        self.add_move(list, from, to, special);
        true
    }

    fn white_pawn_capture(&self, list: &mut MoveList, from: i32, to: i32) {
        if self.at(to) & BLACK != 0 {
            let special = if to >= 70 { PROMOTE } else { 0 };
            self.add_move(list, from, to, special);
        } else if i32::from(self.en_passant[self.ply]) == to {
            self.add_move(list, from, to, EN_PASSANT);
        }
    }

    fn black_pawn_capture(&self, list: &mut MoveList, from: i32, to: i32) {
        if self.at(to) & WHITE != 0 {
            let special = if to < 8 { PROMOTE } else { 0 };
            self.add_move(list, from, to, special);
        } else if i32::from(self.en_passant[self.ply]) == to {
            self.add_move(list, from, to, EN_PASSANT);
        }
    }

    /// Append the pseudo-legal moves of the piece on `pos` to `list`.
    /// Empty and border squares contribute nothing.
    pub fn generate_from(&self, pos: i32, list: &mut MoveList) {
        let piece = self.at(pos);
        let blocking = (piece & COLORS) + STOP;

        match piece & TYPE_MASK {
            KING => {
                for step in KING_STEPS {
                    self.crawler_step(list, blocking, pos, pos + step);
                }
                if piece == W_KING && pos == 4 {
                    // Kingside: f1/g1 empty, rook home, right intact, and
                    // none of e1/f1/g1 attacked.
                    if self.at(5) == EMPTY
                        && self.at(6) == EMPTY
                        && self.at(7) == W_ROOK
                        && self.castles[self.ply] & RIGHT_CASTLE != 0
                        && !self.is_attacked_bits(WHITE, 4)
                        && !self.is_attacked_bits(WHITE, 5)
                        && !self.is_attacked_bits(WHITE, 6)
                    {
                        self.add_move(list, pos, 6, WR_CASTLE);
                    }
                    if self.at(3) == EMPTY
                        && self.at(2) == EMPTY
                        && self.at(1) == EMPTY
                        && self.at(0) == W_ROOK
                        && self.castles[self.ply] & LEFT_CASTLE != 0
                        && !self.is_attacked_bits(WHITE, 4)
                        && !self.is_attacked_bits(WHITE, 3)
                        && !self.is_attacked_bits(WHITE, 2)
                    {
                        self.add_move(list, pos, 2, WL_CASTLE);
                    }
                } else if piece == B_KING && pos == 74 {
                    if self.at(75) == EMPTY
                        && self.at(76) == EMPTY
                        && self.at(77) == B_ROOK
                        && self.castles[self.ply] & RIGHT_CASTLE != 0
                        && !self.is_attacked_bits(BLACK, 74)
                        && !self.is_attacked_bits(BLACK, 75)
                        && !self.is_attacked_bits(BLACK, 76)
                    {
                        self.add_move(list, pos, 76, BR_CASTLE);
                    }
                    if self.at(73) == EMPTY
                        && self.at(72) == EMPTY
                        && self.at(71) == EMPTY
                        && self.at(70) == B_ROOK
                        && self.castles[self.ply] & LEFT_CASTLE != 0
                        && !self.is_attacked_bits(BLACK, 74)
                        && !self.is_attacked_bits(BLACK, 73)
                        && !self.is_attacked_bits(BLACK, 72)
                    {
                        self.add_move(list, pos, 72, BL_CASTLE);
                    }
                }
            }
            QUEEN => {
                for dir in QR_DIRS {
                    let mut to = pos + dir;
                    while self.slide_step(list, blocking, pos, to) {
                        to += dir;
                    }
                }
                for dir in QB_DIRS {
                    let mut to = pos + dir;
                    while self.slide_step(list, blocking, pos, to) {
                        to += dir;
                    }
                }
            }
            BISHOP => {
                for dir in QB_DIRS {
                    let mut to = pos + dir;
                    while self.slide_step(list, blocking, pos, to) {
                        to += dir;
                    }
                }
            }
            ROOK => {
                for dir in QR_DIRS {
                    let mut to = pos + dir;
                    while self.rook_step(list, blocking, pos, to) {
                        to += dir;
                    }
                }
            }
            KNIGHT => {
                for jump in KNIGHT_JUMPS {
                    self.crawler_step(list, blocking, pos, pos + jump);
                }
            }
            PAWN => {
                if piece == W_PAWN {
                    if self.pawn_push(list, pos, pos + 10, 0) && pos < 20 {
                        self.pawn_push(list, pos, pos + 20, W_PAWN2);
                    }
                    self.white_pawn_capture(list, pos, pos + 9);
                    self.white_pawn_capture(list, pos, pos + 11);
                } else if piece == B_PAWN {
                    if self.pawn_push(list, pos, pos - 10, 0) && pos >= 60 {
                        self.pawn_push(list, pos, pos - 20, B_PAWN2);
                    }
                    self.black_pawn_capture(list, pos, pos - 9);
                    self.black_pawn_capture(list, pos, pos - 11);
                }
            }
            _ => {}
        }
    }

    /// Append the pseudo-legal moves of every `side` piece. With a start
    /// square the scan begins there and wraps, which perturbs move order for
    /// equal-score tie breaking without changing the generated set.
    pub(crate) fn generate_side(&self, side: u8, list: &mut MoveList, start: Option<i32>) {
        match start {
            Some(s) => {
                let mut from = s;
                for _ in 0..PLAYABLE_AREA {
                    if from == PLAYABLE_AREA as i32 {
                        from = 0;
                    }
                    if self.at(from) & side != 0 {
                        self.generate_from(from, list);
                    }
                    from += 1;
                }
            }
            None => {
                for from in 0..PLAYABLE_AREA as i32 {
                    if self.at(from) & side != 0 {
                        self.generate_from(from, list);
                    }
                }
            }
        }
    }

    // =======================================================================
    // Check oracle
    // =======================================================================

    pub(crate) fn check_state_bits(&mut self, side: u8) -> GameState {
        if !self.is_attacked_bits(side, self.king_square_bits(side)) {
            return GameState::Normal;
        }
        // In check: mate unless some pseudo-legal move leaves the king safe.
        let mut list = MoveList::new();
        self.generate_side(side, &mut list, None);
        for i in 0..list.len() {
            let m = list[i];
            self.make(m);
            let safe = !self.is_attacked_bits(side, i32::from(self.king_pos[self.ply + 1]));
            self.unmake();
            if safe {
                return GameState::Check;
            }
        }
        GameState::Mate
    }

    /// Check/mate status of a side: `Normal`, `Check`, or `Mate`.
    /// Stalemate is not detected here; the search recognizes it from an
    /// empty legal-move set while not in check.
    pub fn check_state(&mut self, side: Color) -> GameState {
        self.check_state_bits(side.bits())
    }

    /// Count of leaf nodes of the legal move tree at `depth`, the standard
    /// move-generator correctness probe.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let side = self.side_bits();
        let mut list = MoveList::new();
        self.generate_side(side, &mut list, None);
        let mut nodes = 0;
        for i in 0..list.len() {
            let m = list[i];
            self.make(m);
            if !self.is_attacked_bits(side, i32::from(self.king_pos[self.ply + 1])) {
                nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
            }
            self.unmake();
        }
        nodes
    }
}
