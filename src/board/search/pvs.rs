//! The negamax recursion: alpha-beta with a principal-variation window,
//! transposition cutoffs, king-protector legality filtering, futility
//! pruning at the frontier, and root-level steering penalties.

use rand::Rng;

use crate::board::state::{MAX_DEPTH, PLAYABLE_AREA};
use crate::board::types::{GameState, Move, MoveList, BLACK, COLORS, KING, PAWN, ROOK, TYPE_MASK};
use crate::board::movegen::MAX_PROTECTORS;
use crate::tt::Bound;

use super::{SearchContext, INF, MATE_SCORE, PAT_SCORE, TIME_CHECK_INTERVAL};

/// Static-score margin under which a quiet frontier move cannot improve on
/// the best line already found.
const FUTILITY_MARGIN: i32 = 50;

impl SearchContext<'_> {
    /// Score the current position for `side` searching levels
    /// `level..level_max`, within the window `(a, b)`. `upper_sequence`
    /// receives the best line found from this node upward.
    ///
    /// Returns `-INF` when the iteration ran out of wall clock; the caller
    /// chain unwinds immediately and the driver discards the iteration.
    pub(crate) fn pvs(
        &mut self,
        level: usize,
        mut a: i32,
        mut b: i32,
        side: u8,
        upper_sequence: &mut [Move; MAX_DEPTH],
    ) -> i32 {
        let mut max = -MATE_SCORE;
        let mut mm_move = Move::NONE;
        let mut sequence = [Move::NONE; MAX_DEPTH];

        let check = match self.board.check_state_bits(side) {
            GameState::Mate => return max,
            GameState::Check => true,
            _ => false,
        };

        let depth = self.level_max - level;
        if depth == 0 {
            return self.board.evaluate_bits(side, a, b);
        }

        let hash = self.board.position_hash();
        let probe = self.tt.probe(self.board, hash, depth as u8, side);
        let old_a = a;
        match probe.bound {
            Bound::Lower => a = a.max(probe.score),
            Bound::Upper => b = b.min(probe.score),
            _ => {}
        }
        let trusted = matches!(probe.bound, Bound::Upper | Bound::Lower | Bound::Exact);
        if probe.bound == Bound::Exact || (a >= b && trusted) {
            // Cutoff straight from the table; surface the stored move as
            // this level's line and killer.
            self.secondary[level] = self.killers[level];
            self.killers[level] = probe.mv;
            sequence[level] = probe.mv;
            *upper_sequence = sequence;
            return probe.score;
        }

        let mut list = MoveList::new();
        let start = self
            .settings
            .randomize
            .then(|| self.rng.gen_range(0..PLAYABLE_AREA as i32));
        self.board.generate_side(side, &mut list, start);
        if list.is_empty() {
            // No pseudo-legal move at all. Whoever is boxed in, steer away:
            // stalemating the opponent throws away a won position just as
            // much as walking into one.
            return if side == self.engine_side {
                -PAT_SCORE
            } else {
                PAT_SCORE
            };
        }

        let mut protectors = [0i32; MAX_PROTECTORS];
        let mut protectors_nb = 0;
        if !check {
            protectors_nb = self.board.list_king_protectors(side, &mut protectors);
        }

        // Frontier futility: with a quiet board, a quiet move whose static
        // score plus a small margin cannot reach the current best is noise.
        let futility = if depth == 1 && !check && self.board.piece_count() > 23 {
            let material = self.board.material();
            FUTILITY_MARGIN + if side == BLACK { material } else { -material }
        } else {
            INF
        };

        self.sort_moves(&mut list, level, probe.mv);

        let mut one_possible = false;
        for i in 0..list.len() {
            let m = list[i];

            if futility < max && one_possible && m.captured() == 0 {
                continue;
            }

            self.board.make(m);

            // Moves from squares that cannot uncover a check skip the
            // attack probe entirely; king moves and protector moves (and
            // everything while in check) take the slow path.
            let needs_probe = check || protectors[..protectors_nb].contains(&i32::from(m.from()));
            if needs_probe
                && self
                    .board
                    .is_attacked_bits(side, i32::from(self.board.king_pos[self.board.ply + 1]))
            {
                self.board.unmake();
                continue;
            }

            let mut eval = if one_possible {
                let zero = -self.pvs(level + 1, -a - 1, -a, side ^ COLORS, &mut sequence);
                if a < zero && zero < b && depth > 2 {
                    -self.pvs(level + 1, -b, -a, side ^ COLORS, &mut sequence)
                } else {
                    zero
                }
            } else {
                one_possible = true;
                -self.pvs(level + 1, -b, -a, side ^ COLORS, &mut sequence)
            };

            self.board.unmake();

            if self.timed_out {
                return -INF;
            }
            self.nodes += 1;
            if self.nodes >= self.next_time_check {
                if self.started.elapsed().as_millis() as u64 >= self.settings.time_budget_ms {
                    self.timed_out = true;
                    return -INF;
                }
                self.next_time_check = self.nodes + TIME_CHECK_INTERVAL;
            }

            if level == 0 {
                eval -= self.root_penalties(m);
            }

            if eval > max {
                max = eval;
                mm_move = m;
                self.secondary[level] = self.killers[level];
                self.killers[level] = m;
                sequence[level] = m;
                *upper_sequence = sequence;

                if max >= b {
                    break;
                }
                a = a.max(max);
            }
        }

        if !one_possible {
            return if side == self.engine_side {
                -PAT_SCORE
            } else {
                PAT_SCORE
            };
        }

        let bound = if max <= old_a {
            Bound::Upper
        } else if max >= b {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(probe.slot, depth as u8, bound, mm_move, max);
        max
    }

    /// Mild score penalties applied to root moves only: they steer the game
    /// shape (shuffle avoidance, development) without polluting the tree.
    fn root_penalties(&self, m: Move) -> i32 {
        let mut penalty = 0;
        let piece_type = self.board.at(i32::from(m.from())) & TYPE_MASK;
        let ply = self.board.ply;

        // Drifting toward the 50-move horizon without progress.
        if self.board.sterile > 24 && piece_type != PAWN && m.captured() == 0 {
            penalty += self.board.sterile as i32;
        }

        // Keep the king home and the heavy pieces quiet in the opening.
        if piece_type == KING {
            penalty += 8;
        }
        if piece_type >= ROOK && ply < 10 {
            penalty += 20;
        }

        // Undoing or repeating our own recent moves, with growing severity
        // the longer the shuffle pattern.
        if ply > 6 {
            let moved = &self.board.moved;
            if m.from() == moved[ply - 2].to() && m.to() == moved[ply - 2].from() {
                penalty += 10;
            }
            if m.from() == moved[ply - 4].from() && m.to() == moved[ply - 4].to() {
                penalty += 30;
            }
            if m.from() == moved[ply - 6].to() && m.to() == moved[ply - 6].from() {
                penalty += 100;
            }
            if ply > 12 {
                if m.from() == moved[ply - 8].from() && m.to() == moved[ply - 8].to() {
                    penalty += 300;
                }
                if m.from() == moved[ply - 12].from() && m.to() == moved[ply - 12].to() {
                    penalty += 600;
                }
            }
        }
        penalty
    }
}
