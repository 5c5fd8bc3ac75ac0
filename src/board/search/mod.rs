//! Iterative-deepening principal variation search.
//!
//! One `SearchContext` lives for the duration of a single
//! `compute_next_move` call. It owns the killer slots and the node
//! counters; the board, the transposition table, the PRNG and the host
//! callbacks are borrowed from the engine.

mod ordering;
mod pvs;

use std::time::Instant;

use rand::rngs::SmallRng;

use crate::engine::{EngineIo, Settings};
use crate::tt::TranspositionTable;

use super::state::MAX_DEPTH;
use super::{Board, Move};

/// Window bound and timeout sentinel; no real score reaches it.
pub(crate) const INF: i32 = 400_000;
/// Returned for the side to move when it is already mated.
pub(crate) const MATE_SCORE: i32 = 300_000;
/// Magnitude used to steer both sides away from stalemate.
pub(crate) const PAT_SCORE: i32 = 100_000;
/// Above this magnitude a forced mate is in the line; deeper search is moot.
pub(crate) const MATE_CUTOFF: i32 = 199_800;
/// Node expansions between wall-clock reads.
const TIME_CHECK_INTERVAL: u64 = 10_000;

pub(crate) struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub tt: &'a mut TranspositionTable,
    pub io: &'a dyn EngineIo,
    pub rng: &'a mut SmallRng,
    pub settings: &'a Settings,
    /// Color bits of the side the engine is playing.
    pub engine_side: u8,
    /// Target depth of the current iteration.
    level_max: usize,
    /// Best quiet move per level from the current iteration (killer), and
    /// the one it displaced.
    killers: [Move; MAX_DEPTH + 1],
    secondary: [Move; MAX_DEPTH + 1],
    /// Node expansions in the current iteration.
    nodes: u64,
    next_time_check: u64,
    started: Instant,
    timed_out: bool,
    /// Node expansions summed over all iterations of this search.
    pub total_nodes: u64,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(
        board: &'a mut Board,
        tt: &'a mut TranspositionTable,
        io: &'a dyn EngineIo,
        rng: &'a mut SmallRng,
        settings: &'a Settings,
        engine_side: u8,
    ) -> Self {
        SearchContext {
            board,
            tt,
            io,
            rng,
            settings,
            engine_side,
            level_max: 0,
            killers: [Move::NONE; MAX_DEPTH + 1],
            secondary: [Move::NONE; MAX_DEPTH + 1],
            nodes: 0,
            next_time_check: TIME_CHECK_INTERVAL,
            started: Instant::now(),
            timed_out: false,
            total_nodes: 0,
        }
    }

    /// Iterative deepening: search depth 1, 2, ... until a mate is proven,
    /// the projected cost of the next iteration overruns the budget, or the
    /// depth cap is reached. Returns `None` when the root has no legal move
    /// (stalemate; mate is handled before the search starts).
    ///
    /// A timed-out iteration is discarded wholesale and the previous
    /// iteration's move stands, except that the very first iteration's
    /// partial pick is better than nothing.
    pub(crate) fn run(&mut self) -> Option<Move> {
        let cap = self.settings.level_max_max.min(MAX_DEPTH - 1);
        let mut engine_move = Move::NONE;
        let mut elapsed_ms: i64 = 0;
        self.started = Instant::now();
        self.level_max = 0;

        loop {
            self.killers[self.level_max] = Move::NONE;
            self.secondary[self.level_max] = Move::NONE;
            self.level_max += 1;
            self.nodes = 0;
            self.next_time_check = TIME_CHECK_INTERVAL;
            self.timed_out = false;

            let mut sequence = [Move::NONE; MAX_DEPTH];
            let max = self.pvs(0, -INF, INF, self.engine_side, &mut sequence);
            self.total_nodes += self.nodes;

            if self.timed_out {
                if engine_move.is_none() {
                    engine_move = sequence[0];
                }
                break;
            }
            if sequence[0].is_none() {
                return None;
            }
            engine_move = sequence[0];

            let level_ms = {
                let now = self.started.elapsed().as_millis() as i64;
                let level = now - elapsed_ms;
                elapsed_ms = now;
                level
            };

            if self.settings.verbose {
                let mut line = format!(
                    "{:2} {:7} {:4} {:8} ",
                    self.level_max,
                    max,
                    elapsed_ms / 10,
                    self.nodes
                );
                for mv in sequence.iter().take(self.level_max.min(13)) {
                    line.push(' ');
                    line.push_str(&mv.to_string());
                }
                self.io.send_line(&line);
            }

            if max > MATE_CUTOFF || max < -MATE_CUTOFF {
                break;
            }
            // Expect the next iteration to cost a multiple of this one; skip
            // it when the remaining budget clearly cannot cover that.
            if level_ms * 3 > self.settings.time_budget_ms as i64 - elapsed_ms {
                break;
            }
            if self.level_max >= cap {
                break;
            }
        }

        log::debug!(
            "search done: {} nodes, {} tt entries created",
            self.total_nodes,
            self.tt.created()
        );
        (engine_move.is_some()).then_some(engine_move)
    }
}
