//! The engine facade: game lifecycle, the host-facing move API, and the
//! glue between board, search, transposition table and opening book.

mod io;
mod settings;

pub use io::{EngineIo, NullIo, StdoutIo};
pub use settings::Settings;

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::search::SearchContext;
use crate::board::{Board, FenError, GameState, Move, MoveList, COLORS};
use crate::book::Book;
use crate::tt::{TranspositionTable, DEFAULT_TT_ENTRIES};

/// Result of a host move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The string does not parse as a move.
    InvalidSyntax,
    /// Parses, but is not a legal move in this position.
    Illegal,
    /// Parsed, legal, and applied.
    Played,
}

impl MoveOutcome {
    /// The classic protocol encoding: −1 invalid, 0 illegal, 1 applied.
    #[must_use]
    pub fn as_code(self) -> i32 {
        match self {
            MoveOutcome::InvalidSyntax => -1,
            MoveOutcome::Illegal => 0,
            MoveOutcome::Played => 1,
        }
    }
}

/// Openers the engine is willing to play unsearched as the very first move
/// when the book is off.
const FIRST_MOVES: [&str; 6] = ["c2c4", "d2d4", "e2e4", "f2f4", "b1c3", "g1f3"];

/// Last ply at which the opening book is consulted.
const BOOK_PLY_LIMIT: usize = 16;

/// The chess engine. Owns every piece of mutable state: the position
/// store, the transposition table, the optional opening book, the PRNG and
/// the host callbacks. Strictly single-threaded.
pub struct Engine {
    board: Board,
    tt: TranspositionTable,
    book: Option<Book>,
    io: Box<dyn EngineIo>,
    rng: SmallRng,
    pub settings: Settings,
    game_state: GameState,
    engine_move: String,
    total_think_ms: u64,
    last_search_nodes: u64,
}

impl Engine {
    /// Engine with the default transposition table (2^23 entries, 128 MiB).
    #[must_use]
    pub fn new() -> Self {
        Engine::with_tt_entries(DEFAULT_TT_ENTRIES)
    }

    /// Engine with a custom transposition-table entry count (rounded down
    /// to a power of two). Tests use small tables.
    #[must_use]
    pub fn with_tt_entries(entries: usize) -> Self {
        Engine {
            board: Board::new(),
            tt: TranspositionTable::new(entries),
            book: None,
            io: Box::new(StdoutIo),
            rng: SmallRng::seed_from_u64(0x5EED_CAFE),
            settings: Settings::default(),
            game_state: GameState::Normal,
            engine_move: String::new(),
            total_think_ms: 0,
            last_search_nodes: 0,
        }
    }

    /// Replace the host output sink.
    pub fn set_io(&mut self, io: Box<dyn EngineIo>) {
        self.io = io;
    }

    /// Install an opening book.
    pub fn set_book(&mut self, book: Book) {
        self.book = Some(book);
    }

    /// Reseed the tie-breaking PRNG (book choice, randomized move order).
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Reset all game state and load a position: the given FEN, or the
    /// standard initial position for `None`. On a malformed FEN the default
    /// position is loaded and the error returned, so the engine is always
    /// left playable.
    pub fn init_game(&mut self, fen: Option<&str>) -> Result<(), FenError> {
        self.tt.clear();
        self.game_state = GameState::Normal;
        self.engine_move.clear();
        self.total_think_ms = 0;
        self.last_search_nodes = 0;

        match self.board.reset(fen) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::warn!("rejected FEN, loading initial position: {e}");
                let _ = self.board.reset(None);
                Err(e)
            }
        }
    }

    /// Parse and, if legal for the side to move, apply one move.
    pub fn try_move_str(&mut self, s: &str) -> MoveOutcome {
        let Some(m) = self.board.parse_move_str(s) else {
            return MoveOutcome::InvalidSyntax;
        };

        let side = self.board.side_bits();
        if self.board.at(i32::from(m.from())) & COLORS != side {
            return MoveOutcome::Illegal;
        }

        // The move must come out of the generator for its origin square;
        // the packed value carries the captured byte and the special tag,
        // so one bitwise compare checks everything at once.
        let mut list = MoveList::new();
        self.board.generate_from(i32::from(m.from()), &mut list);
        if !list.contains(m) {
            return MoveOutcome::Illegal;
        }

        if !self.board.try_move(m, side) {
            return MoveOutcome::Illegal;
        }
        self.io
            .log_info(&format!("Play {}: <- {}", self.board.ply(), s));
        MoveOutcome::Played
    }

    /// Replay a persisted game log, one move string per line. Stops at the
    /// first rejected line; returns the number of moves applied.
    pub fn replay_log(&mut self, text: &str) -> usize {
        let mut applied = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || self.try_move_str(line) != MoveOutcome::Played {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Choose and play the engine's move, then report the game state from
    /// the engine's perspective: `Lost` when already mated, `Stalemate`
    /// when without a legal move, otherwise the opponent's resulting
    /// status (`Normal`, `Check`, or `Mate` = engine win).
    pub fn compute_next_move(&mut self) -> GameState {
        let side = self.board.side_bits();

        if self.board.check_state_bits(side) == GameState::Mate {
            self.game_state = GameState::Lost;
            return self.game_state;
        }

        let mut chosen = Move::NONE;
        let mut played = false;

        if !self.settings.use_book && self.board.ply() == 0 {
            // Not worth a search: open with one of the vetted first moves.
            let pick = FIRST_MOVES[self.rng.gen_range(0..FIRST_MOVES.len())];
            if let Some(m) = self.board.parse_move_str(pick) {
                chosen = m;
            }
        } else if self.settings.use_book && self.board.ply() < BOOK_PLY_LIMIT {
            if let Some(book) = &self.book {
                let hash = self.board.position_hash();
                if let Some(moves) = book.probe(hash) {
                    self.io
                        .log_info(&format!("book hit for {hash:#018x}: {} moves", moves.len()));
                    chosen = Move::from_value(moves[self.rng.gen_range(0..moves.len())]);
                } else {
                    self.io.log_info(&format!("book miss for {hash:#018x}"));
                }
            }
        }

        if chosen.is_some() {
            played = self.board.try_move(chosen, side);
            if !played {
                log::warn!("book move {chosen} rejected, falling back to search");
            }
        }

        if !played {
            let started = Instant::now();
            let searched = {
                let mut ctx = SearchContext::new(
                    &mut self.board,
                    &mut self.tt,
                    self.io.as_ref(),
                    &mut self.rng,
                    &self.settings,
                    side,
                );
                let result = ctx.run();
                self.last_search_nodes = ctx.total_nodes;
                result
            };
            self.total_think_ms += started.elapsed().as_millis() as u64;

            let Some(m) = searched else {
                self.game_state = GameState::Stalemate;
                return self.game_state;
            };
            chosen = m;
            played = self.board.try_move(chosen, side);
        }

        if !played {
            // A searched root move passed the same legality probe already;
            // reaching this means the game buffer is exhausted.
            self.game_state = GameState::Stalemate;
            return self.game_state;
        }

        self.engine_move = chosen.to_string();
        self.io
            .log_info(&format!("Play {}: -> {}", self.board.ply(), self.engine_move));
        log::debug!(
            "total think time {} ms, last search {} nodes",
            self.total_think_ms,
            self.last_search_nodes
        );

        self.game_state = self.board.check_state_bits(side ^ COLORS);
        self.game_state
    }

    /// Step one confirmed ply back.
    pub fn user_undo_move(&mut self) {
        self.board.user_undo();
    }

    /// Step one confirmed ply forward.
    pub fn user_redo_move(&mut self) {
        self.board.user_redo();
    }

    /// Edit the current position (UI / setup). See [`Board::set_piece`].
    pub fn set_piece(&mut self, ch: char, rank: usize, file: usize) -> bool {
        self.board.set_piece(ch, rank, file)
    }

    /// Piece character on a square, `' '` when empty.
    #[must_use]
    pub fn get_piece(&self, rank: usize, file: usize) -> char {
        self.board.get_piece(rank, file)
    }

    /// Algebraic string of the move confirmed at ply `p` ("" if none).
    #[must_use]
    pub fn get_move_str(&self, p: usize) -> String {
        self.board.move_str(p)
    }

    /// The move chosen by the last `compute_next_move`.
    #[must_use]
    pub fn engine_move_str(&self) -> &str {
        &self.engine_move
    }

    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// Node expansions of the last search (0 for book moves).
    #[must_use]
    pub fn nodes_searched(&self) -> u64 {
        self.last_search_nodes
    }

    /// Cumulative think time across searches since the last game init.
    #[must_use]
    pub fn total_think_ms(&self) -> u64 {
        self.total_think_ms
    }

    /// Read access to the position, for host rendering and tests.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the position, for hosts that drive the board
    /// directly (position editors, analysis UIs).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
