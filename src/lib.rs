//! philidor - a mailbox chess engine.
//!
//! A strictly single-threaded engine built around four subsystems: a
//! snapshot-stack board with O(1) make/unmake, a pseudo-legal move
//! generator with cheap legality filtering, an iterative-deepening
//! principal-variation search with transposition-table memoization, and a
//! hand-crafted evaluation function. An opening book and a narrow host API
//! (FEN init, move attempt, move compute, undo/redo, position editing)
//! round out the crate.
//!
//! ```
//! use philidor::{Engine, GameState, MoveOutcome};
//!
//! let mut engine = Engine::with_tt_entries(1 << 16);
//! engine.settings.use_book = false;
//! engine.settings.verbose = false;
//! engine.settings.time_budget_ms = 100;
//!
//! assert_eq!(engine.try_move_str("e2e4"), MoveOutcome::Played);
//! engine.compute_next_move();
//! assert!(!engine.engine_move_str().is_empty());
//! assert_ne!(engine.game_state(), GameState::Lost);
//! ```

pub mod board;
pub mod book;
pub mod engine;
pub mod tt;

mod hash;

pub use board::{Board, Color, FenError, GameState, Move, MoveList, MAX_PLY, START_FEN};
pub use book::Book;
pub use engine::{Engine, EngineIo, MoveOutcome, NullIo, Settings, StdoutIo};
pub use tt::{Bound, TranspositionTable, DEFAULT_TT_ENTRIES};
