//! Search behavior tests, driven through the engine facade.

use crate::board::GameState;
use crate::book::Book;
use crate::engine::{Engine, MoveOutcome, NullIo};

fn quiet_engine() -> Engine {
    let mut engine = Engine::with_tt_entries(1 << 16);
    engine.set_io(Box::new(NullIo));
    engine.settings.use_book = false;
    engine.settings.verbose = false;
    engine.settings.time_budget_ms = 60_000;
    engine
}

fn play_all(engine: &mut Engine, moves: &[&str]) {
    for s in moves {
        assert_eq!(engine.try_move_str(s), MoveOutcome::Played, "move {s}");
    }
}

#[test]
fn depth_one_search_finds_scholars_mate() {
    let mut engine = quiet_engine();
    engine.settings.level_max_max = 1;
    play_all(
        &mut engine,
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6"],
    );
    let state = engine.compute_next_move();
    assert_eq!(engine.engine_move_str(), "h5f7");
    assert_eq!(state, GameState::Mate);
}

#[test]
fn mated_engine_reports_lost() {
    let mut engine = quiet_engine();
    play_all(&mut engine, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(engine.compute_next_move(), GameState::Lost);
}

#[test]
fn back_rank_mate_in_one_is_found() {
    let mut engine = quiet_engine();
    engine.settings.level_max_max = 2;
    engine
        .init_game(Some("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1"))
        .expect("valid FEN");
    let state = engine.compute_next_move();
    assert_eq!(engine.engine_move_str(), "a1a8");
    assert_eq!(state, GameState::Mate);
}

#[test]
fn stalemated_engine_reports_pat() {
    let mut engine = quiet_engine();
    engine
        .init_game(Some("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"))
        .expect("valid FEN");
    assert_eq!(engine.compute_next_move(), GameState::Stalemate);
}

#[test]
fn first_move_shortcut_plays_a_vetted_opener() {
    let mut engine = quiet_engine();
    let state = engine.compute_next_move();
    assert_eq!(state, GameState::Normal);
    let openers = ["c2c4", "d2d4", "e2e4", "f2f4", "b1c3", "g1f3"];
    assert!(openers.contains(&engine.engine_move_str()));
    // No search ran for it.
    assert_eq!(engine.nodes_searched(), 0);
}

#[test]
fn book_move_is_played_without_searching() {
    let mut engine = quiet_engine();
    engine.settings.use_book = true;

    let hash = engine.board().position_hash();
    let mv = engine
        .board()
        .parse_move_str("e2e4")
        .expect("parses");
    engine.set_book(Book::from_entries(&[(hash, vec![mv])]));

    let state = engine.compute_next_move();
    assert_eq!(state, GameState::Normal);
    assert_eq!(engine.engine_move_str(), "e2e4");
    assert_eq!(engine.nodes_searched(), 0);
}

#[test]
fn book_miss_falls_back_to_search() {
    let mut engine = quiet_engine();
    engine.settings.use_book = true;
    engine.settings.level_max_max = 2;
    engine.set_book(Book::from_entries(&[(0x1234, vec![])]));

    let state = engine.compute_next_move();
    assert_eq!(state, GameState::Normal);
    assert!(!engine.engine_move_str().is_empty());
    assert!(engine.nodes_searched() > 0);
}

#[test]
fn deeper_search_still_answers_the_scholars_threat() {
    let mut engine = quiet_engine();
    engine.settings.level_max_max = 3;
    play_all(
        &mut engine,
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6"],
    );
    let state = engine.compute_next_move();
    assert_eq!(engine.engine_move_str(), "h5f7");
    assert_eq!(state, GameState::Mate);
}

#[test]
fn randomized_ordering_still_plays_legal_chess() {
    let mut engine = quiet_engine();
    engine.settings.randomize = true;
    engine.settings.level_max_max = 2;
    for _ in 0..4 {
        let state = engine.compute_next_move();
        assert!(
            matches!(state, GameState::Normal | GameState::Check),
            "unexpected early game end: {state:?}"
        );
    }
}

#[test]
fn search_respects_the_depth_cap() {
    let mut engine = quiet_engine();
    // Book enabled but absent, so the first move is searched rather than
    // taken from the opener shortcut.
    engine.settings.use_book = true;
    engine.settings.level_max_max = 1;
    let state = engine.compute_next_move();
    assert_eq!(state, GameState::Normal);
    // A depth-1 search of the initial position expands exactly the root's
    // legal moves.
    assert_eq!(engine.nodes_searched(), 20);
}
