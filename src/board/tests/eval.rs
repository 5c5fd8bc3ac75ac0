//! Evaluator tests.

use super::{board_from, play_moves};
use crate::board::{Board, Color};

const WIDE: (i32, i32) = (-400_000, 400_000);

#[test]
fn start_position_is_balanced() {
    let board = Board::new();
    assert_eq!(board.evaluate(Color::White, WIDE.0, WIDE.1), 0);
    assert_eq!(board.evaluate(Color::Black, WIDE.0, WIDE.1), 0);
}

#[test]
fn perspectives_are_exact_negations() {
    let board = board_from("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let white = board.evaluate(Color::White, WIDE.0, WIDE.1);
    let black = board.evaluate(Color::Black, WIDE.0, WIDE.1);
    assert_eq!(white, -black);
}

#[test]
fn lazy_window_exit_returns_the_material_score() {
    // White is a queen up; full evaluation also sees the queen's square
    // bonus, so the lazy and full scores differ by exactly that term.
    let board = board_from("k7/8/8/8/8/8/8/KQ6 w - - 0 1");
    let full = board.evaluate(Color::White, WIDE.0, WIDE.1);
    let lazy = board.evaluate(Color::White, -50, 50);
    assert_eq!(lazy, 900);
    assert_eq!(full, 895);
}

#[test]
fn windows_containing_the_score_return_the_full_evaluation() {
    // When the material sum sits inside the margin-widened window the lazy
    // exit must not fire, and the narrow-window score equals the full one.
    let board = board_from("k7/8/8/8/8/8/8/KQ6 w - - 0 1");
    let full = board.evaluate(Color::White, WIDE.0, WIDE.1);
    assert_eq!(board.evaluate(Color::White, 0, 2000), full);

    let board = Board::new();
    assert_eq!(board.evaluate(Color::White, -100, 100), 0);
    assert_eq!(board.evaluate(Color::Black, -100, 100), 0);
}

#[test]
fn own_piece_in_front_of_own_pawn_costs_nine() {
    // Identical material; only the rook's square differs, and both squares
    // carry a zero positional bonus. Blocking the pawn costs exactly 9.
    let mut blocked = board_from("8/8/8/8/8/8/8/8 w - - 0 1");
    blocked.set_piece('p', 6, 1);
    blocked.set_piece('r', 5, 1);

    let mut open = board_from("8/8/8/8/8/8/8/8 w - - 0 1");
    open.set_piece('p', 6, 1);
    open.set_piece('r', 5, 0);

    let blocked_eval = blocked.evaluate(Color::Black, WIDE.0, WIDE.1);
    let open_eval = open.evaluate(Color::Black, WIDE.0, WIDE.1);
    assert_eq!(blocked_eval, open_eval - 9);
}

#[test]
fn white_pawn_blockage_mirrors_black() {
    let mut blocked = board_from("8/8/8/8/8/8/8/8 w - - 0 1");
    blocked.set_piece('P', 1, 1);
    blocked.set_piece('R', 2, 1);

    let mut open = board_from("8/8/8/8/8/8/8/8 w - - 0 1");
    open.set_piece('P', 1, 1);
    open.set_piece('R', 2, 0);

    let blocked_eval = blocked.evaluate(Color::White, WIDE.0, WIDE.1);
    let open_eval = open.evaluate(Color::White, WIDE.0, WIDE.1);
    assert_eq!(blocked_eval, open_eval - 9);
}

#[test]
fn capture_at_the_horizon_is_discounted() {
    // The same position, reached by playing the capture versus loaded cold
    // from FEN: the played version discounts the capturing pawn by half
    // its value (50) from the mover's opponent... i.e. black sees +50.
    let mut played = Board::new();
    play_moves(&mut played, &["e2e4", "d7d5", "e4d5"]);

    let cold = board_from("rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2");
    assert_eq!(played.to_fen(), cold.to_fen());

    let played_eval = played.evaluate(Color::Black, WIDE.0, WIDE.1);
    let cold_eval = cold.evaluate(Color::Black, WIDE.0, WIDE.1);
    assert_eq!(played_eval, cold_eval + 50);
}

#[test]
fn endgame_prefers_the_king_away_from_corners() {
    let cornered = board_from("7k/8/8/8/8/8/8/K7 w - - 0 1");
    let centered = board_from("7k/8/8/8/8/8/8/3K4 w - - 0 1");
    let cornered_eval = cornered.evaluate(Color::White, WIDE.0, WIDE.1);
    let centered_eval = centered.evaluate(Color::White, WIDE.0, WIDE.1);
    assert!(centered_eval > cornered_eval);
}

#[test]
fn endgame_rewards_advanced_pawns() {
    let home = board_from("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let advanced = board_from("4k3/8/4P3/8/8/8/8/4K3 w - - 0 1");
    let home_eval = home.evaluate(Color::White, WIDE.0, WIDE.1);
    let advanced_eval = advanced.evaluate(Color::White, WIDE.0, WIDE.1);
    assert!(advanced_eval > home_eval);
}
