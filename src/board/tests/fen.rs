//! FEN and move-string parsing tests.

use super::{board_from, legal_moves};
use crate::board::types::{NO_SQUARE, W_PAWN2};
use crate::board::{Board, Color, FenError, START_FEN};

#[test]
fn default_position_round_trips() {
    let board = Board::new();
    assert_eq!(board.to_fen(), START_FEN);
    assert_eq!(board.ply(), 0);
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.material(), 0);
    assert_eq!(board.piece_count(), 32);
    assert_eq!(board.castle_rights(Color::White), (true, true));
    assert_eq!(board.castle_rights(Color::Black), (true, true));
}

#[test]
fn ply_derives_from_fullmove_and_color() {
    let board = board_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert_eq!(board.ply(), 1);

    let board = board_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 3");
    assert_eq!(board.ply(), 4);

    let board = board_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 3");
    assert_eq!(board.ply(), 5);
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn en_passant_square_parses_to_the_skipped_rank() {
    let board = board_from("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1");
    // d6 is rank index 5, file 3.
    assert_eq!(board.en_passant_target(), Some((5, 3)));
    assert_eq!(board.en_passant[board.ply()], 53);
}

#[test]
fn halfmove_clock_loads_sterile_counter() {
    let board = board_from("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(board.sterile_moves(), 1);
    assert_eq!(board.ply(), 14);
}

#[test]
fn malformed_fens_are_rejected() {
    let mut board = Board::new();
    assert!(matches!(
        board.reset(Some("only three fields here")),
        Err(FenError::TooFewParts { .. })
    ));
    assert!(matches!(
        board.reset(Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1")),
        Err(FenError::InvalidSideToMove { .. })
    ));
    assert!(matches!(
        board.reset(Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KXkq - 0 1")),
        Err(FenError::InvalidCastling { char: 'X' })
    ));
    assert!(matches!(
        board.reset(Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1")),
        Err(FenError::InvalidEnPassant { .. })
    ));
    assert!(matches!(
        board.reset(Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1")),
        Err(FenError::InvalidPiece { char: 'X' })
    ));
}

#[test]
fn fen_round_trip_preserves_position() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ];
    for fen in fens {
        let board = board_from(fen);
        let reparsed = board_from(&board.to_fen());
        assert_eq!(board.to_fen(), reparsed.to_fen(), "round trip of {fen}");
        assert_eq!(board.position_hash(), reparsed.position_hash());
        assert_eq!(board.material(), reparsed.material());
    }
}

#[test]
fn move_strings_round_trip_for_all_legal_moves() {
    let fens = [
        START_FEN,
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1",
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    ];
    for fen in fens {
        let mut board = board_from(fen);
        for m in legal_moves(&mut board) {
            let reparsed = board.parse_move_str(&m.to_string());
            assert_eq!(reparsed, Some(m), "round trip of {m} in {fen}");
        }
    }
}

#[test]
fn move_string_rebuilds_special_tags() {
    let board = Board::new();
    let m = board.parse_move_str("e2e4").expect("parses");
    assert_eq!(m.special(), W_PAWN2);
    assert_eq!(m.captured(), 0);

    assert!(board.parse_move_str("e2").is_none());
    assert!(board.parse_move_str("i2i4").is_none());
    assert!(board.parse_move_str("e2e9").is_none());
    assert!(board.parse_move_str("e7e8x").is_none());
}

#[test]
fn castle_and_promotion_strings_parse() {
    let board = board_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let kingside = board.parse_move_str("e1g1").expect("parses");
    assert_eq!(kingside.special(), crate::board::types::WR_CASTLE);
    let queenside = board.parse_move_str("e1c1").expect("parses");
    assert_eq!(queenside.special(), crate::board::types::WL_CASTLE);

    let board = board_from("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let promo = board.parse_move_str("a7a8q").expect("parses");
    assert_eq!(promo.special(), crate::board::types::PROMOTE);
    // The trailing q is optional; promotion is implied by the target rank.
    assert_eq!(board.parse_move_str("a7a8"), Some(promo));
}

#[test]
fn fen_without_optional_fields_defaults() {
    let board = board_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
    assert_eq!(board.sterile_moves(), 0);
    assert_eq!(board.ply(), 0);
    assert_eq!(board.en_passant[board.ply()], NO_SQUARE);
}
