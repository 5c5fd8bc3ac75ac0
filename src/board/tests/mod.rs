//! Board unit tests.

mod eval;
mod fen;
mod search;

use super::{Board, Move, MoveList};

/// Parse a FEN that the test asserts to be valid.
pub(crate) fn board_from(fen: &str) -> Board {
    let mut board = Board::new();
    board.reset(Some(fen)).expect("valid test FEN");
    board
}

/// Fully legal moves for the side to move: pseudo-legal generation plus the
/// slow self-check filter.
pub(crate) fn legal_moves(board: &mut Board) -> Vec<Move> {
    let side = board.side_bits();
    let mut list = MoveList::new();
    board.generate_side(side, &mut list, None);

    let mut legal = Vec::new();
    for i in 0..list.len() {
        let m = list[i];
        board.make(m);
        if !board.is_attacked_bits(side, i32::from(board.king_pos[board.ply + 1])) {
            legal.push(m);
        }
        board.unmake();
    }
    legal
}

/// Find the legal move matching a move string, panicking if absent.
pub(crate) fn find_move(board: &mut Board, s: &str) -> Move {
    let m = board.parse_move_str(s).expect("move string parses");
    assert!(
        legal_moves(board).contains(&m),
        "expected {s} to be legal here"
    );
    m
}

/// Play a sequence of confirmed moves, panicking on any illegal one.
pub(crate) fn play_moves(board: &mut Board, moves: &[&str]) {
    for s in moves {
        let m = find_move(board, s);
        let side = board.side_bits();
        assert!(board.try_move(m, side), "move {s} rejected");
    }
}

/// Everything make/unmake must restore, captured in one comparable value.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct Snapshot {
    fen: String,
    hash: u64,
    material: i32,
    piece_count: i32,
    playable: Vec<u8>,
}

pub(crate) fn snapshot(board: &Board) -> Snapshot {
    Snapshot {
        fen: board.to_fen(),
        hash: board.position_hash(),
        material: board.material(),
        piece_count: board.piece_count(),
        playable: board.playable().to_vec(),
    }
}

#[cfg(feature = "serde")]
#[test]
fn moves_serialize_as_their_packed_value() {
    let board = Board::new();
    let m = board.parse_move_str("e2e4").expect("parses");
    let json = serde_json::to_string(&m).expect("serializes");
    let back: Move = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(m, back);
}
