//! Move ordering: transposition move, killers, MVV/LVA captures, quiets.
//!
//! Captures are placed by sparse indexing instead of sorting: each
//! (attacker, victim) pair owns a run of slots in a scratch array laid out
//! most-valuable-victim first and least-valuable-attacker second, so
//! compacting the array yields the capture order without any comparison.

use once_cell::sync::Lazy;

use crate::board::types::{Move, MoveList, KING, PAWN, TYPE_MASK};

/// Victim types in MVV order, attacker types in LVA order.
const VICTIM_ORDER: [u8; 5] = [7, 6, 5, 4, 2]; // Q R B N P
const ATTACKER_ORDER: [u8; 6] = [2, 4, 5, 6, 7, 3]; // P N B R Q K

/// Slots reserved per (attacker, victim) run. Pawns get a wider run: with
/// two capture diagonals each, eight pawns can stack more same-pair
/// captures than any other piece type.
const fn run_len(attacker: u8) -> usize {
    if attacker == PAWN {
        16
    } else {
        8
    }
}

/// First three scratch slots are reserved for the transposition move and
/// the two killers.
const RESERVED: usize = 3;

struct AttackIndex {
    /// Start slot per `attacker << 3 | victim` pair.
    start: [usize; 64],
    len: usize,
}

static ATTACK_INDEX: Lazy<AttackIndex> = Lazy::new(|| {
    let mut start = [RESERVED; 64];
    let mut at = RESERVED;
    for victim in VICTIM_ORDER {
        for attacker in ATTACKER_ORDER {
            start[((attacker as usize) << 3) | victim as usize] = at;
            at += run_len(attacker);
        }
    }
    // King "captures" never materialize from legal play; aim them at the
    // reserved head like the other impossible pairs.
    AttackIndex { start, len: at }
});

/// Scratch capacity: reserved head plus every pair's run.
const SCRATCH_LEN: usize = RESERVED + 5 * (16 + 4 * 8 + 8);

impl super::SearchContext<'_> {
    /// Reorder `list` in place: TT move first, then the two killer slots of
    /// this level, then captures by MVV/LVA, then quiets in generation
    /// order.
    pub(super) fn sort_moves(&self, list: &mut MoveList, level: usize, table_move: Move) {
        debug_assert_eq!(SCRATCH_LEN, ATTACK_INDEX.len);

        let mut cursor = ATTACK_INDEX.start;
        let mut ranked = [0u32; SCRATCH_LEN];
        let mut quiets = [0u32; 256];
        let mut quiet_count = 0;

        for m in list.iter() {
            let val = m.value();
            if val == table_move.value() {
                ranked[0] = val;
            } else if val == self.killers[level].value() {
                ranked[1] = val;
            } else if val == self.secondary[level].value() {
                ranked[2] = val;
            } else if m.captured() != 0 {
                let attacker = (self.board.at(i32::from(m.from())) & TYPE_MASK) as usize;
                let victim = (m.captured() & TYPE_MASK) as usize;
                let pair = (attacker << 3) | victim;
                let at = cursor[pair];
                if at < SCRATCH_LEN {
                    ranked[at] = val;
                    cursor[pair] = at + 1;
                }
            } else {
                quiets[quiet_count] = val;
                quiet_count += 1;
            }
        }

        let ranked_end = cursor[((KING as usize) << 3) | PAWN as usize].max(RESERVED);

        list.clear();
        for &val in &ranked[..ranked_end] {
            if val != 0 {
                list.push(Move::from_value(val));
            }
        }
        for &val in &quiets[..quiet_count] {
            list.push(Move::from_value(val));
        }
    }
}
