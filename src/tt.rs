//! Transposition table: a fixed-size, always-replace cache of search
//! results keyed by the position fingerprint.
//!
//! Entries are 16 bytes. The low 16 bits of the stored fingerprint are
//! overlaid by the search depth and the bound kind, so a lookup matches on
//! the remaining high 48 bits and then cross-checks the stored move against
//! the actual board to weed out collisions.

use crate::board::{Board, Move, COLORS};

/// What a stored score means relative to the search window that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Fresh slot, installed by this probe; nothing usable yet.
    NewBoard,
    /// Same position, recorded at a different depth. The score is not
    /// trustworthy but the move remains a strong ordering hint.
    OtherDepth,
    /// Search failed low: the true score is at most the stored one.
    Upper,
    /// Search failed high: the true score is at least the stored one.
    Lower,
    Exact,
}

impl Bound {
    fn from_flag(flag: u8) -> Bound {
        match flag {
            1 => Bound::OtherDepth,
            2 => Bound::Upper,
            3 => Bound::Lower,
            4 => Bound::Exact,
            _ => Bound::NewBoard,
        }
    }

    fn flag(self) -> u8 {
        match self {
            Bound::NewBoard => 0,
            Bound::OtherDepth => 1,
            Bound::Upper => 2,
            Bound::Lower => 3,
            Bound::Exact => 4,
        }
    }
}

/// Result of a probe: the slot to store back into, and whatever the table
/// already knew about the position.
pub(crate) struct Probe {
    pub slot: usize,
    pub bound: Bound,
    pub score: i32,
    pub mv: Move,
}

#[derive(Clone, Copy, Default)]
struct Entry {
    key: u64,
    mv: u32,
    score: i32,
}

/// Overlaid field width in the stored key.
const KEY_LOW_BITS: u32 = 16;

pub struct TranspositionTable {
    entries: Box<[Entry]>,
    mask: usize,
    created: u64,
}

/// Default size: 2^23 entries, 128 MiB.
pub const DEFAULT_TT_ENTRIES: usize = 1 << 23;

impl TranspositionTable {
    /// Build a table with the given entry count, rounded down to a power of
    /// two (minimum 1024). All memory is allocated up front.
    #[must_use]
    pub fn new(entry_count: usize) -> Self {
        let mut entries = entry_count.next_power_of_two();
        if entries > entry_count {
            entries /= 2;
        }
        let entries = entries.max(1024);
        TranspositionTable {
            entries: vec![Entry::default(); entries].into_boxed_slice(),
            mask: entries - 1,
            created: 0,
        }
    }

    /// Entry count (a power of two).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Entries installed since construction or the last clear.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn clear(&mut self) {
        self.entries.fill(Entry::default());
        self.created = 0;
    }

    /// Look up the position. On a miss the slot is claimed for the queried
    /// fingerprint (zero move, `NewBoard`), which the node's final `store`
    /// then fills in.
    ///
    /// A surviving entry must pass the anti-collision cross-check: the
    /// stored move's origin square holds a piece of the side to move and
    /// its target square holds the recorded captured byte. The all-zero
    /// move of a half-installed entry can never pass it.
    pub(crate) fn probe(&mut self, board: &Board, hash: u64, depth: u8, side: u8) -> Probe {
        let slot = (hash as usize) & self.mask;
        let entry = &self.entries[slot];

        if (entry.key ^ hash) >> KEY_LOW_BITS == 0 {
            let mv = Move::from_value(entry.mv);
            if board.at(i32::from(mv.from())) & COLORS == side
                && board.at(i32::from(mv.to())) == mv.captured()
            {
                let stored_depth = (entry.key & 0xFF) as u8;
                let flag = ((entry.key >> 8) & 0xFF) as u8;
                let bound = if stored_depth == depth {
                    Bound::from_flag(flag)
                } else {
                    Bound::OtherDepth
                };
                return Probe {
                    slot,
                    bound,
                    score: entry.score,
                    mv,
                };
            }
        }

        let entry = &mut self.entries[slot];
        entry.key = hash;
        entry.mv = 0;
        self.created += 1;
        Probe {
            slot,
            bound: Bound::NewBoard,
            score: 0,
            mv: Move::NONE,
        }
    }

    /// Record a node result into the slot returned by `probe`, overwriting
    /// unconditionally. The depth and bound overlay the key's low bits.
    pub(crate) fn store(&mut self, slot: usize, depth: u8, bound: Bound, mv: Move, score: i32) {
        let entry = &mut self.entries[slot];
        entry.key = (entry.key & !0xFFFF) | u64::from(depth) | (u64::from(bound.flag()) << 8);
        entry.mv = mv.value();
        entry.score = score;
    }
}
