//! Opening book: a packed open-addressed table of position fingerprints,
//! each with up to ten recorded continuations.
//!
//! The on-disk format is a power-of-two array of 48-byte little-endian
//! records: `hash: u64, move_count: i32, moves: [u32; 10]`. Empty slots are
//! all zero. Lookup probes linearly from `hash mod size` and stops at the
//! first zero-count slot.

use std::fs;
use std::io;
use std::path::Path;

use crate::board::Move;

/// Continuations stored per book position.
pub const BOOK_MOVE_SLOTS: usize = 10;

const RECORD_BYTES: usize = 8 + 4 + 4 * BOOK_MOVE_SLOTS;

#[derive(Clone, Copy, Default)]
struct BookEntry {
    hash: u64,
    count: u32,
    moves: [u32; BOOK_MOVE_SLOTS],
}

pub struct Book {
    entries: Vec<BookEntry>,
    mask: usize,
}

impl Book {
    /// Load a book file. Fails with `InvalidData` when the file is not a
    /// power-of-two number of whole records.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Book> {
        let bytes = fs::read(path)?;
        if bytes.is_empty() || bytes.len() % RECORD_BYTES != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "book file is not a whole number of records",
            ));
        }
        let count = bytes.len() / RECORD_BYTES;
        if !count.is_power_of_two() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "book table size must be a power of two",
            ));
        }

        let mut entries = Vec::with_capacity(count);
        for record in bytes.chunks_exact(RECORD_BYTES) {
            let hash = u64::from_le_bytes(record[0..8].try_into().expect("8 bytes"));
            let count = i32::from_le_bytes(record[8..12].try_into().expect("4 bytes"));
            let mut moves = [0u32; BOOK_MOVE_SLOTS];
            for (i, slot) in moves.iter_mut().enumerate() {
                let at = 12 + 4 * i;
                *slot = u32::from_le_bytes(record[at..at + 4].try_into().expect("4 bytes"));
            }
            entries.push(BookEntry {
                hash,
                count: count.max(0) as u32,
                moves,
            });
        }

        log::debug!("opening book loaded: {count} slots");
        let mask = count - 1;
        Ok(Book { entries, mask })
    }

    /// Build a book in memory from `(fingerprint, moves)` pairs, mainly for
    /// tests and book-building hosts. The table is sized to a power of two
    /// with at most half the slots filled.
    #[must_use]
    pub fn from_entries(positions: &[(u64, Vec<Move>)]) -> Book {
        let size = (positions.len() * 2).next_power_of_two().max(16);
        let mask = size - 1;
        let mut entries = vec![BookEntry::default(); size];

        for (hash, moves) in positions {
            let mut slot = (*hash as usize) & mask;
            while entries[slot].count != 0 {
                slot = (slot + 1) & mask;
            }
            let entry = &mut entries[slot];
            entry.hash = *hash;
            entry.count = moves.len().min(BOOK_MOVE_SLOTS) as u32;
            for (i, m) in moves.iter().take(BOOK_MOVE_SLOTS).enumerate() {
                entry.moves[i] = m.value();
            }
        }

        Book { entries, mask }
    }

    /// Recorded continuations for a position, if the book knows it.
    pub(crate) fn probe(&self, hash: u64) -> Option<&[u32]> {
        if self.entries.is_empty() {
            return None;
        }
        let mut slot = (hash as usize) & self.mask;
        let mut scanned = 0;
        while self.entries[slot].hash != hash && self.entries[slot].count != 0 {
            slot = (slot + 1) & self.mask;
            scanned += 1;
            if scanned > self.entries.len() {
                return None;
            }
        }
        let entry = &self.entries[slot];
        if entry.hash == hash && entry.count > 0 {
            Some(&entry.moves[..(entry.count as usize).min(BOOK_MOVE_SLOTS)])
        } else {
            None
        }
    }
}
