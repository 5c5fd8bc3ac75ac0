//! Pengy hash: the 64-bit position fingerprint used by the transposition
//! table and the opening book.
//!
//! Book files on disk are keyed by this exact function, so every detail is
//! load-bearing: the final partial block inherits the trailing bytes of the
//! previous full block instead of being zero padded, and lanes load
//! little-endian on every platform.

fn mix(s: &mut [u64; 4], b: &[u64; 4], seed: u64) {
    s[0] = s[0].wrapping_add(s[1]).wrapping_add(b[3]);
    s[1] = s[0].wrapping_add(s[1].rotate_left(14)).wrapping_add(seed);
    s[2] = s[2].wrapping_add(s[3]).wrapping_add(b[2]);
    s[3] = s[2].wrapping_add(s[3].rotate_left(23));
    s[0] = s[0].wrapping_add(s[3]).wrapping_add(b[1]);
    s[3] = s[0] ^ s[3].rotate_left(16);
    s[2] = s[2].wrapping_add(s[1]).wrapping_add(b[0]);
    s[1] = s[2] ^ s[1].rotate_left(40);
}

fn load_lanes(b: &mut [u64; 4], bytes: &[u8; 32]) {
    for (lane, chunk) in b.iter_mut().zip(bytes.chunks_exact(8)) {
        *lane = u64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
    }
}

/// Hash `data` under a 32-bit seed. The seed is folded into the six
/// finalization rounds only, as in the reference implementation.
pub(crate) fn pengyhash(data: &[u8], seed: u32) -> u64 {
    let mut b = [0u64; 4];
    let mut s = [0u64, 0, 0, data.len() as u64];
    let mut block = [0u8; 32];

    let mut chunks = data.chunks_exact(32);
    for chunk in chunks.by_ref() {
        block.copy_from_slice(chunk);
        load_lanes(&mut b, &block);
        mix(&mut s, &b, 0);
    }

    let rem = chunks.remainder();
    if !rem.is_empty() {
        // Overlay the remainder on the previous block's bytes.
        block[..rem.len()].copy_from_slice(rem);
        load_lanes(&mut b, &block);
    }

    for _ in 0..6 {
        mix(&mut s, &b, u64::from(seed));
    }

    s[0].wrapping_add(s[1])
        .wrapping_add(s[2])
        .wrapping_add(s[3])
}

#[cfg(test)]
mod tests {
    use super::pengyhash;

    #[test]
    fn deterministic() {
        let data = [7u8; 78];
        assert_eq!(pengyhash(&data, 42), pengyhash(&data, 42));
    }

    #[test]
    fn seed_changes_hash() {
        let data = [7u8; 78];
        assert_ne!(pengyhash(&data, 0), pengyhash(&data, 1));
    }

    #[test]
    fn content_changes_hash() {
        let a = [0u8; 78];
        let mut b = [0u8; 78];
        b[40] = 1;
        assert_ne!(pengyhash(&a, 0), pengyhash(&b, 0));
    }

    #[test]
    fn length_changes_hash() {
        let data = [3u8; 96];
        assert_ne!(pengyhash(&data[..64], 0), pengyhash(&data[..96], 0));
    }

    #[test]
    fn short_input_hashes() {
        // Below one block the lanes start from zero.
        assert_ne!(pengyhash(&[1, 2, 3], 0), pengyhash(&[1, 2, 4], 0));
        assert_ne!(pengyhash(&[], 0), pengyhash(&[0], 0));
    }
}
