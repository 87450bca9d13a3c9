// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-width qstr hash.
//!
//! Must agree bit-for-bit with the interpreter's `qstr_compute_hash`:
//! djb2 with XOR, seeded at 5381, masked to the configured width.

const SEED: u64 = 5381;

/// Hash `bytes` into `width_bytes` bytes. Never returns 0.
///
/// The recurrence is exact modulo 2^64, and every mask applied here keeps
/// at most 64 bits, so wrapping arithmetic matches the unbounded reference.
/// `width_bytes` above 8 is treated as 8.
pub fn compute_hash(bytes: &[u8], width_bytes: u32) -> u64 {
    let hash = bytes
        .iter()
        .fold(SEED, |h, &b| h.wrapping_mul(33) ^ u64::from(b));
    let masked = hash & mask(width_bytes);
    // zero is reserved for "hash not computed"
    if masked == 0 {
        1
    } else {
        masked
    }
}

fn mask(width_bytes: u32) -> u64 {
    match 1u64.checked_shl(8 * width_bytes) {
        Some(limit) => limit - 1,
        None => u64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference(bytes: &[u8], width_bytes: u32) -> u64 {
        let mut h: u128 = 5381;
        for &b in bytes {
            h = h.wrapping_mul(33) ^ u128::from(b);
        }
        let masked = (h & ((1u128 << (8 * width_bytes)) - 1)) as u64;
        if masked == 0 {
            1
        } else {
            masked
        }
    }

    #[test]
    fn known_values() {
        // 5381 & 0xff == 5
        assert_eq!(compute_hash(b"", 1), 5);
        assert_eq!(compute_hash(b"", 2), 5381);
        // (5381 * 33) ^ 'a'
        assert_eq!(compute_hash(b"a", 2), ((5381u64 * 33) ^ 97) & 0xffff);
    }

    #[test]
    fn zero_width_always_yields_one() {
        assert_eq!(compute_hash(b"anything", 0), 1);
    }

    #[test]
    fn masked_zero_becomes_one() {
        // 5381 * 33 = 177573 = 0x2b5a5; xor with 0xa5 clears the low byte
        assert_eq!((5381u64 * 33) & 0xff, 0xa5);
        assert_eq!(compute_hash(&[0xa5], 1), 1);
    }

    proptest! {
        #[test]
        fn matches_recurrence(bytes in proptest::collection::vec(any::<u8>(), 1..64), width in 1u32..=8) {
            prop_assert_eq!(compute_hash(&bytes, width), reference(&bytes, width));
        }

        #[test]
        fn never_zero(bytes in proptest::collection::vec(any::<u8>(), 0..64), width in 1u32..=8) {
            prop_assert_ne!(compute_hash(&bytes, width), 0);
        }
    }
}
