//! Rate-1/2 convolutional coding and Viterbi decoding.
//!
//! Shift-register width [`crate::constants::CONV_CONSTRAINT_LEN`] (6 bits,
//! current bit included), generator polynomials
//! [`crate::constants::CONV_POLY_1`] (`0x31`) and
//! [`crate::constants::CONV_POLY_2`] (`0x27`). The register resets to zero
//! at the start of every frame; there is no flush/tail-biting step, so
//! encoding `n` input bits always produces exactly `2n` output bits.

use crate::constants::{CONV_POLY_1, CONV_POLY_2};

const REG_MASK: u32 = 0x3F;
const STATE_BITS: u32 = 5;
const NUM_STATES: usize = 1 << STATE_BITS;

fn parity(x: u32) -> u32 {
    x.count_ones() & 1
}

/// Encodes a bit sequence (MSB-first conceptually, but order here is just
/// "input order") into `2 * bits.len()` output bits.
pub fn encode(bits: &[bool]) -> Vec<bool> {
    let mut out = Vec::with_capacity(bits.len() * 2);
    let mut reg: u32 = 0;
    for &bit in bits {
        reg = ((reg << 1) | bit as u32) & REG_MASK;
        out.push(parity(reg & CONV_POLY_1) != 0);
        out.push(parity(reg & CONV_POLY_2) != 0);
    }
    out
}

#[derive(Clone, Copy)]
struct Trellis {
    next_state: [[u32; 2]; NUM_STATES],
    out1: [[u32; 2]; NUM_STATES],
    out2: [[u32; 2]; NUM_STATES],
}

fn build_trellis() -> Trellis {
    let mut next_state = [[0u32; 2]; NUM_STATES];
    let mut out1 = [[0u32; 2]; NUM_STATES];
    let mut out2 = [[0u32; 2]; NUM_STATES];
    for state in 0..NUM_STATES as u32 {
        for bit in 0..2u32 {
            let reg = ((state << 1) | bit) & REG_MASK;
            next_state[state as usize][bit as usize] = reg & ((1 << STATE_BITS) - 1);
            out1[state as usize][bit as usize] = parity(reg & CONV_POLY_1);
            out2[state as usize][bit as usize] = parity(reg & CONV_POLY_2);
        }
    }
    Trellis { next_state, out1, out2 }
}

/// Hard-decision Viterbi decoder.
///
/// `coded` must have even length; returns `coded.len() / 2` decoded bits.
/// The register is assumed to start (and is not forced to end) in state 0,
/// matching [`encode`]'s no-flush convention.
pub fn decode(coded: &[bool]) -> Vec<bool> {
    assert!(coded.len() % 2 == 0, "coded length must be even");
    let trellis = build_trellis();
    let steps = coded.len() / 2;

    const INF: u32 = u32::MAX / 2;
    let mut path_metric = [INF; NUM_STATES];
    path_metric[0] = 0;

    // backtrace[t][state] = (prev_state, input_bit)
    let mut backtrace: Vec<[(u32, bool); NUM_STATES]> = Vec::with_capacity(steps);

    for t in 0..steps {
        let r1 = coded[2 * t] as u32;
        let r2 = coded[2 * t + 1] as u32;

        let mut new_metric = [INF; NUM_STATES];
        let mut step_back = [(0u32, false); NUM_STATES];

        for state in 0..NUM_STATES {
            if path_metric[state] >= INF {
                continue;
            }
            for bit in 0..2u32 {
                let ns = trellis.next_state[state][bit as usize] as usize;
                let branch_metric = (trellis.out1[state][bit as usize] ^ r1)
                    + (trellis.out2[state][bit as usize] ^ r2);
                let candidate = path_metric[state] + branch_metric;
                if candidate < new_metric[ns] {
                    new_metric[ns] = candidate;
                    step_back[ns] = (state as u32, bit != 0);
                }
            }
        }

        path_metric = new_metric;
        backtrace.push(step_back);
    }

    let mut best_state = 0usize;
    let mut best_metric = path_metric[0];
    for (state, &m) in path_metric.iter().enumerate() {
        if m < best_metric {
            best_metric = m;
            best_state = state;
        }
    }

    let mut bits = vec![false; steps];
    let mut state = best_state as u32;
    for t in (0..steps).rev() {
        let (prev, bit) = backtrace[t][state as usize];
        bits[t] = bit;
        state = prev;
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_from_bytes(bytes: &[u8]) -> Vec<bool> {
        let mut out = Vec::with_capacity(bytes.len() * 8);
        for &b in bytes {
            for i in (0..8).rev() {
                out.push((b >> i) & 1 != 0);
            }
        }
        out
    }

    #[test]
    fn clean_channel_round_trips() {
        let bits = bits_from_bytes(b"M17 test frame payload bytes!!");
        let coded = encode(&bits);
        assert_eq!(coded.len(), bits.len() * 2);
        let decoded = decode(&coded);
        assert_eq!(decoded, bits);
    }

    #[test]
    fn sparse_bit_errors_are_corrected() {
        let bits = bits_from_bytes(b"voice frame payload goes here..");
        let mut coded = encode(&bits);
        coded[3] = !coded[3];
        coded[40] = !coded[40];
        coded[100] = !coded[100];
        let decoded = decode(&coded);
        assert_eq!(decoded, bits);
    }
}
