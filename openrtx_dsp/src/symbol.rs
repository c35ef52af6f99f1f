//! The 4-FSK symbol alphabet and its mapping to/from bit pairs.

use crate::error::{DspError, Result};

/// One of the four M17 baseband deviation levels.
///
/// `i8` repr so a symbol is directly usable as a signed deviation scale
/// factor by the RRC shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Symbol {
    Neg3 = -3,
    Neg1 = -1,
    Pos1 = 1,
    Pos3 = 3,
}

impl Symbol {
    /// Maps a dibit (two bits, MSB first) to its symbol.
    ///
    /// `01 -> +3, 00 -> +1, 10 -> -1, 11 -> -3`. This table is our own
    /// fixed choice (the pipeline only needs to be internally consistent,
    /// not bit-exact with another M17 stack) and is used identically by
    /// both the frame assembler and disassembler.
    pub fn from_dibit(hi: bool, lo: bool) -> Symbol {
        match (hi, lo) {
            (false, true) => Symbol::Pos3,
            (false, false) => Symbol::Pos1,
            (true, false) => Symbol::Neg1,
            (true, true) => Symbol::Neg3,
        }
    }

    /// Inverse of [`Symbol::from_dibit`]: returns `(hi, lo)`.
    pub fn to_dibit(self) -> (bool, bool) {
        match self {
            Symbol::Pos3 => (false, true),
            Symbol::Pos1 => (false, false),
            Symbol::Neg1 => (true, false),
            Symbol::Neg3 => (true, true),
        }
    }

    /// Recovers a symbol from a quantised integer deviation level.
    pub fn from_level(level: i8) -> Result<Symbol> {
        match level {
            -3 => Ok(Symbol::Neg3),
            -1 => Ok(Symbol::Neg1),
            1 => Ok(Symbol::Pos1),
            3 => Ok(Symbol::Pos3),
            _ => Err(DspError::InvalidSymbol),
        }
    }
}

/// Converts a run of bits (MSB first, length a multiple of 2) into symbols.
pub fn bits_to_symbols(bits: &[bool]) -> Vec<Symbol> {
    bits.chunks_exact(2)
        .map(|pair| Symbol::from_dibit(pair[0], pair[1]))
        .collect()
}

/// Converts symbols back into the bit stream [`bits_to_symbols`] produced.
pub fn symbols_to_bits(symbols: &[Symbol]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(symbols.len() * 2);
    for s in symbols {
        let (hi, lo) = s.to_dibit();
        bits.push(hi);
        bits.push(lo);
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dibit_round_trips() {
        for hi in [false, true] {
            for lo in [false, true] {
                let s = Symbol::from_dibit(hi, lo);
                assert_eq!(s.to_dibit(), (hi, lo));
            }
        }
    }

    #[test]
    fn level_round_trips() {
        for level in [-3i8, -1, 1, 3] {
            let s = Symbol::from_level(level).unwrap();
            assert_eq!(s as i8, level);
        }
    }

    #[test]
    fn bits_symbols_round_trip() {
        let bits = [true, false, false, true, true, true, false, false];
        let symbols = bits_to_symbols(&bits);
        assert_eq!(symbols.len(), 4);
        assert_eq!(symbols_to_bits(&symbols), bits);
    }
}
