//! Frame assembler (TX path): wraps an LSF or stream-frame payload with
//! convolutional coding, puncturing, interleaving and scrambling, and emits
//! a full 192-symbol M17 frame.

use crate::constants::{FRAME_SYMBOLS, LSF_SYNCWORD, STREAM_SYNCWORD};
use crate::conv;
use crate::frame::StreamFrame;
use crate::interleave;
use crate::lsf::Lsf;
use crate::puncture::{LSF_PATTERN, STREAM_PATTERN};
use crate::scramble;
use crate::symbol::{self, Symbol};

fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut out = Vec::with_capacity(bytes.len() * 8);
    for &b in bytes {
        for i in (0..8).rev() {
            out.push((b >> i) & 1 != 0);
        }
    }
    out
}

fn u16_to_symbols(value: u16) -> Vec<Symbol> {
    let bits: Vec<bool> = (0..16).rev().map(|i| (value >> i) & 1 != 0).collect();
    symbol::bits_to_symbols(&bits)
}

fn finish_frame(syncword: u16, payload_bits: Vec<bool>) -> [i8; FRAME_SYMBOLS] {
    let payload_symbols = symbol::bits_to_symbols(&payload_bits);
    let sync_symbols = u16_to_symbols(syncword);

    let mut out = [0i8; FRAME_SYMBOLS];
    for (i, s) in sync_symbols.iter().chain(payload_symbols.iter()).enumerate() {
        out[i] = *s as i8;
    }
    out
}

/// Assembles an LSF into its 192-symbol on-air frame.
pub fn assemble_lsf(lsf: &Lsf) -> [i8; FRAME_SYMBOLS] {
    let bits = bytes_to_bits(&lsf.to_bytes());
    let coded = conv::encode(&bits);
    let punctured = LSF_PATTERN.puncture(&coded);
    let interleaved = interleave::interleave(&punctured);
    let scrambled = scramble::scramble(&interleaved);
    finish_frame(LSF_SYNCWORD, scrambled)
}

/// Assembles a stream (voice) frame into its 192-symbol on-air frame.
pub fn assemble_stream(frame: &StreamFrame) -> [i8; FRAME_SYMBOLS] {
    let bits = bytes_to_bits(&frame.to_bytes());
    let coded = conv::encode(&bits);
    let punctured = STREAM_PATTERN.puncture(&coded);
    let interleaved = interleave::interleave(&punctured);
    let scrambled = scramble::scramble(&interleaved);
    finish_frame(STREAM_SYNCWORD, scrambled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsign;
    use crate::lsf::FrameType;

    #[test]
    fn lsf_frame_starts_with_syncword_symbols() {
        let lsf = Lsf {
            src: callsign::encode("N0CALL").unwrap(),
            dst: callsign::encode("W1AW").unwrap(),
            frame_type: FrameType(1),
            meta: [0; 14],
        };
        let frame = assemble_lsf(&lsf);
        assert_eq!(&frame[0..8], &[3, 3, 3, 3, -3, -3, 3, -3]);
    }

    #[test]
    fn stream_frame_starts_with_inverted_syncword_symbols() {
        let frame = StreamFrame { frame_number: 1, voice: [0; 16], meta: [0; 12] };
        let symbols = assemble_stream(&frame);
        assert_eq!(&symbols[0..8], &[-3, -3, -3, -3, 3, 3, -3, 3]);
    }

    #[test]
    fn produces_full_length_frame() {
        let lsf = Lsf {
            src: callsign::encode("N0CALL").unwrap(),
            dst: callsign::encode("W1AW").unwrap(),
            frame_type: FrameType(0),
            meta: [0; 14],
        };
        let frame = assemble_lsf(&lsf);
        assert_eq!(frame.len(), FRAME_SYMBOLS);
    }
}
