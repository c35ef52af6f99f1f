//! Stream (voice) frame: the pre-FEC payload sent for every 40 ms voice
//! superframe after the LSF.
//!
//! The 16-bit frame number is Golay(24,12)-protected (two codewords, one
//! per byte) before the rate-1/2 convolutional stage, widening it to 48
//! bits. This is this implementation's resolution of an inconsistency
//! between the high-level description of the frame assembler (which lists
//! Golay coding as one of its stages) and the literal per-step algorithm
//! (which does not mention where); see `DESIGN.md`.

use crate::crc::{crc16, verify};
use crate::golay;

/// Marks the final frame of a transmission.
pub const LAST_FRAME_BIT: u16 = 0x8000;

/// A parsed stream (voice) frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFrame {
    pub frame_number: u16,
    pub voice: [u8; 16],
    pub meta: [u8; 12],
}

impl StreamFrame {
    /// Serialises to the 36-byte (288-bit) pre-FEC payload: Golay-protected
    /// frame number (6 bytes), voice (16 bytes), meta (12 bytes), CRC-16 (2
    /// bytes).
    pub fn to_bytes(&self) -> [u8; 36] {
        let mut out = [0u8; 36];
        let hi = golay::encode((self.frame_number >> 8) as u16 & 0xFF);
        let lo = golay::encode(self.frame_number as u16 & 0xFF);
        out[0..3].copy_from_slice(&hi.to_be_bytes()[1..4]);
        out[3..6].copy_from_slice(&lo.to_be_bytes()[1..4]);
        out[6..22].copy_from_slice(&self.voice);
        out[22..34].copy_from_slice(&self.meta);
        let crc = crc16(&out[0..34]);
        out[34..36].copy_from_slice(&crc.to_be_bytes());
        out
    }

    /// Parses a 36-byte pre-FEC payload, correcting the Golay-protected
    /// frame number if possible. Returns `None` if either Golay codeword is
    /// uncorrectable.
    pub fn from_bytes(bytes: &[u8; 36]) -> Option<StreamFrame> {
        let hi_code = u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]);
        let lo_code = u32::from_be_bytes([0, bytes[3], bytes[4], bytes[5]]);
        let hi = golay::decode(hi_code)?;
        let lo = golay::decode(lo_code)?;
        let frame_number = ((hi & 0xFF) << 8) | (lo & 0xFF);

        let mut voice = [0u8; 16];
        let mut meta = [0u8; 12];
        voice.copy_from_slice(&bytes[6..22]);
        meta.copy_from_slice(&bytes[22..34]);

        Some(StreamFrame { frame_number, voice, meta })
    }

    /// Checks the CRC-16 of a raw 36-byte stream frame payload.
    pub fn crc_valid(bytes: &[u8; 36]) -> bool {
        verify(bytes)
    }

    pub fn is_last(&self) -> bool {
        self.frame_number & LAST_FRAME_BIT != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let frame = StreamFrame {
            frame_number: 42,
            voice: [0x55; 16],
            meta: [0xAA; 12],
        };
        let bytes = frame.to_bytes();
        assert!(StreamFrame::crc_valid(&bytes));
        let parsed = StreamFrame::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn last_frame_bit_round_trips() {
        let frame = StreamFrame {
            frame_number: 7 | LAST_FRAME_BIT,
            voice: [0; 16],
            meta: [0; 12],
        };
        let bytes = frame.to_bytes();
        let parsed = StreamFrame::from_bytes(&bytes).unwrap();
        assert!(parsed.is_last());
    }

    #[test]
    fn single_bit_error_in_frame_number_is_corrected() {
        let frame = StreamFrame {
            frame_number: 200,
            voice: [0x11; 16],
            meta: [0x22; 12],
        };
        let mut bytes = frame.to_bytes();
        bytes[1] ^= 0x04;
        let parsed = StreamFrame::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.frame_number, frame.frame_number);
    }
}
